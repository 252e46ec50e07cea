//! Unit tests for the decision strategies.

#[cfg(test)]
mod helpers {
    use mob_core::TransportMode;

    use crate::Candidate;

    pub fn commute_pair() -> Vec<Candidate> {
        vec![
            Candidate::new(TransportMode::Car, vec![10.0, 5.0, 1.0, 0.2]),
            Candidate::new(TransportMode::Bike, vec![0.0, 20.0, 0.5, 0.6]),
        ]
    }

    pub const DATA_WEIGHTS: [f64; 4] = [-0.2, -0.6, 0.2, -0.7];
}

#[cfg(test)]
mod normalize {
    use mob_core::TransportMode;

    use super::helpers::commute_pair;
    use crate::{normalize_max_abs, normalize_min_max, Candidate};

    #[test]
    fn max_abs_scales_columns() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let car = &c[0].criteria;
        let bike = &c[1].criteria;
        assert_eq!(car[0], 1.0);
        assert_eq!(bike[0], 0.0);
        assert_eq!(car[1], 0.25);
        assert_eq!(bike[1], 1.0);
        assert_eq!(bike[2], 0.5);
        assert!((car[3] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn max_abs_stays_in_unit_range() {
        let mut c = vec![
            Candidate::new(TransportMode::Car, vec![-8.0, 0.0, 3.5]),
            Candidate::new(TransportMode::Bike, vec![4.0, 0.0, -7.0]),
            Candidate::new(TransportMode::Walk, vec![2.0, 0.0, 1.0]),
        ];
        normalize_max_abs(&mut c);
        for cand in &c {
            for v in &cand.criteria {
                assert!((-1.0..=1.0).contains(v), "{v} out of range");
            }
        }
        // zero column is left untouched
        assert!(c.iter().all(|cand| cand.criteria[1] == 0.0));
    }

    #[test]
    fn min_max_maps_to_unit_interval() {
        let mut c = commute_pair();
        normalize_min_max(&mut c);
        assert_eq!(c[0].criteria[0], 1.0);
        assert_eq!(c[1].criteria[0], 0.0);
        assert_eq!(c[0].criteria[1], 0.0);
        assert_eq!(c[1].criteria[1], 1.0);
    }
}

#[cfg(test)]
mod weighted {
    use mob_core::TransportMode;

    use super::helpers::{commute_pair, DATA_WEIGHTS};
    use crate::{normalize_max_abs, weighted_sum, Candidate};

    #[test]
    fn commute_scenario_prefers_bike() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let pick = weighted_sum(&c, &DATA_WEIGHTS).unwrap();
        assert_eq!(c[pick].mode, TransportMode::Bike);
        assert!((c[0].weighted_score(&DATA_WEIGHTS) + 0.383_333).abs() < 1e-5);
        assert!((c[1].weighted_score(&DATA_WEIGHTS) + 1.2).abs() < 1e-12);
    }

    #[test]
    fn invariant_under_positive_rescaling() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let base = weighted_sum(&c, &DATA_WEIGHTS);
        for k in [0.01, 0.5, 3.0, 1000.0] {
            let scaled: Vec<f64> = DATA_WEIGHTS.iter().map(|w| w * k).collect();
            assert_eq!(weighted_sum(&c, &scaled), base, "scale {k}");
        }
    }

    #[test]
    fn ties_pick_first() {
        let c = vec![
            Candidate::new(TransportMode::Car, vec![1.0]),
            Candidate::new(TransportMode::Bike, vec![1.0]),
        ];
        assert_eq!(weighted_sum(&c, &[1.0]), Some(0));
    }

    #[test]
    fn empty_and_mismatch() {
        assert_eq!(weighted_sum(&[], &DATA_WEIGHTS), None);
        let c = commute_pair();
        assert_eq!(weighted_sum(&c, &[1.0, 1.0]), Some(0));
    }
}

#[cfg(test)]
mod topsis {
    use mob_core::TransportMode;

    use super::helpers::commute_pair;
    use crate::{topsis, Candidate};

    fn dominated_pair() -> Vec<Candidate> {
        vec![
            Candidate::new(TransportMode::Bus, vec![2.0, 2.0]),
            Candidate::new(TransportMode::Walk, vec![1.0, 1.0]),
        ]
    }

    #[test]
    fn cost_criteria_prefer_smaller() {
        assert_eq!(topsis(&dominated_pair(), &[-1.0, -1.0], None), Some(1));
    }

    #[test]
    fn explicit_mask_overrides_weight_sign() {
        let mask = [true, true];
        assert_eq!(topsis(&dominated_pair(), &[-1.0, -1.0], Some(&mask)), Some(0));
    }

    #[test]
    fn identical_candidates_tie_to_first() {
        let c = vec![
            Candidate::new(TransportMode::Car, vec![1.0, 1.0]),
            Candidate::new(TransportMode::Bike, vec![1.0, 1.0]),
        ];
        assert_eq!(topsis(&c, &[-0.5, 0.5], None), Some(0));
    }

    #[test]
    fn mismatch_returns_first() {
        assert_eq!(topsis(&commute_pair(), &[1.0], None), Some(0));
        assert_eq!(topsis(&[], &[1.0], None), None);
    }
}

#[cfg(test)]
mod softmax {
    use mob_core::TransportMode;

    use crate::{softmax_choice, Candidate};

    fn lopsided() -> Vec<Candidate> {
        vec![
            Candidate::new(TransportMode::Car, vec![0.0]),
            Candidate::new(TransportMode::Bike, vec![-10.0]),
        ]
    }

    #[test]
    fn low_score_dominates_probability_mass() {
        // bike score -10 → almost all mass
        assert_eq!(softmax_choice(&lopsided(), &[1.0], 1.0, 0.5), Some(1));
        assert_eq!(softmax_choice(&lopsided(), &[1.0], 1.0, 0.0), Some(0));
    }

    #[test]
    fn draw_past_rounding_returns_last() {
        assert_eq!(softmax_choice(&lopsided(), &[1.0], 1.0, 1.5), Some(1));
    }

    #[test]
    fn zero_temperature_is_deterministic() {
        assert_eq!(softmax_choice(&lopsided(), &[1.0], 0.0, 0.0), Some(1));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(softmax_choice(&[], &[1.0], 1.0, 0.3), None);
    }
}

#[cfg(test)]
mod lexicographic {
    use mob_core::TransportMode;

    use super::helpers::{commute_pair, DATA_WEIGHTS};
    use crate::{lexicographic, normalize_max_abs, Candidate};

    #[test]
    fn optimal_on_heaviest_dimension() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let pick = lexicographic(&c, &DATA_WEIGHTS).unwrap();
        // |−0.7| is heaviest and minimised: car has the lower difficulty
        let best = c.iter().map(|x| x.criteria[3]).fold(f64::INFINITY, f64::min);
        assert_eq!(c[pick].criteria[3], best);
        assert_eq!(c[pick].mode, TransportMode::Car);
    }

    #[test]
    fn ties_fall_through_to_next_dimension() {
        let c = vec![
            Candidate::new(TransportMode::Car, vec![1.0, 5.0]),
            Candidate::new(TransportMode::Bike, vec![1.0, 9.0]),
            Candidate::new(TransportMode::Walk, vec![3.0, 0.0]),
        ];
        // maximise col 0 (Walk wins outright)
        assert_eq!(lexicographic(&c, &[0.9, 0.1]), Some(2));
        // minimise col 0 → Car/Bike tie, maximise col 1 → Bike
        assert_eq!(lexicographic(&c, &[-0.9, 0.1]), Some(1));
    }

    #[test]
    fn mismatch_and_empty() {
        assert_eq!(lexicographic(&commute_pair(), &[]), Some(0));
        assert_eq!(lexicographic(&[], &[]), None);
    }
}

#[cfg(test)]
mod strategy {
    use mob_core::{AgentId, AgentRng, TransportMode};

    use super::helpers::{commute_pair, DATA_WEIGHTS};
    use crate::{normalize_max_abs, DecisionStrategy};

    #[test]
    fn default_is_weighted_sum() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let mut rng = AgentRng::new(1, AgentId(0));
        let s = DecisionStrategy::default();
        assert_eq!(s.name(), "weighted_sum");
        let pick = s.select(&c, &DATA_WEIGHTS, &mut rng).unwrap();
        assert_eq!(c[pick].mode, TransportMode::Bike);
    }

    #[test]
    fn dispatches_each_variant() {
        let mut c = commute_pair();
        normalize_max_abs(&mut c);
        let mut rng = AgentRng::new(1, AgentId(0));
        let lex = DecisionStrategy::Lexicographic.select(&c, &DATA_WEIGHTS, &mut rng);
        assert_eq!(lex, Some(0));
        let soft = DecisionStrategy::Softmax { temperature: 0.5 }.select(&c, &DATA_WEIGHTS, &mut rng);
        assert!(matches!(soft, Some(0) | Some(1)));
        let top = DecisionStrategy::Topsis { beneficial: None }.select(&c, &DATA_WEIGHTS, &mut rng);
        assert!(matches!(top, Some(0) | Some(1)));
    }
}
