//! Decision strategies.
//!
//! | Strategy          | Picks                                                  |
//! |-------------------|--------------------------------------------------------|
//! | `weighted_sum`    | minimum of Σ wᵢcᵢ                                       |
//! | `topsis`          | maximum closeness to the ideal solution                |
//! | `softmax_choice`  | a sample from softmax(−Σ wᵢcᵢ / temperature)           |
//! | `lexicographic`   | best on the heaviest criterion, ties broken by the next |
//!
//! Ties always resolve to the earliest candidate.

use mob_core::AgentRng;
use tracing::warn;

use crate::candidate::dimensions_match;
use crate::Candidate;

/// Common guard: `None` for no candidates, `Some(0)` on a dimension mismatch.
fn guard(candidates: &[Candidate], weights: &[f64], strategy: &'static str) -> Option<Option<usize>> {
    if candidates.is_empty() {
        return Some(None);
    }
    if !dimensions_match(candidates, weights) {
        warn!(
            strategy,
            weights = weights.len(),
            criteria = candidates[0].criteria.len(),
            "weights and criteria have different lengths; picking the first candidate"
        );
        return Some(Some(0));
    }
    None
}

/// Index of the first strictly smallest value.
fn argmin(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, b)) => v < b,
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first strictly largest value.
fn argmax(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    argmin(values.into_iter().map(|v| -v))
}

// ── Weighted sum ──────────────────────────────────────────────────────────────

/// Candidate with the smallest weighted score.
pub fn weighted_sum(candidates: &[Candidate], weights: &[f64]) -> Option<usize> {
    if let Some(early) = guard(candidates, weights, "weighted_sum") {
        return early;
    }
    argmin(candidates.iter().map(|c| c.weighted_score(weights)))
}

// ── TOPSIS ────────────────────────────────────────────────────────────────────

/// Technique for Order of Preference by Similarity to Ideal Solution.
///
/// Columns are divided by their Euclidean norm and scaled by `|w|`.  A
/// criterion is beneficial when `beneficial[i]` says so; without an explicit
/// mask (or with one of the wrong length) it is beneficial iff `w > 0`.
pub fn topsis(candidates: &[Candidate], weights: &[f64], beneficial: Option<&[bool]>) -> Option<usize> {
    if let Some(early) = guard(candidates, weights, "topsis") {
        return early;
    }
    let n = weights.len();
    let benefit: Vec<bool> = match beneficial {
        Some(mask) if mask.len() == n => mask.to_vec(),
        _ => weights.iter().map(|&w| w > 0.0).collect(),
    };

    let norms: Vec<f64> = (0..n)
        .map(|col| {
            let sq: f64 = candidates.iter().map(|c| c.criteria[col].powi(2)).sum();
            if sq > 0.0 { sq.sqrt() } else { 1.0 }
        })
        .collect();

    let weighted: Vec<Vec<f64>> = candidates
        .iter()
        .map(|c| (0..n).map(|col| c.criteria[col] / norms[col] * weights[col].abs()).collect())
        .collect();

    let mut ideal = vec![0.0; n];
    let mut anti = vec![0.0; n];
    for col in 0..n {
        let (lo, hi) = weighted
            .iter()
            .map(|row| row[col])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if benefit[col] {
            ideal[col] = hi;
            anti[col] = lo;
        } else {
            ideal[col] = lo;
            anti[col] = hi;
        }
    }

    let dist = |row: &[f64], target: &[f64]| -> f64 {
        row.iter().zip(target).map(|(a, b)| (a - b).powi(2)).sum::<f64>().sqrt()
    };

    argmax(weighted.iter().map(|row| {
        let d_best = dist(row, &ideal);
        let d_worst = dist(row, &anti);
        let total = d_best + d_worst;
        if total == 0.0 { 0.0 } else { d_worst / total }
    }))
}

// ── Softmax ───────────────────────────────────────────────────────────────────

/// Stochastic choice with probabilities softmax(−score / temperature).
///
/// `draw` is a uniform sample in `[0, 1)` supplied by the caller's RNG.  A
/// non-positive temperature degenerates to `weighted_sum`.
pub fn softmax_choice(candidates: &[Candidate], weights: &[f64], temperature: f64, draw: f64) -> Option<usize> {
    if let Some(early) = guard(candidates, weights, "softmax") {
        return early;
    }
    if temperature.is_nan() || temperature <= 0.0 {
        return weighted_sum(candidates, weights);
    }
    let scores: Vec<f64> = candidates.iter().map(|c| -c.weighted_score(weights)).collect();
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| ((s - max) / temperature).exp()).collect();
    let total: f64 = exps.iter().sum();

    let mut cumulative = 0.0;
    for (i, e) in exps.iter().enumerate() {
        cumulative += e / total;
        if draw <= cumulative {
            return Some(i);
        }
    }
    Some(candidates.len() - 1)
}

// ── Lexicographic ─────────────────────────────────────────────────────────────

/// Filter candidates criterion by criterion in descending `|w|` order.
///
/// On each criterion only the candidates holding the best value survive
/// (minimum for `w < 0`, maximum otherwise).  Stops as soon as one remains.
pub fn lexicographic(candidates: &[Candidate], weights: &[f64]) -> Option<usize> {
    if let Some(early) = guard(candidates, weights, "lexicographic") {
        return early;
    }
    let mut order: Vec<usize> = (0..weights.len()).collect();
    // stable: equal magnitudes keep their column order
    order.sort_by(|&a, &b| weights[b].abs().total_cmp(&weights[a].abs()));

    let mut alive: Vec<usize> = (0..candidates.len()).collect();
    for col in order {
        if alive.len() == 1 {
            break;
        }
        let values = alive.iter().map(|&i| candidates[i].criteria[col]);
        let best = if weights[col] < 0.0 {
            values.fold(f64::INFINITY, f64::min)
        } else {
            values.fold(f64::NEG_INFINITY, f64::max)
        };
        alive.retain(|&i| candidates[i].criteria[col] == best);
        if alive.is_empty() {
            // only reachable with NaN criteria
            return Some(0);
        }
    }
    alive.first().copied()
}

// ── DecisionStrategy ──────────────────────────────────────────────────────────

/// Configurable strategy selector used by the mode selector.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DecisionStrategy {
    #[default]
    WeightedSum,
    Topsis {
        #[cfg_attr(feature = "serde", serde(default))]
        beneficial: Option<Vec<bool>>,
    },
    Softmax {
        temperature: f64,
    },
    Lexicographic,
}

impl DecisionStrategy {
    /// Pick a candidate index.  Only `Softmax` draws from `rng`.
    pub fn select(&self, candidates: &[Candidate], weights: &[f64], rng: &mut AgentRng) -> Option<usize> {
        match self {
            DecisionStrategy::WeightedSum => weighted_sum(candidates, weights),
            DecisionStrategy::Topsis { beneficial } => {
                topsis(candidates, weights, beneficial.as_deref())
            }
            DecisionStrategy::Softmax { temperature } => {
                softmax_choice(candidates, weights, *temperature, rng.unit())
            }
            DecisionStrategy::Lexicographic => lexicographic(candidates, weights),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DecisionStrategy::WeightedSum => "weighted_sum",
            DecisionStrategy::Topsis { .. } => "topsis",
            DecisionStrategy::Softmax { .. } => "softmax",
            DecisionStrategy::Lexicographic => "lexicographic",
        }
    }
}
