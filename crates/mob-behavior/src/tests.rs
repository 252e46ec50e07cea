//! Unit tests for mob-behavior.

use mob_agent::Citizen;
use mob_core::{AgentId, GridPos, ModeTable, ProfileId, Tick};
use mob_schedule::{CategoryMap, TripObjective};
use mob_spatial::GridSpace;

use crate::{BehaviorConfig, TickContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DATA_WEIGHTS: [f64; 4] = [-0.2, -0.6, 0.2, -0.7];

/// 08:00 on day 0.
const EIGHT_AM: u64 = 8 * 60;

struct Fixture {
    config:     BehaviorConfig,
    modes:      ModeTable,
    grid:       GridSpace,
    categories: CategoryMap,
}

impl Fixture {
    fn new() -> Self {
        Self {
            config:     BehaviorConfig::default(),
            modes:      ModeTable::urban_defaults(),
            grid:       GridSpace::new(50, 50).unwrap(),
            categories: CategoryMap::default(),
        }
    }

    fn ctx(&self, tick: u64) -> TickContext<'_> {
        let of_day = tick % 1440;
        TickContext::new(
            Tick(tick),
            (of_day / 60) as u32,
            (of_day % 60) as u32,
            0.0,
            &self.config,
            &self.modes,
            &self.grid,
            &self.categories,
        )
    }
}

fn citizen_at(x: i32, y: i32) -> Citizen {
    let mut c = Citizen::new(AgentId(0), ProfileId(0));
    c.position = GridPos::new(x, y);
    c.weights = mob_agent::CategoryWeights::uniform(&DATA_WEIGHTS);
    c
}

fn car_owner_commuting() -> Citizen {
    let mut c = citizen_at(5, 5);
    c.has_car = true;
    c.objectives.push(TripObjective::new(8, 0, "work", GridPos::new(40, 40)));
    c
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use mob_decision::DecisionStrategy;

    use crate::BehaviorConfig;

    #[test]
    fn defaults_validate() {
        let c = BehaviorConfig::default();
        assert_eq!(c.liveness_max, 360);
        assert_eq!(c.walking_speed, 3.0);
        assert_eq!(c.report_probability, 0.1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            BehaviorConfig { liveness_max: 0, ..Default::default() },
            BehaviorConfig { walking_speed: 0.0, ..Default::default() },
            BehaviorConfig { report_probability: 1.5, ..Default::default() },
            BehaviorConfig { learning_threshold: -1.0, ..Default::default() },
            BehaviorConfig {
                decision_strategy: DecisionStrategy::Softmax { temperature: f64::NAN },
                ..Default::default()
            },
        ];
        for c in bad {
            assert!(c.validate().is_err(), "{c:?}");
        }
    }
}

// ── Mode choice ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode_choice {
    use mob_core::{AgentId, AgentRng, GridPos, ModeProfile, ModeTable, TransportMode};
    use mob_decision::Normalization;
    use mob_schedule::ActivityCategory;

    use super::*;
    use crate::{build_candidates, choose_mode, criteria, trip_distance};

    #[test]
    fn criteria_vector() {
        let p = ModeProfile {
            fixed_price: 2.0, price_per_distance: 0.5, waiting_time: 1.0,
            speed: 4.0, social: 0.3, difficulty: 0.5, weather_coeff: 1.0,
        };
        assert_eq!(criteria(&p, 8.0, 0.5, true), vec![6.0, 3.0, 0.3, 0.75]);
        assert_eq!(criteria(&p, 8.0, 0.5, false)[3], 0.5);
    }

    #[test]
    fn malformed_positions_use_default_distance() {
        assert_eq!(trip_distance(GridPos::INVALID, GridPos::new(3, 4)), 10.0);
        assert_eq!(trip_distance(GridPos::new(0, 0), GridPos::new(3, 4)), 5.0);
    }

    #[test]
    fn missing_mode_uses_default_profile() {
        let cands = build_candidates(&[TransportMode::Bus], &ModeTable::new(), 10.0, 0.0, false);
        assert_eq!(cands[0].criteria, criteria(&ModeProfile::default(), 10.0, 0.0, false));
    }

    /// car = [10, 5, 1, 0.2], bike = [0, 20, 0.5, 0.6] at distance 0.
    #[test]
    fn car_bike_scenario_picks_bike() {
        let mut fx = Fixture::new();
        fx.modes = ModeTable::new();
        fx.modes.insert(TransportMode::Car, ModeProfile {
            fixed_price: 10.0, price_per_distance: 0.0, waiting_time: 5.0,
            speed: 20.0, social: 1.0, difficulty: 0.2, weather_coeff: 0.0,
        });
        fx.modes.insert(TransportMode::Bike, ModeProfile {
            fixed_price: 0.0, price_per_distance: 0.0, waiting_time: 20.0,
            speed: 6.0, social: 0.5, difficulty: 0.6, weather_coeff: 0.0,
        });
        let mut c = citizen_at(10, 10);
        c.has_car = true;
        c.has_bike = true;
        let mut rng = AgentRng::new(1, AgentId(0));
        let ctx = fx.ctx(EIGHT_AM);
        let mode = choose_mode(&c, GridPos::new(10, 10), ActivityCategory::Work, &ctx, &mut rng);
        assert_eq!(mode, TransportMode::Bike);
    }

    /// car = [10, 100, 0.5, 0.5], bike = [9, 101, 0.5, 0.5] at distance 0.
    ///
    /// Max-abs keeps the one-minute time gap tiny and price decides; min-max
    /// stretches both columns to `[0, 1]` and the time weight wins.
    #[test]
    fn normalization_changes_the_pick() {
        let mut fx = Fixture::new();
        fx.modes = ModeTable::new();
        fx.modes.insert(TransportMode::Car, ModeProfile {
            fixed_price: 10.0, price_per_distance: 0.0, waiting_time: 100.0,
            speed: 20.0, social: 0.5, difficulty: 0.5, weather_coeff: 0.0,
        });
        fx.modes.insert(TransportMode::Bike, ModeProfile {
            fixed_price: 9.0, price_per_distance: 0.0, waiting_time: 101.0,
            speed: 6.0, social: 0.5, difficulty: 0.5, weather_coeff: 0.0,
        });
        let mut c = citizen_at(10, 10);
        c.has_car = true;
        c.has_bike = true;
        let here = GridPos::new(10, 10);

        let mode = choose_mode(&c, here, ActivityCategory::Work, &fx.ctx(EIGHT_AM), &mut AgentRng::new(1, AgentId(0)));
        assert_eq!(mode, TransportMode::Car);

        fx.config.normalization = Normalization::MinMax;
        let mode = choose_mode(&c, here, ActivityCategory::Work, &fx.ctx(EIGHT_AM), &mut AgentRng::new(1, AgentId(0)));
        assert_eq!(mode, TransportMode::Bike);
    }

    #[test]
    fn walkers_always_walk() {
        let fx = Fixture::new();
        let c = citizen_at(0, 0);
        let mut rng = AgentRng::new(1, AgentId(0));
        let mode = choose_mode(&c, GridPos::new(9, 0), ActivityCategory::Other, &fx.ctx(0), &mut rng);
        assert_eq!(mode, TransportMode::Walk);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use mob_core::{AgentId, AgentRng, GridPos, TransportMode, TripId};
    use mob_traffic::{KinematicTraffic, OfflineTraffic, TrafficConnector};

    use super::*;
    use crate::{phase, step, walking_ticks, TripPhase};

    fn rng() -> AgentRng {
        AgentRng::new(3, AgentId(0))
    }

    #[test]
    fn walking_duration() {
        assert_eq!(walking_ticks(9.0, 3.0), 180);
        assert_eq!(walking_ticks(0.0, 3.0), 1);
        assert_eq!(walking_ticks(0.01, 3.0), 1);
    }

    #[test]
    fn walk_of_nine_cells_arrives_after_180_ticks() {
        let fx = Fixture::new();
        let traffic = OfflineTraffic;
        let mut c = citizen_at(0, 0);
        c.objectives.push(TripObjective::new(8, 0, "work", GridPos::new(9, 0)));
        let mut rng = rng();

        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        assert_eq!(out.started, Some(TransportMode::Walk));
        assert_eq!(phase(&c), TripPhase::InTransit(TransportMode::Walk));
        assert_eq!(c.active.as_ref().unwrap().arrival, Some(Tick(EIGHT_AM + 180)));
        assert!(c.objectives.is_empty());

        for t in EIGHT_AM + 1..EIGHT_AM + 180 {
            let out = step(&mut c, &mut rng, &fx.ctx(t), &traffic);
            assert!(out.completed.is_none(), "arrived early at {t}");
        }
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 180), &traffic);
        let record = out.completed.expect("arrival");
        assert_eq!(record.actual_ticks, 180);
        assert_eq!(record.expected_ticks, 180.0);
        assert_eq!(c.position, GridPos::new(9, 0));
        assert_eq!(c.current_activity, "work");
        assert_eq!(c.liveness, fx.config.liveness_max);
        assert!(c.learned.is_empty());
        assert_eq!(c.history.len(), 1);
        assert_eq!(phase(&c), TripPhase::Idle);
    }

    #[test]
    fn spawn_failure_keeps_objective_pending() {
        let fx = Fixture::new();
        let traffic = KinematicTraffic::default();
        traffic.set_fail_spawns(true);
        let mut c = car_owner_commuting();
        let mut rng = rng();

        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        assert!(out.spawn_failed);
        assert_eq!(out.mode_chosen, Some(TransportMode::Car));
        assert_eq!(out.started, None);
        assert!(!c.in_transit());
        assert_eq!(c.objectives.len(), 1);
        assert!(!c.objectives[0].completed);
        assert_eq!(c.objectives[0].start_tick, None);
        let trip = TripId::new(c.id, TransportMode::Car, Tick(EIGHT_AM));
        let err = traffic.spawn(trip, TransportMode::Car, c.position, GridPos::new(40, 40)).unwrap_err();
        assert!(!err.is_transient(), "rejection is logged at warn");

        traffic.set_fail_spawns(false);
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 1), &traffic);
        assert_eq!(out.started, Some(TransportMode::Car));
        assert_eq!(traffic.active_count(), 1);
        assert_eq!(c.active.as_ref().unwrap().objective.start_tick, Some(Tick(EIGHT_AM + 1)));
    }

    #[test]
    fn unavailable_engine_fails_spawn() {
        let fx = Fixture::new();
        let mut c = car_owner_commuting();
        let out = step(&mut c, &mut rng(), &fx.ctx(EIGHT_AM), &OfflineTraffic);
        assert!(out.spawn_failed);
        assert_eq!(c.objectives.len(), 1);

        let trip = TripId::new(c.id, TransportMode::Car, Tick(EIGHT_AM));
        let err = OfflineTraffic.spawn(trip, TransportMode::Car, c.position, GridPos::new(40, 40)).unwrap_err();
        assert!(err.is_transient(), "outage is logged at debug, not warn");
    }

    #[test]
    fn stuck_trip_aborts_when_liveness_runs_out() {
        let mut fx = Fixture::new();
        fx.config.liveness_max = 5;
        let traffic = KinematicTraffic::default();
        traffic.set_congestion(1.0);
        let mut c = car_owner_commuting();
        let mut rng = rng();

        assert!(step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic).started.is_some());
        assert_eq!(c.liveness, 5);
        for k in 1..5 {
            let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + k), &traffic);
            traffic.advance().unwrap();
            assert!(!out.aborted);
            assert!(c.in_transit());
            assert_eq!(c.liveness, 5 - k as u32);
        }
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 5), &traffic);
        assert!(out.aborted);
        assert!(!c.in_transit());
        assert_eq!(c.liveness, 5);
        assert!(c.objectives.is_empty(), "aborted objective is not retried");
        assert!(c.history.is_empty());
        assert_eq!(c.current_activity, "home");
        assert_eq!(traffic.active_count(), 0);
    }

    /// 30 cells at 3 cells/h is 600 ticks, past the default liveness of 360.
    #[test]
    fn long_walk_aborts_at_origin() {
        let fx = Fixture::new();
        let traffic = OfflineTraffic;
        let mut c = citizen_at(0, 0);
        c.objectives.push(TripObjective::new(8, 0, "work", GridPos::new(30, 0)));
        let mut rng = rng();

        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        assert_eq!(out.started, Some(TransportMode::Walk));
        assert_eq!(c.active.as_ref().unwrap().arrival, Some(Tick(EIGHT_AM + 600)));

        let liveness = u64::from(fx.config.liveness_max);
        for t in EIGHT_AM + 1..EIGHT_AM + liveness {
            let out = step(&mut c, &mut rng, &fx.ctx(t), &traffic);
            assert!(!out.aborted && out.completed.is_none(), "trip ended at {t}");
        }
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + liveness), &traffic);
        assert!(out.aborted);
        assert!(out.completed.is_none());
        assert!(!c.in_transit());
        assert_eq!(c.position, GridPos::new(0, 0));
        assert_eq!(c.current_activity, "home");
        assert!(c.objectives.is_empty(), "aborted objective is not retried");
        assert!(c.history.is_empty());

        for t in EIGHT_AM + liveness + 1..EIGHT_AM + 700 {
            let out = step(&mut c, &mut rng, &fx.ctx(t), &traffic);
            assert!(out.started.is_none() && out.completed.is_none());
        }
        assert_eq!(c.position, GridPos::new(0, 0));
    }

    #[test]
    fn engine_outage_changes_nothing_but_liveness() {
        let fx = Fixture::new();
        let traffic = KinematicTraffic::default();
        let mut c = car_owner_commuting();
        let mut rng = rng();
        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);

        traffic.set_unavailable(true);
        let before = c.position;
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 1), &traffic);
        assert!(out.completed.is_none() && !out.aborted);
        assert!(c.in_transit());
        assert_eq!(c.position, before);
        assert_eq!(c.liveness, fx.config.liveness_max - 1);
    }

    #[test]
    fn delegated_trip_completes_when_vehicle_leaves() {
        let fx = Fixture::new();
        let traffic = KinematicTraffic::default();
        let mut c = citizen_at(5, 5);
        c.has_car = true;
        c.objectives.push(TripObjective::new(8, 0, "work", GridPos::new(6, 5)));
        let mut rng = rng();

        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        traffic.advance().unwrap();
        let mut record = None;
        for t in EIGHT_AM + 1..EIGHT_AM + 20 {
            let out = step(&mut c, &mut rng, &fx.ctx(t), &traffic);
            traffic.advance().unwrap();
            if let Some(r) = out.completed {
                record = Some(r);
                break;
            }
        }
        let record = record.expect("car trip of one cell completes");
        assert_eq!(record.mode, TransportMode::Car);
        assert_eq!(c.position, GridPos::new(6, 5));
        assert!(!c.in_transit());
        assert_eq!(traffic.active_count(), 0);
    }

    #[test]
    fn position_follows_vehicle() {
        let fx = Fixture::new();
        let traffic = KinematicTraffic::default();
        let mut c = car_owner_commuting();
        let mut rng = rng();
        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        for t in 1..=12 {
            traffic.advance().unwrap();
            step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + t), &traffic);
        }
        // 12 ticks at 1/3 cell per tick along the diagonal
        assert!(c.position.x > 5 && c.position.x < 40);
        assert_eq!(c.position.x, c.position.y);
    }

    #[test]
    fn activation_follows_clock() {
        let fx = Fixture::new();
        let mut c = citizen_at(0, 0);
        c.objectives.push(TripObjective::new(7, 50, "school", GridPos::new(1, 0)));
        c.objectives.push(TripObjective::new(8, 30, "work", GridPos::new(2, 0)));
        c.objectives.push(TripObjective::new(8, 10, "leisure", GridPos::new(3, 0)));
        let mut rng = rng();

        // 08:05: the 07:50 objective was missed and nothing else is due
        assert!(step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 5), &OfflineTraffic).is_quiet());
        // 08:35: two are due; the first in stored order wins
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 35), &OfflineTraffic);
        assert_eq!(out.started, Some(TransportMode::Walk));
        assert_eq!(c.active.as_ref().unwrap().objective.activity, "work");
        assert_eq!(c.objectives.len(), 2);
    }

    #[test]
    fn no_new_trip_on_completion_tick() {
        let fx = Fixture::new();
        let mut c = citizen_at(0, 0);
        c.objectives.push(TripObjective::new(8, 0, "work", GridPos::new(0, 0)));
        c.objectives.push(TripObjective::new(8, 0, "leisure", GridPos::new(1, 0)));
        let mut rng = rng();
        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &OfflineTraffic);
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 1), &OfflineTraffic);
        assert!(out.completed.is_some());
        assert!(out.started.is_none());
        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 2), &OfflineTraffic);
        assert_eq!(out.started, Some(TransportMode::Walk));
    }
}

// ── Learning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod learning {
    use mob_agent::ActiveTrip;
    use mob_core::{AgentId, GridPos, RouteKey, Tick, TransportMode, TripId};

    use super::*;
    use crate::{excess_delay, expected_ticks, learn_from_trip};

    fn car_trip(start: u64) -> ActiveTrip {
        let origin = GridPos::new(0, 0);
        ActiveTrip {
            objective:  TripObjective::new(1, 40, "work", GridPos::new(10, 0)),
            trip:       TripId::new(AgentId(0), TransportMode::Car, Tick(start)),
            mode:       TransportMode::Car,
            origin,
            start_tick: Tick(start),
            arrival:    None,
        }
    }

    #[test]
    fn expected_duration() {
        assert_eq!(expected_ticks(10.0, 20.0), 30.0);
        assert_eq!(expected_ticks(10.0, 0.0), 30.0);
        assert_eq!(expected_ticks(10.0, -1.0), 30.0);
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(excess_delay(45.0, 30.0, 1.5), None);
        assert_eq!(excess_delay(46.0, 30.0, 1.5), Some(16.0));
    }

    #[test]
    fn twice_expected_is_learned() {
        let fx = Fixture::new();
        let mut c = citizen_at(0, 0);
        let trip = car_trip(100);
        let record = learn_from_trip(&mut c, &trip, Tick(160), &fx.ctx(160));
        assert_eq!(record.expected_ticks, 30.0);
        assert_eq!(record.actual_ticks, 60);
        let route = RouteKey::new(GridPos::new(0, 0), GridPos::new(10, 0));
        assert_eq!(c.learned.samples(route), &[30.0]);
        assert_eq!(c.history.len(), 1);
    }

    #[test]
    fn slightly_late_is_not_learned() {
        let fx = Fixture::new();
        let mut c = citizen_at(0, 0);
        let trip = car_trip(100);
        learn_from_trip(&mut c, &trip, Tick(136), &fx.ctx(136));
        assert!(c.learned.is_empty());
        assert_eq!(c.history.len(), 1);
    }
}

// ── Social ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod social {
    use mob_core::{AgentId, AgentRng, TransportMode};
    use mob_traffic::{KinematicTraffic, Telemetry};

    use super::*;
    use crate::{congestion_severity, step};

    #[test]
    fn severity_threshold() {
        let slow = Telemetry { speed: 2.0, max_speed: 10.0 };
        assert!((congestion_severity(slow, 0.3).unwrap() - 0.8).abs() < 1e-9);
        let ok = Telemetry { speed: 5.0, max_speed: 10.0 };
        assert_eq!(congestion_severity(ok, 0.3), None);
        let parked = Telemetry { speed: 0.0, max_speed: 0.0 };
        assert_eq!(congestion_severity(parked, 0.3), None);
    }

    #[test]
    fn slow_traffic_reported_to_neighbours() {
        let mut fx = Fixture::new();
        fx.config.report_probability = 1.0;
        let traffic = KinematicTraffic::default();
        traffic.set_congestion(0.8);
        let mut c = car_owner_commuting();
        c.neighbors = vec![AgentId(4), AgentId(9)];
        let mut rng = AgentRng::new(5, AgentId(0));

        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        assert_eq!(out.started, Some(TransportMode::Car));
        assert!(out.reports.is_empty(), "no report on the departure tick");

        let out = step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 1), &traffic);
        assert_eq!(out.reports.len(), 1);
        let sent = &out.reports[0];
        assert_eq!(sent.recipients, vec![AgentId(4), AgentId(9)]);
        assert!((sent.report.severity - 0.8).abs() < 1e-9);
        assert_eq!(sent.report.reporter, AgentId(0));
        assert_eq!(sent.report.tick, Tick(EIGHT_AM + 1));
    }

    #[test]
    fn free_flow_not_reported() {
        let mut fx = Fixture::new();
        fx.config.report_probability = 1.0;
        let traffic = KinematicTraffic::default();
        let mut c = car_owner_commuting();
        c.neighbors = vec![AgentId(1)];
        let mut rng = AgentRng::new(5, AgentId(0));
        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        assert!(step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + 1), &traffic).reports.is_empty());
    }

    #[test]
    fn zero_probability_never_reports() {
        let mut fx = Fixture::new();
        fx.config.report_probability = 0.0;
        let traffic = KinematicTraffic::default();
        traffic.set_congestion(0.9);
        let mut c = car_owner_commuting();
        c.neighbors = vec![AgentId(1)];
        let mut rng = AgentRng::new(5, AgentId(0));
        step(&mut c, &mut rng, &fx.ctx(EIGHT_AM), &traffic);
        for t in 1..20 {
            assert!(step(&mut c, &mut rng, &fx.ctx(EIGHT_AM + t), &traffic).reports.is_empty());
        }
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use mob_core::{AgentRng, GridPos, RouteKey};
    use mob_schedule::{ActivityTemplate, LearnedDelayDeparture, NoAdjustment};

    use super::*;
    use crate::plan_day;

    fn commuter() -> Citizen {
        let mut c = citizen_at(2, 2);
        c.anchors.home = Some(GridPos::new(2, 2));
        c.anchors.work = Some(GridPos::new(30, 30));
        c
    }

    fn template() -> ActivityTemplate {
        ActivityTemplate::from_runs(&[("home", 8), ("work", 8), ("home", 8)])
    }

    #[test]
    fn regenerates_day() {
        let fx = Fixture::new();
        let mut c = commuter();
        c.objectives.push(TripObjective::new(23, 0, "leisure", GridPos::new(0, 0)));
        let mut rng = AgentRng::new(1, c.id);
        let shifted = plan_day(&mut c, Some(&template()), &NoAdjustment, &fx.ctx(1440), &mut rng);
        assert_eq!(shifted, 0);
        let hours: Vec<u32> = c.objectives.iter().map(|o| o.hour).collect();
        assert_eq!(hours, vec![8, 16]);
        assert_eq!(c.objectives[0].destination, GridPos::new(30, 30));
        assert_eq!(c.objectives[1].destination, GridPos::new(2, 2));
    }

    #[test]
    fn learned_delay_moves_departure_earlier() {
        let fx = Fixture::new();
        let mut c = commuter();
        c.learned.record(RouteKey::new(GridPos::new(2, 2), GridPos::new(30, 30)), 20.0);
        let mut rng = AgentRng::new(1, c.id);
        let shifted = plan_day(&mut c, Some(&template()), &LearnedDelayDeparture, &fx.ctx(1440), &mut rng);
        assert_eq!(shifted, 1);
        assert!(c.objectives[0].minute <= 39);
        assert_eq!(c.objectives[0].hour, 8);
    }

    #[test]
    fn in_flight_trip_untouched() {
        use mob_agent::ActiveTrip;
        use mob_core::{Tick, TransportMode, TripId};

        let fx = Fixture::new();
        let mut c = commuter();
        c.active = Some(ActiveTrip {
            objective:  TripObjective::new(23, 30, "work", GridPos::new(30, 30)),
            trip:       TripId::new(c.id, TransportMode::Car, Tick(1430)),
            mode:       TransportMode::Car,
            origin:     GridPos::new(2, 2),
            start_tick: Tick(1430),
            arrival:    None,
        });
        let mut rng = AgentRng::new(1, c.id);
        plan_day(&mut c, Some(&template()), &NoAdjustment, &fx.ctx(1440), &mut rng);
        assert_eq!(c.active.as_ref().unwrap().objective.activity, "work");
        // planned from "work": the first transition is back home at 00:xx
        assert_eq!(c.objectives[0].activity, "home");
        assert_eq!(c.objectives[0].hour, 0);
    }
}
