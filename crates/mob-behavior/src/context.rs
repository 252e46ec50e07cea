//! Behavior parameters and the read-only per-tick snapshot.

use mob_core::{ModeTable, Tick};
use mob_decision::{DecisionStrategy, Normalization};
use mob_schedule::CategoryMap;
use mob_spatial::GridSpace;

use crate::{BehaviorError, BehaviorResult};

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// Tunables of the per-agent state machine.
///
/// | Field                  | Default        | Meaning                                        |
/// |------------------------|----------------|------------------------------------------------|
/// | `liveness_max`         | 360            | ticks in transit before a forced abort         |
/// | `walking_speed`        | 3.0            | cells per hour for locally simulated walks     |
/// | `report_probability`   | 0.1            | chance per tick of checking telemetry          |
/// | `congestion_threshold` | 0.3            | report when `speed < threshold × max_speed`    |
/// | `learning_threshold`   | 1.5            | record a delay when `actual > threshold × expected` |
/// | `weather_impact`       | `true`         | scale difficulty by weather                    |
/// | `decision_strategy`    | weighted sum   | multi-criteria rule used by the mode selector  |
/// | `normalization`        | max-abs        | column scaling applied before the rule         |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    pub liveness_max:         u32,
    pub walking_speed:        f64,
    pub report_probability:   f64,
    pub congestion_threshold: f64,
    pub learning_threshold:   f64,
    pub weather_impact:       bool,
    pub decision_strategy:    DecisionStrategy,
    pub normalization:        Normalization,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            liveness_max:         mob_agent::DEFAULT_LIVENESS,
            walking_speed:        3.0,
            report_probability:   0.1,
            congestion_threshold: 0.3,
            learning_threshold:   1.5,
            weather_impact:       true,
            decision_strategy:    DecisionStrategy::WeightedSum,
            normalization:        Normalization::MaxAbs,
        }
    }
}

impl BehaviorConfig {
    /// Reject values the state machine cannot run with.
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.liveness_max == 0 {
            return Err(BehaviorError::Config("liveness_max must be at least 1".into()));
        }
        if !(self.walking_speed.is_finite() && self.walking_speed > 0.0) {
            return Err(BehaviorError::Config(format!("walking_speed must be positive, got {}", self.walking_speed)));
        }
        for (name, value) in [
            ("report_probability", self.report_probability),
            ("congestion_threshold", self.congestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(BehaviorError::Config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        if !(self.learning_threshold.is_finite() && self.learning_threshold > 0.0) {
            return Err(BehaviorError::Config(format!(
                "learning_threshold must be positive, got {}",
                self.learning_threshold
            )));
        }
        if let DecisionStrategy::Softmax { temperature } = self.decision_strategy {
            if temperature.is_nan() {
                return Err(BehaviorError::Config("softmax temperature is NaN".into()));
            }
        }
        Ok(())
    }
}

// ── TickContext ───────────────────────────────────────────────────────────────

/// A read-only snapshot of the simulation state passed to every
/// [`step`][crate::step] call.
///
/// Built once per tick by mob-sim and shared immutably across all agents,
/// in parallel when Rayon is on.
pub struct TickContext<'a> {
    /// Current simulation tick.
    pub now:    Tick,
    pub hour:   u32,
    pub minute: u32,

    /// Today's weather in `[0, 1]`; 1 is the worst.
    pub weather: f64,

    pub config:     &'a BehaviorConfig,
    pub modes:      &'a ModeTable,
    pub grid:       &'a GridSpace,
    pub categories: &'a CategoryMap,
}

impl<'a> TickContext<'a> {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        now:        Tick,
        hour:       u32,
        minute:     u32,
        weather:    f64,
        config:     &'a BehaviorConfig,
        modes:      &'a ModeTable,
        grid:       &'a GridSpace,
        categories: &'a CategoryMap,
    ) -> Self {
        Self { now, hour, minute, weather, config, modes, grid, categories }
    }

    /// Cruising speed of `mode` in cells per hour.  Walking uses
    /// `config.walking_speed`; other modes read the mode table.
    #[inline]
    pub fn speed_of(&self, mode: mob_core::TransportMode) -> f64 {
        if mode.is_local() {
            self.config.walking_speed
        } else {
            self.modes.get(mode).speed
        }
    }
}
