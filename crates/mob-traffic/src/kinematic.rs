//! In-process traffic engine: vehicles move in a straight line at a fixed
//! per-mode speed, slowed by a global congestion factor.
//!
//! ```text
//! effective speed = max_speed × (1 − congestion)
//! ```
//!
//! A vehicle within one step of its destination is removed on the next
//! `advance`, after which `exists` reports `false`.  Two switches let tests
//! and demos inject faults:
//!
//! | Switch          | Effect                                               |
//! |-----------------|------------------------------------------------------|
//! | `fail_spawns`   | every `spawn` is rejected                            |
//! | `unavailable`   | every call returns `TrafficError::Unavailable`       |

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use mob_core::{Coord, GridPos, ModeTable, TransportMode, TripId};

use crate::{Telemetry, TrafficConnector, TrafficError, TrafficResult};

// ── KinematicConfig ───────────────────────────────────────────────────────────

/// Per-mode free-flow speeds in cells per tick.
#[derive(Clone, Debug)]
pub struct KinematicConfig {
    pub speeds:        HashMap<TransportMode, f64>,
    /// Used for modes missing from `speeds`.
    pub default_speed: f64,
}

impl KinematicConfig {
    /// Derive speeds from a mode table whose speeds are cells per hour,
    /// at one tick per minute.
    pub fn from_mode_table(table: &ModeTable) -> Self {
        let speeds = TransportMode::ALL
            .iter()
            .map(|&mode| (mode, table.get(mode).speed / 60.0))
            .collect();
        Self { speeds, default_speed: 5.0 / 60.0 }
    }

    #[inline]
    pub fn speed(&self, mode: TransportMode) -> f64 {
        self.speeds.get(&mode).copied().unwrap_or(self.default_speed)
    }
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self::from_mode_table(&ModeTable::urban_defaults())
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Vehicle {
    position:    Coord,
    destination: Coord,
    max_speed:   f64,
}

#[derive(Default)]
struct State {
    vehicles:    HashMap<TripId, Vehicle>,
    congestion:  f64,
    fail_spawns: bool,
    unavailable: bool,
    steps:       u64,
}

impl State {
    #[inline]
    fn effective_speed(&self, max_speed: f64) -> f64 {
        max_speed * (1.0 - self.congestion)
    }
}

// ── KinematicTraffic ──────────────────────────────────────────────────────────

pub struct KinematicTraffic {
    config: KinematicConfig,
    state:  Mutex<State>,
}

impl KinematicTraffic {
    pub fn new(config: KinematicConfig) -> Self {
        Self { config, state: Mutex::new(State::default()) }
    }

    /// Guard for control setters; a poisoned lock is recovered.
    fn control(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Guard for engine calls; fails when the engine is switched off.
    fn engine(&self) -> TrafficResult<MutexGuard<'_, State>> {
        let guard = self
            .state
            .lock()
            .map_err(|_| TrafficError::Unavailable("engine state lock poisoned".into()))?;
        if guard.unavailable {
            return Err(TrafficError::Unavailable("engine switched off".into()));
        }
        Ok(guard)
    }

    /// Global slowdown in `[0, 1]`; 0.8 makes vehicles run at 20 % of max speed.
    pub fn set_congestion(&self, congestion: f64) {
        self.control().congestion = if congestion.is_finite() { congestion.clamp(0.0, 1.0) } else { 0.0 };
    }

    pub fn set_fail_spawns(&self, fail: bool) {
        self.control().fail_spawns = fail;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.control().unavailable = unavailable;
    }

    /// Vehicles currently on the network.
    pub fn active_count(&self) -> usize {
        self.control().vehicles.len()
    }

    /// How many times `advance` has run.
    pub fn steps(&self) -> u64 {
        self.control().steps
    }
}

impl Default for KinematicTraffic {
    fn default() -> Self {
        Self::new(KinematicConfig::default())
    }
}

impl TrafficConnector for KinematicTraffic {
    fn spawn(&self, trip: TripId, mode: TransportMode, origin: GridPos, destination: GridPos) -> TrafficResult<()> {
        let mut state = self.engine()?;
        if state.fail_spawns {
            return Err(TrafficError::Rejected { trip, reason: "spawning disabled".into() });
        }
        if !origin.is_valid() || !destination.is_valid() {
            return Err(TrafficError::Rejected { trip, reason: "no usable origin or destination".into() });
        }
        if state.vehicles.contains_key(&trip) {
            return Err(TrafficError::Rejected { trip, reason: "duplicate vehicle id".into() });
        }
        state.vehicles.insert(trip, Vehicle {
            position:    origin.to_coord(),
            destination: destination.to_coord(),
            max_speed:   self.config.speed(mode),
        });
        tracing::trace!(%trip, %origin, %destination, "vehicle spawned");
        Ok(())
    }

    fn exists(&self, trip: TripId) -> TrafficResult<bool> {
        Ok(self.engine()?.vehicles.contains_key(&trip))
    }

    fn position(&self, trip: TripId) -> TrafficResult<Option<Coord>> {
        Ok(self.engine()?.vehicles.get(&trip).map(|v| v.position))
    }

    fn telemetry(&self, trip: TripId) -> TrafficResult<Option<Telemetry>> {
        let state = self.engine()?;
        Ok(state.vehicles.get(&trip).map(|v| Telemetry {
            speed:     state.effective_speed(v.max_speed),
            max_speed: v.max_speed,
        }))
    }

    fn remove(&self, trip: TripId) -> TrafficResult<()> {
        self.engine()?.vehicles.remove(&trip);
        Ok(())
    }

    fn advance(&self) -> TrafficResult<()> {
        let mut state = self.engine()?;
        let congestion = state.congestion;
        state.vehicles.retain(|_, v| {
            let step = v.max_speed * (1.0 - congestion);
            let remaining = v.position.distance(v.destination);
            if remaining <= step {
                return false;
            }
            let f = step / remaining;
            v.position.x += (v.destination.x - v.position.x) * f;
            v.position.y += (v.destination.y - v.position.y) * f;
            true
        });
        state.steps += 1;
        Ok(())
    }
}
