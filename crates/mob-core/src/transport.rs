//! Transport modes and their static cost profiles.
//!
//! A `ModeProfile` carries the per-mode constants the mode selector turns
//! into a criteria vector.  Profiles are immutable once loaded; the
//! `ModeTable` is built before the simulation starts and shared read-only.
//!
//! | Mode      | fixed | per km | wait | speed | social | difficulty | weather |
//! |-----------|-------|--------|------|-------|--------|------------|---------|
//! | `Walk`    | 0     | 0.002  | 0.3  | 3     | 0.1    | 0.0        | 0.5     |
//! | `Bike`    | 0     | 0.01   | 1.0  | 6     | 0.5    | 0.1        | 1.0     |
//! | `Car`     | 0     | 0.32   | 2.5  | 20    | 1.0    | 0.2        | 0.0     |
//! | `Bus`     | 4     | 0      | 10   | 20    | 0.15   | 0.4        | 0.2     |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::MobError;

// ── TransportMode ─────────────────────────────────────────────────────────────

/// The means by which an agent makes a trip.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// On foot.  Simulated locally, never delegated.
    #[cfg_attr(feature = "serde", serde(rename = "walking", alias = "walk"))]
    Walk,
    /// Bicycle.
    Bike,
    /// Private vehicle.
    Car,
    /// Scheduled public transit.
    Bus,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Car,
        TransportMode::Bus,
    ];

    /// `true` for modes the agent simulates itself instead of handing to
    /// the traffic engine.
    #[inline]
    pub fn is_local(self) -> bool {
        matches!(self, TransportMode::Walk)
    }

    /// Label used in trip ids and output columns.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walking",
            TransportMode::Bike => "bike",
            TransportMode::Car  => "car",
            TransportMode::Bus  => "bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = MobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk" => Ok(TransportMode::Walk),
            "bike" | "bicycle" => Ok(TransportMode::Bike),
            "car"              => Ok(TransportMode::Car),
            "bus" | "transit"  => Ok(TransportMode::Bus),
            _ => Err(MobError::UnknownMode(s.to_owned())),
        }
    }
}

// ── ModeProfile ───────────────────────────────────────────────────────────────

/// Static cost and comfort parameters of one transport mode.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeProfile {
    pub fixed_price:        f64,
    pub price_per_distance: f64,
    /// Waiting time before departure, in the same unit as `distance / speed`.
    pub waiting_time:       f64,
    /// Cells per hour.
    pub speed:              f64,
    pub social:             f64,
    pub difficulty:         f64,
    /// How strongly bad weather scales `difficulty`.
    pub weather_coeff:      f64,
}

impl Default for ModeProfile {
    /// Profile used for any mode absent from the table.
    fn default() -> Self {
        Self {
            fixed_price:        0.0,
            price_per_distance: 0.0,
            waiting_time:       0.0,
            speed:              5.0,
            social:             0.5,
            difficulty:         0.5,
            weather_coeff:      0.5,
        }
    }
}

impl ModeProfile {
    /// Total monetary cost of a trip of `distance` cells.
    #[inline]
    pub fn price(&self, distance: f64) -> f64 {
        self.fixed_price + self.price_per_distance * distance
    }

    /// Waiting plus travel time; speed is floored at 0.1.
    #[inline]
    pub fn travel_time(&self, distance: f64) -> f64 {
        self.waiting_time + distance / self.speed.max(0.1)
    }

    /// Difficulty, scaled up by `weather` when `weather_impact` is on.
    #[inline]
    pub fn effective_difficulty(&self, weather: f64, weather_impact: bool) -> f64 {
        if weather_impact {
            self.difficulty * (1.0 + weather * self.weather_coeff)
        } else {
            self.difficulty
        }
    }
}

// ── ModeTable ─────────────────────────────────────────────────────────────────

/// Lookup from mode to profile.
#[derive(Clone, Debug, Default)]
pub struct ModeTable {
    profiles: HashMap<TransportMode, ModeProfile>,
}

impl ModeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four-mode urban table from the module docs.
    pub fn urban_defaults() -> Self {
        let mut t = Self::new();
        t.insert(TransportMode::Walk, ModeProfile {
            fixed_price: 0.0, price_per_distance: 0.002, waiting_time: 0.3,
            speed: 3.0, social: 0.1, difficulty: 0.0, weather_coeff: 0.5,
        });
        t.insert(TransportMode::Bike, ModeProfile {
            fixed_price: 0.0, price_per_distance: 0.01, waiting_time: 1.0,
            speed: 6.0, social: 0.5, difficulty: 0.1, weather_coeff: 1.0,
        });
        t.insert(TransportMode::Car, ModeProfile {
            fixed_price: 0.0, price_per_distance: 0.32, waiting_time: 2.5,
            speed: 20.0, social: 1.0, difficulty: 0.2, weather_coeff: 0.0,
        });
        t.insert(TransportMode::Bus, ModeProfile {
            fixed_price: 4.0, price_per_distance: 0.0, waiting_time: 10.0,
            speed: 20.0, social: 0.15, difficulty: 0.4, weather_coeff: 0.2,
        });
        t
    }

    pub fn insert(&mut self, mode: TransportMode, profile: ModeProfile) -> Option<ModeProfile> {
        self.profiles.insert(mode, profile)
    }

    /// Profile for `mode`, or `None` if the table has no entry.
    #[inline]
    pub fn lookup(&self, mode: TransportMode) -> Option<&ModeProfile> {
        self.profiles.get(&mode)
    }

    /// Profile for `mode`, falling back to `ModeProfile::default()`.
    #[inline]
    pub fn get(&self, mode: TransportMode) -> ModeProfile {
        self.profiles.get(&mode).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
