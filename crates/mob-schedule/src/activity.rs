//! Core schedule types.
//!
//! # Labels and alternatives
//!
//! A slot label may list alternatives separated by `|` (`"RS|RM"`).  One of
//! them is chosen at random when the slot's destination is resolved, and the
//! chosen label becomes the objective's activity.
//!
//! # Categories
//!
//! Labels resolve to one of three destination categories through a
//! `CategoryMap`.  The default map is
//!
//! | Category | Labels                          |
//! |----------|---------------------------------|
//! | `Home`   | `home`, `RM`, `RS`, `RL`        |
//! | `Work`   | `work`, `school`, `O`, `OS`, `OM`, `OL` |
//! | `Other`  | anything else                   |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use mob_core::{GridPos, RouteKey, Tick};

use crate::ScheduleError;

/// Slots in a daily template.
pub const HOURS_PER_DAY: usize = 24;

/// Separator between alternative labels within one slot.
pub const ALTERNATIVE_SEPARATOR: char = '|';

// ── ActivityCategory ──────────────────────────────────────────────────────────

/// Destination category of an activity label.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActivityCategory {
    /// Resolves to the agent's cached home cell.
    Home,
    /// Resolves to the agent's cached work/school cell.
    Work,
    /// Resolves to a fresh random cell every time.
    Other,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 3] =
        [ActivityCategory::Home, ActivityCategory::Work, ActivityCategory::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityCategory::Home  => "home",
            ActivityCategory::Work  => "work",
            ActivityCategory::Other => "other",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home"                       => Ok(ActivityCategory::Home),
            "work" | "school"            => Ok(ActivityCategory::Work),
            "other" | "leisure"          => Ok(ActivityCategory::Other),
            _ => Err(ScheduleError::UnknownCategory(s.to_owned())),
        }
    }
}

// ── CategoryMap ───────────────────────────────────────────────────────────────

/// Label → category lookup.  Unlisted labels are `Other`.
#[derive(Clone, Debug)]
pub struct CategoryMap {
    labels: HashMap<String, ActivityCategory>,
}

impl CategoryMap {
    /// A map with no entries: every label is `Other`.
    pub fn empty() -> Self {
        Self { labels: HashMap::new() }
    }

    pub fn insert(&mut self, label: impl Into<String>, category: ActivityCategory) {
        self.labels.insert(label.into(), category);
    }

    #[inline]
    pub fn category(&self, label: &str) -> ActivityCategory {
        self.labels.get(label).copied().unwrap_or(ActivityCategory::Other)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for label in ["home", "RM", "RS", "RL"] {
            map.insert(label, ActivityCategory::Home);
        }
        for label in ["work", "school", "O", "OS", "OM", "OL"] {
            map.insert(label, ActivityCategory::Work);
        }
        map
    }
}

// ── ActivityTemplate ──────────────────────────────────────────────────────────

/// One label per hour of the day.
///
/// Templates shorter than 24 slots simply end early; slots past the 24th are
/// never read.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityTemplate {
    slots: Vec<String>,
}

impl ActivityTemplate {
    pub fn new(slots: Vec<String>) -> Self {
        Self { slots }
    }

    /// Build from `(label, hours)` runs, e.g. `[("home", 7), ("work", 9)]`.
    pub fn from_runs(runs: &[(&str, usize)]) -> Self {
        let slots = runs
            .iter()
            .flat_map(|&(label, n)| std::iter::repeat_n(label.to_owned(), n))
            .collect();
        Self { slots }
    }

    /// 24 hours at home.
    pub fn all_home() -> Self {
        Self::from_runs(&[("home", HOURS_PER_DAY)])
    }

    /// Label of `hour`, if the template covers it.
    #[inline]
    pub fn slot(&self, hour: usize) -> Option<&str> {
        if hour >= HOURS_PER_DAY {
            return None;
        }
        self.slots.get(hour).map(String::as_str)
    }

    /// The slots that take part in a day (at most 24).
    pub fn day_slots(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots.iter().take(HOURS_PER_DAY).map(String::as_str).enumerate()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn set_slot(&mut self, hour: usize, label: String) {
        if self.slots.len() <= hour {
            self.slots.resize(hour + 1, String::new());
        }
        self.slots[hour] = label;
    }
}

/// Non-empty alternatives of a slot label.
pub fn alternatives(label: &str) -> impl Iterator<Item = &str> {
    label
        .split(ALTERNATIVE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// `true` if `current` equals `label` or is one of its alternatives.
pub fn label_matches(label: &str, current: &str) -> bool {
    label == current || alternatives(label).any(|alt| alt == current)
}

// ── TripObjective ─────────────────────────────────────────────────────────────

/// A scheduled trip: go to `destination` for `activity` at `hour:minute`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripObjective {
    pub hour:        u32,
    pub minute:      u32,
    pub activity:    String,
    pub destination: GridPos,
    pub completed:   bool,
    /// Tick the trip actually departed; `None` until it does.
    pub start_tick:  Option<Tick>,
}

impl TripObjective {
    pub fn new(hour: u32, minute: u32, activity: impl Into<String>, destination: GridPos) -> Self {
        Self {
            hour,
            minute,
            activity: activity.into(),
            destination,
            completed: false,
            start_tick: None,
        }
    }

    /// Activation rule: same hour, minute reached, not yet completed.
    #[inline]
    pub fn is_due(&self, hour: u32, minute: u32) -> bool {
        !self.completed && self.hour == hour && self.minute <= minute
    }

    #[inline]
    pub fn route_from(&self, origin: GridPos) -> RouteKey {
        RouteKey::new(origin, self.destination)
    }
}
