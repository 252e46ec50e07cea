//! The `Citizen` agent record.

use std::collections::BTreeMap;

use mob_core::{AgentId, GridPos, ProfileId, TransportMode};
use mob_schedule::{ActivityCategory, Anchors, TripObjective};

use crate::{ActiveTrip, Inbox, LearnedDelays, TripRecord};

/// Ticks an agent may stay in transit before its trip is aborted.
pub const DEFAULT_LIVENESS: u32 = 360;

/// Weights used when an agent has none for the trip's category.
pub const UNIFORM_WEIGHTS: [f64; 4] = [0.25; 4];

// ── CategoryWeights ───────────────────────────────────────────────────────────

/// Mode-choice weight vectors, one per activity category.
///
/// Order matches the criteria vector: `[price, time, social, difficulty]`.
/// Negative weights are costs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryWeights {
    by_category: BTreeMap<ActivityCategory, Vec<f64>>,
}

impl CategoryWeights {
    /// The same vector for every category.
    pub fn uniform(weights: &[f64]) -> Self {
        let by_category = ActivityCategory::ALL
            .iter()
            .map(|&c| (c, weights.to_vec()))
            .collect();
        Self { by_category }
    }

    pub fn set(&mut self, category: ActivityCategory, weights: Vec<f64>) {
        self.by_category.insert(category, weights);
    }

    #[inline]
    pub fn get(&self, category: ActivityCategory) -> Option<&[f64]> {
        self.by_category.get(&category).map(Vec::as_slice)
    }

    /// Weights for `category`, or [`UNIFORM_WEIGHTS`].
    #[inline]
    pub fn get_or_uniform(&self, category: ActivityCategory) -> &[f64] {
        self.get(category).unwrap_or(&UNIFORM_WEIGHTS)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

// ── Citizen ───────────────────────────────────────────────────────────────────

/// One agent's complete state.
///
/// A citizen is in transit exactly when `active` is `Some`.  The objective
/// being served lives inside `active`; `objectives` only holds the ones not
/// yet started.
#[derive(Clone, Debug)]
pub struct Citizen {
    pub id:               AgentId,
    pub profile:          ProfileId,
    pub age:              u8,
    pub position:         GridPos,
    pub has_car:          bool,
    pub has_bike:         bool,
    pub current_activity: String,
    pub weights:          CategoryWeights,

    /// Cached home and work cells.
    pub anchors:    Anchors,
    /// Today's objectives that have not started yet, in schedule order.
    pub objectives: Vec<TripObjective>,
    pub active:     Option<ActiveTrip>,
    pub liveness:   u32,

    pub history:   Vec<TripRecord>,
    pub learned:   LearnedDelays,
    pub neighbors: Vec<AgentId>,
    pub inbox:     Inbox,
}

impl Citizen {
    /// An unplaced citizen at home with no resources and no plans.
    pub fn new(id: AgentId, profile: ProfileId) -> Self {
        Self {
            id,
            profile,
            age:              0,
            position:         GridPos::INVALID,
            has_car:          false,
            has_bike:         false,
            current_activity: "home".to_owned(),
            weights:          CategoryWeights::default(),
            anchors:          Anchors::default(),
            objectives:       Vec::new(),
            active:           None,
            liveness:         DEFAULT_LIVENESS,
            history:          Vec::new(),
            learned:          LearnedDelays::default(),
            neighbors:        Vec::new(),
            inbox:            Inbox::default(),
        }
    }

    #[inline]
    pub fn in_transit(&self) -> bool {
        self.active.is_some()
    }

    /// Mode of the trip in progress.
    #[inline]
    pub fn current_mode(&self) -> Option<TransportMode> {
        self.active.as_ref().map(|t| t.mode)
    }

    /// Modes this citizen can choose from: car and bike if owned, walking
    /// only when neither is.
    pub fn available_modes(&self) -> Vec<TransportMode> {
        let mut modes = Vec::with_capacity(2);
        if self.has_car {
            modes.push(TransportMode::Car);
        }
        if self.has_bike {
            modes.push(TransportMode::Bike);
        }
        if modes.is_empty() {
            modes.push(TransportMode::Walk);
        }
        modes
    }

    /// Objectives still ahead today.  Started objectives leave the list.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.objectives.len()
    }
}
