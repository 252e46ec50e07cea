//! Turn a daily template into the day's trip objectives.

use mob_core::{AgentRng, GridPos};
use mob_spatial::GridSpace;

use crate::activity::{alternatives, label_matches};
use crate::{ActivityCategory, ActivityTemplate, CategoryMap, TripObjective};

/// An agent's cached home and work cells.
///
/// Both start unassigned and are fixed the first time a home- or
/// work-category activity needs them.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchors {
    pub home: Option<GridPos>,
    pub work: Option<GridPos>,
}

impl Anchors {
    /// Destination for `category`, assigning a random cell on first use.
    pub fn resolve(&mut self, category: ActivityCategory, grid: &GridSpace, rng: &mut AgentRng) -> GridPos {
        match category {
            ActivityCategory::Home => *self.home.get_or_insert_with(|| grid.random_position(rng.inner())),
            ActivityCategory::Work => *self.work.get_or_insert_with(|| grid.random_position(rng.inner())),
            ActivityCategory::Other => grid.random_position(rng.inner()),
        }
    }
}

/// Generate one day of objectives, ordered by hour.
///
/// A missing template behaves like [`ActivityTemplate::all_home`].  Runs of
/// the same label collapse into one objective; the first slot is compared
/// against `current_activity`.  Empty slots are skipped without ending the
/// current run.
pub fn generate_objectives(
    template:         Option<&ActivityTemplate>,
    current_activity: &str,
    anchors:          &mut Anchors,
    grid:             &GridSpace,
    categories:       &CategoryMap,
    rng:              &mut AgentRng,
) -> Vec<TripObjective> {
    let fallback;
    let template = match template {
        Some(t) => t,
        None => {
            fallback = ActivityTemplate::all_home();
            &fallback
        }
    };

    let mut objectives = Vec::new();
    let mut previous: &str = current_activity;

    for (hour, label) in template.day_slots() {
        let options: Vec<&str> = alternatives(label).collect();
        if options.is_empty() || label_matches(label, previous) {
            continue;
        }
        previous = label;

        let minute: u32 = rng.gen_range(0..=59);
        let chosen = rng.choose(&options).copied().unwrap_or(options[0]);
        let destination = anchors.resolve(categories.category(chosen), grid, rng);

        objectives.push(TripObjective::new(hour as u32, minute, chosen, destination));
    }

    objectives
}
