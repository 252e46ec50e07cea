//! Daily replanning: replace a citizen's pending objectives with a fresh
//! day generated from its template, then let a departure modifier shift
//! them.

use mob_agent::Citizen;
use mob_core::AgentRng;
use mob_schedule::{adjust_departures, generate_objectives, ActivityTemplate, DepartureModifier};
use tracing::debug;

use crate::TickContext;

/// Regenerate `citizen`'s objectives for the day starting at `ctx.now`.
///
/// A trip in progress is left alone; the new day is planned from its
/// destination and activity.  Returns how many departures the modifier
/// moved.
pub fn plan_day(
    citizen:  &mut Citizen,
    template: Option<&ActivityTemplate>,
    modifier: &dyn DepartureModifier,
    ctx:      &TickContext<'_>,
    rng:      &mut AgentRng,
) -> usize {
    let (start, activity) = match citizen.active.as_ref() {
        Some(t) => (t.destination(), t.objective.activity.clone()),
        None => (citizen.position, citizen.current_activity.clone()),
    };

    let mut objectives =
        generate_objectives(template, &activity, &mut citizen.anchors, ctx.grid, ctx.categories, rng);
    let shifted = adjust_departures(citizen.id, start, &mut objectives, modifier, &citizen.learned, rng);

    if !citizen.objectives.is_empty() {
        debug!(agent = %citizen.id, dropped = citizen.objectives.len(), "unstarted objectives replaced");
    }
    citizen.objectives = objectives;
    shifted
}
