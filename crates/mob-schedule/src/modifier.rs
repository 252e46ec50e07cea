//! `DepartureModifier` — hook for shifting planned departures.
//!
//! Modifiers run right after a day's objectives are generated.  Returning
//! `Some` replaces the planned objective; returning `None` keeps it as-is.
//!
//! The built-in [`LearnedDelayDeparture`] leaves earlier on routes where the
//! agent has been delayed before:
//!
//! ```text
//! minute' = max(0, minute - ⌊average learned delay⌋)
//! ```
//!
//! Modifiers are composable: chain them with `.then()`.

use mob_core::{AgentId, AgentRng, GridPos, RouteKey};

use crate::TripObjective;

// ── DelayLookup ───────────────────────────────────────────────────────────────

/// Read access to an agent's learned delays.
pub trait DelayLookup {
    /// Mean recorded delay on `route` in ticks, or `None` if nothing was learned.
    fn average_delay(&self, route: RouteKey) -> Option<f64>;
}

/// An agent that has learned nothing.
impl DelayLookup for () {
    fn average_delay(&self, _route: RouteKey) -> Option<f64> {
        None
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Hook called once per generated objective.
///
/// # Contract
///
/// - Must be deterministic given the same `rng` state.
/// - Must not block or perform I/O.
/// - Implementations must be `Send + Sync` (shared across Rayon threads).
pub trait DepartureModifier: Send + Sync {
    /// Optionally replace `planned`.
    ///
    /// `origin` is where the agent will be when the trip starts: the
    /// previous objective's destination, or its position for the first one.
    fn modify(
        &self,
        agent:   AgentId,
        origin:  GridPos,
        planned: &TripObjective,
        delays:  &dyn DelayLookup,
        rng:     &mut AgentRng,
    ) -> Option<TripObjective>;
}

// ── No-op ─────────────────────────────────────────────────────────────────────

/// A modifier that never alters the plan.
pub struct NoAdjustment;

impl DepartureModifier for NoAdjustment {
    #[inline]
    fn modify(
        &self,
        _agent:   AgentId,
        _origin:  GridPos,
        _planned: &TripObjective,
        _delays:  &dyn DelayLookup,
        _rng:     &mut AgentRng,
    ) -> Option<TripObjective> {
        None
    }
}

// ── Learned delays ────────────────────────────────────────────────────────────

/// Depart earlier by the whole-minute average delay learned on the route.
pub struct LearnedDelayDeparture;

impl DepartureModifier for LearnedDelayDeparture {
    fn modify(
        &self,
        agent:   AgentId,
        origin:  GridPos,
        planned: &TripObjective,
        delays:  &dyn DelayLookup,
        _rng:    &mut AgentRng,
    ) -> Option<TripObjective> {
        let avg = delays.average_delay(planned.route_from(origin))?;
        let shift = avg.trunc();
        if shift.is_nan() || shift < 1.0 {
            return None;
        }
        let minute = (f64::from(planned.minute) - shift).max(0.0) as u32;
        tracing::debug!(%agent, from = planned.minute, to = minute, "departure moved earlier");
        Some(TripObjective { minute, ..planned.clone() })
    }
}

// ── Chained modifier ──────────────────────────────────────────────────────────

/// Applies two modifiers in sequence.
///
/// The second modifier sees the (possibly modified) output of the first.
pub struct ChainedModifier<A: DepartureModifier, B: DepartureModifier> {
    first:  A,
    second: B,
}

impl<A: DepartureModifier, B: DepartureModifier> DepartureModifier for ChainedModifier<A, B> {
    fn modify(
        &self,
        agent:   AgentId,
        origin:  GridPos,
        planned: &TripObjective,
        delays:  &dyn DelayLookup,
        rng:     &mut AgentRng,
    ) -> Option<TripObjective> {
        let after_first = self.first.modify(agent, origin, planned, delays, rng);
        let candidate = after_first.as_ref().unwrap_or(planned);
        self.second
            .modify(agent, origin, candidate, delays, rng)
            .or(after_first)
    }
}

/// Extension trait that adds `.then(other)` to any `DepartureModifier`.
pub trait DepartureModifierExt: DepartureModifier + Sized {
    fn then<B: DepartureModifier>(self, other: B) -> ChainedModifier<Self, B> {
        ChainedModifier { first: self, second: other }
    }
}

impl<M: DepartureModifier + Sized> DepartureModifierExt for M {}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Run `modifier` over a day's objectives in order, threading the origin
/// from `start` through each destination.  Returns how many were changed.
pub fn adjust_departures(
    agent:      AgentId,
    start:      GridPos,
    objectives: &mut [TripObjective],
    modifier:   &dyn DepartureModifier,
    delays:     &dyn DelayLookup,
    rng:        &mut AgentRng,
) -> usize {
    let mut origin = start;
    let mut changed = 0;
    for objective in objectives.iter_mut() {
        if let Some(replacement) = modifier.modify(agent, origin, objective, delays, rng) {
            *objective = replacement;
            changed += 1;
        }
        origin = objective.destination;
    }
    changed
}
