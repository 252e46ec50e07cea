//! Trip lifecycle controller: the per-agent state machine run once per tick.
//!
//! ```text
//!            due objective              spawn ok / walk planned
//!   Idle ───────────────▶ Dispatching ─────────────────────────▶ InTransit(mode)
//!    ▲                        │ spawn failed                         │
//!    │                        ▼                                      │ arrived
//!    ├──────────────────── (Idle)                                    ▼
//!    ├───────────────────────────────────────────────────────── Completing
//!    └────────────── liveness exhausted (abort, no retry) ◀──── InTransit
//! ```
//!
//! `Dispatching` and `Completing` never outlive a single [`step`].
//!
//! # Order inside one step
//!
//! 1. In transit: track the trip (walk arrival tick, or ask the traffic
//!    engine whether the vehicle still exists and where it is).
//! 2. Still in transit on a delegated trip: social sharing.
//! 3. Still in transit: decrement liveness; abort at zero.
//! 4. Idle when the step began: activate the first due objective.
//!
//! An agent that completes a trip this tick does not start another one
//! until the next tick.

use mob_agent::{ActiveTrip, Citizen};
use mob_core::{AgentRng, TransportMode, TripId};
use mob_traffic::TrafficConnector;
use tracing::{debug, info, warn};

use crate::learning::learn_from_trip;
use crate::mode_choice::{choose_mode, trip_distance};
use crate::social::share_congestion;
use crate::{StepOutcome, TickContext};

/// Where a citizen is in its trip lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TripPhase {
    Idle,
    Dispatching,
    InTransit(TransportMode),
    Completing,
}

/// The phase observable between steps: `Idle` or `InTransit`.
pub fn phase(citizen: &Citizen) -> TripPhase {
    match citizen.current_mode() {
        Some(mode) => TripPhase::InTransit(mode),
        None => TripPhase::Idle,
    }
}

/// Ticks a walk of `distance` cells takes at `speed` cells per hour; at
/// least 1.
pub fn walking_ticks(distance: f64, speed: f64) -> u64 {
    let estimated = if speed > 0.0 { (distance / speed * 60.0).floor() } else { 0.0 };
    if estimated.is_finite() && estimated >= 1.0 { estimated as u64 } else { 1 }
}

/// Advance `citizen` by one tick.
pub fn step(
    citizen: &mut Citizen,
    rng:     &mut AgentRng,
    ctx:     &TickContext<'_>,
    traffic: &dyn TrafficConnector,
) -> StepOutcome {
    let mut out = StepOutcome::default();

    if !citizen.in_transit() {
        activate(citizen, rng, ctx, traffic, &mut out);
        return out;
    }

    track(citizen, ctx, traffic, &mut out);

    let delegated = citizen.active.as_ref().filter(|t| t.is_delegated()).map(|t| t.trip);
    if let Some(trip) = delegated {
        out.reports.extend(share_congestion(citizen, trip, ctx, traffic, rng));
    }

    if citizen.in_transit() {
        citizen.liveness = citizen.liveness.saturating_sub(1);
        if citizen.liveness == 0 {
            abort(citizen, ctx, traffic);
            out.aborted = true;
        }
    }

    out
}

// ── Phases ────────────────────────────────────────────────────────────────────

fn activate(
    citizen: &mut Citizen,
    rng:     &mut AgentRng,
    ctx:     &TickContext<'_>,
    traffic: &dyn TrafficConnector,
    out:     &mut StepOutcome,
) {
    let Some(index) = citizen
        .objectives
        .iter()
        .position(|o| o.is_due(ctx.hour, ctx.minute))
    else {
        return;
    };

    // Dispatching
    let destination = citizen.objectives[index].destination;
    let category = ctx.categories.category(&citizen.objectives[index].activity);
    let mode = choose_mode(citizen, destination, category, ctx, rng);
    out.mode_chosen = Some(mode);

    let origin = citizen.position;
    let trip = TripId::new(citizen.id, mode, ctx.now);
    let arrival = if mode.is_local() {
        let ticks = walking_ticks(trip_distance(origin, destination), ctx.config.walking_speed);
        Some(ctx.now + ticks)
    } else {
        if let Err(e) = traffic.spawn(trip, mode, origin, destination) {
            if e.is_transient() {
                debug!(agent = %citizen.id, %trip, error = %e, "traffic engine unavailable; objective stays pending");
            } else {
                warn!(agent = %citizen.id, %trip, error = %e, "spawn rejected; objective stays pending");
            }
            out.spawn_failed = true;
            return;
        }
        None
    };

    let mut objective = citizen.objectives.remove(index);
    objective.start_tick = Some(ctx.now);
    info!(
        agent = %citizen.id,
        %mode,
        activity = %objective.activity,
        from = %origin,
        to = %destination,
        tick = ctx.now.0,
        "trip started"
    );
    citizen.liveness = ctx.config.liveness_max;
    citizen.active = Some(ActiveTrip {
        objective,
        trip,
        mode,
        origin,
        start_tick: ctx.now,
        arrival,
    });
    out.started = Some(mode);
}

fn track(citizen: &mut Citizen, ctx: &TickContext<'_>, traffic: &dyn TrafficConnector, out: &mut StepOutcome) {
    let Some(active) = citizen.active.as_ref() else {
        return;
    };
    let trip = active.trip;
    let arrival = active.arrival;

    if let Some(arrival) = arrival {
        if ctx.now >= arrival {
            complete(citizen, ctx, traffic, out);
        }
        return;
    }

    match traffic.exists(trip) {
        Ok(false) => complete(citizen, ctx, traffic, out),
        Ok(true) => match traffic.position(trip) {
            Ok(None) => complete(citizen, ctx, traffic, out),
            Ok(Some(coord)) => {
                if let Some(cell) = ctx.grid.clamp_coord(coord) {
                    citizen.position = cell;
                }
            }
            Err(e) => debug!(agent = %citizen.id, %trip, error = %e, "position unavailable"),
        },
        Err(e) => debug!(agent = %citizen.id, %trip, error = %e, "traffic engine did not answer"),
    }
}

fn complete(citizen: &mut Citizen, ctx: &TickContext<'_>, traffic: &dyn TrafficConnector, out: &mut StepOutcome) {
    // Completing
    let Some(mut active) = citizen.active.take() else {
        return;
    };
    active.objective.completed = true;
    citizen.current_activity = active.objective.activity.clone();
    citizen.position = ctx.grid.clamp(active.objective.destination);

    let record = learn_from_trip(citizen, &active, ctx.now, ctx);

    if active.is_delegated() {
        if let Err(e) = traffic.remove(active.trip) {
            debug!(agent = %citizen.id, trip = %active.trip, error = %e, "remove after arrival failed");
        }
    }
    citizen.liveness = ctx.config.liveness_max;

    info!(
        agent = %citizen.id,
        mode = %active.mode,
        activity = %citizen.current_activity,
        ticks = record.actual_ticks,
        "trip completed"
    );
    out.completed = Some(record);
}

fn abort(citizen: &mut Citizen, ctx: &TickContext<'_>, traffic: &dyn TrafficConnector) {
    let Some(active) = citizen.active.take() else {
        return;
    };
    if active.is_delegated() {
        let _ = traffic.remove(active.trip);
    }
    citizen.liveness = ctx.config.liveness_max;
    warn!(
        agent = %citizen.id,
        trip = %active.trip,
        activity = %active.objective.activity,
        tick = ctx.now.0,
        "liveness exhausted; trip aborted"
    );
}
