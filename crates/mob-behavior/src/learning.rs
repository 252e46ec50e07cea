//! Learning module: compare each finished trip against its expected
//! duration and remember routes that ran late.

use mob_agent::{ActiveTrip, Citizen, TripRecord};
use mob_core::Tick;
use tracing::debug;

use crate::mode_choice::trip_distance;
use crate::TickContext;

/// Expected ticks used when the mode has no positive speed.
pub const FALLBACK_EXPECTED_TICKS: f64 = 30.0;

/// Expected trip length in ticks (minutes) at `speed` cells per hour.
#[inline]
pub fn expected_ticks(distance: f64, speed: f64) -> f64 {
    if speed > 0.0 {
        distance / speed * 60.0
    } else {
        FALLBACK_EXPECTED_TICKS
    }
}

/// Delay worth remembering, if `actual` exceeds `threshold × expected`.
#[inline]
pub fn excess_delay(actual: f64, expected: f64, threshold: f64) -> Option<f64> {
    (actual > threshold * expected).then(|| actual - expected)
}

/// Append a `TripRecord` for `trip` finishing at `now` and, when the trip
/// ran late, a learned delay on its route.  Returns the record.
pub fn learn_from_trip(citizen: &mut Citizen, trip: &ActiveTrip, now: Tick, ctx: &TickContext<'_>) -> TripRecord {
    let route = trip.route();
    let actual = now.since(trip.start_tick);
    let expected = expected_ticks(trip_distance(route.origin, route.destination), ctx.speed_of(trip.mode));

    if let Some(delay) = excess_delay(actual as f64, expected, ctx.config.learning_threshold) {
        citizen.learned.record(route, delay);
        debug!(agent = %citizen.id, %route, delay, "delay learned");
    }

    let record = TripRecord {
        origin:         route.origin,
        destination:    route.destination,
        activity:       trip.objective.activity.clone(),
        mode:           trip.mode,
        start_tick:     trip.start_tick,
        tick:           now,
        actual_ticks:   actual,
        expected_ticks: expected,
        weather:        ctx.weather,
    };
    citizen.history.push(record.clone());
    record
}
