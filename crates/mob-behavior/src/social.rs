//! Social sharing: agents stuck in slow traffic tell their neighbours.
//!
//! Reports are returned in the `StepOutcome`; the tick driver writes them
//! into recipients' inboxes after every agent has stepped.

use mob_agent::{Citizen, CongestionReport};
use mob_core::{AgentRng, TripId};
use mob_traffic::{Telemetry, TrafficConnector};
use tracing::debug;

use crate::{OutgoingReport, TickContext};

/// Severity of the congestion `telemetry` shows, if it is below
/// `threshold × max_speed`.
pub fn congestion_severity(telemetry: Telemetry, threshold: f64) -> Option<f64> {
    let ratio = telemetry.speed_ratio()?;
    (ratio < threshold).then(|| (1.0 - ratio).clamp(0.0, 1.0))
}

/// With probability `report_probability`, read telemetry for `trip` and
/// build a report for every neighbour if traffic is congested.
pub fn share_congestion(
    citizen: &Citizen,
    trip:    TripId,
    ctx:     &TickContext<'_>,
    traffic: &dyn TrafficConnector,
    rng:     &mut AgentRng,
) -> Option<OutgoingReport> {
    if citizen.neighbors.is_empty() || !rng.gen_bool(ctx.config.report_probability) {
        return None;
    }
    let telemetry = match traffic.telemetry(trip) {
        Ok(Some(t)) => t,
        Ok(None) => return None,
        Err(e) => {
            debug!(agent = %citizen.id, %trip, error = %e, "telemetry unavailable");
            return None;
        }
    };
    let severity = congestion_severity(telemetry, ctx.config.congestion_threshold)?;

    debug!(agent = %citizen.id, severity, neighbours = citizen.neighbors.len(), "congestion reported");
    Some(OutgoingReport {
        report: CongestionReport {
            location: citizen.position,
            severity,
            tick:     ctx.now,
            reporter: citizen.id,
        },
        recipients: citizen.neighbors.clone(),
    })
}
