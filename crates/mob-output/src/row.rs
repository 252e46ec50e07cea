//! Plain data row types written by output backends.

use mob_agent::{Citizen, TripRecord};
use mob_core::{AgentId, Tick};
use mob_sim::TickSummary;

/// One finished trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRow {
    pub agent_id:       u32,
    pub mode:           &'static str,
    pub activity:       String,
    pub origin_x:       i32,
    pub origin_y:       i32,
    pub destination_x:  i32,
    pub destination_y:  i32,
    pub start_tick:     u64,
    pub end_tick:       u64,
    pub actual_ticks:   u64,
    pub expected_ticks: f64,
    pub weather:        f64,
}

impl TripRow {
    pub fn from_record(agent: AgentId, record: &TripRecord) -> Self {
        Self {
            agent_id:       agent.0,
            mode:           record.mode.as_str(),
            activity:       record.activity.clone(),
            origin_x:       record.origin.x,
            origin_y:       record.origin.y,
            destination_x:  record.destination.x,
            destination_y:  record.destination.y,
            start_tick:     record.start_tick.0,
            end_tick:       record.tick.0,
            actual_ticks:   record.actual_ticks,
            expected_ticks: record.expected_ticks,
            weather:        record.weather,
        }
    }
}

/// Where one citizen is and what it is doing at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id:   u32,
    pub tick:       u64,
    pub x:          i32,
    pub y:          i32,
    pub activity:   String,
    /// Mode of the trip in progress; empty while stationary.
    pub mode:       &'static str,
    pub pending:    u32,
}

impl AgentSnapshotRow {
    pub fn from_citizen(tick: Tick, citizen: &Citizen) -> Self {
        Self {
            agent_id: citizen.id.0,
            tick:     tick.0,
            x:        citizen.position.x,
            y:        citizen.position.y,
            activity: citizen.current_activity.clone(),
            mode:     citizen.current_mode().map_or("", |m| m.as_str()),
            pending:  citizen.pending_count() as u32,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub in_transit:     u64,
    pub started:        u64,
    pub completed:      u64,
    pub aborted:        u64,
    pub spawn_failed:   u64,
    pub reports:        u64,
    pub at_home:        u64,
    pub at_work:        u64,
    pub at_other:       u64,
}

impl TickSummaryRow {
    pub fn from_summary(summary: &TickSummary, unix_time_secs: i64) -> Self {
        Self {
            tick:         summary.tick.0,
            unix_time_secs,
            in_transit:   summary.in_transit as u64,
            started:      summary.started as u64,
            completed:    summary.completed as u64,
            aborted:      summary.aborted as u64,
            spawn_failed: summary.spawn_failed as u64,
            reports:      summary.reports as u64,
            at_home:      summary.at_home as u64,
            at_work:      summary.at_work as u64,
            at_other:     summary.at_other as u64,
        }
    }
}

/// Final choice count for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeUsageRow {
    pub mode:  &'static str,
    pub count: u64,
}
