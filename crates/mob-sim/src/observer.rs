//! Simulation observer trait for progress reporting and data collection.

use mob_agent::{AgentRegistry, TripRecord};
use mob_core::{AgentId, Tick};

use crate::{ModeUsage, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} in transit", summary.tick, summary.in_transit);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at a day boundary after weather was redrawn and every
    /// citizen replanned.
    fn on_day_start(&mut self, _day: u64, _weather: f64) {}

    /// Called once per finished trip, in ascending `AgentId` order.
    fn on_trip_completed(&mut self, _agent: AgentId, _record: &TripRecord) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentRegistry, _usage: &ModeUsage) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _usage: &ModeUsage) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
