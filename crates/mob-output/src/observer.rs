//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use mob_agent::{AgentRegistry, TripRecord};
use mob_core::{AgentId, SimConfig, Tick};
use mob_sim::{ModeUsage, SimObserver, TickSummary};
use tracing::warn;

use crate::row::{AgentSnapshotRow, ModeUsageRow, TickSummaryRow, TripRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes trips, tick summaries, agent snapshots and
/// the final mode usage to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    start_unix_secs:    i64,
    tick_duration_secs: u32,
    trips_written:      u64,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_unix_secs:    config.start_unix_secs,
            tick_duration_secs: config.tick_duration_secs,
            trips_written:      0,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn trips_written(&self) -> u64 {
        self.trips_written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * i64::from(self.tick_duration_secs)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_trip_completed(&mut self, agent: AgentId, record: &TripRecord) {
        let result = self.writer.write_trip(&TripRow::from_record(agent, record));
        if result.is_ok() {
            self.trips_written += 1;
        }
        self.store_err(result);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow::from_summary(summary, self.unix_time(summary.tick));
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentRegistry, _usage: &ModeUsage) {
        let rows: Vec<AgentSnapshotRow> =
            agents.iter().map(|c| AgentSnapshotRow::from_citizen(tick, c)).collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, usage: &ModeUsage) {
        let rows: Vec<ModeUsageRow> =
            usage.iter().map(|(mode, count)| ModeUsageRow { mode: mode.as_str(), count }).collect();
        let result = self.writer.write_mode_usage(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
