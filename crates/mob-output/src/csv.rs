//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//!
//! | File                  | One row per                   |
//! |-----------------------|-------------------------------|
//! | `trips.csv`           | finished trip                 |
//! | `tick_summaries.csv`  | tick                          |
//! | `agent_snapshots.csv` | citizen at each snapshot tick |
//! | `mode_usage.csv`      | mode, written at the end      |

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ModeUsageRow, OutputResult, TickSummaryRow, TripRow};

pub const TRIP_HEADERS: [&str; 12] = [
    "agent_id", "mode", "activity", "origin_x", "origin_y", "destination_x", "destination_y",
    "start_tick", "end_tick", "actual_ticks", "expected_ticks", "weather",
];

pub const SUMMARY_HEADERS: [&str; 11] = [
    "tick", "unix_time_secs", "in_transit", "started", "completed", "aborted", "spawn_failed",
    "reports", "at_home", "at_work", "at_other",
];

pub const SNAPSHOT_HEADERS: [&str; 7] = ["agent_id", "tick", "x", "y", "activity", "mode", "pending"];

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    trips:     Writer<File>,
    summaries: Writer<File>,
    snapshots: Writer<File>,
    usage:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record(TRIP_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut usage = Writer::from_path(dir.join("mode_usage.csv"))?;
        usage.write_record(["mode", "count"])?;

        Ok(Self { trips, summaries, snapshots, usage, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trip(&mut self, row: &TripRow) -> OutputResult<()> {
        self.trips.write_record(&[
            row.agent_id.to_string(),
            row.mode.to_owned(),
            row.activity.clone(),
            row.origin_x.to_string(),
            row.origin_y.to_string(),
            row.destination_x.to_string(),
            row.destination_y.to_string(),
            row.start_tick.to_string(),
            row.end_tick.to_string(),
            row.actual_ticks.to_string(),
            format!("{:.2}", row.expected_ticks),
            format!("{:.3}", row.weather),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.activity.clone(),
                row.mode.to_owned(),
                row.pending.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.in_transit.to_string(),
            row.started.to_string(),
            row.completed.to_string(),
            row.aborted.to_string(),
            row.spawn_failed.to_string(),
            row.reports.to_string(),
            row.at_home.to_string(),
            row.at_work.to_string(),
            row.at_other.to_string(),
        ])?;
        Ok(())
    }

    fn write_mode_usage(&mut self, rows: &[ModeUsageRow]) -> OutputResult<()> {
        for row in rows {
            self.usage.write_record(&[row.mode.to_owned(), row.count.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trips.flush()?;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        self.usage.flush()?;
        Ok(())
    }
}
