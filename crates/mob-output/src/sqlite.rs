//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! the tables `trips`, `tick_summaries`, `agent_snapshots` and `mode_usage`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ModeUsageRow, OutputResult, TickSummaryRow, TripRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS trips (
                 agent_id       INTEGER NOT NULL,
                 mode           TEXT    NOT NULL,
                 activity       TEXT    NOT NULL,
                 origin_x       INTEGER NOT NULL,
                 origin_y       INTEGER NOT NULL,
                 destination_x  INTEGER NOT NULL,
                 destination_y  INTEGER NOT NULL,
                 start_tick     INTEGER NOT NULL,
                 end_tick       INTEGER NOT NULL,
                 actual_ticks   INTEGER NOT NULL,
                 expected_ticks REAL    NOT NULL,
                 weather        REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL,
                 in_transit     INTEGER NOT NULL,
                 started        INTEGER NOT NULL,
                 completed      INTEGER NOT NULL,
                 aborted        INTEGER NOT NULL,
                 spawn_failed   INTEGER NOT NULL,
                 reports        INTEGER NOT NULL,
                 at_home        INTEGER NOT NULL,
                 at_work        INTEGER NOT NULL,
                 at_other       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 x        INTEGER NOT NULL,
                 y        INTEGER NOT NULL,
                 activity TEXT    NOT NULL,
                 mode     TEXT    NOT NULL,
                 pending  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS mode_usage (
                 mode  TEXT PRIMARY KEY,
                 count INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_trip(&mut self, row: &TripRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO trips \
             (agent_id, mode, activity, origin_x, origin_y, destination_x, destination_y, \
              start_tick, end_tick, actual_ticks, expected_ticks, weather) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )?;
        stmt.execute(rusqlite::params![
            row.agent_id,
            row.mode,
            row.activity,
            row.origin_x,
            row.origin_y,
            row.destination_x,
            row.destination_y,
            row.start_tick as i64,
            row.end_tick as i64,
            row.actual_ticks as i64,
            row.expected_ticks,
            row.weather,
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots (agent_id, tick, x, y, activity, mode, pending) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick as i64,
                    row.x,
                    row.y,
                    row.activity,
                    row.mode,
                    row.pending,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, unix_time_secs, in_transit, started, completed, aborted, spawn_failed, \
              reports, at_home, at_work, at_other) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                row.tick as i64,
                row.unix_time_secs,
                row.in_transit as i64,
                row.started as i64,
                row.completed as i64,
                row.aborted as i64,
                row.spawn_failed as i64,
                row.reports as i64,
                row.at_home as i64,
                row.at_work as i64,
                row.at_other as i64,
            ],
        )?;
        Ok(())
    }

    fn write_mode_usage(&mut self, rows: &[ModeUsageRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for row in rows {
            tx.execute(
                "INSERT OR REPLACE INTO mode_usage (mode, count) VALUES (?1, ?2)",
                rusqlite::params![row.mode, row.count as i64],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
