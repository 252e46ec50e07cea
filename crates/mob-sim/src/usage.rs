//! Per-mode usage counters and per-tick summaries.

use std::fmt;

use mob_core::{Tick, TransportMode};

// ── ModeUsage ─────────────────────────────────────────────────────────────────

/// How often each mode was chosen since the start of the run.
///
/// A choice counts even when the traffic engine then refused the trip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeUsage {
    counts: [u64; TransportMode::ALL.len()],
}

impl ModeUsage {
    #[inline]
    fn slot(mode: TransportMode) -> usize {
        match mode {
            TransportMode::Walk => 0,
            TransportMode::Bike => 1,
            TransportMode::Car  => 2,
            TransportMode::Bus  => 3,
        }
    }

    pub fn record(&mut self, mode: TransportMode) {
        self.counts[Self::slot(mode)] += 1;
    }

    #[inline]
    pub fn get(&self, mode: TransportMode) -> u64 {
        self.counts[Self::slot(mode)]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(mode, count)` for every mode, in `TransportMode::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (TransportMode, u64)> + '_ {
        TransportMode::ALL.iter().map(|&m| (m, self.get(m)))
    }
}

impl fmt::Display for ModeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (mode, n) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{mode}={n}")?;
            first = false;
        }
        Ok(())
    }
}

// ── TickSummary ───────────────────────────────────────────────────────────────

/// Aggregate counts for one tick, taken after the apply phase.
///
/// Activity counts classify every citizen's current activity label by
/// category; a citizen in transit still counts under the activity it left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:         Tick,
    pub in_transit:   usize,
    pub started:      usize,
    pub completed:    usize,
    pub aborted:      usize,
    pub spawn_failed: usize,
    /// Congestion reports sent (one per reporter, not per recipient).
    pub reports:      usize,
    pub at_home:      usize,
    pub at_work:      usize,
    pub at_other:     usize,
}
