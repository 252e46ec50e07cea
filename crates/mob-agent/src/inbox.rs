use mob_core::{AgentId, GridPos, Tick};

/// A congestion observation shared with an agent's social neighbours.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CongestionReport {
    pub location: GridPos,
    /// In `[0, 1]`; 1 means standing still.
    pub severity: f64,
    pub tick:     Tick,
    pub reporter: AgentId,
}

/// Append-only list of received reports.
///
/// Nothing in the simulation prunes it; consumers call [`Inbox::drain`].
#[derive(Clone, Debug, Default)]
pub struct Inbox {
    reports: Vec<CongestionReport>,
}

impl Inbox {
    pub fn push(&mut self, report: CongestionReport) {
        self.reports.push(report);
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CongestionReport> {
        self.reports.iter()
    }

    /// Most recently received report.
    pub fn latest(&self) -> Option<&CongestionReport> {
        self.reports.last()
    }

    /// Remove and return every report, oldest first.
    pub fn drain(&mut self) -> Vec<CongestionReport> {
        std::mem::take(&mut self.reports)
    }
}
