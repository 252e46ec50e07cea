use mob_agent::{CongestionReport, TripRecord};
use mob_core::{AgentId, TransportMode};

/// A congestion report together with the agents it is addressed to.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingReport {
    pub report:     CongestionReport,
    pub recipients: Vec<AgentId>,
}

/// What happened to one agent during one `step`.
///
/// The tick driver consumes these in the apply phase: mode usage, inbox
/// delivery, output rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// Mode picked by the selector this tick, whether or not the trip started.
    pub mode_chosen:  Option<TransportMode>,
    /// Mode of a trip that started this tick.
    pub started:      Option<TransportMode>,
    /// The traffic engine refused the spawn; the objective stays pending.
    pub spawn_failed: bool,
    pub completed:    Option<TripRecord>,
    /// Liveness ran out and the trip was dropped.
    pub aborted:      bool,
    pub reports:      Vec<OutgoingReport>,
}

impl StepOutcome {
    /// `true` if nothing happened.
    pub fn is_quiet(&self) -> bool {
        self.mode_chosen.is_none()
            && self.started.is_none()
            && !self.spawn_failed
            && self.completed.is_none()
            && !self.aborted
            && self.reports.is_empty()
    }
}
