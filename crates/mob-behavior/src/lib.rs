//! `mob-behavior` — what a citizen does each tick.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`context`]     | `BehaviorConfig` (tunables), `TickContext<'a>` (tick snapshot) |
//! | [`mode_choice`] | Criteria vectors and `choose_mode`                             |
//! | [`lifecycle`]   | `TripPhase`, `step` (the per-agent state machine)              |
//! | [`learning`]    | Expected durations and `learn_from_trip`                       |
//! | [`social`]      | `congestion_severity`, `share_congestion`                      |
//! | [`planning`]    | `plan_day` (daily objective regeneration)                      |
//! | [`outcome`]     | `StepOutcome`, `OutgoingReport`                                |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! The tick loop in mob-sim has two phases:
//!
//! 1. **Step phase** (parallel with Rayon): call [`step`] for every citizen.
//!    A step mutates only its own `Citizen` and `AgentRng`; everything else
//!    is read through `&TickContext` and the `&dyn TrafficConnector`.
//!
//! 2. **Apply phase** (sequential, ascending `AgentId`): consume the
//!    `StepOutcome`s, counting chosen modes and appending congestion
//!    reports to recipients' inboxes.
//!
//! Because of this split a report sent at tick `t` is visible to its
//! recipients from tick `t + 1`.

pub mod context;
pub mod error;
pub mod learning;
pub mod lifecycle;
pub mod mode_choice;
pub mod outcome;
pub mod planning;
pub mod social;

#[cfg(test)]
mod tests;

pub use context::{BehaviorConfig, TickContext};
pub use error::{BehaviorError, BehaviorResult};
pub use learning::{excess_delay, expected_ticks, learn_from_trip};
pub use lifecycle::{phase, step, walking_ticks, TripPhase};
pub use mode_choice::{build_candidates, choose_mode, criteria, trip_distance};
pub use outcome::{OutgoingReport, StepOutcome};
pub use planning::plan_day;
pub use social::{congestion_severity, share_congestion};
