//! `mob-traffic` — the seam between agents and a traffic microsimulation.
//!
//! Trips in any mode other than walking are handed to a traffic engine
//! through the [`TrafficConnector`] trait.  The agent then polls the engine
//! every tick until the vehicle disappears (arrived) or its liveness runs
//! out.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`connector`] | `TrafficConnector` trait, `Telemetry`                           |
//! | [`kinematic`] | `KinematicTraffic`: in-process straight-line mover              |
//! | [`offline`]   | `OfflineTraffic`: an engine that never answers                  |
//! | [`error`]     | `TrafficError`, `TrafficResult<T>`                              |
//!
//! # Failure model
//!
//! Every call can fail.  Agents treat any error as "no effect this tick":
//! a failed spawn leaves the objective pending, a failed query leaves the
//! trip in transit, and a failed removal is ignored.

pub mod connector;
pub mod error;
pub mod kinematic;
pub mod offline;


pub use connector::{Telemetry, TrafficConnector};
pub use error::{TrafficError, TrafficResult};
pub use kinematic::{KinematicConfig, KinematicTraffic};
pub use offline::OfflineTraffic;
