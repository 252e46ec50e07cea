//! `mob-core` — foundational types for the `mob` urban mobility simulator.
//!
//! This crate is a dependency of every other `mob-*` crate.  It has no
//! `mob-*` dependencies and only `rand` + `thiserror` externally (plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ProfileId`, `TripId`                      |
//! | [`geo`]         | `GridPos`, `Coord`, `RouteKey`, Euclidean distance    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`transport`]   | `TransportMode`, `ModeProfile`, `ModeTable`           |
//! | [`error`]       | `MobError`, `MobResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MobError, MobResult};
pub use geo::{Coord, GridPos, RouteKey, DEFAULT_DISTANCE};
pub use ids::{AgentId, ProfileId, TripId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick, MINUTES_PER_DAY};
pub use transport::{ModeProfile, ModeTable, TransportMode};
