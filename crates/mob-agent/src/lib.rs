//! `mob-agent` — citizen agents and the population they form.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`citizen`]     | `Citizen` (one agent's full state), `CategoryWeights`        |
//! | [`trip`]        | `ActiveTrip`, `TripRecord`                                   |
//! | [`learned`]     | `LearnedDelays` (`RouteKey → Vec<f64>`)                      |
//! | [`inbox`]       | `CongestionReport`, `Inbox`                                  |
//! | [`registry`]    | `AgentRegistry` (all citizens), `AgentRngs` (per-agent RNG)  |
//! | [`profile`]     | `Profile`, `ProfileTable` with the default urban population  |
//! | [`loader`]      | CSV loaders for profiles, weights, and the mode table        |
//! | [`population`]  | `PopulationBuilder`                                          |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                         |
//! |-----------|----------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for `LearnedDelays`.                 |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.             |
//!
//! # Ownership
//!
//! Each `Citizen` owns everything about itself, including its pending
//! objectives and the objective of the trip in progress.  Social links are
//! plain `AgentId`s; the only write one agent causes in another is a
//! congestion report appended to its inbox, and the tick loop performs that
//! write after every agent has stepped.

pub mod citizen;
pub mod error;
pub mod inbox;
pub mod learned;
pub mod loader;
pub mod population;
pub mod profile;
pub mod registry;
pub mod trip;


pub use citizen::{CategoryWeights, Citizen, DEFAULT_LIVENESS, UNIFORM_WEIGHTS};
pub use error::{AgentError, AgentResult};
pub use inbox::{CongestionReport, Inbox};
pub use learned::LearnedDelays;
pub use loader::{load_modes_csv, load_modes_reader, load_profiles_csv, load_profiles_reader, load_weights_csv, load_weights_reader};
pub use population::{PopulationBuilder, DEFAULT_NEIGHBORS};
pub use profile::{Profile, ProfileTable, DEFAULT_PROFILE_WEIGHTS};
pub use registry::{AgentRegistry, AgentRngs};
pub use trip::{ActiveTrip, TripRecord};
