//! `mob-sim` — tick loop orchestrator for the mob urban mobility simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Day start: at tick % 1440 == 0 (tick > 0): new weather, every
//!                 citizen replans its day (template + departure modifier).
//!   ② Step:      mob_behavior::step for each citizen, in a shuffled order
//!                 (on Rayon's pool with the `parallel` feature).
//!   ③ Apply:     for each outcome in ascending AgentId order:
//!                   mode_chosen → ModeUsage
//!                   reports     → recipients' inboxes
//!                   completed   → observer.on_trip_completed
//!   ④ Advance:   traffic.advance(); errors are logged and ignored.
//! ```
//!
//! Agent-level failures never leave `run`: spawn errors, traffic outages and
//! stuck trips are handled inside the step.  Only building can fail.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the step phase on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the learned-delay tables.                   |
//! | `serde`    | Serialize/Deserialize for `MobilityConfig`.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mob_core::SimConfig;
//! use mob_sim::{MobilityConfig, NoopObserver, SimBuilder};
//! use mob_traffic::KinematicTraffic;
//!
//! let mobility = MobilityConfig::default();
//! let mut sim = SimBuilder::populated(
//!     SimConfig::default(), &mobility, ProfileTable::urban_defaults(), KinematicTraffic::default(),
//! )?
//! .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod usage;


pub use builder::{SimBuilder, SECS_PER_TICK};
pub use config::MobilityConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use usage::{ModeUsage, TickSummary};
