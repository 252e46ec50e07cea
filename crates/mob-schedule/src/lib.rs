//! `mob-schedule` — daily activity templates and trip objectives.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`activity`]   | `ActivityTemplate`, `ActivityCategory`, `CategoryMap`, `TripObjective` |
//! | [`generator`]  | `generate_objectives`, `Anchors` (cached home/work cells)      |
//! | [`modifier`]   | `DepartureModifier` trait, `NoAdjustment`, `LearnedDelayDeparture`, chaining |
//! | [`loader`]     | `load_templates_csv`, `load_categories_csv` and reader variants |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                           |
//!
//! # Day model (summary)
//!
//! A template holds one activity label per hour of the day.  Runs of the same
//! label are collapsed, and every change of label becomes one
//! `TripObjective`:
//!
//! ```text
//! slots      home home work work work leisure home
//! objectives           ^work@2:mm     ^leisure@5:mm ^home@6:mm
//! ```
//!
//! The objective becomes due once the clock reads `hour:minute` within the
//! same hour.

pub mod activity;
pub mod error;
pub mod generator;
pub mod loader;
pub mod modifier;

#[cfg(test)]
mod tests;

pub use activity::{ActivityCategory, ActivityTemplate, CategoryMap, TripObjective, HOURS_PER_DAY};
pub use error::{ScheduleError, ScheduleResult};
pub use generator::{generate_objectives, Anchors};
pub use loader::{load_categories_csv, load_categories_reader, load_templates_csv, load_templates_reader};
pub use modifier::{
    adjust_departures, ChainedModifier, DelayLookup, DepartureModifier, DepartureModifierExt,
    LearnedDelayDeparture, NoAdjustment,
};
