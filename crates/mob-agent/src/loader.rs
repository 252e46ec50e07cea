//! CSV loaders for the static population tables.
//!
//! # Profiles CSV
//!
//! ```csv
//! profile,proportion,car_probability,bike_probability,age_min,age_max
//! Young professional,0.248,0.26,0.05,25,35
//! Retirees,0.221,0.30,0.03,,
//! ```
//!
//! `age_min`/`age_max` may be empty or absent.  Loaded profiles start with
//! an all-home template; attach real templates with
//! [`ProfileTable::with_templates`] after loading them through
//! `mob_schedule::load_templates_csv`.
//!
//! # Weights CSV
//!
//! ```csv
//! profile,category,price,time,social,difficulty
//! Young professional,work,-0.2,-0.8,0.1,-0.5
//! ```
//!
//! Rows override the named profile's vector for one category.
//!
//! # Modes CSV
//!
//! ```csv
//! mode,fixed_price,price_per_distance,waiting_time,speed,social,difficulty,weather_coeff
//! car,0,0.32,2.5,20,1,0.2,0
//! ```

use std::io::Read;
use std::path::Path;

use mob_core::{ModeProfile, ModeTable, TransportMode};
use mob_schedule::ActivityCategory;
use serde::Deserialize;
use tracing::debug;

use crate::{AgentError, AgentResult, Profile, ProfileTable};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProfileRecord {
    profile:          String,
    proportion:       f64,
    car_probability:  f64,
    bike_probability: f64,
    #[serde(default)]
    age_min:          Option<u8>,
    #[serde(default)]
    age_max:          Option<u8>,
}

#[derive(Deserialize)]
struct WeightRecord {
    profile:    String,
    category:   String,
    price:      f64,
    time:       f64,
    social:     f64,
    difficulty: f64,
}

#[derive(Deserialize)]
struct ModeRecord {
    mode:               String,
    fixed_price:        f64,
    price_per_distance: f64,
    waiting_time:       f64,
    speed:              f64,
    social:             f64,
    difficulty:         f64,
    weather_coeff:      f64,
}

fn probability(name: &str, value: f64) -> AgentResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AgentError::Parse(format!("{name} must be within [0, 1], got {value}")));
    }
    Ok(value)
}

// ── Profiles ──────────────────────────────────────────────────────────────────

/// Load a profile table from a CSV file.
pub fn load_profiles_csv(path: &Path) -> AgentResult<ProfileTable> {
    let file = std::fs::File::open(path)?;
    load_profiles_reader(file)
}

/// Like [`load_profiles_csv`] but accepts any `Read` source.
pub fn load_profiles_reader<R: Read>(reader: R) -> AgentResult<ProfileTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = ProfileTable::new();

    for result in csv_reader.deserialize::<ProfileRecord>() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        if !row.proportion.is_finite() || row.proportion < 0.0 {
            return Err(AgentError::Parse(format!(
                "proportion of {:?} must be non-negative, got {}",
                row.profile, row.proportion
            )));
        }
        let mut profile = Profile::new(row.profile.trim(), row.proportion).with_ownership(
            probability("car_probability", row.car_probability)?,
            probability("bike_probability", row.bike_probability)?,
        );
        if let (Some(lo), Some(hi)) = (row.age_min, row.age_max) {
            profile = profile.with_ages(lo, hi);
        }
        table.push(profile);
    }

    debug!(profiles = table.len(), "loaded profile table");
    Ok(table)
}

// ── Weights ───────────────────────────────────────────────────────────────────

/// Apply per-category weight vectors from a CSV file to `profiles`.
///
/// Returns the number of rows applied.
pub fn load_weights_csv(path: &Path, profiles: &mut ProfileTable) -> AgentResult<usize> {
    let file = std::fs::File::open(path)?;
    load_weights_reader(file, profiles)
}

/// Like [`load_weights_csv`] but accepts any `Read` source.
pub fn load_weights_reader<R: Read>(reader: R, profiles: &mut ProfileTable) -> AgentResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut applied = 0;

    for result in csv_reader.deserialize::<WeightRecord>() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        let category: ActivityCategory = row.category.trim().parse()?;
        let profile = profiles.by_name_mut(row.profile.trim())?;
        profile
            .weights
            .set(category, vec![row.price, row.time, row.social, row.difficulty]);
        applied += 1;
    }

    Ok(applied)
}

// ── Modes ─────────────────────────────────────────────────────────────────────

/// Load a mode table from a CSV file.
pub fn load_modes_csv(path: &Path) -> AgentResult<ModeTable> {
    let file = std::fs::File::open(path)?;
    load_modes_reader(file)
}

/// Like [`load_modes_csv`] but accepts any `Read` source.
pub fn load_modes_reader<R: Read>(reader: R) -> AgentResult<ModeTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = ModeTable::new();

    for result in csv_reader.deserialize::<ModeRecord>() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        let mode: TransportMode = row.mode.trim().parse()?;
        table.insert(mode, ModeProfile {
            fixed_price:        row.fixed_price,
            price_per_distance: row.price_per_distance,
            waiting_time:       row.waiting_time,
            speed:              row.speed,
            social:             row.social,
            difficulty:         row.difficulty,
            weather_coeff:      row.weather_coeff,
        });
    }

    Ok(table)
}
