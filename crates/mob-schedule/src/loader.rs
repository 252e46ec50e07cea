//! CSV loaders for activity templates and the category map.
//!
//! # Template CSV
//!
//! One row per (profile, hour).  Hours a profile never lists stay empty and
//! are skipped by the generator.
//!
//! ```csv
//! profile,hour,activity
//! Young professional,0,home
//! Young professional,7,work
//! Young professional,16,leisure|RS
//! ```
//!
//! # Category CSV
//!
//! ```csv
//! label,category
//! home,home
//! school,work
//! gym,other
//! ```
//!
//! Labels absent from the category file are `Other`.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::activity::HOURS_PER_DAY;
use crate::{ActivityCategory, ActivityTemplate, CategoryMap, ScheduleError};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TemplateRecord {
    profile:  String,
    hour:     u32,
    activity: String,
}

#[derive(Deserialize)]
struct CategoryRecord {
    label:    String,
    category: String,
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// Load per-profile templates from a CSV file, keyed by profile name.
pub fn load_templates_csv(path: &Path) -> Result<BTreeMap<String, ActivityTemplate>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_templates_reader(file)
}

/// Like [`load_templates_csv`] but accepts any `Read` source.
pub fn load_templates_reader<R: Read>(reader: R) -> Result<BTreeMap<String, ActivityTemplate>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut templates: BTreeMap<String, ActivityTemplate> = BTreeMap::new();

    for result in csv_reader.deserialize::<TemplateRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.hour as usize >= HOURS_PER_DAY {
            return Err(ScheduleError::HourOutOfRange { profile: row.profile, hour: row.hour });
        }
        templates
            .entry(row.profile.trim().to_owned())
            .or_default()
            .set_slot(row.hour as usize, row.activity.trim().to_owned());
    }

    Ok(templates)
}

// ── Categories ────────────────────────────────────────────────────────────────

/// Load a label → category map from a CSV file.
pub fn load_categories_csv(path: &Path) -> Result<CategoryMap, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_categories_reader(file)
}

/// Like [`load_categories_csv`] but accepts any `Read` source.
pub fn load_categories_reader<R: Read>(reader: R) -> Result<CategoryMap, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut map = CategoryMap::empty();

    for result in csv_reader.deserialize::<CategoryRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let category: ActivityCategory = row.category.parse()?;
        map.insert(row.label.trim(), category);
    }

    Ok(map)
}
