//! Population profiles.
//!
//! A profile is one socio-demographic group: how large a share of the
//! population it is, how likely its members are to own a car or a bike,
//! their age range, their daily template, and their mode-choice weights.
//!
//! # Default urban population
//!
//! | Profile              | Share | P(car) | P(bike) | Ages  | Day                                   |
//! |----------------------|-------|--------|---------|-------|---------------------------------------|
//! | High School Student  | 0.077 | 0.15   | 0.05    | 14–18 | home 7h, school 8h, leisure 4h, home  |
//! | College student      | 0.116 | 0.14   | 0.09    | 18–25 | home 8h, school 6h, leisure 5h, home  |
//! | Young professional   | 0.248 | 0.26   | 0.05    | 25–35 | home 7h, work 9h, leisure 3h, home    |
//! | Home maker           | 0.193 | 0.87   | 0.03    | 25–60 | home all day                          |
//! | Mid-career workers   | 0.116 | 0.54   | 0.03    | 35–50 | home 7h, work 9h, home                |
//! | Executives           | 0.029 | 0.71   | 0.03    | 40–60 | home 6h, work 11h, home               |
//! | Retirees             | 0.221 | 0.30   | 0.03    | 60–85 | home all day                          |
//!
//! Every default profile uses the weights `[-0.2, -0.6, 0.2, -0.7]`
//! (price, time, social, difficulty) for every category.

use std::collections::BTreeMap;

use mob_core::{AgentRng, ProfileId};
use mob_schedule::ActivityTemplate;

use crate::{AgentError, AgentResult, CategoryWeights};

/// Weights shared by all default profiles.
pub const DEFAULT_PROFILE_WEIGHTS: [f64; 4] = [-0.2, -0.6, 0.2, -0.7];

/// Ownership probabilities used for citizens whose profile is unknown.
pub const FALLBACK_CAR_PROBABILITY: f64 = 0.5;
pub const FALLBACK_BIKE_PROBABILITY: f64 = 0.1;

/// Age range used for citizens whose profile is unknown.
pub const FALLBACK_AGE_RANGE: (u8, u8) = (25, 65);

// ── Profile ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub name:             String,
    /// Relative share of the population; need not sum to 1 across profiles.
    pub proportion:       f64,
    pub car_probability:  f64,
    pub bike_probability: f64,
    /// Inclusive.
    pub age_range:        (u8, u8),
    pub template:         ActivityTemplate,
    pub weights:          CategoryWeights,
}

impl Profile {
    /// A profile with default weights, an all-home day and fallback
    /// ownership and ages.
    pub fn new(name: impl Into<String>, proportion: f64) -> Self {
        Self {
            name:             name.into(),
            proportion,
            car_probability:  FALLBACK_CAR_PROBABILITY,
            bike_probability: FALLBACK_BIKE_PROBABILITY,
            age_range:        FALLBACK_AGE_RANGE,
            template:         ActivityTemplate::all_home(),
            weights:          CategoryWeights::uniform(&DEFAULT_PROFILE_WEIGHTS),
        }
    }

    pub fn with_ownership(mut self, car: f64, bike: f64) -> Self {
        self.car_probability = car;
        self.bike_probability = bike;
        self
    }

    pub fn with_ages(mut self, min: u8, max: u8) -> Self {
        self.age_range = (min.min(max), min.max(max));
        self
    }

    pub fn with_template(mut self, template: ActivityTemplate) -> Self {
        self.template = template;
        self
    }

    /// Draw an age uniformly from `age_range`.
    pub fn sample_age(&self, rng: &mut AgentRng) -> u8 {
        let (lo, hi) = self.age_range;
        rng.gen_range(lo..=hi)
    }
}

// ── ProfileTable ──────────────────────────────────────────────────────────────

/// All profiles, indexed by `ProfileId` in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ProfileTable {
    profiles: Vec<Profile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven-profile urban population from the module docs.
    pub fn urban_defaults() -> Self {
        let mut t = Self::new();
        let rows: [(&str, f64, f64, f64, (u8, u8), &[(&str, usize)]); 7] = [
            ("High School Student", 0.077, 0.15, 0.05, (14, 18),
                &[("home", 7), ("school", 8), ("leisure", 4), ("home", 5)]),
            ("College student", 0.116, 0.14, 0.09, (18, 25),
                &[("home", 8), ("school", 6), ("leisure", 5), ("home", 5)]),
            ("Young professional", 0.248, 0.26, 0.05, (25, 35),
                &[("home", 7), ("work", 9), ("leisure", 3), ("home", 5)]),
            ("Home maker", 0.193, 0.87, 0.03, (25, 60),
                &[("home", 24)]),
            ("Mid-career workers", 0.116, 0.54, 0.03, (35, 50),
                &[("home", 7), ("work", 9), ("home", 8)]),
            ("Executives", 0.029, 0.71, 0.03, (40, 60),
                &[("home", 6), ("work", 11), ("home", 7)]),
            ("Retirees", 0.221, 0.30, 0.03, (60, 85),
                &[("home", 24)]),
        ];
        for (name, share, car, bike, (lo, hi), runs) in rows {
            t.push(
                Profile::new(name, share)
                    .with_ownership(car, bike)
                    .with_ages(lo, hi)
                    .with_template(ActivityTemplate::from_runs(runs)),
            );
        }
        t
    }

    /// Append `profile` and return its id.  A profile with the same name is
    /// replaced in place and keeps its id.
    pub fn push(&mut self, profile: Profile) -> ProfileId {
        if let Some(id) = self.find(&profile.name) {
            self.profiles[id.index()] = profile;
            return id;
        }
        self.profiles.push(profile);
        ProfileId((self.profiles.len() - 1) as u16)
    }

    #[inline]
    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.get(id.index())
    }

    pub fn get_mut(&mut self, id: ProfileId) -> Option<&mut Profile> {
        self.profiles.get_mut(id.index())
    }

    /// Id of the profile called `name`.
    pub fn find(&self, name: &str) -> Option<ProfileId> {
        self.profiles
            .iter()
            .position(|p| p.name == name)
            .map(|i| ProfileId(i as u16))
    }

    /// Mutable access by name.
    pub fn by_name_mut(&mut self, name: &str) -> AgentResult<&mut Profile> {
        self.profiles
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| AgentError::UnknownProfile(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileId, &Profile)> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (ProfileId(i as u16), p))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Draw a profile with probability proportional to its share.
    ///
    /// `None` when the table is empty or no share is positive.
    pub fn sample(&self, rng: &mut AgentRng) -> Option<ProfileId> {
        let shares: Vec<f64> = self
            .profiles
            .iter()
            .map(|p| if p.proportion.is_finite() { p.proportion.max(0.0) } else { 0.0 })
            .collect();
        rng.weighted_index(&shares).map(|i| ProfileId(i as u16))
    }

    /// Replace the templates of every profile named in `templates`.
    ///
    /// Names with no matching profile are returned so the caller can report
    /// them.
    pub fn with_templates(&mut self, templates: BTreeMap<String, ActivityTemplate>) -> Vec<String> {
        let mut unmatched = Vec::new();
        for (name, template) in templates {
            match self.profiles.iter_mut().find(|p| p.name == name) {
                Some(p) => p.template = template,
                None => unmatched.push(name),
            }
        }
        unmatched
    }
}
