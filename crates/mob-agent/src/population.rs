//! Fluent builder for constructing `AgentRegistry` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use mob_agent::{PopulationBuilder, ProfileTable};
//! use mob_spatial::GridSpace;
//!
//! let (registry, rngs) = PopulationBuilder::new(200, /*seed=*/ 42)
//!     .grid(GridSpace::new(50, 50).unwrap())
//!     .profiles(ProfileTable::urban_defaults())
//!     .neighbors(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.len(), 200);
//! assert_eq!(rngs.len(),     200);
//! ```
//!
//! Each citizen draws, from its own RNG and in this order: a profile
//! (weighted by share), car ownership, bike ownership, an age, a starting
//! cell, and its day-0 objectives.  Social neighbours are the `k` nearest
//! citizens by starting cell.

use mob_core::AgentId;
use mob_schedule::{generate_objectives, CategoryMap};
use mob_spatial::{GridSpace, NeighborIndex};
use tracing::{debug, info};

use crate::{AgentError, AgentRegistry, AgentResult, AgentRngs, Citizen, ProfileTable, DEFAULT_LIVENESS};

/// Social neighbours per citizen unless configured.
pub const DEFAULT_NEIGHBORS: usize = 5;

pub struct PopulationBuilder {
    count:      usize,
    seed:       u64,
    grid:       GridSpace,
    profiles:   ProfileTable,
    categories: CategoryMap,
    neighbors:  usize,
    liveness:   u32,
}

impl PopulationBuilder {
    /// Create a builder for `count` citizens using `seed` as the global RNG
    /// seed.  Starts with the default grid, profiles and category map.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            grid:       GridSpace::default(),
            profiles:   ProfileTable::urban_defaults(),
            categories: CategoryMap::default(),
            neighbors:  DEFAULT_NEIGHBORS,
            liveness:   DEFAULT_LIVENESS,
        }
    }

    pub fn grid(mut self, grid: GridSpace) -> Self {
        self.grid = grid;
        self
    }

    pub fn profiles(mut self, profiles: ProfileTable) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn categories(mut self, categories: CategoryMap) -> Self {
        self.categories = categories;
        self
    }

    /// Number of social neighbours per citizen; 0 disables sharing.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    /// Starting liveness of every citizen.
    pub fn liveness(mut self, ticks: u32) -> Self {
        self.liveness = ticks;
        self
    }

    /// Construct `AgentRegistry` and `AgentRngs`.
    pub fn build(self) -> AgentResult<(AgentRegistry, AgentRngs)> {
        if self.profiles.is_empty() {
            return Err(AgentError::EmptyProfileTable);
        }
        if AgentId::try_from(self.count).is_err() || self.count == AgentId::INVALID.index() {
            return Err(AgentError::Config(format!("population of {} exceeds the id range", self.count)));
        }

        let mut rngs = AgentRngs::new(self.count, self.seed);
        let mut citizens = Vec::with_capacity(self.count);

        for (i, rng) in rngs.inner.iter_mut().enumerate() {
            let id = AgentId(i as u32);
            let profile_id = self.profiles.sample(rng).ok_or(AgentError::EmptyProfileTable)?;
            let profile = self.profiles.get(profile_id).ok_or(AgentError::ProfileNotFound(profile_id))?;

            let mut c = Citizen::new(id, profile_id);
            c.has_car = rng.gen_bool(profile.car_probability);
            c.has_bike = rng.gen_bool(profile.bike_probability);
            c.age = profile.sample_age(rng);
            c.position = self.grid.random_position(rng.inner());
            c.weights = profile.weights.clone();
            c.liveness = self.liveness;
            c.objectives = generate_objectives(
                Some(&profile.template),
                &c.current_activity,
                &mut c.anchors,
                &self.grid,
                &self.categories,
                rng,
            );
            citizens.push(c);
        }

        if self.neighbors > 0 {
            let index = NeighborIndex::build(citizens.iter().map(|c| (c.id, c.position)));
            for c in &mut citizens {
                c.neighbors = index.k_nearest(c.position, self.neighbors, Some(c.id));
            }
        }

        let registry = AgentRegistry::new(citizens);
        info!(
            agents = registry.len(),
            car_owners = registry.iter().filter(|c| c.has_car).count(),
            bike_owners = registry.iter().filter(|c| c.has_bike).count(),
            "population built"
        );
        debug!(
            objectives = registry.iter().map(|c| c.objectives.len()).sum::<usize>(),
            "day-0 objectives generated"
        );
        Ok((registry, rngs))
    }
}
