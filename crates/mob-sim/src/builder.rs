//! Fluent builder for constructing a [`Sim`].

use mob_agent::{AgentRegistry, AgentRngs, ProfileTable};
use mob_behavior::BehaviorConfig;
use mob_core::{ModeTable, SimConfig, SimRng};
use mob_schedule::{CategoryMap, DepartureModifier, NoAdjustment};
use mob_spatial::GridSpace;
use mob_traffic::TrafficConnector;

use crate::{MobilityConfig, ModeUsage, Sim, SimError, SimResult};

/// `SimRng::child` offsets of the independent run-level streams.
pub(crate) const WEATHER_STREAM: u64 = 1;
pub(crate) const ORDER_STREAM: u64 = 2;

/// The only tick length the behaviour layer supports.
pub const SECS_PER_TICK: u32 = 60;

/// Fluent builder for [`Sim<T>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration (must be 60 s), …
/// - [`AgentRegistry`] + [`AgentRngs`]: from [`mob_agent::PopulationBuilder`]
/// - `T: TrafficConnector`: the traffic engine
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                  |
/// |------------------|------------------------------------------|
/// | `.behavior(c)`   | `BehaviorConfig::default()`              |
/// | `.modes(t)`      | `ModeTable::urban_defaults()`            |
/// | `.grid(g)`       | 50 × 50                                  |
/// | `.categories(m)` | `CategoryMap::default()`                 |
/// | `.profiles(p)`   | `ProfileTable::urban_defaults()`         |
/// | `.modifier(m)`   | `NoAdjustment`                           |
/// | `.weather(w)`    | drawn from the run seed                  |
///
/// # Example
///
/// ```rust,ignore
/// let (registry, rngs) = PopulationBuilder::new(n, seed).build()?;
/// let mut sim = SimBuilder::new(config, registry, rngs, KinematicTraffic::default())
///     .behavior(behavior)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<T: TrafficConnector> {
    config:     SimConfig,
    registry:   AgentRegistry,
    rngs:       AgentRngs,
    traffic:    T,
    behavior:   BehaviorConfig,
    modes:      ModeTable,
    grid:       GridSpace,
    categories: CategoryMap,
    profiles:   ProfileTable,
    modifier:   Box<dyn DepartureModifier>,
    weather:    Option<f64>,
}

impl<T: TrafficConnector> SimBuilder<T> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, registry: AgentRegistry, rngs: AgentRngs, traffic: T) -> Self {
        Self {
            config,
            registry,
            rngs,
            traffic,
            behavior:   BehaviorConfig::default(),
            modes:      ModeTable::urban_defaults(),
            grid:       GridSpace::default(),
            categories: CategoryMap::default(),
            profiles:   ProfileTable::urban_defaults(),
            modifier:   Box::new(NoAdjustment),
            weather:    None,
        }
    }

    /// Build the population from `mobility` and `profiles`, and carry its
    /// grid, behavior and weather into the builder.
    pub fn populated(
        config:   SimConfig,
        mobility: &MobilityConfig,
        profiles: ProfileTable,
        traffic:  T,
    ) -> SimResult<Self> {
        mobility.validate()?;
        let (registry, rngs) = mobility.populate(profiles.clone(), config.seed)?;
        let mut builder = Self::new(config, registry, rngs, traffic)
            .behavior(mobility.behavior.clone())
            .grid(mobility.grid()?)
            .profiles(profiles);
        builder.weather = mobility.weather;
        Ok(builder)
    }

    pub fn behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn modes(mut self, modes: ModeTable) -> Self {
        self.modes = modes;
        self
    }

    /// Must be the grid the population was placed on.
    pub fn grid(mut self, grid: GridSpace) -> Self {
        self.grid = grid;
        self
    }

    pub fn categories(mut self, categories: CategoryMap) -> Self {
        self.categories = categories;
        self
    }

    /// Profiles whose templates drive daily replanning.  Must be the table
    /// the population was built from.
    pub fn profiles(mut self, profiles: ProfileTable) -> Self {
        self.profiles = profiles;
        self
    }

    /// Departure modifier applied after every daily replanning.
    pub fn modifier<M: DepartureModifier + 'static>(mut self, modifier: M) -> Self {
        self.modifier = Box::new(modifier);
        self
    }

    /// Fix the weather of day 0 instead of drawing it.
    pub fn weather(mut self, weather: f64) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<T>> {
        let agent_count = self.registry.len();
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if let Some(c) = self.registry.iter().enumerate().find(|(i, c)| c.id.index() != *i) {
            return Err(SimError::Config(format!("citizen at index {} carries id {}", c.0, c.1.id)));
        }
        // Walk durations, learned delays, liveness and day boundaries all count
        // minutes.
        let tick = self.config.tick_duration_secs;
        if tick != SECS_PER_TICK {
            return Err(SimError::Config(format!(
                "tick_duration_secs must be {SECS_PER_TICK} (one tick per minute), got {tick}"
            )));
        }
        self.behavior.validate()?;

        let mut root = SimRng::new(self.config.seed);
        let mut weather_rng = root.child(WEATHER_STREAM);
        let order_rng = root.child(ORDER_STREAM);
        let weather = match self.weather {
            Some(w) if (0.0..=1.0).contains(&w) => w,
            Some(w) => return Err(SimError::Config(format!("weather must be within [0, 1], got {w}"))),
            None => weather_rng.unit(),
        };

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            registry:   self.registry,
            rngs:       self.rngs,
            traffic:    self.traffic,
            behavior:   self.behavior,
            modes:      self.modes,
            grid:       self.grid,
            categories: self.categories,
            profiles:   self.profiles,
            modifier:   self.modifier,
            weather,
            weather_rng,
            order_rng,
            usage:      ModeUsage::default(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
