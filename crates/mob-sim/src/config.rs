//! Scenario configuration on top of `SimConfig`.

use mob_agent::{AgentRegistry, AgentRngs, PopulationBuilder, ProfileTable, DEFAULT_NEIGHBORS};
use mob_behavior::BehaviorConfig;
use mob_spatial::GridSpace;

use crate::{SimError, SimResult};

/// Scenario parameters: the world, the population, and agent behavior.
///
/// Usually read from JSON by the application next to its `SimConfig`.
/// Behavior fields sit at the top level of the JSON object:
///
/// ```json
/// { "agent_count": 500, "grid_width": 50, "liveness_max": 240,
///   "decision_strategy": { "kind": "softmax", "temperature": 0.5 } }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobilityConfig {
    pub agent_count: usize,
    pub grid_width:  i32,
    pub grid_height: i32,
    /// Social neighbours per citizen.
    pub neighbors:   usize,
    /// Initial weather in `[0, 1]`; `None` draws it from the run seed.
    pub weather:     Option<f64>,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub behavior: BehaviorConfig,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            grid_width:  50,
            grid_height: 50,
            neighbors:   DEFAULT_NEIGHBORS,
            weather:     None,
            behavior:    BehaviorConfig::default(),
        }
    }
}

impl MobilityConfig {
    pub fn grid(&self) -> SimResult<GridSpace> {
        Ok(GridSpace::new(self.grid_width, self.grid_height)?)
    }

    /// Validate behavior tunables and the grid.
    pub fn validate(&self) -> SimResult<()> {
        self.behavior.validate()?;
        self.grid()?;
        if let Some(w) = self.weather {
            if !(0.0..=1.0).contains(&w) {
                return Err(SimError::Config(format!("weather must be within [0, 1], got {w}")));
            }
        }
        Ok(())
    }

    /// Build the population this configuration describes.
    pub fn populate(&self, profiles: ProfileTable, seed: u64) -> SimResult<(AgentRegistry, AgentRngs)> {
        let population = PopulationBuilder::new(self.agent_count, seed)
            .grid(self.grid()?)
            .profiles(profiles)
            .neighbors(self.neighbors)
            .liveness(self.behavior.liveness_max)
            .build()?;
        Ok(population)
    }
}
