use thiserror::Error;

use mob_core::{AgentId, MobError, ProfileId};
use mob_schedule::ScheduleError;
use mob_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("profile {0} not found")]
    ProfileNotFound(ProfileId),

    #[error("unknown profile {0:?}")]
    UnknownProfile(String),

    #[error("profile table is empty or has no positive proportions")]
    EmptyProfileTable,

    #[error("population configuration error: {0}")]
    Config(String),

    #[error("table parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] MobError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
