//! Framework error type.
//!
//! Sub-crates define their own error enums; `MobError` is the shared base
//! for configuration and lookup failures that more than one crate can hit.

use thiserror::Error;

use crate::{AgentId, ProfileId};

/// The top-level error type for `mob-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MobError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("profile {0} not found")]
    ProfileNotFound(ProfileId),

    #[error("unknown transport mode {0:?}")]
    UnknownMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `mob-*` crates.
pub type MobResult<T> = Result<T, MobError>;
