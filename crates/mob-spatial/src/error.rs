//! Spatial-subsystem error type.

use thiserror::Error;

use mob_core::GridPos;

/// Errors produced by `mob-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid must have positive dimensions, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },

    #[error("position {0} lies outside the grid")]
    OutOfBounds(GridPos),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
