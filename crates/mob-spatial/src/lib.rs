//! `mob-spatial` — the bounded grid agents live on, plus neighbourhood queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`grid`]      | `GridSpace`: bounds, containment, clamping, random positions  |
//! | [`neighbors`] | `NeighborIndex` (R-tree over agent positions)                 |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod neighbors;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use grid::GridSpace;
pub use neighbors::NeighborIndex;
