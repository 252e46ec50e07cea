//! The bounded, non-wrapping cell grid.
//!
//! Valid cells satisfy `0 <= x < width` and `0 <= y < height`.  Coordinates
//! reported by the traffic engine are truncated toward zero and then clamped
//! into that range, so a vehicle slightly off the map still maps to an edge
//! cell.

use rand::Rng;

use mob_core::{Coord, GridPos};

use crate::{SpatialError, SpatialResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpace {
    width:  i32,
    height: i32,
}

impl GridSpace {
    pub fn new(width: i32, height: i32) -> SpatialResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SpatialError::EmptyGrid { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.is_valid() && (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// `pos` if it lies on the grid, otherwise `OutOfBounds`.
    pub fn check(&self, pos: GridPos) -> SpatialResult<GridPos> {
        if self.contains(pos) { Ok(pos) } else { Err(SpatialError::OutOfBounds(pos)) }
    }

    /// Nearest on-grid cell.  `GridPos::INVALID` stays invalid.
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        if !pos.is_valid() {
            return pos;
        }
        GridPos::new(pos.x.clamp(0, self.width - 1), pos.y.clamp(0, self.height - 1))
    }

    /// Cell for a continuous coordinate; `None` if it is not finite.
    pub fn clamp_coord(&self, coord: Coord) -> Option<GridPos> {
        if !coord.is_finite() {
            return None;
        }
        let x = coord.x.trunc().clamp(0.0, f64::from(self.width - 1)) as i32;
        let y = coord.y.trunc().clamp(0.0, f64::from(self.height - 1)) as i32;
        Some(GridPos::new(x, y))
    }

    /// Uniformly random on-grid cell.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        GridPos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}

impl Default for GridSpace {
    /// The 50 × 50 city used by the default scenario.
    fn default() -> Self {
        Self { width: 50, height: 50 }
    }
}
