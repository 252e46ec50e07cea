//! Grid coordinates and distance helpers.
//!
//! Agents live on an integer cell grid (`GridPos`).  The external traffic
//! engine reports continuous coordinates (`Coord`) which the spatial layer
//! clamps back onto the grid.  Distances are straight-line Euclidean in
//! cell units.

use std::fmt;

/// Distance substituted whenever one side of a distance query is not a
/// usable coordinate (unplaced agent, non-finite report, …).
pub const DEFAULT_DISTANCE: f64 = 10.0;

/// A cell on the simulation grid.
///
/// `GridPos::INVALID` marks "not placed yet" the same way the id types use
/// their `INVALID` sentinel; any distance involving it falls back to
/// [`DEFAULT_DISTANCE`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Sentinel meaning "no position".
    pub const INVALID: GridPos = GridPos { x: i32::MIN, y: i32::MIN };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Euclidean distance in cells, or `None` if either side is `INVALID`.
    pub fn distance(self, other: GridPos) -> Option<f64> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        Some((dx * dx + dy * dy).sqrt())
    }

    /// Euclidean distance, substituting [`DEFAULT_DISTANCE`] for malformed input.
    #[inline]
    pub fn distance_or_default(self, other: GridPos) -> f64 {
        self.distance(other).unwrap_or(DEFAULT_DISTANCE)
    }

    /// Continuous coordinate at the cell origin.
    #[inline]
    pub fn to_coord(self) -> Coord {
        Coord { x: f64::from(self.x), y: f64::from(self.y) }
    }
}

impl Default for GridPos {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            f.write_str("(invalid)")
        }
    }
}

/// A continuous coordinate as reported by the traffic engine.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// `(origin, destination)` pair indexing an agent's learned delays.
///
/// Always built from the origin recorded when a trip actually started and
/// the destination of the objective it served.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteKey {
    pub origin:      GridPos,
    pub destination: GridPos,
}

impl RouteKey {
    #[inline]
    pub fn new(origin: GridPos, destination: GridPos) -> Self {
        Self { origin, destination }
    }

    /// Straight-line length of the route (default distance if malformed).
    #[inline]
    pub fn distance(self) -> f64 {
        self.origin.distance_or_default(self.destination)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}
