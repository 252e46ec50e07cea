//! The `TrafficConnector` trait.

use mob_core::{Coord, GridPos, TransportMode, TripId};

use crate::TrafficResult;

/// Instantaneous speed report for one vehicle, in grid cells per tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Telemetry {
    pub speed:     f64,
    pub max_speed: f64,
}

impl Telemetry {
    /// `speed / max_speed`, or `None` when `max_speed` is not positive.
    pub fn speed_ratio(&self) -> Option<f64> {
        (self.max_speed > 0.0).then(|| self.speed / self.max_speed)
    }
}

/// Request/response interface to an external traffic engine.
///
/// # Contract
///
/// - Methods take `&self`; implementations synchronise internally so a single
///   connector can be shared across Rayon workers.
/// - `exists` returning `Ok(false)` and `position` returning `Ok(None)` both
///   mean the vehicle has left the network, i.e. arrived.
/// - `advance` is called exactly once per tick, after all agents stepped.
pub trait TrafficConnector: Send + Sync {
    /// Insert a vehicle for `trip` travelling from `origin` to `destination`.
    fn spawn(&self, trip: TripId, mode: TransportMode, origin: GridPos, destination: GridPos) -> TrafficResult<()>;

    /// `true` while the vehicle is still on the network.
    fn exists(&self, trip: TripId) -> TrafficResult<bool>;

    /// Current vehicle position, or `None` once it has left the network.
    fn position(&self, trip: TripId) -> TrafficResult<Option<Coord>>;

    /// Current and maximum speed, or `None` once it has left the network.
    fn telemetry(&self, trip: TripId) -> TrafficResult<Option<Telemetry>>;

    /// Take the vehicle off the network.  Removing an unknown trip is not an error.
    fn remove(&self, trip: TripId) -> TrafficResult<()>;

    /// Advance the engine by one tick.
    fn advance(&self) -> TrafficResult<()>;
}

impl<T: TrafficConnector + ?Sized> TrafficConnector for std::sync::Arc<T> {
    fn spawn(&self, trip: TripId, mode: TransportMode, origin: GridPos, destination: GridPos) -> TrafficResult<()> {
        (**self).spawn(trip, mode, origin, destination)
    }
    fn exists(&self, trip: TripId) -> TrafficResult<bool> {
        (**self).exists(trip)
    }
    fn position(&self, trip: TripId) -> TrafficResult<Option<Coord>> {
        (**self).position(trip)
    }
    fn telemetry(&self, trip: TripId) -> TrafficResult<Option<Telemetry>> {
        (**self).telemetry(trip)
    }
    fn remove(&self, trip: TripId) -> TrafficResult<()> {
        (**self).remove(trip)
    }
    fn advance(&self) -> TrafficResult<()> {
        (**self).advance()
    }
}
