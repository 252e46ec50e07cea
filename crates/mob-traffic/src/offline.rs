use mob_core::{Coord, GridPos, TransportMode, TripId};

use crate::{Telemetry, TrafficConnector, TrafficError, TrafficResult};

/// A connector with no engine behind it.
///
/// Every call fails with `TrafficError::Unavailable`, so agents without a
/// bike or car still walk while every delegated trip fails to spawn.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTraffic;

fn offline<T>() -> TrafficResult<T> {
    Err(TrafficError::Unavailable("no traffic engine connected".into()))
}

impl TrafficConnector for OfflineTraffic {
    fn spawn(&self, _trip: TripId, _mode: TransportMode, _origin: GridPos, _destination: GridPos) -> TrafficResult<()> {
        offline()
    }
    fn exists(&self, _trip: TripId) -> TrafficResult<bool> {
        offline()
    }
    fn position(&self, _trip: TripId) -> TrafficResult<Option<Coord>> {
        offline()
    }
    fn telemetry(&self, _trip: TripId) -> TrafficResult<Option<Telemetry>> {
        offline()
    }
    fn remove(&self, _trip: TripId) -> TrafficResult<()> {
        offline()
    }
    fn advance(&self) -> TrafficResult<()> {
        offline()
    }
}
