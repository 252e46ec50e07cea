use mob_core::{GridPos, RouteKey, Tick, TransportMode, TripId};
use mob_schedule::TripObjective;

/// The trip a citizen is currently making.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveTrip {
    pub objective:  TripObjective,
    pub trip:       TripId,
    pub mode:       TransportMode,
    /// Cell the citizen departed from.
    pub origin:     GridPos,
    pub start_tick: Tick,
    /// Local arrival tick for walking trips; `None` for delegated trips.
    pub arrival:    Option<Tick>,
}

impl ActiveTrip {
    /// `true` if the traffic engine is carrying this trip.
    #[inline]
    pub fn is_delegated(&self) -> bool {
        self.arrival.is_none()
    }

    #[inline]
    pub fn destination(&self) -> GridPos {
        self.objective.destination
    }

    #[inline]
    pub fn route(&self) -> RouteKey {
        RouteKey::new(self.origin, self.objective.destination)
    }
}

/// One completed trip in a citizen's travel history.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRecord {
    pub origin:         GridPos,
    pub destination:    GridPos,
    pub activity:       String,
    pub mode:           TransportMode,
    pub start_tick:     Tick,
    /// Completion tick.
    pub tick:           Tick,
    pub actual_ticks:   u64,
    pub expected_ticks: f64,
    /// Weather of the day the trip finished.
    pub weather:        f64,
}

impl TripRecord {
    #[inline]
    pub fn route(&self) -> RouteKey {
        RouteKey::new(self.origin, self.destination)
    }
}
