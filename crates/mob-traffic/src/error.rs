use thiserror::Error;

use mob_core::TripId;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("traffic engine unavailable: {0}")]
    Unavailable(String),

    #[error("traffic engine timed out")]
    Timeout,

    #[error("trip {trip} rejected: {reason}")]
    Rejected { trip: TripId, reason: String },

    #[error("trip {0} is not known to the traffic engine")]
    UnknownTrip(TripId),
}

impl TrafficError {
    /// `true` for failures that may clear up on a later tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, TrafficError::Unavailable(_) | TrafficError::Timeout)
    }
}

pub type TrafficResult<T> = Result<T, TrafficError>;
