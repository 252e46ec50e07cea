//! Per-agent learned travel delays.
//!
//! A delay is only recorded when a trip ran much longer than expected; the
//! table therefore stays empty for routes that behave normally.

use mob_core::RouteKey;
use mob_schedule::DelayLookup;

#[cfg(feature = "fx-hash")]
type DelayMap = rustc_hash::FxHashMap<RouteKey, Vec<f64>>;
#[cfg(not(feature = "fx-hash"))]
type DelayMap = std::collections::HashMap<RouteKey, Vec<f64>>;

#[derive(Clone, Debug, Default)]
pub struct LearnedDelays {
    routes: DelayMap,
}

impl LearnedDelays {
    /// Append one observed delay (ticks) for `route`.
    pub fn record(&mut self, route: RouteKey, delay: f64) {
        self.routes.entry(route).or_default().push(delay);
    }

    /// Observed delays for `route` in the order they were recorded.
    pub fn samples(&self, route: RouteKey) -> &[f64] {
        self.routes.get(&route).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mean delay for `route`, or `None` if nothing was recorded.
    pub fn average(&self, route: RouteKey) -> Option<f64> {
        let s = self.routes.get(&route)?;
        if s.is_empty() {
            return None;
        }
        Some(s.iter().sum::<f64>() / s.len() as f64)
    }

    /// Number of distinct routes with at least one delay.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total delays recorded across all routes.
    pub fn sample_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }
}

impl DelayLookup for LearnedDelays {
    fn average_delay(&self, route: RouteKey) -> Option<f64> {
        self.average(route)
    }
}
