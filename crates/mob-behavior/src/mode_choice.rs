//! Mode selector: build one candidate per available mode, normalise, and let
//! the configured decision strategy pick.
//!
//! # Criteria vector
//!
//! | Index | Criterion  | Formula                                               |
//! |-------|------------|-------------------------------------------------------|
//! | 0     | price      | `fixed_price + price_per_distance × d`                |
//! | 1     | time       | `waiting_time + d / max(speed, 0.1)`                  |
//! | 2     | social     | `social`                                              |
//! | 3     | difficulty | `difficulty × (1 + weather × weather_coeff)`          |
//!
//! Columns are normalised before weighting, max-abs unless
//! `BehaviorConfig::normalization` says otherwise.

use mob_agent::Citizen;
use mob_core::{AgentRng, GridPos, ModeProfile, ModeTable, TransportMode};
use mob_decision::Candidate;
use mob_schedule::ActivityCategory;
use tracing::debug;

use crate::TickContext;

/// Distance between two cells; malformed input gives `DEFAULT_DISTANCE`.
#[inline]
pub fn trip_distance(origin: GridPos, destination: GridPos) -> f64 {
    origin.distance_or_default(destination)
}

/// `[price, time, social, difficulty]` for one mode over `distance`.
pub fn criteria(profile: &ModeProfile, distance: f64, weather: f64, weather_impact: bool) -> Vec<f64> {
    vec![
        profile.price(distance),
        profile.travel_time(distance),
        profile.social,
        profile.effective_difficulty(weather, weather_impact),
    ]
}

/// One un-normalised candidate per mode.  Modes missing from `table` use
/// `ModeProfile::default()`.
pub fn build_candidates(
    modes:          &[TransportMode],
    table:          &ModeTable,
    distance:       f64,
    weather:        f64,
    weather_impact: bool,
) -> Vec<Candidate> {
    modes
        .iter()
        .map(|&m| Candidate::new(m, criteria(&table.get(m), distance, weather, weather_impact)))
        .collect()
}

/// Pick the mode `citizen` uses to reach `destination` for an activity of
/// `category`.
///
/// Falls back to the first available mode when the strategy returns nothing.
pub fn choose_mode(
    citizen:     &Citizen,
    destination: GridPos,
    category:    ActivityCategory,
    ctx:         &TickContext<'_>,
    rng:         &mut AgentRng,
) -> TransportMode {
    let modes = citizen.available_modes();
    let distance = trip_distance(citizen.position, destination);

    let mut candidates =
        build_candidates(&modes, ctx.modes, distance, ctx.weather, ctx.config.weather_impact);
    ctx.config.normalization.apply(&mut candidates);

    let weights = citizen.weights.get_or_uniform(category);
    let picked = ctx
        .config
        .decision_strategy
        .select(&candidates, weights, rng)
        .and_then(|i| candidates.get(i))
        .map(|c| c.mode);

    let mode = picked.unwrap_or(modes[0]);
    debug!(
        agent = %citizen.id,
        %mode,
        distance,
        strategy = ctx.config.decision_strategy.name(),
        "mode chosen"
    );
    mode
}
