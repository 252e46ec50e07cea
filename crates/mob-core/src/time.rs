//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  The default tick is
//! one simulated minute, so a day is 1 440 ticks and the wall-clock hour and
//! minute of a tick are
//!
//! ```text
//! hour   = (tick / 60) % 24
//! minute =  tick % 60
//! ```
//!
//! Schedules are written in hour/minute terms; `SimClock::hour_minute`
//! derives them from the tick for any tick length that divides an hour.

use std::fmt;

/// Ticks in one simulated day at the default one-minute resolution.
pub const MINUTES_PER_DAY: u64 = 1_440;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to simulated time of day.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many simulated seconds one tick represents.  Default: 60.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds at `tick`.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> u64 {
        tick.0 * u64::from(self.tick_duration_secs)
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.secs_at(self.current_tick)
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs() as i64
    }

    /// `(hour, minute)` of the day at `tick`.
    pub fn hour_minute_at(&self, tick: Tick) -> (u32, u32) {
        let secs = self.secs_at(tick);
        let hour = ((secs % 86_400) / 3_600) as u32;
        let minute = ((secs % 3_600) / 60) as u32;
        (hour, minute)
    }

    /// `(hour, minute)` of the day at the current tick.
    #[inline]
    pub fn hour_minute(&self) -> (u32, u32) {
        self.hour_minute_at(self.current_tick)
    }

    /// Zero-based simulated day of `tick`.
    #[inline]
    pub fn day_at(&self, tick: Tick) -> u64 {
        self.secs_at(tick) / 86_400
    }

    /// Ticks in one simulated day (at least 1).
    #[inline]
    pub fn ticks_per_day(&self) -> u64 {
        (86_400 / u64::from(self.tick_duration_secs.max(1))).max(1)
    }

    /// `true` if `tick` is the first tick of a day after day 0.
    #[inline]
    pub fn is_day_start(&self, tick: Tick) -> bool {
        tick.0 > 0 && tick.0 % self.ticks_per_day() == 0
    }

    /// How many ticks span `secs` seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(u64::from(self.tick_duration_secs.max(1)))
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.hour_minute();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, self.day_at(self.current_tick), h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration: how long, how fine, which seed.
///
/// Typically loaded from a JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp for tick 0 (midnight of day 0).
    pub start_unix_secs: i64,

    /// Seconds per tick.  `SimClock` handles any divisor of 3600, but the
    /// simulator itself only runs one tick per minute.  Default: 60.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.  One day at one tick per minute: 1440.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:       0,
            tick_duration_secs:    60,
            total_ticks:           MINUTES_PER_DAY,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }
}
