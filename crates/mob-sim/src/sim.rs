//! The `Sim` struct and its tick loop.

use mob_agent::{AgentRegistry, AgentRngs, ProfileTable};
use mob_behavior::{plan_day, step, BehaviorConfig, StepOutcome, TickContext};
use mob_core::{ModeTable, SimClock, SimConfig, SimRng, Tick};
use mob_schedule::{ActivityCategory, CategoryMap, DepartureModifier};
use mob_spatial::GridSpace;
use mob_traffic::TrafficConnector;
use tracing::{debug, info, warn};

use crate::{ModeUsage, SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<T>` holds all simulation state and drives the tick loop:
///
/// 1. **Day start** (`tick % ticks_per_day == 0`, `tick > 0`): redraw the
///    weather, then regenerate every citizen's objectives for the new day
///    and apply the departure modifier.
/// 2. **Step phase**: call [`mob_behavior::step`] once per citizen.
///    Sequentially in an order shuffled by the run RNG, or on Rayon's pool
///    with the `parallel` feature.
/// 3. **Apply phase** (sequential, ascending `AgentId` for determinism):
///    count chosen modes, deliver congestion reports to neighbours' inboxes,
///    report completed trips to the observer.
/// 4. **Advance** the traffic engine by one tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<T: TrafficConnector> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to time of day.
    pub clock: SimClock,

    pub registry: AgentRegistry,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub traffic: T,

    pub behavior:   BehaviorConfig,
    pub modes:      ModeTable,
    pub grid:       GridSpace,
    pub categories: CategoryMap,
    pub profiles:   ProfileTable,
    pub modifier:   Box<dyn DepartureModifier>,

    /// Today's weather in `[0, 1]`.
    pub weather: f64,

    pub(crate) weather_rng: SimRng,
    #[cfg_attr(feature = "parallel", allow(dead_code))]
    pub(crate) order_rng:   SimRng,
    pub(crate) usage:       ModeUsage,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<T: TrafficConnector> Sim<T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.registry.len(),
            ticks = self.config.total_ticks,
            seed = self.config.seed,
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick_once(now, observer);
        }
        observer.on_sim_end(self.clock.current_tick, &self.usage);
        info!(tick = self.clock.current_tick.0, usage = %self.usage, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick_once(now, observer);
        }
        Ok(())
    }

    /// Mode choices counted so far.
    pub fn usage(&self) -> &ModeUsage {
        &self.usage
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);
        if self.clock.is_day_start(now) {
            self.start_day(now);
            observer.on_day_start(self.clock.day_at(now), self.weather);
        }
        let summary = self.process_tick(now, observer);
        observer.on_tick_end(&summary);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.registry, &self.usage);
        }
        self.clock.advance();
    }

    /// Redraw the weather and replan every citizen for the new day.
    fn start_day(&mut self, now: Tick) {
        self.weather = self.weather_rng.unit();

        let (hour, minute) = self.clock.hour_minute_at(now);
        let ctx = TickContext::new(
            now, hour, minute, self.weather, &self.behavior, &self.modes, &self.grid, &self.categories,
        );
        let profiles = &self.profiles;
        let modifier = self.modifier.as_ref();

        let mut shifted = 0;
        for (citizen, rng) in self.registry.citizens.iter_mut().zip(self.rngs.inner.iter_mut()) {
            let template = profiles.get(citizen.profile).map(|p| &p.template);
            shifted += plan_day(citizen, template, modifier, &ctx, rng);
        }
        info!(day = self.clock.day_at(now), weather = self.weather, shifted, "new day planned");
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        // ── Step phase ────────────────────────────────────────────────────
        let outcomes = self.step_all(now);

        // ── Apply phase ───────────────────────────────────────────────────
        //
        // Ascending AgentId order.  Reports written here become visible to
        // recipients on the next tick.
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };
        for (i, outcome) in outcomes.into_iter().enumerate() {
            if let Some(mode) = outcome.mode_chosen {
                self.usage.record(mode);
            }
            summary.started += usize::from(outcome.started.is_some());
            summary.spawn_failed += usize::from(outcome.spawn_failed);
            summary.aborted += usize::from(outcome.aborted);
            if let Some(record) = &outcome.completed {
                summary.completed += 1;
                if let Some(c) = self.registry.citizens.get(i) {
                    observer.on_trip_completed(c.id, record);
                }
            }
            for sent in &outcome.reports {
                summary.reports += 1;
                self.registry.deliver(&sent.report, &sent.recipients);
            }
        }

        summary.in_transit = self.registry.in_transit_count();
        for c in self.registry.iter() {
            match self.categories.category(&c.current_activity) {
                ActivityCategory::Home => summary.at_home += 1,
                ActivityCategory::Work => summary.at_work += 1,
                ActivityCategory::Other => summary.at_other += 1,
            }
        }

        // ── Advance the traffic engine ────────────────────────────────────
        if let Err(e) = self.traffic.advance() {
            warn!(tick = now.0, error = %e, "traffic engine failed to advance");
        }

        if summary.started + summary.completed + summary.aborted > 0 {
            debug!(
                tick = now.0,
                started = summary.started,
                completed = summary.completed,
                aborted = summary.aborted,
                in_transit = summary.in_transit,
                "tick processed"
            );
        }
        summary
    }

    /// Step every citizen once.  Outcomes are indexed by `AgentId`.
    fn step_all(&mut self, now: Tick) -> Vec<StepOutcome> {
        let (hour, minute) = self.clock.hour_minute_at(now);
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = TickContext::new(
            now, hour, minute, self.weather, &self.behavior, &self.modes, &self.grid, &self.categories,
        );
        let traffic: &dyn TrafficConnector = &self.traffic;
        let citizens = &mut self.registry.citizens;
        let rngs = &mut self.rngs.inner;

        #[cfg(not(feature = "parallel"))]
        {
            let mut order: Vec<usize> = (0..citizens.len()).collect();
            self.order_rng.shuffle(&mut order);

            let mut outcomes = vec![StepOutcome::default(); citizens.len()];
            for i in order {
                outcomes[i] = step(&mut citizens[i], &mut rngs[i], &ctx, traffic);
            }
            outcomes
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let run = || {
                citizens
                    .par_iter_mut()
                    .zip(rngs.par_iter_mut())
                    .map(|(citizen, rng)| step(citizen, rng, &ctx, traffic))
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }
}
