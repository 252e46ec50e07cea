//! commute — a city day for the mob urban mobility simulator.
//!
//! Builds a synthetic population from the urban profile table, lets it
//! commute on a 50 × 50 grid with the in-process kinematic traffic engine,
//! and writes trips, tick summaries, snapshots and mode usage as CSV.
//!
//! ```text
//! commute [config.json]
//! RUST_LOG=mob_behavior=debug commute
//! ```
//!
//! Every field of the JSON config is optional:
//!
//! ```json
//! {
//!   "sim":        { "total_ticks": 2880, "seed": 7 },
//!   "mobility":   { "agent_count": 500, "liveness_max": 240 },
//!   "congestion": 0.4,
//!   "output_dir": "output/commute",
//!   "modes_csv":  "data/modes.csv"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mob_agent::{load_modes_csv, load_profiles_csv, load_weights_csv, AgentRegistry, ProfileTable, TripRecord};
use mob_core::{AgentId, ModeTable, SimConfig, Tick};
use mob_output::{CsvWriter, OutputWriter, SimOutputObserver};
use mob_schedule::{load_templates_csv, LearnedDelayDeparture};
use mob_sim::{MobilityConfig, ModeUsage, SimBuilder, SimObserver, TickSummary};
use mob_traffic::{KinematicConfig, KinematicTraffic};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:           SimConfig,
    mobility:      MobilityConfig,
    /// Global slowdown applied to every vehicle, in `[0, 1]`.
    congestion:    f64,
    output_dir:    PathBuf,
    profiles_csv:  Option<PathBuf>,
    weights_csv:   Option<PathBuf>,
    templates_csv: Option<PathBuf>,
    modes_csv:     Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                start_unix_secs:       1_700_000_000, // a Monday, 00:00 UTC
                tick_duration_secs:    60,
                total_ticks:           2 * 1440,
                seed:                  42,
                num_threads:           None,
                output_interval_ticks: 60,
            },
            mobility:      MobilityConfig { agent_count: 300, ..MobilityConfig::default() },
            congestion:    0.2,
            output_dir:    PathBuf::from("output/commute"),
            profiles_csv:  None,
            weights_csv:   None,
            templates_csv: None,
            modes_csv:     None,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_profiles(config: &DemoConfig) -> Result<ProfileTable> {
    let mut profiles = match &config.profiles_csv {
        Some(path) => load_profiles_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => ProfileTable::urban_defaults(),
    };
    if let Some(path) = &config.templates_csv {
        let templates = load_templates_csv(path).with_context(|| format!("loading {}", path.display()))?;
        for name in profiles.with_templates(templates) {
            warn!(template = %name, "template matches no profile");
        }
    }
    if let Some(path) = &config.weights_csv {
        let applied = load_weights_csv(path, &mut profiles).with_context(|| format!("loading {}", path.display()))?;
        info!(rows = applied, "weights applied");
    }
    Ok(profiles)
}

fn load_modes(config: &DemoConfig) -> Result<ModeTable> {
    match &config.modes_csv {
        Some(path) => load_modes_csv(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(ModeTable::urban_defaults()),
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Wraps the output observer and logs one line per simulated hour.
struct ProgressObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    completed: u64,
    aborted:   u64,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, completed: 0, aborted: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_day_start(&mut self, day: u64, weather: f64) {
        info!(day, weather = format_args!("{weather:.2}"), "day started");
    }

    fn on_trip_completed(&mut self, agent: AgentId, record: &TripRecord) {
        self.completed += 1;
        self.inner.on_trip_completed(agent, record);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.aborted += summary.aborted as u64;
        if summary.tick.0 % 60 == 0 {
            info!(
                tick = summary.tick.0,
                in_transit = summary.in_transit,
                home = summary.at_home,
                work = summary.at_work,
                other = summary.at_other,
                "hour"
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentRegistry, usage: &ModeUsage) {
        self.inner.on_snapshot(tick, agents, usage);
    }

    fn on_sim_end(&mut self, final_tick: Tick, usage: &ModeUsage) {
        self.inner.on_sim_end(final_tick, usage);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    let profiles = load_profiles(&config)?;
    let modes = load_modes(&config)?;

    let traffic = KinematicTraffic::new(KinematicConfig::from_mode_table(&modes));
    traffic.set_congestion(config.congestion);

    let mut sim = SimBuilder::populated(config.sim.clone(), &config.mobility, profiles, traffic)?
        .modes(modes)
        .modifier(LearnedDelayDeparture)
        .build()?;
    info!(
        agents = sim.registry.len(),
        days = config.sim.total_ticks / 1440,
        weather = format_args!("{:.2}", sim.weather),
        "population ready"
    );

    let writer = CsvWriter::new(&config.output_dir)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer, &config.sim));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  trips completed : {}", obs.completed);
    println!("  trips aborted   : {}", obs.aborted);
    println!("  output          : {}", config.output_dir.display());
    println!();
    println!("{:<10} {:>8} {:>7}", "Mode", "Chosen", "Share");
    println!("{}", "-".repeat(27));
    let total = sim.usage().total().max(1) as f64;
    for (mode, n) in sim.usage().iter() {
        println!("{:<10} {:>8} {:>6.1}%", mode, n, n as f64 / total * 100.0);
    }

    Ok(())
}
