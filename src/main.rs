//! Gridsim CLI
//!
//! Thin driver around the telemetry simulation engine: builds simulation
//! and member descriptors from flags, runs the engine, and emits the
//! generated series as JSON lines on stdout for downstream pipelines.
//!
//! # Usage
//!
//! ```bash
//! # One entry, one simulated minute at 1 Hz
//! gridsim --duration-minutes 1 --sample-rate-ms 1000
//!
//! # Two entries, one with a guaranteed alarm
//! gridsim --members 2 --force-alarm
//!
//! # Suppress alarms entirely
//! gridsim --no-alarms
//! ```
//!
//! # Environment Variables
//!
//! - `GRIDSIM_CONFIG`: Path to a TOML engine config (worker permits)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use gridsim::{EngineConfig, Simulation, SimulationMember};
use std::io::{self, Write};
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "gridsim")]
#[command(about = "Race-vehicle telemetry simulation generator")]
#[command(version)]
struct CliArgs {
    /// Simulated window length in minutes
    #[arg(long, default_value = "1")]
    duration_minutes: u32,

    /// Sampling interval in milliseconds (1, 10, 100 or 1000)
    #[arg(long, default_value = "1000")]
    sample_rate_ms: u32,

    /// Playback-rate multiplier for downstream pacing (1, 2, 4, 8, 10 or 20)
    #[arg(long, default_value = "1")]
    rate_multiplier: u32,

    /// Number of participating entries
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
    members: u32,

    /// Guarantee an alarm for every entry
    #[arg(long, conflicts_with = "no_alarms")]
    force_alarm: bool,

    /// Suppress alarms for every entry
    #[arg(long)]
    no_alarms: bool,

    /// Race name stamped into event metadata
    #[arg(long, default_value = "Simulated Grand Prix")]
    race: String,

    /// Track name stamped into event metadata
    #[arg(long, default_value = "Simulated Circuit")]
    track: String,

    /// Emit only the per-member summary, not the sample stream
    #[arg(long)]
    summary_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = EngineConfig::load();

    let simulation = Simulation {
        id: format!("sim-{}", Uuid::new_v4()),
        duration_minutes: args.duration_minutes,
        sample_rate_ms: args.sample_rate_ms,
        rate_multiplier: args.rate_multiplier,
        race: args.race.clone(),
        track: args.track.clone(),
    };

    let members: Vec<SimulationMember> = (1..=args.members)
        .map(|n| SimulationMember {
            id: format!("member-{n}"),
            simulation_id: simulation.id.clone(),
            team: format!("Team {n}"),
            driver: format!("Driver {n}"),
            car_number: n,
            force_alarm: args.force_alarm,
            no_alarms: args.no_alarms,
        })
        .collect();

    info!(
        simulation_id = %simulation.id,
        members = members.len(),
        worker_permits = config.worker_permits(),
        "Generating simulated telemetry"
    );

    let results = gridsim::aggregate(&simulation, &members, &config)
        .await
        .context("telemetry generation failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut total_samples = 0usize;
    let mut total_alarms = 0usize;
    for (member_id, channels) in &results {
        for series in channels.values() {
            total_samples += series.samples.len();
            if series.alarm_exists {
                total_alarms += 1;
                info!(
                    member_id = %member_id,
                    channel = %series.channel,
                    alarm_index = series.alarm_index,
                    "Alarm injected"
                );
            }
            if !args.summary_only {
                for sample in &series.samples {
                    let line = serde_json::to_string(sample)
                        .context("failed to serialize sample")?;
                    writeln!(out, "{line}").context("failed to write sample")?;
                }
            }
        }
    }
    out.flush().context("failed to flush stdout")?;

    info!(
        members = results.len(),
        total_samples,
        total_alarms,
        "Generation complete"
    );
    Ok(())
}
