//! Carousel CLI - headless slider simulation
//!
//! Replays a JSON scenario of gesture steps against a slider driven by a
//! deterministic frame clock and prints the final state as JSON:
//!
//! ```text
//! carousel simulate --items 8 --window 4 --scenario scenarios/fling.json
//! ```

mod report;
mod scenario;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use carousel_animation::ManualClock;
use carousel_slider::{SliderConfig, SliderMachine};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::report::SimulationReport;
use crate::scenario::Scenario;
use crate::simulate::{replay, ReplayOptions};

/// Headless carousel slider tools
#[derive(Parser, Debug)]
#[command(name = "carousel")]
#[command(about = "Headless carousel slider tools")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture scenario and print the final slider state
    Simulate {
        /// Number of synthetic items (ids 0..N)
        #[arg(long)]
        items: u32,

        /// Requested number of visible items
        #[arg(long)]
        window: Option<usize>,

        /// Slider config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scenario file (JSON)
        #[arg(long)]
        scenario: PathBuf,

        /// Frame interval in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f64,

        /// Fail on steps that had no effect
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Simulate {
            items,
            window,
            config,
            scenario,
            frame_ms,
            strict,
        } => {
            let mut slider_config = match config {
                Some(path) => SliderConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => SliderConfig::default(),
            };
            if window.is_some() {
                slider_config.window_size = window;
            }
            slider_config.validate().context("invalid slider config")?;

            let scenario = Scenario::from_path(&scenario)?;
            tracing::info!(
                "simulating {} item(s), {} step(s), {} ms frames",
                items,
                scenario.steps.len(),
                frame_ms
            );

            let clock = ManualClock::with_frame_interval(frame_ms);
            let mut slider = SliderMachine::new((0..items).collect(), slider_config, clock);
            replay(&mut slider, &scenario, ReplayOptions { strict })?;

            let report = SimulationReport::capture(&slider);
            println!("{}", report.to_json()?);
        }
    }

    Ok(())
}
