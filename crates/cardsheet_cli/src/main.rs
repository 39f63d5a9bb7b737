//! Cardsheet CLI
//!
//! Play gesture scripts against the card controller and inspect configs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardsheet::CardConfig;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;
mod simulate;

use simulate::Simulator;

#[derive(Parser)]
#[command(name = "cardsheet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive bottom sheet simulator", long_about = None)]
struct Cli {
    /// Enable verbose output (logs every frame)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a gesture script and log the resulting frames
    Simulate {
        /// Script file (one command per line)
        script: PathBuf,

        /// Card configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Container width
        #[arg(long, default_value = "390")]
        width: f32,

        /// Container height
        #[arg(long, default_value = "844")]
        height: f32,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Card configuration to load instead of the defaults
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            script,
            config,
            fps,
            width,
            height,
        } => cmd_simulate(&script, config.as_deref(), fps, width, height),
        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<CardConfig> {
    match path {
        Some(path) => CardConfig::load(path)
            .with_context(|| format!("Failed to load card config {}", path.display())),
        None => Ok(CardConfig::default()),
    }
}

fn cmd_simulate(
    script_path: &Path,
    config: Option<&Path>,
    fps: u32,
    width: f32,
    height: f32,
) -> Result<()> {
    let config = load_config(config)?;
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let commands = script::parse(&source)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    info!(
        "Simulating {} command(s) at {} fps in a {}x{} container",
        commands.len(),
        fps,
        width,
        height
    );

    let report = Simulator::new(config, width, height, fps)?.run(&commands);

    for outcome in &report.outcomes {
        info!(
            "  {:?} -> {:?} ({:?})",
            outcome.target.next(),
            outcome.resting,
            outcome.position
        );
    }
    info!(
        "Done after {} frame(s): panel {:?} at y={:.2}, radius {:.2}, blur {:.2}",
        report.frames,
        report.final_state,
        report.final_frame.origin_y,
        report.final_frame.corner_radius,
        report.final_frame.blur.intensity
    );
    Ok(())
}

fn cmd_config(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
