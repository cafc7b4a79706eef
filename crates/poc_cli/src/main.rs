//! poc CLI
//!
//! Replay scripted wheel, drag and touch input against overlay scrollbars
//! on an in-memory container.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;
mod simulate;

use poc_scrollbar::{set_global_environment, InputEnvironment};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "poc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Overlay scrollbar scenario runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print offsets and thumb styles after each step
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Pixels per line for line-mode wheel steps
        #[arg(long, default_value = "16")]
        line_height: f32,
    },

    /// Validate a scenario file without running it
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
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
            scenario,
            line_height,
        } => cmd_simulate(&scenario, line_height),
        Commands::Check { scenario } => cmd_check(&scenario),
    }
}

fn cmd_simulate(path: &PathBuf, line_height: f32) -> Result<()> {
    if !line_height.is_finite() || line_height <= 0.0 {
        anyhow::bail!("--line-height must be a positive number, got {line_height}");
    }
    set_global_environment(InputEnvironment::default().with_line_height(line_height))?;

    let scenario = Scenario::load(path)?;
    info!("Simulating {} ({} steps)", path.display(), scenario.steps.len());

    for snapshot in simulate::run(&scenario)? {
        println!("{snapshot}");
    }
    Ok(())
}

fn cmd_check(path: &PathBuf) -> Result<()> {
    let scenario = Scenario::load(path)?;
    println!(
        "{}: ok ({}x{} container, {}x{} content, {} steps)",
        path.display(),
        scenario.container.width,
        scenario.container.height,
        scenario.content.width,
        scenario.content.height,
        scenario.steps.len()
    );
    Ok(())
}
