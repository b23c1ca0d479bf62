//! Application entry point for the plant growth viewer.
//!
//! This binary parses the command line, installs the console logger,
//! loads optional configuration and plant files, and hands everything to
//! [`Viewer`] from the `viewer` module.

mod console;
mod viewer;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grow_core::{Genome, GrowthConfig, Plant, persist};
use log::LevelFilter;

use console::Console;
use viewer::{Viewer, ViewerSettings};

#[derive(Parser)]
#[command(name = "grow_view")]
#[command(about = "Procedural plant growth visualizer")]
struct Cli {
    /// Seed for branch jitter and stochastic traits (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// YAML file overriding growth constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plant record to load next to the demo plant
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Strain name of the demo plant
    #[arg(long, default_value = "AK-47")]
    strain: String,

    /// File used by the Save and Load buttons
    #[arg(long, default_value = "plant.json")]
    file: PathBuf,
}

/// Entry point for the plant growth viewer.
///
/// Installs the console logger, loads the optional growth config and
/// plant file named on the command line, then opens the window.
///
/// ### Returns
/// `Ok(())` when the window closes normally, or the first start-up or
/// windowing error with context.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let console = Console::default();
    console::install(console.clone(), LevelFilter::Info).context("failed to install logger")?;

    let cfg = match &cli.config {
        Some(path) => GrowthConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GrowthConfig::default(),
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Random seed {seed}");

    let mut plants = vec![Plant::new(Genome::with_strain(cli.strain))];
    if let Some(path) = &cli.load {
        let plant = persist::load_plant(path)
            .with_context(|| format!("failed to load plant {}", path.display()))?;
        plants.push(plant);
    }

    let settings = ViewerSettings {
        cfg,
        seed,
        plants,
        file_path: cli.file.to_string_lossy().into_owned(),
        console,
    };

    eframe::run_native(
        "Plant Growth",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(Viewer::new(settings)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
