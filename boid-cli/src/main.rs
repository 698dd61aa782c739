use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_cli::{load_settings, parse_cursor, run, RunOptions};
use boid_shared::FlockSettings;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the boid flocking simulation without a window", long_about = None)]
struct Args {
    /// JSON settings file (camelCase keys, missing keys use defaults)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Override the number of boids
    #[arg(short, long)]
    count: Option<usize>,

    /// Seed for the initial flock
    #[arg(long)]
    seed: Option<u64>,

    /// Split the flock into two opposing lanes
    #[arg(long)]
    lanes: bool,

    /// Follow a fixed cursor at X,Y
    #[arg(long, value_name = "X,Y")]
    cursor: Option<String>,

    /// Use the grid neighbor search
    #[arg(long)]
    grid: bool,

    /// Log a frame report every N frames (0 disables)
    #[arg(short, long, default_value_t = 60)]
    report_every: u64,

    /// Write per-frame boid states as JSON lines
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn into_options(self) -> Result<RunOptions> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => FlockSettings::default(),
        };

        if let Some(count) = self.count {
            settings.agent_count = count;
        }
        if self.lanes {
            settings.lanes = true;
        }
        if let Some(cursor) = &self.cursor {
            let (x, y) = parse_cursor(cursor)?;
            settings.follow_cursor = true;
            settings.cursor_x = Some(x);
            settings.cursor_y = Some(y);
        }

        Ok(RunOptions {
            settings,
            frames: self.frames,
            seed: self.seed,
            grid: self.grid,
            report_every: self.report_every,
            snapshots: self.snapshots,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Boid simulation starting...");

    let options = args.into_options().context("Failed to prepare run")?;
    let summary = run(&options).context("Simulation error")?;

    println!(
        "{}",
        serde_json::to_string(&summary.report).context("Failed to encode report")?
    );

    Ok(())
}
