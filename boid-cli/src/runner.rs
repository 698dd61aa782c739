use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use boid_core::{FlockSimulation, NeighborSearch};
use boid_shared::{snapshot_states, FlockSettings, FrameReport};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything a headless run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings: FlockSettings,
    pub frames: u64,
    /// Fixed seed for a reproducible initial flock
    pub seed: Option<u64>,
    pub grid: bool,
    /// Log a frame report every this many frames; 0 disables
    pub report_every: u64,
    /// Write one JSON array of boid states per frame to this file
    pub snapshots: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            settings: FlockSettings::default(),
            frames: 600,
            seed: None,
            grid: false,
            report_every: 60,
            snapshots: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub report: FrameReport,
}

/// Read and validate a JSON settings file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<FlockSettings> {
    let path = path.as_ref();
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    FlockSettings::from_json(&json)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Parse a cursor given as `X,Y`
pub fn parse_cursor(value: &str) -> Result<(f32, f32)> {
    let Some((x, y)) = value.split_once(',') else {
        bail!("cursor must look like X,Y, got {:?}", value);
    };
    let x: f32 = x.trim().parse().context("invalid cursor x")?;
    let y: f32 = y.trim().parse().context("invalid cursor y")?;
    Ok((x, y))
}

pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let params = options
        .settings
        .to_params()
        .context("invalid simulation settings")?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut sim = FlockSimulation::new();
    sim.reset_with_rng(params.agent_count, &params, &mut rng);
    if options.settings.lanes {
        sim.assign_lanes();
    }
    if options.grid {
        sim.set_neighbor_search(NeighborSearch::Grid);
    }

    log::info!(
        "Running {} boids for {} frames in a {}x{} world",
        sim.len(),
        options.frames,
        params.width,
        params.height
    );

    let mut snapshots = match &options.snapshots {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    for frame in 1..=options.frames {
        sim.step(&params);

        if let Some(writer) = snapshots.as_mut() {
            serde_json::to_writer(&mut *writer, &snapshot_states(&sim))
                .context("failed to encode snapshot")?;
            writer.write_all(b"\n").context("failed to write snapshot")?;
        }

        if options.report_every > 0 && frame % options.report_every == 0 {
            let report = FrameReport::measure(frame, &sim, &params);
            log::info!(
                "frame {}: mean speed {:.2} [{:.2}, {:.2}], {}/{} in bounds",
                report.frame,
                report.mean_speed,
                report.min_speed,
                report.max_speed,
                report.in_bounds,
                report.boid_count
            );
        }
    }

    if let Some(mut writer) = snapshots {
        writer.flush().context("failed to flush snapshots")?;
    }

    let report = FrameReport::measure(options.frames, &sim, &params);
    log::debug!("Final report: {:?}", report);

    Ok(RunSummary {
        frames: options.frames,
        report,
    })
}
