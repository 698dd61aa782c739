use boid_core::{BoidView, FlockParams, FlockSimulation};
use serde::{Deserialize, Serialize};

/// One boid as handed to a renderer or written to a snapshot file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub x: f32,
    pub y: f32,
    /// Radians
    pub heading: f32,
}

impl From<BoidView> for BoidState {
    fn from(view: BoidView) -> Self {
        Self {
            x: view.position.x,
            y: view.position.y,
            heading: view.heading,
        }
    }
}

/// Summary of the flock after a frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame: u64,
    pub boid_count: usize,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Boids currently inside `[0, width] x [0, height]`
    pub in_bounds: usize,
}

impl FrameReport {
    pub fn measure(frame: u64, sim: &FlockSimulation, params: &FlockParams) -> Self {
        let boids = sim.boids();
        let mut total = 0.0;
        let mut min_speed = f32::INFINITY;
        let mut max_speed = 0.0f32;
        let mut in_bounds = 0;

        for boid in boids {
            let speed = boid.speed();
            total += speed;
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);

            let p = boid.position;
            if (0.0..=params.width).contains(&p.x) && (0.0..=params.height).contains(&p.y) {
                in_bounds += 1;
            }
        }

        if boids.is_empty() {
            min_speed = 0.0;
        }

        Self {
            frame,
            boid_count: boids.len(),
            mean_speed: if boids.is_empty() {
                0.0
            } else {
                total / boids.len() as f32
            },
            min_speed,
            max_speed,
            in_bounds,
        }
    }
}

/// Snapshot of the whole flock for rendering
pub fn snapshot_states(sim: &FlockSimulation) -> Vec<BoidState> {
    sim.snapshot().map(BoidState::from).collect()
}
