#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "std")]
use rand::Rng;

use crate::behavior::{self, Neighborhood};
use crate::boid::{Boid, Lane};
use crate::params::FlockParams;
use crate::spatial::SpatialGrid;
use crate::vector::Vector2D;

/// How the neighbor pass finds candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Every boid against every other boid
    #[default]
    Naive,
    /// Bucket boids into a grid first; same results as `Naive`
    Grid,
}

/// What the renderer needs for one boid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidView {
    pub position: Vector2D,
    /// Radians, `atan2(vy, vx)`
    pub heading: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlockError {
    NoSuchBoid { index: usize, len: usize },
}

impl fmt::Display for FlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockError::NoSuchBoid { index, len } => {
                write!(f, "no boid at index {} (flock has {})", index, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlockError {}

/// Owns the flock and advances it one frame at a time.
///
/// A step runs in two passes. The first builds a [`Neighborhood`] for every
/// boid from the untouched pre-step state; the second moves each boid using
/// only its own summary, so the outcome does not depend on iteration order.
#[derive(Debug, Clone, Default)]
pub struct FlockSimulation {
    boids: Vec<Boid>,
    search: NeighborSearch,
    hoods: Vec<Neighborhood>,
    nearby: Vec<usize>,
}

impl FlockSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self {
            boids,
            ..Self::default()
        }
    }

    /// Replace the flock with `count` random boids spread over the world
    #[cfg(feature = "std")]
    pub fn reset(&mut self, count: usize, params: &FlockParams) {
        let mut rng = rand::thread_rng();
        self.reset_with_rng(count, params, &mut rng);
    }

    #[cfg(feature = "std")]
    pub fn reset_with_rng<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        params: &FlockParams,
        rng: &mut R,
    ) {
        self.boids.clear();
        self.boids
            .extend((0..count).map(|_| Boid::random(params.width, params.height, rng)));
        log::debug!(
            "reset flock to {} boids over {}x{}",
            count,
            params.width,
            params.height
        );
    }

    /// Append a hand-placed boid
    pub fn insert(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn neighbor_search(&self) -> NeighborSearch {
        self.search
    }

    pub fn set_neighbor_search(&mut self, search: NeighborSearch) {
        self.search = search;
    }

    /// Tag one boid with a lane, or clear it with `None`; the bias restarts at zero
    pub fn set_lane(&mut self, index: usize, lane: Option<Lane>) -> Result<(), FlockError> {
        let len = self.boids.len();
        let boid = self
            .boids
            .get_mut(index)
            .ok_or(FlockError::NoSuchBoid { index, len })?;
        boid.lane = lane;
        boid.bias = 0.0;
        Ok(())
    }

    /// Split the flock into two opposing lanes: even indices east, odd west
    pub fn assign_lanes(&mut self) {
        for (index, boid) in self.boids.iter_mut().enumerate() {
            boid.lane = Some(if index % 2 == 0 {
                Lane::Eastbound
            } else {
                Lane::Westbound
            });
            boid.bias = 0.0;
        }
        log::debug!("assigned lanes to {} boids", self.boids.len());
    }

    pub fn clear_lanes(&mut self) {
        for boid in self.boids.iter_mut() {
            boid.lane = None;
            boid.bias = 0.0;
        }
    }

    /// Positions and headings for drawing
    pub fn snapshot(&self) -> impl Iterator<Item = BoidView> + '_ {
        self.boids.iter().map(|boid| BoidView {
            position: boid.position,
            heading: boid.heading(),
        })
    }

    /// Advance every boid by one frame
    pub fn step(&mut self, params: &FlockParams) {
        if self.boids.is_empty() {
            return;
        }

        self.survey(params);

        for (boid, hood) in self.boids.iter_mut().zip(self.hoods.iter()) {
            advance(boid, hood, params);
        }
    }

    /// Neighbor pass over the pre-step state; writes only `self.hoods`
    fn survey(&mut self, params: &FlockParams) {
        self.hoods.clear();

        let grid = match self.search {
            NeighborSearch::Naive => None,
            NeighborSearch::Grid => SpatialGrid::build(params.visual_range.abs(), &self.boids),
        };

        match grid {
            Some(grid) => {
                for (index, boid) in self.boids.iter().enumerate() {
                    grid.nearby(boid.position, &mut self.nearby);
                    let candidates = self.nearby.iter().map(|&other| (other, &self.boids[other]));
                    self.hoods.push(behavior::scan(index, boid, candidates, params));
                }
            }
            None => {
                for (index, boid) in self.boids.iter().enumerate() {
                    let candidates = self.boids.iter().enumerate();
                    self.hoods.push(behavior::scan(index, boid, candidates, params));
                }
            }
        }
    }
}

/// Stages 2 to 7 for one boid, in order
fn advance(boid: &mut Boid, hood: &Neighborhood, params: &FlockParams) {
    boid.velocity += behavior::cursor_attraction(boid, params);
    behavior::cohesion_and_alignment(boid, hood, params);
    behavior::separation(boid, hood, params);
    boid.apply_lane_bias(&params.lane_bias);
    behavior::boundary_turn(boid, params);

    boid.position += boid.velocity;
    boid.velocity = behavior::limit_speed(boid.velocity, params.min_speed, params.max_speed);
}
