#[cfg(feature = "std")]
use rand::Rng;

use crate::params::LaneBias;
use crate::vector::Vector2D;

/// Horizontal lane preference a boid may carry.
///
/// Boids without a lane ignore the lane stage entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Group 1, pulled towards `+x`
    Eastbound,
    /// Group 2, pulled towards `-x`
    Westbound,
}

impl Lane {
    /// Group tag as used by hosts: 1 or 2
    pub fn group(&self) -> u8 {
        match self {
            Lane::Eastbound => 1,
            Lane::Westbound => 2,
        }
    }

    pub fn from_group(group: u8) -> Option<Lane> {
        match group {
            1 => Some(Lane::Eastbound),
            2 => Some(Lane::Westbound),
            _ => None,
        }
    }

    /// Target `vx` direction of the lane
    pub fn direction(&self) -> f32 {
        match self {
            Lane::Eastbound => 1.0,
            Lane::Westbound => -1.0,
        }
    }
}

/// A single boid
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub lane: Option<Lane>,
    /// Adaptive lane bias, only meaningful while `lane` is set
    pub bias: f32,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            lane: None,
            bias: 0.0,
        }
    }

    /// Uniform position over the world, each velocity component in `[-5, 5)`
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        // Scaling unit samples keeps degenerate extents from panicking in gen_range
        let position = Vector2D::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        let velocity = Vector2D::new(
            (rng.gen::<f32>() - 0.5) * 10.0,
            (rng.gen::<f32>() - 0.5) * 10.0,
        );
        Self::new(position, velocity)
    }

    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lane = Some(lane);
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Direction of travel in radians
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    /// Blend `vx` towards the lane direction.
    ///
    /// The bias ramps up to `max_bias` while the boid already moves its lane's
    /// way and relaxes down to `bias_increment` otherwise.
    pub fn apply_lane_bias(&mut self, tuning: &LaneBias) {
        let Some(lane) = self.lane else {
            return;
        };
        let direction = lane.direction();

        if self.velocity.x * direction > 0.0 {
            self.bias = (self.bias + tuning.bias_increment).min(tuning.max_bias);
        } else {
            self.bias = (self.bias - tuning.bias_increment).max(tuning.bias_increment);
        }

        self.velocity.x = (1.0 - self.bias) * self.velocity.x + self.bias * direction;
    }
}
