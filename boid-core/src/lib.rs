#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation core.
//!
//! Boids steer by separation, cohesion and alignment against their
//! neighbors, optionally follow a cursor, turn back softly at the world
//! edges and keep their speed inside fixed bounds. Builds without `std`
//! (with `alloc`); random resets need the default `std` feature.

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod behavior;
mod boid;
mod params;
mod simulation;
mod spatial;
mod vector;

pub use behavior::Neighborhood;
pub use boid::{Boid, Lane};
pub use params::{FlockParams, LaneBias};
pub use simulation::{BoidView, FlockError, FlockSimulation, NeighborSearch};
pub use spatial::SpatialGrid;
pub use vector::Vector2D;
