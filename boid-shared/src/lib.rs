//! Data that crosses the boundary between the flocking core and its hosts:
//! settings documents going in, boid snapshots and frame reports coming out.

mod report;
mod settings;

pub use report::{snapshot_states, BoidState, FrameReport};
pub use settings::{FlockSettings, SettingsError};
