//! Headless host for the flocking core: runs a fixed number of frames without
//! a window, logging frame reports and optionally recording every frame.

pub mod runner;

pub use runner::{load_settings, parse_cursor, run, RunOptions, RunSummary};
