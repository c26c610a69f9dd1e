#![forbid(unsafe_code)]

//! Repetition classification engine.
//!
//! This crate turns a stream of per-frame body landmarks into counted reps,
//! set boundaries and short feedback messages:
//! - Joint-angle geometry
//! - Per-exercise hysteresis classifier
//! - Rep/set aggregation and canned feedback
//! - Single-frame quick check
//! - Monitor lifecycle, frame logs and rep export for hosts

pub mod types;
pub mod error;
pub mod angle;
pub mod classifier;
pub mod counter;
pub mod feedback;
pub mod quick_check;
pub mod config;
pub mod logging;
pub mod engine;
pub mod monitor;
pub mod frame_log;
pub mod export;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{Engine, SkipReason, StepOutcome};
pub use monitor::{Monitor, SessionSummary, StopHandle};
pub use frame_log::{read_frame, read_frames};
pub use export::write_rep_events;
