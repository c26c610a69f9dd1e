//! Error types for the repcount_core library.
//!
//! Only configuration-time and IO problems are errors. Per-frame conditions
//! (no person detected, joints out of view) are reported as skipped frames.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for repcount_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Threshold table, set size or visibility settings are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An exercise name that is not in the closed set of kinds
    #[error("Unknown exercise kind: {0}")]
    UnknownExercise(String),

    /// Monitor lifecycle misuse (start while running, etc.)
    #[error("Monitor error: {0}")]
    Monitor(String),
}

impl Error {
    /// True for errors that must stop a session from starting
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfiguration(_) | Error::UnknownExercise(_) | Error::Toml(_)
        )
    }
}
