//! Error types
//!
//! The simulation has no I/O, so `SimError` only reports precondition failures
//! from callers. `SettingsError` covers loading configuration in the driver.

use std::path::PathBuf;

use thiserror::Error;

/// Precondition failure reported by the simulation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("direction ({dx}, {dy}) has a component outside -1..=1")]
    InvalidDirection { dx: i32, dy: i32 },
    #[error("agent can only move along one axis, got ({dx}, {dy})")]
    DiagonalAgentDirection { dx: i32, dy: i32 },
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    CellOutOfBounds { x: i32, y: i32, size: usize },
    #[error("grid size {0} leaves no interior cells")]
    GridTooSmall(usize),
    #[error("spawn cell ({x}, {y}) is not an interior cell")]
    SpawnNotInterior { x: i32, y: i32 },
    #[error("probability `{name}` = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },
}

/// Failure loading driver settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings")]
    Invalid(#[from] SimError),
}
