/*
 * Error Module
 *
 * Error types for the flock simulation. Configuration problems are detected
 * once, before any agent is created, and abort startup. Frontend I/O errors
 * are the only thing that can fail once the simulation is running.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable simulation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    EmptyWorld { width: u32, height: u32 },

    #[error("world of {width}x{height} exceeds the limit of {max_cells} cells")]
    WorldTooLarge { width: u32, height: u32, max_cells: u64 },

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveFactor { name: &'static str, value: f32 },

    #[error("visual radius must be a non-negative finite number, got {0}")]
    InvalidVisualRadius(f32),

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors surfaced by the simulation driver.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("frontend error: {0}")]
    Frontend(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

impl ConfigError {
    pub(crate) fn check_factor(name: &'static str, value: f32) -> std::result::Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositiveFactor { name, value })
        }
    }
}
