//! Error taxonomy for dungeon generation.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid bounds or generator settings. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("grid width {width} exceeds the maximum of {max}")]
    WidthTooLarge { width: usize, max: usize },

    #[error("grid height {height} exceeds the maximum of {max}")]
    HeightTooLarge { height: usize, max: usize },

    #[error("minimum path length must be positive")]
    ZeroPathLength,

    #[error("minimum path length {min_path_length} is unsatisfiable, a {width}x{height} grid allows at most {max}")]
    PathLengthUnsatisfiable {
        min_path_length: usize,
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidChance { name: &'static str, value: f64 },

    #[error("at least one generation attempt is required")]
    ZeroAttempts,
}

/// Why a single generation attempt was rejected. Retried with a new seed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    #[error("main path reached only {reached} hops, {required} required")]
    PathTooShort { reached: usize, required: usize },

    #[error("only {visited} of {total} rooms reachable from the entrance")]
    Unreachable { visited: usize, total: usize },

    #[error("exit is {distance} hops from the entrance, {required} required")]
    ExitTooClose { distance: usize, required: usize },
}

/// Errors surfaced by `generate`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: AttemptFailure },

    #[error("topology invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors reading a generator config file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
