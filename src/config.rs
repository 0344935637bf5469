//! Generator configuration.

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_BRANCH_CHANCE, DEFAULT_LOOP_CHANCE, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_BRANCH_DEPTH, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
};
use crate::error::{ConfigError, ConfigLoadError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings threaded through a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Largest grid width `GridBounds` accepts
    pub max_width: usize,

    /// Largest grid height `GridBounds` accepts
    pub max_height: usize,

    /// Pipeline restarts allowed before giving up
    pub max_attempts: u32,

    /// Chance a room sprouts a side corridor
    pub branch_chance: f64,

    /// How far a branch may reach from the main path, in rooms
    pub max_branch_depth: u32,

    /// Chance an unconnected adjacent pair gets an edge
    pub loop_chance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            branch_chance: DEFAULT_BRANCH_CHANCE,
            max_branch_depth: DEFAULT_MAX_BRANCH_DEPTH,
            loop_chance: DEFAULT_LOOP_CHANCE,
        }
    }
}

impl GeneratorConfig {
    /// Main path only: no branches, no loops
    pub fn bare() -> Self {
        Self {
            branch_chance: 0.0,
            loop_chance: 0.0,
            ..Default::default()
        }
    }

    /// Branch and loop wherever the grid allows
    pub fn maximal() -> Self {
        Self {
            branch_chance: 1.0,
            loop_chance: 1.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("branch_chance", self.branch_chance),
            ("loop_chance", self.loop_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidChance { name, value });
            }
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the platform config file if present, defaults otherwise
    pub fn load_or_default() -> Result<Self, ConfigLoadError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// `config.json` in the platform config directory
    pub fn default_path() -> Result<PathBuf, ConfigLoadError> {
        let project_dirs =
            ProjectDirs::from("", "", "labyrinth").ok_or(ConfigLoadError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
