//! Configuration file support for repcount.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/repcount/config.toml`.
//! Every field is optional; anything left out falls back to the built-in
//! threshold table, a set size of 10 and a visibility floor of 0.5.

use crate::angle::DEFAULT_MIN_VISIBILITY;
use crate::classifier::ExerciseTable;
use crate::counter::DEFAULT_SET_SIZE;
use crate::{Error, ExerciseKind, Result, ThresholdPair};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    /// Threshold overrides keyed by exercise name
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdSpec>,
}

/// Engine tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_set_size")]
    pub set_size: u32,

    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            set_size: default_set_size(),
            min_visibility: default_min_visibility(),
        }
    }
}

/// Raw threshold pair as written in the config file
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThresholdSpec {
    pub down: f32,
    pub up: f32,
}

// Default value functions
fn default_set_size() -> u32 {
    DEFAULT_SET_SIZE
}

fn default_min_visibility() -> f32 {
    DEFAULT_MIN_VISIBILITY
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            other => {
                tracing::info!("No config file found at {:?}, using defaults", other);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("repcount").join("config.toml"))
    }

    /// Reject anything the engine could not run with
    pub fn validate(&self) -> Result<()> {
        if self.engine.set_size == 0 {
            return Err(Error::InvalidConfiguration(
                "engine.set_size must be at least 1".into(),
            ));
        }

        let vis = self.engine.min_visibility;
        if !(0.0..=1.0).contains(&vis) {
            return Err(Error::InvalidConfiguration(format!(
                "engine.min_visibility must be within [0, 1], got {}",
                vis
            )));
        }

        self.exercise_table().map(|_| ())
    }

    /// Built-in table with this config's overrides applied
    ///
    /// Keys must be canonical exercise names; aliases such as `squats` are
    /// refused so two keys can never silently target the same exercise.
    pub fn exercise_table(&self) -> Result<ExerciseTable> {
        let mut table = ExerciseTable::default();

        for (name, spec) in &self.thresholds {
            let kind: ExerciseKind = name.parse().map_err(|_| {
                Error::InvalidConfiguration(format!(
                    "unrecognized exercise '{}' in [thresholds]",
                    name
                ))
            })?;
            if kind.name() != name {
                return Err(Error::InvalidConfiguration(format!(
                    "[thresholds.{}]: use the canonical key [thresholds.{}]",
                    name,
                    kind.name()
                )));
            }
            let pair = ThresholdPair::new(spec.down, spec.up).map_err(|e| {
                Error::InvalidConfiguration(format!("[thresholds.{}]: {}", name, e))
            })?;
            table.set_thresholds(kind, pair)?;
        }

        Ok(table)
    }

    /// Save the current configuration to a specific path
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target, so a crash never leaves a half-written config behind.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "config path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
