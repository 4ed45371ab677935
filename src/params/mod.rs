//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (degrees, degrees per second, Hz)
//! - Documented ranges and meanings
//! - A `validate()` that fails fast on inconsistent values

mod audio;
mod game;
mod judge;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export all types
pub use audio::SynthConfig;
pub use game::{NeedleParams, ROUNDS_PER_SESSION};
pub use judge::JudgementThresholds;

/// Construction-time configuration problems
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("judgement thresholds must satisfy 0 < perfect < good < bad <= 180, got {perfect}/{good}/{bad}")]
    Thresholds { perfect: f32, good: f32, bad: f32 },

    #[error("perfect multiplier must be > 1, got {0}")]
    PerfectMultiplier(f32),

    #[error("miss multiplier must be in (0, 1), got {0}")]
    MissMultiplier(f32),

    #[error("speed bounds must satisfy 0 < min < max, got [{min}, {max}]")]
    SpeedBounds { min: f32, max: f32 },

    #[error("base speed {speed} lies outside [{min}, {max}]")]
    BaseSpeed { speed: f32, min: f32, max: f32 },

    #[error("sample rate must be > 0")]
    SampleRate,

    #[error("master gain must be in [0.05, 1], got {0}")]
    MasterGain(f32),
}

/// Failure while reading a configuration file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Everything the game needs at construction time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub judge: JudgementThresholds,
    pub needle: NeedleParams,
    pub synth: SynthConfig,
}

impl GameConfig {
    /// Load a TOML file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            LoadError::Parse { source, .. } => LoadError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(text).map_err(|source| LoadError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.judge.validate()?;
        self.needle.validate(&self.judge)?;
        self.synth.validate()
    }
}
