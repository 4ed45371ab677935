//! Sound synthesis configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Synthesis configuration shared by every generated buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Sample rate of the generated buffers (Hz)
    pub sample_rate_hz: u32,

    /// Gain applied to every finished buffer, in [0.05, 1]
    pub master_gain: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            master_gain: 0.7,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::SampleRate);
        }
        if !(0.05..=1.0).contains(&self.master_gain) {
            return Err(ConfigError::MasterGain(self.master_gain));
        }
        Ok(())
    }
}
