//! Session and needle parameters.

use serde::{Deserialize, Serialize};

use super::{ConfigError, JudgementThresholds};

/// Number of judged rounds before the fortune is shown
pub const ROUNDS_PER_SESSION: u32 = 5;

/// Needle rotation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleParams {
    /// Spin speed at the start of every session (degrees per second)
    pub base_speed_deg_per_s: f32,
}

impl Default for NeedleParams {
    fn default() -> Self {
        Self {
            base_speed_deg_per_s: 240.0,
        }
    }
}

impl NeedleParams {
    /// Base speed must sit inside the judgement speed bounds
    pub fn validate(&self, judge: &JudgementThresholds) -> Result<(), ConfigError> {
        let speed = self.base_speed_deg_per_s;
        if !(judge.min_speed..=judge.max_speed).contains(&speed) {
            return Err(ConfigError::BaseSpeed {
                speed,
                min: judge.min_speed,
                max: judge.max_speed,
            });
        }
        Ok(())
    }
}
