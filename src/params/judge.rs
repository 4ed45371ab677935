//! Judgement windows and adaptive speed rules.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Angular judgement windows and the speed feedback applied after each stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgementThresholds {
    /// Largest deviation still judged PERFECT (degrees, inclusive)
    pub perfect_deg: f32,

    /// Largest deviation still judged GOOD (degrees, inclusive)
    pub good_deg: f32,

    /// Largest deviation still judged BAD (degrees, inclusive); beyond is MISS
    pub bad_deg: f32,

    /// Speed multiplier after a PERFECT (> 1, the game speeds up)
    pub perfect_mult: f32,

    /// Speed multiplier after a MISS (< 1, the game slows down)
    pub miss_mult: f32,

    /// Lower clamp for the spin speed (degrees per second)
    pub min_speed: f32,

    /// Upper clamp for the spin speed (degrees per second)
    pub max_speed: f32,
}

impl Default for JudgementThresholds {
    fn default() -> Self {
        Self {
            perfect_deg: 5.0,
            good_deg: 12.0,
            bad_deg: 25.0,
            perfect_mult: 2.5,
            miss_mult: 0.88,
            min_speed: 120.0,
            max_speed: 500.0,
        }
    }
}

impl JudgementThresholds {
    /// Clamp a speed into `[min_speed, max_speed]`
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = 0.0 < self.perfect_deg
            && self.perfect_deg < self.good_deg
            && self.good_deg < self.bad_deg
            && self.bad_deg <= 180.0;
        if !ordered {
            return Err(ConfigError::Thresholds {
                perfect: self.perfect_deg,
                good: self.good_deg,
                bad: self.bad_deg,
            });
        }
        if !(self.perfect_mult > 1.0) {
            return Err(ConfigError::PerfectMultiplier(self.perfect_mult));
        }
        if !(self.miss_mult > 0.0 && self.miss_mult < 1.0) {
            return Err(ConfigError::MissMultiplier(self.miss_mult));
        }
        if !(0.0 < self.min_speed && self.min_speed < self.max_speed) {
            return Err(ConfigError::SpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_must_increase() {
        let thresholds = JudgementThresholds {
            good_deg: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::Thresholds { .. })
        ));
    }

    #[test]
    fn test_multiplier_rules() {
        let slow_perfect = JudgementThresholds {
            perfect_mult: 1.0,
            ..Default::default()
        };
        assert_eq!(
            slow_perfect.validate(),
            Err(ConfigError::PerfectMultiplier(1.0))
        );

        let fast_miss = JudgementThresholds {
            miss_mult: 1.2,
            ..Default::default()
        };
        assert_eq!(fast_miss.validate(), Err(ConfigError::MissMultiplier(1.2)));
    }

    #[test]
    fn test_inverted_speed_bounds() {
        let thresholds = JudgementThresholds {
            min_speed: 500.0,
            max_speed: 120.0,
            ..Default::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(ConfigError::SpeedBounds {
                min: 500.0,
                max: 120.0
            })
        );
    }

    #[test]
    fn test_clamp_speed() {
        let thresholds = JudgementThresholds::default();
        assert_eq!(thresholds.clamp_speed(600.0), 500.0);
        assert_eq!(thresholds.clamp_speed(50.0), 120.0);
        assert_eq!(thresholds.clamp_speed(240.0), 240.0);
    }
}
