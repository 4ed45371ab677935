//! Judgement tiers, adaptive speed, fortune lookup and ring geometry.
//!
//! Everything here is a pure function of angles, thresholds and scores.

use std::fmt;

use crate::audio::SoundId;
use crate::params::JudgementThresholds;

/// Accuracy class of one stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Perfect,
    Good,
    Bad,
    Miss,
}

impl Tier {
    /// Points awarded for this tier
    pub fn award(self) -> u32 {
        match self {
            Tier::Perfect => 100,
            Tier::Good => 60,
            Tier::Bad => 30,
            Tier::Miss => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "PERFECT",
            Tier::Good => "GOOD",
            Tier::Bad => "BAD",
            Tier::Miss => "MISS",
        }
    }

    pub fn sound(self) -> SoundId {
        match self {
            Tier::Perfect => SoundId::Perfect,
            Tier::Good => SoundId::Good,
            Tier::Bad => SoundId::Bad,
            Tier::Miss => SoundId::Miss,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one judged stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Judgement {
    pub tier: Tier,
    /// Absolute deviation from the target (degrees, [0, 180])
    pub diff_deg: f32,
    /// Spin speed after the adaptive rule was applied
    pub speed_after: f32,
}

impl Judgement {
    /// Judge a stop and apply the adaptive speed rule
    pub fn evaluate(
        needle_deg: f32,
        target_deg: f32,
        speed_before: f32,
        thresholds: &JudgementThresholds,
    ) -> Self {
        let diff_deg = delta_angle(needle_deg, target_deg).abs();
        let tier = classify(diff_deg, thresholds);
        Self {
            tier,
            diff_deg,
            speed_after: adapt_speed(tier, speed_before, thresholds),
        }
    }

    pub fn award(&self) -> u32 {
        self.tier.award()
    }

    /// Three-line result text: label, score delta, deviation
    pub fn text(&self) -> String {
        format!(
            "{}\n+{}\n(diff {:.1}°)",
            self.tier.label(),
            self.award(),
            self.diff_deg
        )
    }
}

/// Shortest signed rotation from `current` to `target`, in (-180, 180]
pub fn delta_angle(current_deg: f32, target_deg: f32) -> f32 {
    let d = (target_deg - current_deg).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Map a deviation onto a tier; each threshold is an inclusive upper bound
pub fn classify(diff_deg: f32, thresholds: &JudgementThresholds) -> Tier {
    if diff_deg <= thresholds.perfect_deg {
        Tier::Perfect
    } else if diff_deg <= thresholds.good_deg {
        Tier::Good
    } else if diff_deg <= thresholds.bad_deg {
        Tier::Bad
    } else {
        Tier::Miss
    }
}

/// PERFECT speeds the needle up, MISS slows it down, clamped to bounds
pub fn adapt_speed(tier: Tier, speed: f32, thresholds: &JudgementThresholds) -> f32 {
    match tier {
        Tier::Perfect => thresholds.clamp_speed(speed * thresholds.perfect_mult),
        Tier::Miss => thresholds.clamp_speed(speed * thresholds.miss_mult),
        Tier::Good | Tier::Bad => speed,
    }
}

/// Final fortune, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fortune {
    BadLuck,
    SmallLuck,
    MiddleLuck,
    GreatLuck,
}

impl Fortune {
    pub fn from_score(score: u32) -> Self {
        if score >= 450 {
            Fortune::GreatLuck
        } else if score >= 350 {
            Fortune::MiddleLuck
        } else if score >= 200 {
            Fortune::SmallLuck
        } else {
            Fortune::BadLuck
        }
    }

    pub fn kanji(self) -> &'static str {
        match self {
            Fortune::GreatLuck => "大吉",
            Fortune::MiddleLuck => "中吉",
            Fortune::SmallLuck => "小吉",
            Fortune::BadLuck => "凶",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fortune::GreatLuck => "Great luck",
            Fortune::MiddleLuck => "Middle luck",
            Fortune::SmallLuck => "Small luck",
            Fortune::BadLuck => "Bad luck",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Fortune::GreatLuck => "Today is your strongest day",
            Fortune::MiddleLuck => "Most things will go well",
            Fortune::SmallLuck => "Go carefully and it will be fine",
            Fortune::BadLuck => "Take it easy and play defense",
        }
    }

    pub fn text(self, score: u32) -> String {
        format!(
            "TOTAL {}\n{} {}\n{}",
            score,
            self.kanji(),
            self.name(),
            self.message()
        )
    }
}

/// Display projection of the judgement ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgeRing {
    /// Ring rotation so its zero points at the target (degrees)
    pub rotation_deg: f32,
    pub perfect_fill: f32,
    pub good_fill: f32,
    pub bad_fill: f32,
}

impl JudgeRing {
    pub fn new(target_deg: f32, thresholds: &JudgementThresholds) -> Self {
        Self {
            rotation_deg: -target_deg,
            perfect_fill: arc_fill(thresholds.perfect_deg),
            good_fill: arc_fill(thresholds.good_deg),
            bad_fill: arc_fill(thresholds.bad_deg),
        }
    }
}

/// Fraction of a full circle covered by a ±`half_width_deg` window
fn arc_fill(half_width_deg: f32) -> f32 {
    half_width_deg * 2.0 / 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> JudgementThresholds {
        JudgementThresholds::default()
    }

    #[test]
    fn test_delta_angle_wraps() {
        assert_eq!(delta_angle(350.0, 10.0), 20.0);
        assert_eq!(delta_angle(10.0, 350.0), -20.0);
        assert_eq!(delta_angle(0.0, 180.0), 180.0);
        assert_eq!(delta_angle(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_boundaries_belong_to_better_tier() {
        let t = thresholds();
        assert_eq!(classify(5.0, &t), Tier::Perfect);
        assert_eq!(classify(5.01, &t), Tier::Good);
        assert_eq!(classify(12.0, &t), Tier::Good);
        assert_eq!(classify(12.01, &t), Tier::Bad);
        assert_eq!(classify(25.0, &t), Tier::Bad);
        assert_eq!(classify(25.01, &t), Tier::Miss);
        assert_eq!(classify(0.0, &t), Tier::Perfect);
        assert_eq!(classify(180.0, &t), Tier::Miss);
    }

    #[test]
    fn test_perfect_range_speeds_up() {
        let t = thresholds();
        for tenth in 0..=50 {
            let diff = tenth as f32 / 10.0;
            let j = Judgement::evaluate(0.0, diff, 150.0, &t);
            assert_eq!(j.tier, Tier::Perfect);
            assert_eq!(j.award(), 100);
            assert_eq!(j.speed_after, t.clamp_speed(150.0 * t.perfect_mult));
        }
    }

    #[test]
    fn test_miss_range_slows_down() {
        let t = thresholds();
        for diff in [25.5f32, 40.0, 90.0, 179.0, 180.0] {
            let j = Judgement::evaluate(0.0, diff, 300.0, &t);
            assert_eq!(j.tier, Tier::Miss);
            assert_eq!(j.award(), 0);
            assert_eq!(j.speed_after, t.clamp_speed(300.0 * t.miss_mult));
        }
    }

    #[test]
    fn test_speed_is_clamped() {
        let t = thresholds();
        assert_eq!(adapt_speed(Tier::Perfect, 240.0, &t), 500.0);
        assert_eq!(adapt_speed(Tier::Miss, 125.0, &t), 120.0);
        assert_eq!(adapt_speed(Tier::Good, 240.0, &t), 240.0);
        assert_eq!(adapt_speed(Tier::Bad, 240.0, &t), 240.0);
    }

    #[test]
    fn test_evaluate_across_zero() {
        let j = Judgement::evaluate(357.0, 2.0, 240.0, &thresholds());
        assert_eq!(j.tier, Tier::Perfect);
        assert!((j.diff_deg - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_judgement_text() {
        let j = Judgement::evaluate(100.0, 92.0, 240.0, &thresholds());
        assert_eq!(j.text(), "GOOD\n+60\n(diff 8.0°)");
    }

    #[test]
    fn test_fortune_boundaries() {
        assert_eq!(Fortune::from_score(0), Fortune::BadLuck);
        assert_eq!(Fortune::from_score(199), Fortune::BadLuck);
        assert_eq!(Fortune::from_score(200), Fortune::SmallLuck);
        assert_eq!(Fortune::from_score(349), Fortune::SmallLuck);
        assert_eq!(Fortune::from_score(350), Fortune::MiddleLuck);
        assert_eq!(Fortune::from_score(449), Fortune::MiddleLuck);
        assert_eq!(Fortune::from_score(450), Fortune::GreatLuck);
        assert_eq!(Fortune::from_score(500), Fortune::GreatLuck);
    }

    #[test]
    fn test_fortune_is_monotonic() {
        let mut previous = Fortune::from_score(0);
        for score in (0..=500).step_by(10) {
            let fortune = Fortune::from_score(score);
            assert!(fortune >= previous, "{score} dropped to {fortune:?}");
            previous = fortune;
        }
    }

    #[test]
    fn test_fortune_text() {
        assert_eq!(
            Fortune::SmallLuck.text(290),
            "TOTAL 290\n小吉 Small luck\nGo carefully and it will be fine"
        );
    }

    #[test]
    fn test_ring_projection() {
        let ring = JudgeRing::new(90.0, &thresholds());
        assert_eq!(ring.rotation_deg, -90.0);
        assert!((ring.perfect_fill - 10.0 / 360.0).abs() < 1e-6);
        assert!((ring.good_fill - 24.0 / 360.0).abs() < 1e-6);
        assert!((ring.bad_fill - 50.0 / 360.0).abs() < 1e-6);
    }
}
