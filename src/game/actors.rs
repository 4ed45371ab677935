//! Collaborator interfaces the game core talks to, plus the simple actors
//! used by the terminal front-end.

use crate::audio::AudioBuffer;

/// Anything with a heading around the vertical axis
pub trait AngleSource {
    /// Current heading in degrees, in [0, 360)
    fn angle_deg(&self) -> f32;
}

/// Something that can be started, stopped and retuned
pub trait Spinner {
    fn set_spinning(&mut self, spinning: bool);
    fn set_speed(&mut self, deg_per_s: f32);
}

/// The rotating needle: readable and drivable
pub trait Needle: AngleSource + Spinner {}

impl<T: AngleSource + Spinner> Needle for T {}

/// Top-level UI panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Title,
    Game,
    Result,
    Fortune,
}

/// UI text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Round,
    Judge,
    Total,
    Fortune,
}

/// Judgement window arcs drawn on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgeArc {
    Perfect,
    Good,
    Bad,
}

/// Rendering collaborator receiving derived display values
pub trait GameView {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
    fn set_text(&mut self, slot: TextSlot, text: &str);
    fn set_fill_amount(&mut self, arc: JudgeArc, fill: f32);
    /// Ring rotation around the screen normal (degrees)
    fn set_ring_rotation(&mut self, deg: f32);
}

/// Audio output collaborator; playback is fire-and-forget
pub trait SoundPlayer {
    fn play(&mut self, buffer: &AudioBuffer);
}

/// Needle that integrates its own rotation every frame
#[derive(Debug, Clone)]
pub struct NeedleSpinner {
    angle_deg: f32,
    speed_deg_per_s: f32,
    spinning: bool,
}

impl NeedleSpinner {
    pub fn new(speed_deg_per_s: f32) -> Self {
        Self {
            angle_deg: 0.0,
            speed_deg_per_s,
            spinning: false,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn speed(&self) -> f32 {
        self.speed_deg_per_s
    }

    /// Place the needle at a heading, wrapped into [0, 360)
    pub fn set_angle(&mut self, deg: f32) {
        self.angle_deg = deg.rem_euclid(360.0);
    }

    /// Advance rotation by `dt_s` seconds when spinning
    pub fn update(&mut self, dt_s: f32) {
        if self.spinning {
            self.angle_deg = (self.angle_deg + self.speed_deg_per_s * dt_s).rem_euclid(360.0);
        }
    }
}

impl AngleSource for NeedleSpinner {
    fn angle_deg(&self) -> f32 {
        self.angle_deg
    }
}

impl Spinner for NeedleSpinner {
    fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }

    fn set_speed(&mut self, deg_per_s: f32) {
        self.speed_deg_per_s = deg_per_s;
    }
}

/// Target mark that never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedTarget {
    angle_deg: f32,
}

impl FixedTarget {
    pub fn new(angle_deg: f32) -> Self {
        Self {
            angle_deg: angle_deg.rem_euclid(360.0),
        }
    }
}

impl AngleSource for FixedTarget {
    fn angle_deg(&self) -> f32 {
        self.angle_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_only_moves_while_spinning() {
        let mut needle = NeedleSpinner::new(240.0);
        needle.update(0.5);
        assert_eq!(needle.angle_deg(), 0.0);

        needle.set_spinning(true);
        needle.update(0.5);
        assert_eq!(needle.angle_deg(), 120.0);

        // Wraps into [0, 360)
        needle.update(1.25);
        assert_eq!(needle.angle_deg(), 60.0);
    }

    #[test]
    fn test_fixed_target_normalizes() {
        assert_eq!(FixedTarget::new(-90.0).angle_deg(), 270.0);
        assert_eq!(FixedTarget::new(360.0).angle_deg(), 0.0);
    }
}
