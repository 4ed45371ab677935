//! Needle-stop game: judgement state machine and its collaborators.

mod actors;
mod judge;
mod session;

// Re-export public types
pub use actors::{
    AngleSource, FixedTarget, GameView, JudgeArc, Needle, NeedleSpinner, Panel, SoundPlayer,
    Spinner, TextSlot,
};
pub use judge::{adapt_speed, classify, delta_angle, Fortune, JudgeRing, Judgement, Tier};
pub use session::{GameManager, GameState, Input, RoundSession, Stage, Transition};
