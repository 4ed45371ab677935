//! Procedural sound effects and their playback.
//!
//! Every sound is synthesized once at startup from waveform primitives,
//! then shared with the output device without copying.

pub mod analysis;
mod catalogue;
pub mod synthesis;
mod system;
pub mod wav;

// Re-export public types
pub use catalogue::{AudioBuffer, SoundCatalogue, SoundId};
pub use system::AudioSystem;
