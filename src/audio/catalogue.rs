//! The fixed set of gameplay sound effects, synthesized once at startup.

use std::fmt;
use std::sync::Arc;

use log::info;
use rand::Rng;

use super::synthesis::{apply_gain, concat, mix, Ramp, Synth};
use crate::params::SynthConfig;

/// Every sound the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Start,
    Stop,
    Perfect,
    Good,
    Bad,
    Miss,
    Result,
    Fortune,
}

impl SoundId {
    pub const ALL: [SoundId; 8] = [
        SoundId::Start,
        SoundId::Stop,
        SoundId::Perfect,
        SoundId::Good,
        SoundId::Bad,
        SoundId::Miss,
        SoundId::Result,
        SoundId::Fortune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundId::Start => "start",
            SoundId::Stop => "stop",
            SoundId::Perfect => "perfect",
            SoundId::Good => "good",
            SoundId::Bad => "bad",
            SoundId::Miss => "miss",
            SoundId::Result => "result",
            SoundId::Fortune => "fortune",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable mono sample buffer
///
/// Cloning shares the samples; playback never copies them.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    id: SoundId,
    sample_rate_hz: u32,
    samples: Arc<[f32]>,
}

impl AudioBuffer {
    pub fn new(id: SoundId, sample_rate_hz: u32, samples: Vec<f32>) -> Self {
        Self {
            id,
            sample_rate_hz,
            samples: samples.into(),
        }
    }

    pub fn id(&self) -> SoundId {
        self.id
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Shared handle to the sample data
    pub fn shared_samples(&self) -> Arc<[f32]> {
        Arc::clone(&self.samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_s(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate_hz as f32
    }
}

/// All gameplay sounds, indexed by [`SoundId`]
#[derive(Debug, Clone)]
pub struct SoundCatalogue {
    buffers: Vec<AudioBuffer>,
}

impl SoundCatalogue {
    /// Synthesize every sound once
    ///
    /// `rng` only feeds the noise clicks; tones and sweeps are deterministic.
    pub fn build<R: Rng + ?Sized>(config: &SynthConfig, rng: &mut R) -> Self {
        let synth = Synth::new(config.sample_rate_hz);

        let buffers: Vec<AudioBuffer> = SoundId::ALL
            .iter()
            .map(|&id| {
                let mut samples = recipe(&synth, rng, id);
                apply_gain(&mut samples, config.master_gain);
                AudioBuffer::new(id, config.sample_rate_hz, samples)
            })
            .collect();

        let total: usize = buffers.iter().map(AudioBuffer::len).sum();
        info!(
            "Synthesized {} sounds ({} samples @ {}Hz, gain {:.2})",
            buffers.len(),
            total,
            config.sample_rate_hz,
            config.master_gain
        );

        Self { buffers }
    }

    pub fn get(&self, id: SoundId) -> &AudioBuffer {
        &self.buffers[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AudioBuffer> {
        self.buffers.iter()
    }
}

/// Sound design for one effect, before master gain
fn recipe<R: Rng + ?Sized>(synth: &Synth, rng: &mut R, id: SoundId) -> Vec<f32> {
    match id {
        // Two rising beeps
        SoundId::Start => concat(&[
            synth.tone(0.10, 880.0, 0.45, Ramp::new(0.005, 0.03)),
            synth.tone(0.14, 1175.0, 0.55, Ramp::new(0.005, 0.05)),
        ]),
        // Click plus a soft low thud
        SoundId::Stop => mix(&[
            synth.noise_click(rng, 0.08, 0.45),
            synth.tone(0.12, 220.0, 0.30, Ramp::new(0.002, 0.09)),
        ]),
        // C6 then E6
        SoundId::Perfect => concat(&[
            synth.tone(0.10, 1046.5, 0.55, Ramp::new(0.005, 0.04)),
            synth.tone(0.12, 1318.5, 0.50, Ramp::new(0.005, 0.05)),
        ]),
        SoundId::Good => synth.tone(0.14, 880.0, 0.45, Ramp::new(0.005, 0.07)),
        SoundId::Bad => synth.tone(0.18, 392.0, 0.45, Ramp::new(0.005, 0.10)),
        // Falling buzz
        SoundId::Miss => synth.sweep(0.22, 300.0, 140.0, 0.55, Ramp::new(0.005, 0.12)),
        SoundId::Result => concat(&[
            synth.tone(0.10, 659.0, 0.40, Ramp::new(0.005, 0.05)),
            synth.tone(0.12, 784.0, 0.50, Ramp::new(0.005, 0.06)),
        ]),
        // Rising shimmer
        SoundId::Fortune => mix(&[
            synth.sweep(0.45, 600.0, 1400.0, 0.38, Ramp::new(0.01, 0.18)),
            synth.noise_click(rng, 0.18, 0.18),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synthesis::peak;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalogue() -> SoundCatalogue {
        SoundCatalogue::build(&SynthConfig::default(), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_every_sound_is_built_in_order() {
        let catalogue = catalogue();
        let ids: Vec<SoundId> = catalogue.iter().map(AudioBuffer::id).collect();
        assert_eq!(ids, SoundId::ALL.to_vec());
        for id in SoundId::ALL {
            assert_eq!(catalogue.get(id).id(), id);
            assert!(!catalogue.get(id).is_empty());
        }
    }

    #[test]
    fn test_buffer_lengths_follow_recipes() {
        let catalogue = catalogue();
        let synth = Synth::new(44100);

        assert_eq!(
            catalogue.get(SoundId::Start).len(),
            synth.sample_count(0.10) + synth.sample_count(0.14)
        );
        // Mix pads to the longest part
        assert_eq!(catalogue.get(SoundId::Stop).len(), synth.sample_count(0.12));
        assert_eq!(catalogue.get(SoundId::Good).len(), synth.sample_count(0.14));
        assert_eq!(catalogue.get(SoundId::Miss).len(), synth.sample_count(0.22));
        assert_eq!(
            catalogue.get(SoundId::Fortune).len(),
            synth.sample_count(0.45)
        );
    }

    #[test]
    fn test_master_gain_bounds_output() {
        let catalogue = catalogue();
        for buffer in catalogue.iter() {
            assert!(
                peak(buffer.samples()) <= 0.7 + 1e-6,
                "{} exceeds master gain",
                buffer.id()
            );
        }
    }

    #[test]
    fn test_tonal_sounds_ignore_rng() {
        let config = SynthConfig::default();
        let a = SoundCatalogue::build(&config, &mut StdRng::seed_from_u64(1));
        let b = SoundCatalogue::build(&config, &mut StdRng::seed_from_u64(2));

        for id in [SoundId::Start, SoundId::Perfect, SoundId::Miss, SoundId::Result] {
            assert_eq!(a.get(id).samples(), b.get(id).samples());
        }
        assert_ne!(
            a.get(SoundId::Stop).samples(),
            b.get(SoundId::Stop).samples()
        );
    }

    #[test]
    fn test_clone_shares_samples() {
        let catalogue = catalogue();
        let buffer = catalogue.get(SoundId::Good).clone();
        assert!(Arc::ptr_eq(
            &buffer.shared_samples(),
            &catalogue.get(SoundId::Good).shared_samples()
        ));
    }
}
