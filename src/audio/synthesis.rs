//! Waveform primitives and combinators for procedural sound effects.
//!
//! Every generator returns a plain sample vector at the synthesizer's
//! sample rate. Buffers are built from these by mixing and concatenation.

use std::f32::consts::PI;

use rand::Rng;

/// Floor for attack/release times so the envelope never divides by zero
const MIN_RAMP_S: f32 = 0.0001;

/// Decay rate of the noise click envelope (1/s)
const CLICK_DECAY_PER_S: f32 = 60.0;

/// Weight of the fundamental in a tone; the second harmonic gets the rest
const FUNDAMENTAL_WEIGHT: f32 = 0.75;

/// Attack/release shape shared by tones and sweeps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Linear fade-in time (seconds)
    pub attack_s: f32,

    /// Linear fade-out time (seconds)
    pub release_s: f32,
}

impl Ramp {
    pub const fn new(attack_s: f32, release_s: f32) -> Self {
        Self {
            attack_s,
            release_s,
        }
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::new(0.01, 0.08)
    }
}

/// Sample generator at a fixed rate
#[derive(Debug, Clone, Copy)]
pub struct Synth {
    sample_rate_hz: u32,
}

impl Synth {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self { sample_rate_hz }
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Number of samples covering `seconds`, rounded up
    pub fn sample_count(&self, seconds: f32) -> usize {
        (seconds * self.sample_rate_hz as f32).ceil().max(0.0) as usize
    }

    fn time_at(&self, index: usize) -> f32 {
        index as f32 / self.sample_rate_hz as f32
    }

    /// Sine with a quarter-weight second harmonic, for a slightly square game tone
    pub fn tone(&self, seconds: f32, freq_hz: f32, amp: f32, ramp: Ramp) -> Vec<f32> {
        (0..self.sample_count(seconds))
            .map(|i| {
                let t = self.time_at(i);
                let env = envelope(t, seconds, ramp);
                let s = (2.0 * PI * freq_hz * t).sin() * FUNDAMENTAL_WEIGHT
                    + (2.0 * PI * freq_hz * 2.0 * t).sin() * (1.0 - FUNDAMENTAL_WEIGHT);
                s * amp * env
            })
            .collect()
    }

    /// Sine gliding linearly from `start_hz` to `end_hz`
    ///
    /// The phase is accumulated sample by sample so the glide has no
    /// discontinuities.
    pub fn sweep(
        &self,
        seconds: f32,
        start_hz: f32,
        end_hz: f32,
        amp: f32,
        ramp: Ramp,
    ) -> Vec<f32> {
        let step = 2.0 * PI / self.sample_rate_hz as f32;
        let mut phase = 0.0f32;

        (0..self.sample_count(seconds))
            .map(|i| {
                let t = self.time_at(i);
                let env = envelope(t, seconds, ramp);
                let freq = lerp(start_hz, end_hz, t / seconds);
                phase += step * freq;
                phase.sin() * amp * env
            })
            .collect()
    }

    /// Uniform white noise with a sharp exponential decay
    pub fn noise_click<R: Rng + ?Sized>(&self, rng: &mut R, seconds: f32, amp: f32) -> Vec<f32> {
        (0..self.sample_count(seconds))
            .map(|i| {
                let t = self.time_at(i);
                let env = (-t * CLICK_DECAY_PER_S).exp();
                rng.gen_range(-1.0f32..=1.0) * amp * env
            })
            .collect()
    }
}

/// Trapezoid envelope: linear fade-in, linear fade-out, 1.0 in between
///
/// Zero at both edges whenever attack and release are non-zero.
pub fn envelope(t: f32, length: f32, ramp: Ramp) -> f32 {
    let a = (t / ramp.attack_s.max(MIN_RAMP_S)).clamp(0.0, 1.0);
    let r = ((length - t) / ramp.release_s.max(MIN_RAMP_S)).clamp(0.0, 1.0);
    a.min(r)
}

/// Sum segments sample by sample, padding shorter ones with silence
///
/// The result is scaled down to a peak of 1.0 if the sum would clip; it is
/// never amplified.
pub fn mix(parts: &[Vec<f32>]) -> Vec<f32> {
    let len = parts.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = vec![0.0f32; len];

    for part in parts {
        for (acc, s) in out.iter_mut().zip(part) {
            *acc += s;
        }
    }

    let peak = peak(&out);
    if peak > 1.0 {
        let k = 1.0 / peak;
        out.iter_mut().for_each(|s| *s *= k);
    }
    out
}

/// Play segments back to back
pub fn concat(parts: &[Vec<f32>]) -> Vec<f32> {
    let total = parts.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Scale every sample by `gain`
pub fn apply_gain(samples: &mut [f32], gain: f32) {
    samples.iter_mut().for_each(|s| *s *= gain);
}

/// Largest absolute sample value
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RATE: u32 = 44100;

    #[test]
    fn test_sample_count_rounds_up() {
        let synth = Synth::new(RATE);
        assert_eq!(synth.sample_count(0.10), 4410);
        assert_eq!(synth.sample_count(0.0), 0);
        assert_eq!(Synth::new(1000).sample_count(0.0015), 2);
    }

    #[test]
    fn test_envelope_edges_and_plateau() {
        let ramp = Ramp::new(0.01, 0.08);
        assert_eq!(envelope(0.0, 0.2, ramp), 0.0);
        assert_eq!(envelope(0.2, 0.2, ramp), 0.0);
        assert_eq!(envelope(0.1, 0.2, ramp), 1.0);
        assert!((envelope(0.005, 0.2, ramp) - 0.5).abs() < 1e-5);
        assert!((envelope(0.16, 0.2, ramp) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_envelope_zero_ramp_is_flat() {
        let ramp = Ramp::new(0.0, 0.0);
        assert_eq!(envelope(0.05, 0.1, ramp), 1.0);
    }

    #[test]
    fn test_tone_is_reproducible() {
        let synth = Synth::new(RATE);
        let a = synth.tone(0.12, 880.0, 0.6, Ramp::default());
        let b = synth.tone(0.12, 880.0, 0.6, Ramp::default());
        assert_eq!(a, b);
        assert_eq!(a.len(), synth.sample_count(0.12));
        assert_eq!(a[0], 0.0);
        assert!(peak(&a) <= 0.6);
    }

    #[test]
    fn test_sweep_is_reproducible_and_bounded() {
        let synth = Synth::new(RATE);
        let a = synth.sweep(0.22, 300.0, 140.0, 0.55, Ramp::new(0.005, 0.12));
        let b = synth.sweep(0.22, 300.0, 140.0, 0.55, Ramp::new(0.005, 0.12));
        assert_eq!(a, b);
        assert_eq!(a.len(), synth.sample_count(0.22));
        assert!(peak(&a) <= 0.55 + 1e-6);
        assert!(peak(&a) > 0.5);
    }

    #[test]
    fn test_noise_click_range_and_decay() {
        let synth = Synth::new(RATE);
        let mut rng = StdRng::seed_from_u64(7);
        let click = synth.noise_click(&mut rng, 0.08, 1.0);

        assert_eq!(click.len(), synth.sample_count(0.08));
        assert!(click.iter().all(|s| (-1.0..=1.0).contains(s)));

        // Roughly zero-mean over the first few milliseconds
        let head = &click[..200];
        let mean = head.iter().sum::<f32>() / head.len() as f32;
        assert!(mean.abs() < 0.15);

        // Tail has decayed far below the head
        let tail_peak = peak(&click[click.len() - 200..]);
        assert!(tail_peak < 0.02);
        assert!(peak(head) > 0.5);
    }

    #[test]
    fn test_mix_pads_and_sums_without_scaling() {
        let out = mix(&[vec![0.25, 0.25, 0.25], vec![0.5]]);
        assert_eq!(out, vec![0.75, 0.25, 0.25]);
    }

    #[test]
    fn test_mix_normalizes_clipping_sum() {
        let out = mix(&[vec![0.8, -0.4], vec![0.8, 0.2]]);
        assert!((peak(&out) - 1.0).abs() < 1e-6);
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert!((out[1] + 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_concat_preserves_order_and_length() {
        let synth = Synth::new(RATE);
        let a = synth.tone(0.10, 659.0, 0.4, Ramp::new(0.005, 0.05));
        let b = synth.tone(0.12, 784.0, 0.5, Ramp::new(0.005, 0.06));
        let out = concat(&[a.clone(), b.clone()]);

        assert_eq!(out.len(), a.len() + b.len());
        assert_eq!(&out[..a.len()], a.as_slice());
        assert_eq!(&out[a.len()..], b.as_slice());
    }

    #[test]
    fn test_empty_combinators() {
        assert!(mix(&[]).is_empty());
        assert!(concat(&[]).is_empty());
    }
}
