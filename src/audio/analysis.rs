//! Offline spectral inspection of synthesized buffers.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use super::catalogue::AudioBuffer;
use super::synthesis::peak;

/// Summary of one buffer's level and pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferStats {
    pub duration_s: f32,
    pub peak: f32,
    pub rms: f32,
    /// Strongest spectral component (Hz), 0 for silent buffers
    pub dominant_hz: f32,
}

impl BufferStats {
    pub fn of(buffer: &AudioBuffer) -> Self {
        let samples = buffer.samples();
        Self {
            duration_s: buffer.duration_s(),
            peak: peak(samples),
            rms: rms(samples),
            dominant_hz: dominant_frequency(samples, buffer.sample_rate_hz()),
        }
    }
}

/// Root mean square level
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// Frequency of the largest FFT magnitude bin
///
/// The whole buffer is Hann-windowed and zero-padded to the next power of
/// two, so resolution is `sample_rate / fft_size`.
pub fn dominant_frequency(samples: &[f32], sample_rate_hz: u32) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let fft_size = samples.len().next_power_of_two();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut spectrum = vec![Complex::new(0.0f32, 0.0); fft_size];
    for (i, (bin, &s)) in spectrum.iter_mut().zip(samples).enumerate() {
        *bin = Complex::new(s * hann_window(i, samples.len()), 0.0);
    }
    fft.process(&mut spectrum);

    // Skip DC; only the first half is meaningful for real input
    let (best_bin, best_mag) = spectrum[1..fft_size / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm()))
        .fold((0, 0.0f32), |best, cur| if cur.1 > best.1 { cur } else { best });

    if best_mag <= f32::EPSILON {
        return 0.0;
    }
    best_bin as f32 * sample_rate_hz as f32 / fft_size as f32
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
