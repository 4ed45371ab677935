//! Audio output: plays catalogue buffers on the default device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, warn};
use std::sync::{Arc, Mutex};

use super::catalogue::AudioBuffer;
use crate::game::SoundPlayer;

/// One buffer currently playing
struct Voice {
    samples: Arc<[f32]>,
    /// Read position in buffer samples (fractional when resampling)
    position: f64,
    /// Buffer samples advanced per device frame
    step: f64,
}

impl Voice {
    fn new(buffer: &AudioBuffer, device_rate_hz: u32) -> Self {
        Self {
            samples: buffer.shared_samples(),
            position: 0.0,
            step: buffer.sample_rate_hz() as f64 / device_rate_hz as f64,
        }
    }

    fn is_finished(&self) -> bool {
        self.position >= self.samples.len() as f64
    }

    /// Linearly interpolated sample at the read position, then advance
    fn next_sample(&mut self) -> f32 {
        let index = self.position as usize;
        let frac = (self.position - index as f64) as f32;
        let a = self.samples.get(index).copied().unwrap_or(0.0);
        let b = self.samples.get(index + 1).copied().unwrap_or(0.0);
        self.position += self.step;
        a + (b - a) * frac
    }
}

/// Sum all active voices into one frame and drop the finished ones
fn render_frame(voices: &mut Vec<Voice>) -> f32 {
    let sum: f32 = voices.iter_mut().map(Voice::next_sample).sum();
    voices.retain(|v| !v.is_finished());
    sum.clamp(-1.0, 1.0)
}

/// Audio system mixing fire-and-forget sound effects
pub struct AudioSystem {
    /// Voices shared with the output callback
    voices: Arc<Mutex<Vec<Voice>>>,

    /// Device sample rate (Hz)
    device_rate_hz: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start an idle stream
    pub fn new() -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No audio output device found")?;

        let config = device
            .default_output_config()
            .map_err(|e| format!("Failed to get audio config: {}", e))?;

        let device_rate_hz = config.sample_rate().0;
        let channels = config.channels() as usize;

        info!(
            "Audio: {} @ {}Hz, {} channel(s)",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            device_rate_hz,
            channels
        );

        let voices = Arc::new(Mutex::new(Vec::<Voice>::new()));
        let voices_clone = Arc::clone(&voices);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut voices) = voices_clone.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        let s = render_frame(&mut voices);
                        frame.fill(s);
                    }
                },
                |err| warn!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        Ok(Self {
            voices,
            device_rate_hz,
            _stream: stream,
        })
    }
}

impl SoundPlayer for AudioSystem {
    fn play(&mut self, buffer: &AudioBuffer) {
        match self.voices.lock() {
            Ok(mut voices) => voices.push(Voice::new(buffer, self.device_rate_hz)),
            Err(_) => warn!("Dropped sound '{}': voice list poisoned", buffer.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundId;

    #[test]
    fn test_voice_at_native_rate_reproduces_samples() {
        let buffer = AudioBuffer::new(SoundId::Good, 48000, vec![0.1, 0.2, 0.3]);
        let mut voices = vec![Voice::new(&buffer, 48000)];

        let out: Vec<f32> = (0..4).map(|_| render_frame(&mut voices)).collect();
        assert_eq!(out, vec![0.1, 0.2, 0.3, 0.0]);
        assert!(voices.is_empty());
    }

    #[test]
    fn test_voice_resamples_up() {
        // 24 kHz buffer on a 48 kHz device: midpoints are interpolated
        let buffer = AudioBuffer::new(SoundId::Bad, 24000, vec![0.0, 1.0]);
        let mut voices = vec![Voice::new(&buffer, 48000)];

        let out: Vec<f32> = (0..4).map(|_| render_frame(&mut voices)).collect();
        assert_eq!(out, vec![0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_overlapping_voices_are_summed_and_clamped() {
        let loud = AudioBuffer::new(SoundId::Stop, 44100, vec![0.8, 0.8]);
        let quiet = AudioBuffer::new(SoundId::Result, 44100, vec![0.1]);
        let mut voices = vec![
            Voice::new(&loud, 44100),
            Voice::new(&loud, 44100),
            Voice::new(&quiet, 44100),
        ];

        assert_eq!(render_frame(&mut voices), 1.0);
        assert_eq!(voices.len(), 2);
        assert_eq!(render_frame(&mut voices), 1.0);
        assert!(voices.is_empty());
    }
}
