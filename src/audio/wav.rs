//! WAV export of synthesized buffers.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;

use super::catalogue::{AudioBuffer, SoundCatalogue};

/// Write one buffer as a mono 32-bit float WAV file
pub fn write_wav(buffer: &AudioBuffer, path: impl AsRef<Path>) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate_hz(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &s in buffer.samples() {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    debug!("Wrote {} ({} samples)", path.as_ref().display(), buffer.len());
    Ok(())
}

/// File name used when exporting a buffer
pub fn file_name(buffer: &AudioBuffer) -> String {
    format!("se_{}.wav", buffer.id().name())
}

/// Write every catalogue buffer into `dir`, returning the written paths
pub fn export_catalogue(
    catalogue: &SoundCatalogue,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, hound::Error> {
    std::fs::create_dir_all(dir.as_ref())?;
    catalogue
        .iter()
        .map(|buffer| {
            let path = dir.as_ref().join(file_name(buffer));
            write_wav(buffer, &path)?;
            Ok(path)
        })
        .collect()
}
