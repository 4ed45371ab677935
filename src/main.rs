//! Compass Stop - stop the spinning needle on the target
//!
//! Five rounds of timing, an adaptive needle that speeds up when you nail it
//! and slows down when you miss, and a fortune at the end. Every sound is
//! synthesized at startup.

use anyhow::Context;
use clap::Parser;
use log::warn;

use compass_stop::audio::analysis::BufferStats;
use compass_stop::audio::{wav, AudioSystem, SoundCatalogue};
use compass_stop::cli::Args;
use compass_stop::terminal;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.load_config().context("Invalid configuration")?;
    let sounds = SoundCatalogue::build(&config.synth, &mut rand::thread_rng());

    if let Some(dir) = &args.export_wav {
        let paths = wav::export_catalogue(&sounds, dir)
            .with_context(|| format!("Failed to export WAV files to {}", dir.display()))?;
        for path in paths {
            println!("{}", path.display());
        }
        return Ok(());
    }

    if args.inspect {
        print_inspection(&sounds);
        return Ok(());
    }

    let audio = if args.mute {
        None
    } else {
        match AudioSystem::new() {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("{}; continuing without sound", e);
                None
            }
        }
    };

    terminal::run(config, sounds, audio, args.target)?;
    Ok(())
}

/// Print level and pitch of every sound effect
fn print_inspection(sounds: &SoundCatalogue) {
    println!(
        "{:<8} {:>8} {:>7} {:>7} {:>9}",
        "sound", "length", "peak", "rms", "pitch"
    );
    for buffer in sounds.iter() {
        let stats = BufferStats::of(buffer);
        println!(
            "{:<8} {:>7.3}s {:>7.3} {:>7.3} {:>7.0}Hz",
            buffer.id().name(),
            stats.duration_s,
            stats.peak,
            stats.rms,
            stats.dominant_hz
        );
    }
}
