//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::params::{GameConfig, LoadError};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "compass-stop")]
#[command(about = "Stop the spinning needle on the target, five rounds, then read your fortune", long_about = None)]
pub struct Args {
    /// Load parameters from a TOML file (missing fields use defaults)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target heading (degrees)
    #[arg(long, value_name = "DEGREES", default_value = "0", allow_negative_numbers = true)]
    pub target: f32,

    /// Override the synthesis sample rate (Hz)
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Override the master gain applied to every sound (0.05 - 1.0)
    #[arg(long, value_name = "GAIN")]
    pub master_gain: Option<f32>,

    /// Play without opening an audio device
    #[arg(long)]
    pub mute: bool,

    /// Write every sound effect as a WAV file into DIR and exit
    #[arg(long, value_name = "DIR")]
    pub export_wav: Option<PathBuf>,

    /// Print level and pitch of every sound effect and exit
    #[arg(long)]
    pub inspect: bool,
}

impl Args {
    /// Build the game configuration: file (or defaults), then CLI overrides
    pub fn load_config(&self) -> Result<GameConfig, LoadError> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Config: {}", path.display());
                GameConfig::load(path)?
            }
            None => GameConfig::default(),
        };

        if let Some(rate) = self.sample_rate {
            config.synth.sample_rate_hz = rate;
        }
        if let Some(gain) = self.master_gain {
            config.synth.master_gain = gain;
        }

        config.validate()?;
        Ok(config)
    }
}
