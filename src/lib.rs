//! Compass-stop library - stop the spinning needle on the target

pub mod audio;
pub mod cli;
pub mod game;
pub mod params;
pub mod terminal;
