//! Line-oriented terminal front-end: Enter stops/advances, `q` quits.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::audio::{AudioSystem, SoundCatalogue};
use crate::game::{
    AngleSource, FixedTarget, GameManager, GameState, GameView, Input, JudgeArc, NeedleSpinner,
    Panel, SoundPlayer, Stage, TextSlot,
};
use crate::params::{ConfigError, GameConfig};

/// Frame period of the game loop (~60 Hz)
const FRAME: Duration = Duration::from_millis(16);

/// Key presses read from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Activate,
    Quit,
}

/// Prints UI changes as they happen
#[derive(Debug, Default)]
pub struct TerminalView {
    panels: HashMap<Panel, bool>,
    texts: HashMap<TextSlot, String>,
    fills: HashMap<JudgeArc, f32>,
    ring_deg: f32,
}

impl TerminalView {
    fn is_visible(&self, panel: Panel) -> bool {
        self.panels.get(&panel).copied().unwrap_or(false)
    }

    fn text(&self, slot: TextSlot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Redraw the needle line in place
    fn show_needle(&self, needle_deg: f32) {
        let window = self.fills.get(&JudgeArc::Perfect).copied().unwrap_or(0.0) * 180.0;
        print!(
            "\r  needle {:6.1}°   target {:6.1}° ±{:.0}°   ",
            needle_deg, -self.ring_deg, window
        );
        let _ = io::stdout().flush();
    }

    fn print_block(text: &str) {
        println!();
        for line in text.lines() {
            println!("  {}", line);
        }
    }
}

impl GameView for TerminalView {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let was = self.is_visible(panel);
        self.panels.insert(panel, visible);
        if visible && !was {
            match panel {
                Panel::Title => {
                    println!();
                    println!("=== COMPASS STOP ===");
                    println!("  Press Enter to start, q to quit.");
                }
                Panel::Game => println!("\n  Press Enter to stop the needle."),
                Panel::Result => {
                    Self::print_block(self.text(TextSlot::Judge));
                    println!("  {}", self.text(TextSlot::Total));
                }
                Panel::Fortune => {}
            }
        }
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.texts.insert(slot, text.to_string());
        match slot {
            TextSlot::Round => println!("\n--- {} ---", text),
            TextSlot::Fortune => Self::print_block(text),
            TextSlot::Judge | TextSlot::Total => {}
        }
    }

    fn set_fill_amount(&mut self, arc: JudgeArc, fill: f32) {
        self.fills.insert(arc, fill);
    }

    fn set_ring_rotation(&mut self, deg: f32) {
        self.ring_deg = deg;
    }
}

/// Forward stdin lines as key presses until EOF or `q`
fn spawn_input_thread() -> Receiver<Key> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                debug!("stdin unreadable, input stopped");
                break;
            };
            let key = if line.trim().eq_ignore_ascii_case("q") {
                Key::Quit
            } else {
                Key::Activate
            };
            if tx.send(key).is_err() || key == Key::Quit {
                break;
            }
        }
    });
    rx
}

/// Run the interactive game until the player quits
pub fn run(
    config: GameConfig,
    sounds: SoundCatalogue,
    mut audio: Option<AudioSystem>,
    target_deg: f32,
) -> Result<(), ConfigError> {
    let mut needle = NeedleSpinner::new(config.needle.base_speed_deg_per_s);
    let target = FixedTarget::new(target_deg);
    let mut view = TerminalView::default();
    let mut game = GameManager::new(config, Some(sounds))?;

    let keys = spawn_input_thread();
    let mut last_frame = Instant::now();

    game.init(&mut lend(&mut needle, &target, &mut view, audio.as_mut()));

    loop {
        thread::sleep(FRAME);
        let now = Instant::now();
        needle.update(now.duration_since(last_frame).as_secs_f32());
        last_frame = now;

        let input = match keys.try_recv() {
            Ok(Key::Activate) => Some(Input::Activate),
            Ok(Key::Quit) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => None,
        };

        game.tick(input, &mut lend(&mut needle, &target, &mut view, audio.as_mut()));

        if game.state() == GameState::Spinning {
            view.show_needle(needle.angle_deg());
        }
    }

    println!("\nBye!");
    Ok(())
}

/// Borrow the actors for one game call
fn lend<'a>(
    needle: &'a mut NeedleSpinner,
    target: &'a FixedTarget,
    view: &'a mut TerminalView,
    audio: Option<&'a mut AudioSystem>,
) -> Stage<'a> {
    Stage {
        needle: Some(needle),
        target: Some(target),
        view: Some(view),
        audio: audio.map(|a| a as &mut dyn SoundPlayer),
    }
}
