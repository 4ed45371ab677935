//! Round-based game flow: title, spinning, result, fortune.

use log::{debug, info};

use super::actors::{
    AngleSource, GameView, JudgeArc, Needle, Panel, SoundPlayer, Spinner, TextSlot,
};
use super::judge::{Fortune, JudgeRing, Judgement};
use crate::audio::{SoundCatalogue, SoundId};
use crate::params::{ConfigError, GameConfig, ROUNDS_PER_SESSION};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Title,
    Spinning,
    ShowingResult,
    Fortune,
}

/// External trigger delivered at most once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Activate,
}

/// State change reported by [`GameManager::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
}

/// Collaborators lent to the game for one call; any of them may be absent
#[derive(Default)]
pub struct Stage<'a> {
    pub needle: Option<&'a mut dyn Needle>,
    pub target: Option<&'a dyn AngleSource>,
    pub view: Option<&'a mut dyn GameView>,
    pub audio: Option<&'a mut dyn SoundPlayer>,
}

impl Stage<'_> {
    fn target_deg(&self) -> f32 {
        self.target.map_or(0.0, |t| t.angle_deg())
    }

    fn show_panels(&mut self, visible: &[Panel]) {
        if let Some(view) = self.view.as_deref_mut() {
            for panel in [Panel::Title, Panel::Game, Panel::Result, Panel::Fortune] {
                view.set_panel_visible(panel, visible.contains(&panel));
            }
        }
    }

    fn set_panel(&mut self, panel: Panel, visible: bool) {
        if let Some(view) = self.view.as_deref_mut() {
            view.set_panel_visible(panel, visible);
        }
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        if let Some(view) = self.view.as_deref_mut() {
            view.set_text(slot, text);
        }
    }

    fn set_spinning(&mut self, spinning: bool) {
        if let Some(needle) = self.needle.as_deref_mut() {
            needle.set_spinning(spinning);
        }
    }
}

/// Mutable per-session state
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSession {
    pub state: GameState,
    /// 1..=5 while playing, 0 on the title screen
    pub round: u32,
    pub total_score: u32,
    /// Current spin speed (degrees per second)
    pub spin_speed: f32,
    pub last_judgement: Option<Judgement>,
}

impl RoundSession {
    fn new(base_speed: f32) -> Self {
        Self {
            state: GameState::Title,
            round: 0,
            total_score: 0,
            spin_speed: base_speed,
            last_judgement: None,
        }
    }
}

/// Drives the game flow in response to input
pub struct GameManager {
    config: GameConfig,
    sounds: Option<SoundCatalogue>,
    session: RoundSession,
}

impl GameManager {
    /// Fails fast on inconsistent configuration
    pub fn new(config: GameConfig, sounds: Option<SoundCatalogue>) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = RoundSession::new(config.needle.base_speed_deg_per_s);
        Ok(Self {
            config,
            sounds,
            session,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &RoundSession {
        &self.session
    }

    pub fn state(&self) -> GameState {
        self.session.state
    }

    /// Enter the title screen and publish initial UI values
    pub fn init(&mut self, stage: &mut Stage<'_>) {
        self.show_title(stage);
    }

    /// Consume at most one input and perform at most one transition
    pub fn tick(&mut self, input: Option<Input>, stage: &mut Stage<'_>) -> Option<Transition> {
        let Input::Activate = input?;
        let from = self.session.state;

        match from {
            GameState::Title => self.start_game(stage),
            GameState::Spinning => self.stop_and_judge(stage),
            GameState::ShowingResult => self.next_round_or_fortune(stage),
            GameState::Fortune => self.show_title(stage),
        }

        let to = self.session.state;
        if from == to {
            return None;
        }
        debug!("{:?} -> {:?} (round {})", from, to, self.session.round);
        Some(Transition { from, to })
    }

    fn play(&self, id: SoundId, stage: &mut Stage<'_>) {
        let (Some(sounds), Some(audio)) = (self.sounds.as_ref(), stage.audio.as_deref_mut()) else {
            return;
        };
        audio.play(sounds.get(id));
    }

    fn show_title(&mut self, stage: &mut Stage<'_>) {
        self.session = RoundSession::new(self.config.needle.base_speed_deg_per_s);
        stage.show_panels(&[Panel::Title]);
        stage.set_spinning(false);
        self.update_judge_ring(stage);
    }

    fn start_game(&mut self, stage: &mut Stage<'_>) {
        self.session.state = GameState::Spinning;
        self.session.round = 1;
        self.session.total_score = 0;

        stage.show_panels(&[Panel::Game]);
        self.show_round(stage);

        if let Some(needle) = stage.needle.as_deref_mut() {
            needle.set_speed(self.session.spin_speed);
            needle.set_spinning(true);
        }

        self.update_judge_ring(stage);
        self.play(SoundId::Start, stage);
    }

    fn stop_and_judge(&mut self, stage: &mut Stage<'_>) {
        self.play(SoundId::Stop, stage);

        let target_deg = stage.target_deg();
        let Some(needle) = stage.needle.as_deref_mut() else {
            return;
        };
        needle.set_spinning(false);

        let judgement = Judgement::evaluate(
            needle.angle_deg(),
            target_deg,
            self.session.spin_speed,
            &self.config.judge,
        );
        needle.set_speed(judgement.speed_after);
        debug!(
            "needle={:.1} target={:.1} diff={:.1} ring={:.1}",
            needle.angle_deg(),
            target_deg,
            judgement.diff_deg,
            -target_deg
        );

        self.session.spin_speed = judgement.speed_after;
        self.session.total_score += judgement.award();
        self.session.last_judgement = Some(judgement);
        self.play(judgement.tier.sound(), stage);

        stage.set_text(TextSlot::Judge, &judgement.text());
        stage.set_text(
            TextSlot::Total,
            &format!("TOTAL: {}", self.session.total_score),
        );

        self.session.state = GameState::ShowingResult;
        stage.set_panel(Panel::Result, true);
        self.play(SoundId::Result, stage);
    }

    fn next_round_or_fortune(&mut self, stage: &mut Stage<'_>) {
        stage.set_panel(Panel::Result, false);

        if self.session.round >= ROUNDS_PER_SESSION {
            self.show_fortune(stage);
            return;
        }

        self.session.round += 1;
        self.show_round(stage);
        stage.set_spinning(true);
        self.session.state = GameState::Spinning;
        self.update_judge_ring(stage);
    }

    fn show_fortune(&mut self, stage: &mut Stage<'_>) {
        self.session.state = GameState::Fortune;
        self.play(SoundId::Fortune, stage);

        let score = self.session.total_score;
        let fortune = Fortune::from_score(score);
        info!("Session finished: {} points, {}", score, fortune.name());

        stage.set_panel(Panel::Game, false);
        stage.set_panel(Panel::Fortune, true);
        stage.set_text(TextSlot::Fortune, &fortune.text(score));
    }

    fn show_round(&self, stage: &mut Stage<'_>) {
        stage.set_text(
            TextSlot::Round,
            &format!("Round {}/{}", self.session.round, ROUNDS_PER_SESSION),
        );
    }

    /// Push arc sizes and ring rotation derived from target and thresholds
    fn update_judge_ring(&self, stage: &mut Stage<'_>) {
        let ring = JudgeRing::new(stage.target_deg(), &self.config.judge);
        if let Some(view) = stage.view.as_deref_mut() {
            view.set_fill_amount(JudgeArc::Perfect, ring.perfect_fill);
            view.set_fill_amount(JudgeArc::Good, ring.good_fill);
            view.set_fill_amount(JudgeArc::Bad, ring.bad_fill);
            view.set_ring_rotation(ring.rotation_deg);
        }
    }
}
