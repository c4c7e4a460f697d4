//! Session aggregate
//!
//! Everything one run needs lives in [`GameState`]. Starting a session
//! resets it in place; nothing is held at global scope.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::obstacle::Obstacle;
use super::phase::GamePhase;
use super::pickup::{Collectible, FloatingText, PowerUp, PowerUpKind};
use super::player::{JumpKind, Player, SkinAvailability};
use super::spawn::SpawnTimer;
use crate::tuning::Tuning;

/// Something that happened during a frame, for audio and persistence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Jumped(JumpKind),
    CoinCollected { value: u32 },
    PowerUpCollected(PowerUpKind),
    /// The shield absorbed an obstacle hit
    ShieldAbsorbed,
    EarthquakeStarted,
    Paused,
    Resumed,
    GameOver { score: u64 },
    NewHighScore(u64),
}

/// Complete state of the running app
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// `None` until the first session starts
    pub player: Option<Player>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub collectibles: Vec<Collectible>,
    pub floating_texts: Vec<FloatingText>,
    /// Continuous score; displayed and compared floored
    pub score: f64,
    /// Best floored score seen, including previous sessions
    pub high_score: u64,
    pub coins: u32,
    pub jumps: u32,
    /// World scroll speed (px/s)
    pub speed: f32,
    pub spawn_timer: SpawnTimer,
    pub environment: Environment,
    /// Seconds of unpaused play; timed effects are measured against it
    pub clock: f64,
    /// Duck key or touch currently held
    pub duck_held: bool,
    /// Skins whose sprites can be drawn
    pub skins: SkinAvailability,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh app state in `Loading`
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            speed: tuning.initial_speed,
            spawn_timer: SpawnTimer::new(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Loading,
            player: None,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            collectibles: Vec::new(),
            floating_texts: Vec::new(),
            score: 0.0,
            high_score,
            coins: 0,
            jumps: 0,
            environment: Environment::new(),
            clock: 0.0,
            duck_held: false,
            skins: SkinAvailability {
                default: true,
                alt: true,
            },
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn score_floor(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Assets have settled; show the controls overview
    pub fn finish_loading(&mut self) {
        if self.phase == GamePhase::Loading {
            log::info!("Assets settled, showing tutorial");
            self.phase = GamePhase::Tutorial;
        }
    }

    /// Record the current score as the high score if it beats it
    pub fn commit_high_score(&mut self) -> bool {
        let score = self.score_floor();
        if score <= self.high_score {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.high_score);
        self.high_score = score;
        self.emit(GameEvent::NewHighScore(score));
        true
    }

    /// Commit the high score, wipe the run and start playing
    pub fn start_session(&mut self) {
        self.commit_high_score();

        self.score = 0.0;
        self.coins = 0;
        self.jumps = 0;
        self.obstacles.clear();
        self.power_ups.clear();
        self.collectibles.clear();
        self.floating_texts.clear();
        self.speed = self.tuning.initial_speed;
        self.spawn_timer = SpawnTimer::new(&self.tuning);
        self.environment.reset();
        self.duck_held = false;

        let mut player = Player::new();
        player.ensure_skin(self.skins);
        self.player = Some(player);

        self.phase = GamePhase::Playing;
        self.emit(GameEvent::SessionStarted);
        log::info!("Session started");
    }

    /// A collision ended the run
    pub fn end_session(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.score_floor();
        log::info!("Game over at score {}", score);
        self.emit(GameEvent::GameOver { score });
        self.commit_high_score();
    }

    /// Right edge of the most recently spawned entity of any kind
    pub fn newest_right_edge(&self) -> Option<f32> {
        let obstacles = self.obstacles.iter().map(|o| (o.id, o.right()));
        let power_ups = self.power_ups.iter().map(|p| (p.id, p.rect().right()));
        let collectibles = self.collectibles.iter().map(|c| (c.id, c.rect().right()));
        obstacles
            .chain(power_ups)
            .chain(collectibles)
            .max_by_key(|(id, _)| *id)
            .map(|(_, right)| right)
    }
}
