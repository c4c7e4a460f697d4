//! App façade
//!
//! [`Game`] owns one session plus its collaborators (asset registry, store,
//! audio) and drives it one display frame at a time. Platform code only
//! feeds it input and timestamps and hands it a surface to draw on.

use glam::Vec2;

use crate::assets::{AssetRegistry, LoadProgress};
use crate::audio::{AudioBackend, AudioManager};
use crate::error::StartupError;
use crate::highscores::HighScore;
use crate::input::{InputEvent, route_pointer, route_pointer_release};
use crate::persistence::KeyValueStore;
use crate::renderer::{Scene, Surface, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, SkinAvailability, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    assets: AssetRegistry,
    store: Box<dyn KeyValueStore>,
    audio: AudioManager,
    settings: Settings,
    /// Input since the last frame
    pending: Vec<InputEvent>,
    loading_started_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    startup_error: Option<StartupError>,
}

impl Game {
    /// New app in `Loading`; high score and settings come from `store`
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        let high_score = HighScore::load(&*store);
        let settings = Settings::load(&*store);
        log::info!("Game created (seed {}, high score {})", seed, high_score.0);
        Self {
            state: GameState::new(tuning, seed, high_score.0),
            assets: AssetRegistry::new(),
            audio: AudioManager::new(audio, &settings),
            store,
            settings,
            pending: Vec::new(),
            loading_started_ms: None,
            last_frame_ms: None,
            startup_error: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Loader callbacks report readiness through this
    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings, persist them and apply them to audio
    pub fn update_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        settings.save(&mut *self.store);
        self.settings = settings;
    }

    pub fn toggle_mute(&mut self) {
        let settings = Settings {
            muted: !self.settings.muted,
            ..self.settings.clone()
        };
        log::info!("Sound {}", if settings.muted { "muted" } else { "unmuted" });
        self.update_settings(settings);
    }

    pub fn startup_error(&self) -> Option<&StartupError> {
        self.startup_error.as_ref()
    }

    /// Queue an input for the next frame
    pub fn handle_input(&mut self, event: InputEvent) {
        self.audio.mark_user_interaction();
        self.pending.push(event);
    }

    /// Pointer press in surface coordinates
    pub fn pointer_down(&mut self, point: Vec2) {
        if let Some(event) = route_pointer(self.state.phase, point) {
            self.handle_input(event);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(event) = route_pointer_release(self.state.phase) {
            self.pending.push(event);
        }
    }

    /// Advance one display frame; `now_ms` is a monotonic timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        if self.state.phase == GamePhase::Loading && self.startup_error.is_none() {
            self.poll_assets(now_ms);
        }
        self.state.skins = SkinAvailability::from_assets(&self.assets);

        let input = TickInput::new(self.pending.drain(..));
        tick(&mut self.state, &input, dt);

        for event in self.state.drain_events() {
            self.dispatch(&event);
        }
    }

    fn poll_assets(&mut self, now_ms: f64) {
        let started = *self.loading_started_ms.get_or_insert(now_ms);
        match self.assets.poll(now_ms - started, self.state.tuning.asset_timeout_ms) {
            LoadProgress::Loading { .. } => {}
            LoadProgress::Settled { failed } => {
                if failed > 0 {
                    log::warn!("{} assets failed; using fallback drawing", failed);
                }
                self.state.finish_loading();
            }
            LoadProgress::TimedOut { .. } => self.state.finish_loading(),
            LoadProgress::Failed(error) => {
                log::error!("Cannot start: {}", error);
                self.startup_error = Some(error);
            }
        }
    }

    fn dispatch(&mut self, event: &GameEvent) {
        self.audio.handle(event);
        if let GameEvent::NewHighScore(score) = event {
            HighScore(*score).save(&mut *self.store);
        }
    }

    /// Draw the current state
    pub fn draw(&self, surface: &mut dyn Surface) {
        let scene = Scene {
            state: &self.state,
            assets: &self.assets,
            settings: &self.settings,
            startup_error: self.startup_error.as_ref(),
        };
        draw_scene(surface, &scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::audio::SilentBackend;
    use crate::persistence::MemoryStore;
    use crate::sim::Skin;

    fn game() -> Game {
        Game::new(
            Tuning::default(),
            3,
            Box::new(MemoryStore::new()),
            Box::new(SilentBackend),
        )
    }

    #[test]
    fn waits_for_assets_then_shows_tutorial() {
        let mut game = game();
        game.frame(0.0);
        assert_eq!(game.phase(), GamePhase::Loading);

        for id in AssetId::ALL {
            if id == AssetId::CoinSound {
                game.assets_mut().mark_failed(id, "decode error");
            } else {
                game.assets_mut().mark_ready(id);
            }
        }
        game.frame(16.0);
        assert_eq!(game.phase(), GamePhase::Tutorial);
        assert!(game.startup_error().is_none());
    }

    #[test]
    fn timeout_without_player_sprite_is_fatal() {
        let mut game = game();
        game.frame(0.0);
        game.assets_mut().mark_ready(AssetId::Cactus);
        game.frame(20_000.0);
        assert_eq!(game.phase(), GamePhase::Loading);
        assert!(game.startup_error().is_some());

        // Stays stuck even if the sprite arrives late
        game.assets_mut().mark_ready(AssetId::DinoNormal);
        game.frame(20_016.0);
        assert_eq!(game.phase(), GamePhase::Loading);
    }

    #[test]
    fn timeout_with_critical_sprites_continues() {
        let mut game = game();
        game.frame(0.0);
        game.assets_mut().mark_ready(AssetId::DinoNormal);
        game.assets_mut().mark_ready(AssetId::DinoDuck);
        game.frame(15_001.0);
        assert_eq!(game.phase(), GamePhase::Tutorial);
    }

    #[test]
    fn pointer_presses_walk_the_menus() {
        let mut game = game();
        *game.assets_mut() = AssetRegistry::all_ready();
        game.frame(0.0);
        game.pointer_down(Vec2::new(600.0, 200.0));
        game.frame(16.0);
        assert_eq!(game.phase(), GamePhase::Title);
        game.pointer_down(Vec2::new(600.0, 200.0));
        game.frame(32.0);
        assert_eq!(game.phase(), GamePhase::Playing);

        game.pointer_down(Vec2::new(20.0, 10.0));
        game.frame(48.0);
        assert_eq!(game.phase(), GamePhase::Paused);
    }

    #[test]
    fn alt_skin_needs_its_sprites() {
        let mut game = game();
        for id in AssetId::ALL {
            if matches!(id, AssetId::DinoAltNormal | AssetId::DinoAltDuck) {
                game.assets_mut().mark_failed(id, "404");
            } else {
                game.assets_mut().mark_ready(id);
            }
        }
        game.frame(0.0);
        game.handle_input(InputEvent::PrimaryAction);
        game.handle_input(InputEvent::PrimaryAction);
        game.frame(16.0);
        game.handle_input(InputEvent::SkinSwitch);
        game.frame(32.0);
        let skin = game.state().player.as_ref().map(|p| p.skin);
        assert_eq!(skin, Some(Skin::Default));
    }

    #[test]
    fn settings_are_persisted() {
        let mut game = game();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        game.update_settings(settings.clone());
        assert_eq!(Settings::load(game.store()), settings);
        assert_eq!(game.settings(), &settings);

        game.toggle_mute();
        assert!(!Settings::load(game.store()).muted);
    }
}
