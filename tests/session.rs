//! Whole-session behaviour through the public `Game` façade

use dino_run::assets::AssetRegistry;
use dino_run::audio::SilentBackend;
use dino_run::consts::*;
use dino_run::input::InputEvent;
use dino_run::persistence::MemoryStore;
use dino_run::sim::{GamePhase, Obstacle, ObstacleType};
use dino_run::{Game, HighScore, Tuning};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// A game already in `Playing`, with `stored` as the persisted high score
fn playing_game(stored: u64) -> (Game, f64) {
    let mut store = MemoryStore::new();
    HighScore(stored).save(&mut store);
    let mut game = Game::new(Tuning::default(), 11, Box::new(store), Box::new(SilentBackend));
    *game.assets_mut() = AssetRegistry::all_ready();

    game.frame(0.0);
    assert_eq!(game.phase(), GamePhase::Tutorial);
    game.handle_input(InputEvent::PrimaryAction);
    game.handle_input(InputEvent::PrimaryAction);
    game.frame(FRAME_MS);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().high_score, stored);
    (game, FRAME_MS)
}

/// Put a cactus right on top of the player and run one frame
fn crash(game: &mut Game, now: &mut f64) {
    let state = game.state_mut();
    let id = state.next_entity_id();
    let mut rng = Pcg32::seed_from_u64(5);
    let mut cactus = Obstacle::spawn(id, ObstacleType::Cactus, &mut rng);
    cactus.pos.x = PLAYER_X + 10.0;
    state.obstacles.push(cactus);

    *now += FRAME_MS;
    game.frame(*now);
    assert_eq!(game.phase(), GamePhase::GameOver);
}

fn stored_high_score(game: &Game) -> Option<String> {
    game.store().get(HighScore::STORAGE_KEY)
}

#[test]
fn beating_the_high_score_persists_it() {
    let (mut game, mut now) = playing_game(1000);
    game.state_mut().score = 1200.4;
    crash(&mut game, &mut now);

    assert_eq!(stored_high_score(&game).as_deref(), Some("1200"));

    game.handle_input(InputEvent::Restart);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().high_score, 1200);
    assert_eq!(stored_high_score(&game).as_deref(), Some("1200"));
}

#[test]
fn lower_score_keeps_the_old_high_score() {
    let (mut game, mut now) = playing_game(1000);
    game.state_mut().score = 900.0;
    crash(&mut game, &mut now);

    game.handle_input(InputEvent::Restart);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.state().high_score, 1000);
    assert_eq!(stored_high_score(&game).as_deref(), Some("1000"));
}

#[test]
fn game_over_ignores_everything_but_restart() {
    let (mut game, mut now) = playing_game(0);
    crash(&mut game, &mut now);

    for event in [
        InputEvent::PrimaryAction,
        InputEvent::DuckStart,
        InputEvent::SkinSwitch,
        InputEvent::Pause,
        InputEvent::Resume,
        InputEvent::PauseToggle,
    ] {
        game.handle_input(event);
        now += FRAME_MS;
        game.frame(now);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    // A tap outside the restart button does nothing either
    game.pointer_down(glam::Vec2::new(5.0, 5.0));
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.phase(), GamePhase::GameOver);

    game.pointer_down(RESTART_BUTTON.center());
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().score_floor(), 0);
    assert_eq!(game.state().jumps, 0);
}

#[test]
fn pause_freezes_score_and_clock() {
    let (mut game, mut now) = playing_game(0);
    for _ in 0..30 {
        now += FRAME_MS;
        game.frame(now);
    }
    game.handle_input(InputEvent::Pause);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.phase(), GamePhase::Paused);

    let score = game.state().score;
    let clock = game.state().clock;
    for _ in 0..120 {
        now += FRAME_MS;
        game.frame(now);
    }
    assert_eq!(game.state().score, score);
    assert_eq!(game.state().clock, clock);

    game.handle_input(InputEvent::Resume);
    now += FRAME_MS;
    game.frame(now);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(game.state().score > score);
}

#[test]
fn long_stall_is_clamped() {
    let (mut game, now) = playing_game(0);
    let before = game.state().score;
    // Tab was in the background for a minute
    game.frame(now + 60_000.0);
    let gained = game.state().score - before;
    let max_dt = game.state().tuning.max_frame_dt as f64;
    let max_gain = game.state().speed as f64 * max_dt * game.state().tuning.score_per_pixel;
    assert!(gained <= max_gain + 1e-6, "gained {gained}, limit {max_gain}");
}
