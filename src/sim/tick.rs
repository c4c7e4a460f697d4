//! Frame step
//!
//! Advances the session by one variable-length frame. Order inside a playing
//! frame is fixed: speed, environment, player, spawning, obstacles, pickups,
//! floating text, earthquake, score.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::phase::{GamePhase, PhaseCommand, phase_command};
use super::pickup::{Collectible, FloatingText, PowerUp, PowerUpKind};
use super::player::Player;
use super::spawn::update_spawns;
use super::state::{GameEvent, GameState};
use crate::input::InputEvent;
use crate::tuning::Tuning;

/// Input collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Semantic events, in arrival order
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Apply one input event: phase transitions first, then in-run actions
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::DuckStart => state.duck_held = true,
        InputEvent::DuckEnd => state.duck_held = false,
        _ => {}
    }

    if let Some(command) = phase_command(state.phase, event) {
        match command {
            PhaseCommand::ShowTitle => {
                log::info!("Showing title screen");
                state.phase = GamePhase::Title;
            }
            PhaseCommand::StartSession => state.start_session(),
            PhaseCommand::Pause => {
                log::info!("Paused");
                state.phase = GamePhase::Paused;
                state.emit(GameEvent::Paused);
            }
            PhaseCommand::Resume => {
                log::info!("Resumed");
                state.phase = GamePhase::Playing;
                state.emit(GameEvent::Resumed);
            }
        }
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(player) = state.player.as_mut() else {
        return;
    };
    match event {
        InputEvent::PrimaryAction => {
            if let Some(kind) = player.jump(&state.tuning) {
                state.jumps += 1;
                state.emit(GameEvent::Jumped(kind));
            }
        }
        InputEvent::DuckStart => player.start_duck(),
        InputEvent::DuckEnd => player.stop_duck(),
        InputEvent::SkinSwitch => {
            player.switch_skin(state.skins);
        }
        InputEvent::Pause | InputEvent::Resume | InputEvent::PauseToggle | InputEvent::Restart => {}
    }
}

/// Advance the session by `dt` seconds (clamped to the tuning's frame limit)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    recover_missing_player(state);

    for event in &input.events {
        apply_input(state, *event);
    }

    let dt = dt.clamp(0.0, state.tuning.max_frame_dt);
    match state.phase {
        GamePhase::Playing => step_playing(state, dt),
        GamePhase::Tutorial | GamePhase::Title | GamePhase::GameOver => {
            state.environment.update_snow(dt);
        }
        GamePhase::Loading | GamePhase::Paused => {}
    }
}

/// A phase that needs a player without one falls back to the title screen
fn recover_missing_player(state: &mut GameState) {
    if state.phase.needs_player() && state.player.is_none() {
        log::error!("{:?} without a player; returning to title", state.phase);
        state.phase = GamePhase::Title;
    }
}

fn step_playing(state: &mut GameState, dt: f32) {
    state.clock += dt as f64;
    let score = state.score_floor();

    // 1. Speed never decreases within a run
    state.speed = state.speed.max(state.tuning.speed_for_score(score));

    // 2. Environment
    state
        .environment
        .update_cycle(score as f64, &state.tuning, &mut state.rng);
    state.environment.update_snow(dt);

    // 3. Player
    let Some(player) = state.player.as_mut() else {
        return;
    };
    player.ensure_skin(state.skins);
    player.update(dt, state.duck_held, state.clock, &state.tuning);

    // 4. Spawning
    update_spawns(state, dt, score);

    // 5. Obstacles
    let collided = update_obstacles(state, dt);

    // 6. Pickups; nothing is collected after a fatal hit
    if !collided {
        update_power_ups(state, dt);
        update_collectibles(state, dt);
    }

    // 7. Feedback text
    let clock = state.clock;
    state.floating_texts.retain_mut(|text| text.update(dt, clock));

    // 8. Earthquake (render offset only)
    if state
        .environment
        .try_trigger_earthquake(score, dt, &state.tuning, &mut state.rng)
    {
        state.emit(GameEvent::EarthquakeStarted);
    }
    state.environment.update_shake(dt, &mut state.rng);

    // 9. Distance score
    if !collided {
        state.score += state.speed as f64 * dt as f64 * state.tuning.score_per_pixel;
    }
}

/// What happened when an obstacle met the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Miss,
    Absorbed,
    Fatal,
}

fn resolve_hit(player: &mut Player, obstacle: &Obstacle) -> Hit {
    if !player.bounds().overlaps(&obstacle.bounds()) {
        return Hit::Miss;
    }
    if player.consume_shield() {
        Hit::Absorbed
    } else {
        Hit::Fatal
    }
}

/// Move obstacles, resolve hits, award pass bonuses; returns true on a fatal hit
fn update_obstacles(state: &mut GameState, dt: f32) -> bool {
    let GameState {
        player: Some(player),
        obstacles,
        score,
        tuning,
        speed,
        ..
    } = &mut *state
    else {
        return false;
    };

    let mut collided = false;
    let mut absorbed = 0;
    let player_x = player.pos.x;

    // Reverse so removal by index is safe
    let mut i = obstacles.len();
    while i > 0 {
        i -= 1;
        let obstacle = &mut obstacles[i];
        obstacle.update(*speed, dt);

        if !collided {
            match resolve_hit(player, obstacle) {
                Hit::Miss => {}
                Hit::Absorbed => {
                    log::debug!("Shield absorbed {:?}", obstacle.obstacle_type());
                    obstacles.remove(i);
                    absorbed += 1;
                    continue;
                }
                Hit::Fatal => collided = true,
            }
        }

        if !obstacle.passed && obstacle.right() < player_x {
            obstacle.passed = true;
            *score += tuning.pass_bonus;
        }
        if obstacle.is_off_screen() {
            obstacles.remove(i);
        }
    }

    for _ in 0..absorbed {
        state.emit(GameEvent::ShieldAbsorbed);
    }
    if collided {
        state.end_session();
    }
    collided
}

fn apply_power_up(player: &mut Player, kind: PowerUpKind, clock: f64, tuning: &Tuning) {
    match kind {
        PowerUpKind::Shield => player.activate_shield(clock, tuning.shield_duration),
        PowerUpKind::Magnet => player.activate_magnet(clock, tuning.magnet_duration),
    }
}

fn update_power_ups(state: &mut GameState, dt: f32) {
    let GameState {
        player: Some(player),
        power_ups,
        tuning,
        speed,
        clock,
        events,
        ..
    } = &mut *state
    else {
        return;
    };

    let bounds = player.bounds();
    power_ups.retain_mut(|power_up: &mut PowerUp| {
        power_up.update(*speed, dt);
        if !power_up.collected && bounds.overlaps(&power_up.rect()) {
            power_up.collected = true;
            apply_power_up(player, power_up.kind, *clock, tuning);
            events.push(GameEvent::PowerUpCollected(power_up.kind));
        }
        !power_up.collected && !power_up.is_off_screen()
    });
}

fn update_collectibles(state: &mut GameState, dt: f32) {
    let GameState {
        player: Some(player),
        collectibles,
        floating_texts,
        tuning,
        speed,
        clock,
        coins,
        events,
        ..
    } = &mut *state
    else {
        return;
    };

    let bounds = player.bounds();
    let magnet_target = player.magnet_active().then(|| player.center());
    collectibles.retain_mut(|coin: &mut Collectible| {
        coin.update(
            *speed,
            dt,
            magnet_target,
            tuning.magnet_radius,
            tuning.magnet_pull_speed,
        );
        if !coin.collected && bounds.overlaps(&coin.rect()) {
            coin.collected = true;
            *coins += coin.value;
            let anchor = Vec2::new(coin.center().x, coin.pos.y);
            floating_texts.push(FloatingText::new(format!("+{}", coin.value), anchor, *clock));
            events.push(GameEvent::CoinCollected { value: coin.value });
        }
        !coin.collected && !coin.is_off_screen()
    });
}
