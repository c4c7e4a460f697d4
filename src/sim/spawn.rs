//! Spawn director
//!
//! Score-gated weighted tables for obstacles, plus independent rolls for
//! power-ups and coins. The timer runs in seconds; when it matures, all three
//! tables are rolled on the same frame, provided the newest entity has moved
//! far enough away from the right edge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleType};
use super::pickup::{Collectible, PowerUp};
use super::state::GameState;
use crate::consts::WIDTH;
use crate::tuning::Tuning;

/// Result of one maturity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Timer still running
    Waiting,
    /// Newest entity too close to the edge; timer rewound
    GapTooSmall,
    /// Every roll missed; timer rewound
    NothingRolled,
    /// At least one entity was added
    Spawned,
}

/// Adaptive spawn countdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds accumulated since the last spawn (or rewind)
    pub elapsed: f32,
    /// Seconds required before the next attempt
    pub delay: f32,
}

impl SpawnTimer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            elapsed: 0.0,
            delay: tuning.initial_spawn_delay,
        }
    }

    fn matured(&self) -> bool {
        self.elapsed >= self.delay
    }
}

/// Pick an obstacle type for this score, or `None` if the table is empty
pub fn choose_obstacle(score: u64, tuning: &Tuning, rng: &mut impl Rng) -> Option<ObstacleType> {
    // Rare kinds bypass the table with their own independent rolls
    if score >= tuning.kamikaze_min_score as u64 && rng.random_bool(tuning.kamikaze_chance) {
        return Some(ObstacleType::KamikazePterodactyl);
    }
    if score >= tuning.levitating_cactus_min_score as u64
        && rng.random_bool(tuning.levitating_cactus_chance)
    {
        return Some(ObstacleType::LevitatingCactus);
    }

    let table = [
        (ObstacleType::Cactus, 0, tuning.cactus_weight),
        (ObstacleType::SnakePit, tuning.snake_pit_min_score, tuning.snake_pit_weight),
        (ObstacleType::Boulder, tuning.boulder_min_score, tuning.boulder_weight),
        (ObstacleType::Pterodactyl, tuning.pterodactyl_min_score, tuning.pterodactyl_weight),
    ];
    let choices: Vec<(ObstacleType, f32)> = table
        .into_iter()
        .filter(|(_, min_score, weight)| score >= *min_score as u64 && *weight > 0.0)
        .map(|(ty, _, weight)| (ty, weight))
        .collect();

    let total: f32 = choices.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.random::<f32>() * total;
    let mut chosen = choices.last().map(|(ty, _)| *ty);
    for (ty, weight) in &choices {
        if roll < *weight {
            chosen = Some(*ty);
            break;
        }
        roll -= weight;
    }

    if chosen == Some(ObstacleType::Pterodactyl) && rng.random_bool(tuning.swoop_chance) {
        return Some(ObstacleType::SwoopingPterodactyl);
    }
    chosen
}

/// Roll the obstacle table and add the result; returns whether anything spawned
pub fn try_spawn_obstacle(state: &mut GameState, score: u64) -> bool {
    let Some(ty) = choose_obstacle(score, &state.tuning, &mut state.rng) else {
        return false;
    };
    let id = state.next_entity_id();
    let obstacle = Obstacle::spawn(id, ty, &mut state.rng);
    log::debug!("Spawned {:?} at x={:.0}", ty, obstacle.pos.x);
    state.obstacles.push(obstacle);
    true
}

pub fn try_spawn_powerup(state: &mut GameState, score: u64) -> bool {
    if score < state.tuning.powerup_min_score as u64 || !state.rng.random_bool(state.tuning.powerup_chance) {
        return false;
    }
    let id = state.next_entity_id();
    let power_up = PowerUp::spawn(id, &mut state.rng);
    log::debug!("Spawned power-up {:?}", power_up.kind);
    state.power_ups.push(power_up);
    true
}

pub fn try_spawn_collectible(state: &mut GameState) -> bool {
    if !state.rng.random_bool(state.tuning.coin_chance) {
        return false;
    }
    let id = state.next_entity_id();
    let coin = Collectible::spawn_coin(id, state.tuning.coin_value, &mut state.rng);
    state.collectibles.push(coin);
    true
}

/// Whether the newest entity has cleared the minimum gap at the right edge
pub fn gap_is_clear(newest_right_edge: Option<f32>, speed: f32, tuning: &Tuning) -> bool {
    match newest_right_edge {
        Some(right) => WIDTH - right >= tuning.min_spawn_gap(speed),
        None => true,
    }
}

/// Advance the spawn timer and attempt spawns when it matures
pub fn update_spawns(state: &mut GameState, dt: f32, score: u64) -> SpawnOutcome {
    state.spawn_timer.elapsed += dt;
    if !state.spawn_timer.matured() {
        return SpawnOutcome::Waiting;
    }

    if !gap_is_clear(state.newest_right_edge(), state.speed, &state.tuning) {
        state.spawn_timer.elapsed = state.spawn_timer.delay * state.tuning.gap_retry_factor;
        return SpawnOutcome::GapTooSmall;
    }

    // All three are rolled every time; `|` keeps later rolls from short-circuiting
    let spawned = try_spawn_obstacle(state, score)
        | try_spawn_powerup(state, score)
        | try_spawn_collectible(state);

    if spawned {
        state.spawn_timer.elapsed = 0.0;
        state.spawn_timer.delay = state.tuning.spawn_delay_for_score(score);
        SpawnOutcome::Spawned
    } else {
        state.spawn_timer.elapsed = state.spawn_timer.delay * state.tuning.empty_roll_retry_factor;
        SpawnOutcome::NothingRolled
    }
}
