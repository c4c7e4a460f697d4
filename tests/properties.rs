//! Property tests for the simulation invariants

use dino_run::Tuning;
use dino_run::consts::GROUND_Y;
use dino_run::input::InputEvent;
use dino_run::sim::{GamePhase, GameState, ObstacleType, TickInput, choose_obstacle, day_night_transition, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn playing_state(seed: u64) -> GameState {
    let mut state = GameState::new(Tuning::default(), seed, 0);
    state.finish_loading();
    state.start_session();
    state
}

fn in_run_event() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        4 => Just(InputEvent::PrimaryAction),
        2 => Just(InputEvent::DuckStart),
        2 => Just(InputEvent::DuckEnd),
        1 => Just(InputEvent::SkinSwitch),
    ]
}

/// Per-frame input: maybe one event, and a frame length
fn frames() -> impl Strategy<Value = Vec<(Option<InputEvent>, f32)>> {
    prop::collection::vec((prop::option::weighted(0.3, in_run_event()), 0.004f32..0.05), 1..400)
}

proptest! {
    #[test]
    fn player_never_sinks_below_ground(seed in any::<u64>(), frames in frames()) {
        let mut state = playing_state(seed);
        for (event, dt) in frames {
            tick(&mut state, &TickInput::new(event), dt);
            if state.phase != GamePhase::Playing {
                break;
            }
            let Some(player) = state.player.as_ref() else {
                prop_assert!(false, "playing without a player");
                return Ok(());
            };
            let bottom = player.pos.y + player.size().y;
            if player.on_ground {
                prop_assert!((bottom - GROUND_Y).abs() < 1e-3, "grounded bottom {}", bottom);
            } else {
                prop_assert!(bottom < GROUND_Y, "airborne bottom {}", bottom);
                prop_assert!(!player.is_ducking);
            }
        }
    }

    #[test]
    fn score_only_grows_while_playing(seed in any::<u64>(), frames in frames()) {
        let mut state = playing_state(seed);
        let mut last = state.score;
        for (event, dt) in frames {
            tick(&mut state, &TickInput::new(event), dt);
            prop_assert!(state.score >= last);
            last = state.score;
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        state.start_session();
        prop_assert_eq!(state.score, 0.0);
    }

    #[test]
    fn early_scores_never_roll_late_obstacles(seed in any::<u64>(), score in 0u64..2000) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..20 {
            let Some(ty) = choose_obstacle(score, &tuning, &mut rng) else {
                continue;
            };
            if score < tuning.boulder_min_score as u64 {
                prop_assert_ne!(ty, ObstacleType::Boulder);
            }
            if score < tuning.pterodactyl_min_score as u64 {
                prop_assert!(!ty.is_pterodactyl(), "{:?} at score {}", ty, score);
            }
            if score < tuning.snake_pit_min_score as u64 {
                prop_assert_ne!(ty, ObstacleType::SnakePit);
            }
            if score < tuning.levitating_cactus_min_score as u64 {
                prop_assert_ne!(ty, ObstacleType::LevitatingCactus);
            }
        }
    }

    #[test]
    fn day_night_is_periodic(score in 0.0f64..50_000.0, cycle in 100u32..2000) {
        let a = day_night_transition(score, cycle);
        let b = day_night_transition(score + 2.0 * cycle as f64, cycle);
        prop_assert!((0.0..=1.0).contains(&a));
        prop_assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }

    #[test]
    fn day_night_is_continuous(score in 0.0f64..50_000.0, cycle in 100u32..2000, step in 0.0f64..1.0) {
        let ramp = 0.2 * cycle as f64;
        let a = day_night_transition(score, cycle) as f64;
        let b = day_night_transition(score + step, cycle) as f64;
        prop_assert!((a - b).abs() <= step / ramp + 1e-3);
    }
}

#[test]
fn day_night_anchor_points() {
    let cycle = 700;
    assert_eq!(day_night_transition(0.0, cycle), 0.0);
    assert!((day_night_transition(cycle as f64, cycle) - 1.0).abs() < 1e-6);
    assert!(day_night_transition(2.0 * cycle as f64, cycle).abs() < 1e-6);
}
