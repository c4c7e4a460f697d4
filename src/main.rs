//! Dino Run entry point
//!
//! On the web this boots the canvas game. Natively there is no window; the
//! binary plays one headless session on autopilot and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Dino Run starting...");
    dino_run::platform::web::start()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Run (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    autopilot::run(seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use dino_run::Game;
    use dino_run::assets::AssetRegistry;
    use dino_run::audio::SilentBackend;
    use dino_run::consts::*;
    use dino_run::input::InputEvent;
    use dino_run::persistence::MemoryStore;
    use dino_run::sim::{GamePhase, GameState, Obstacle};
    use dino_run::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// How the bot reacts to the nearest obstacle ahead
    fn decide(state: &GameState) -> Option<InputEvent> {
        let player = state.player.as_ref()?;
        let front = player.rect().right();
        let ahead = state
            .obstacles
            .iter()
            .filter(|o| o.rect().right() > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;
        let distance = ahead.pos.x - front;
        // React a fixed fraction of a second before contact
        let window = state.speed * 0.25;
        if distance < 0.0 || distance > window {
            return None;
        }
        if is_overhead(ahead) && player.on_ground {
            return Some(InputEvent::DuckStart);
        }
        player.on_ground.then_some(InputEvent::PrimaryAction)
    }

    /// High fliers can be ducked under instead of jumped
    fn is_overhead(o: &Obstacle) -> bool {
        o.rect().bottom() < GROUND_Y - DINO_DUCK_SIZE.y
    }

    pub fn run(seed: u64) {
        let mut game = Game::new(
            Tuning::default(),
            seed,
            Box::new(MemoryStore::new()),
            Box::new(SilentBackend),
        );
        *game.assets_mut() = AssetRegistry::all_ready();

        let mut now = 0.0;
        game.frame(now);
        // Tutorial, then title
        game.handle_input(InputEvent::PrimaryAction);
        game.handle_input(InputEvent::PrimaryAction);

        let mut frames = 0;
        while frames < MAX_FRAMES {
            now += FRAME_MS;
            game.frame(now);
            frames += 1;
            if game.phase() == GamePhase::GameOver {
                break;
            }
            let ducking = game.state().duck_held;
            match decide(game.state()) {
                Some(InputEvent::DuckStart) if ducking => {}
                Some(event) => game.handle_input(event),
                None if ducking => game.handle_input(InputEvent::DuckEnd),
                None => {}
            }
        }

        let state = game.state();
        log::info!(
            "Autopilot finished after {:.1}s: phase {:?}, score {}, high score {}, coins {}, jumps {}",
            frames as f64 * FRAME_MS / 1000.0,
            state.phase,
            state.score_floor(),
            state.high_score,
            state.coins,
            state.jumps
        );
    }
}
