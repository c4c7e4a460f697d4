//! Platform abstraction layer
//!
//! Keyboard mapping and pointer scaling are plain functions so they can be
//! tested natively. The browser wiring (canvas surface, image and audio
//! loading, localStorage, event listeners, animation loop) lives in `web`.

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};
use crate::input::InputEvent;
use crate::sim::GamePhase;

/// Key codes whose browser default (scrolling) is suppressed
pub const CAPTURED_KEYS: [&str; 6] = ["Space", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "KeyC"];

/// Key that toggles mute, outside the game's own input set
pub const MUTE_KEY: &str = "KeyM";

/// Map a `KeyboardEvent.code` press to an input for the current phase
pub fn key_down(code: &str, phase: GamePhase) -> Option<InputEvent> {
    match code {
        "Space" => Some(InputEvent::PrimaryAction),
        "ArrowDown" | "KeyS" => Some(InputEvent::DuckStart),
        "KeyC" => Some(InputEvent::SkinSwitch),
        "Escape" | "KeyP" => Some(InputEvent::PauseToggle),
        "Enter" if phase == GamePhase::GameOver => Some(InputEvent::Restart),
        _ => None,
    }
}

pub fn key_up(code: &str) -> Option<InputEvent> {
    matches!(code, "ArrowDown" | "KeyS").then_some(InputEvent::DuckEnd)
}

/// Convert a client-space pointer position into surface coordinates, given
/// the canvas's on-page origin and displayed size
pub fn to_surface(client: Vec2, origin: Vec2, displayed: Vec2) -> Vec2 {
    if displayed.x <= 0.0 || displayed.y <= 0.0 {
        return Vec2::ZERO;
    }
    (client - origin) * Vec2::new(WIDTH, HEIGHT) / displayed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_primary_everywhere() {
        for phase in [GamePhase::Tutorial, GamePhase::Title, GamePhase::Playing] {
            assert_eq!(key_down("Space", phase), Some(InputEvent::PrimaryAction));
        }
    }

    #[test]
    fn duck_keys_press_and_release() {
        assert_eq!(key_down("KeyS", GamePhase::Playing), Some(InputEvent::DuckStart));
        assert_eq!(key_up("ArrowDown"), Some(InputEvent::DuckEnd));
        assert_eq!(key_up("Space"), None);
    }

    #[test]
    fn pause_keys_send_a_toggle() {
        for phase in [GamePhase::Playing, GamePhase::Paused, GamePhase::Title] {
            assert_eq!(key_down("Escape", phase), Some(InputEvent::PauseToggle));
            assert_eq!(key_down("KeyP", phase), Some(InputEvent::PauseToggle));
        }
    }

    #[test]
    fn enter_restarts_only_after_game_over() {
        assert_eq!(key_down("Enter", GamePhase::GameOver), Some(InputEvent::Restart));
        assert_eq!(key_down("Enter", GamePhase::Playing), None);
    }

    #[test]
    fn pointer_scaling() {
        // Canvas shown at half size, 10px from the page corner
        let p = to_surface(Vec2::new(310.0, 122.5), Vec2::new(10.0, 10.0), Vec2::new(600.0, 225.0));
        assert!((p - Vec2::new(600.0, 225.0)).length() < 1e-3);
        assert_eq!(to_surface(Vec2::ONE, Vec2::ZERO, Vec2::ZERO), Vec2::ZERO);
    }
}
