//! Semantic input events and pointer routing
//!
//! Platform code turns raw keys and pointer presses into [`InputEvent`]s; the
//! simulation only ever sees these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GamePhase;

/// A discrete player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Jump, or confirm on the tutorial/title screens
    PrimaryAction,
    DuckStart,
    DuckEnd,
    SkinSwitch,
    Pause,
    Resume,
    /// Pause key: pauses or resumes depending on the phase when it is applied
    PauseToggle,
    Restart,
}

/// Map a pointer press (surface coordinates) to an event for the current phase
pub fn route_pointer(phase: GamePhase, point: Vec2) -> Option<InputEvent> {
    match phase {
        GamePhase::Loading => None,
        GamePhase::Tutorial | GamePhase::Title => Some(InputEvent::PrimaryAction),
        GamePhase::Playing => {
            if PAUSE_RESUME_BUTTON.contains(point) {
                Some(InputEvent::Pause)
            } else if point.x >= WIDTH / 2.0 {
                Some(InputEvent::PrimaryAction)
            } else {
                Some(InputEvent::DuckStart)
            }
        }
        GamePhase::Paused => PAUSE_RESUME_BUTTON
            .contains(point)
            .then_some(InputEvent::Resume),
        GamePhase::GameOver => RESTART_BUTTON.contains(point).then_some(InputEvent::Restart),
    }
}

/// Pointer release ends a touch duck; harmless in any other situation
pub fn route_pointer_release(phase: GamePhase) -> Option<InputEvent> {
    (phase == GamePhase::Playing).then_some(InputEvent::DuckEnd)
}
