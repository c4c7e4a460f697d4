//! Game phases and the input-driven transition table
//!
//! `Loading -> Tutorial` (assets settled) and `Playing -> GameOver` (collision)
//! are driven by the simulation itself; everything else comes from input.

use serde::{Deserialize, Serialize};

use crate::input::InputEvent;

/// Current phase of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets
    #[default]
    Loading,
    /// Controls overview
    Tutorial,
    /// Start screen
    Title,
    /// Active run
    Playing,
    /// Run frozen
    Paused,
    /// Run ended by a collision
    GameOver,
}

impl GamePhase {
    /// Phases that require a live player
    pub fn needs_player(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// What an input asks the state machine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCommand {
    ShowTitle,
    /// Reset the session and start playing
    StartSession,
    Pause,
    Resume,
}

/// The transition an input triggers in `phase`, if any
pub fn phase_command(phase: GamePhase, event: InputEvent) -> Option<PhaseCommand> {
    match (phase, event) {
        (GamePhase::Tutorial, InputEvent::PrimaryAction) => Some(PhaseCommand::ShowTitle),
        (GamePhase::Title, InputEvent::PrimaryAction) => Some(PhaseCommand::StartSession),
        (GamePhase::Playing, InputEvent::Pause | InputEvent::PauseToggle) => Some(PhaseCommand::Pause),
        (GamePhase::Paused, InputEvent::Resume | InputEvent::PauseToggle) => Some(PhaseCommand::Resume),
        (GamePhase::GameOver, InputEvent::Restart) => Some(PhaseCommand::StartSession),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [InputEvent; 8] = [
        InputEvent::PrimaryAction,
        InputEvent::DuckStart,
        InputEvent::DuckEnd,
        InputEvent::SkinSwitch,
        InputEvent::Pause,
        InputEvent::Resume,
        InputEvent::PauseToggle,
        InputEvent::Restart,
    ];

    fn commands(phase: GamePhase) -> Vec<(InputEvent, PhaseCommand)> {
        ALL_EVENTS
            .into_iter()
            .filter_map(|e| phase_command(phase, e).map(|c| (e, c)))
            .collect()
    }

    #[test]
    fn loading_ignores_input() {
        assert!(commands(GamePhase::Loading).is_empty());
    }

    #[test]
    fn menus_advance_on_primary_action() {
        assert_eq!(
            commands(GamePhase::Tutorial),
            vec![(InputEvent::PrimaryAction, PhaseCommand::ShowTitle)]
        );
        assert_eq!(
            commands(GamePhase::Title),
            vec![(InputEvent::PrimaryAction, PhaseCommand::StartSession)]
        );
    }

    #[test]
    fn game_over_only_leaves_via_restart() {
        assert_eq!(
            commands(GamePhase::GameOver),
            vec![(InputEvent::Restart, PhaseCommand::StartSession)]
        );
    }

    #[test]
    fn paused_only_leaves_via_resume() {
        assert_eq!(
            commands(GamePhase::Paused),
            vec![
                (InputEvent::Resume, PhaseCommand::Resume),
                (InputEvent::PauseToggle, PhaseCommand::Resume)
            ]
        );
    }

    #[test]
    fn playing_only_transitions_on_pause() {
        assert_eq!(
            commands(GamePhase::Playing),
            vec![
                (InputEvent::Pause, PhaseCommand::Pause),
                (InputEvent::PauseToggle, PhaseCommand::Pause)
            ]
        );
    }
}
