//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, every rate in units per second
//! - Randomness only through the session's seeded RNG
//! - No rendering or platform dependencies

pub mod collision;
pub mod environment;
pub mod obstacle;
pub mod phase;
pub mod pickup;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision};
pub use environment::{Environment, Palette, Rgb, Shake, Snowflake, background_for, day_night_transition};
pub use obstacle::{LevitationPhase, Obstacle, ObstacleKind, ObstacleType};
pub use phase::{GamePhase, PhaseCommand, phase_command};
pub use pickup::{Collectible, CollectibleKind, FloatingText, PowerUp, PowerUpKind};
pub use player::{JumpKind, Player, Skin, SkinAvailability, TimedEffect};
pub use spawn::{SpawnOutcome, SpawnTimer, choose_obstacle, try_spawn_collectible, try_spawn_obstacle, try_spawn_powerup};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, apply_input, tick};
