//! Dino Run - A side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, environment, game phases)
//! - `game`: Owns a session plus its collaborators and drives it frame by frame
//! - `renderer`: Drawing surface abstraction and the presentation adapter
//! - `assets`: Readiness tracking for images and sounds
//! - `audio`: Maps game events to music/effect playback
//! - `platform`: Browser glue (canvas, input, storage)
//! - `persistence`: Key-value stores
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed layout constants (pixels, surface space)
pub mod consts {
    use crate::sim::Rect;
    use glam::Vec2;

    /// Drawing surface dimensions
    pub const WIDTH: f32 = 1200.0;
    pub const HEIGHT: f32 = 450.0;
    /// Ground line; everything standing rests its bottom edge here
    pub const GROUND_Y: f32 = HEIGHT - 50.0;
    /// Fixed horizontal lane of the player
    pub const PLAYER_X: f32 = WIDTH / 10.0;

    /// Sprite sizes
    pub const DINO_SIZE: Vec2 = Vec2::new(44.0, 47.0);
    pub const DINO_DUCK_SIZE: Vec2 = Vec2::new(59.0, 30.0);
    pub const DINO_ALT_SIZE: Vec2 = Vec2::new(55.0, 28.0);
    pub const DINO_ALT_DUCK_SIZE: Vec2 = Vec2::new(55.0, 28.0);
    pub const CACTUS_SIZE: Vec2 = Vec2::new(25.0, 50.0);
    pub const PTERODACTYL_SIZE: Vec2 = Vec2::new(46.0, 40.0);
    pub const BOULDER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const SNAKE_PIT_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_ICON_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const SHIELD_EFFECT_SIZE: Vec2 = Vec2::new(60.0, 60.0);
    pub const COIN_SIZE: Vec2 = Vec2::new(20.0, 20.0);

    /// Cruising altitudes (bottom edge) for pterodactyls
    pub const PTERODACTYL_HEIGHTS: [f32; 2] = [GROUND_Y - 65.0, GROUND_Y - 95.0];

    /// On-screen controls the input layer routes pointer presses against
    pub const PAUSE_RESUME_BUTTON: Rect = Rect::new(10.0, 5.0, 60.0, 30.0);
    pub const RESTART_BUTTON: Rect = Rect::new(WIDTH / 2.0 - 75.0, HEIGHT / 2.0 + 110.0, 150.0, 40.0);
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
