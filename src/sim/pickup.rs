//! Power-ups, coins and the "+N" feedback text

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::assets::AssetId;
use crate::box_center;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::Magnet];

    pub fn icon(self) -> AssetId {
        match self {
            PowerUpKind::Shield => AssetId::ShieldIcon,
            PowerUpKind::Magnet => AssetId::MagnetIcon,
        }
    }
}

/// A floating power-up icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl PowerUp {
    /// Uniform kind, hovering 50..100 px above the ground icon line
    pub fn spawn(id: u32, rng: &mut impl Rng) -> Self {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let y = GROUND_Y - POWERUP_ICON_SIZE.y - (rng.random::<f32>() * 50.0 + 50.0);
        Self {
            id,
            kind,
            pos: Vec2::new(WIDTH + POWERUP_ICON_SIZE.x, y),
            collected: false,
        }
    }

    pub fn update(&mut self, speed: f32, dt: f32) {
        self.pos.x -= speed * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, POWERUP_ICON_SIZE)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + POWERUP_ICON_SIZE.x < 0.0
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
}

impl CollectibleKind {
    pub fn size(self) -> Vec2 {
        match self {
            CollectibleKind::Coin => COIN_SIZE,
        }
    }

    pub fn sprite(self) -> AssetId {
        match self {
            CollectibleKind::Coin => AssetId::Coin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub value: u32,
    pub collected: bool,
}

impl Collectible {
    /// A coin floating 10..90 px above the ground
    pub fn spawn_coin(id: u32, value: u32, rng: &mut impl Rng) -> Self {
        let size = CollectibleKind::Coin.size();
        let y = GROUND_Y - size.y - (rng.random::<f32>() * 80.0 + 10.0);
        Self {
            id,
            kind: CollectibleKind::Coin,
            pos: Vec2::new(WIDTH + size.x, y),
            value,
            collected: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.kind.size()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size())
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size().x < 0.0
    }

    /// Scroll left, then drift toward `magnet_target` if it is within `radius`
    pub fn update(&mut self, speed: f32, dt: f32, magnet_target: Option<Vec2>, radius: f32, pull_speed: f32) {
        self.pos.x -= speed * dt;

        if self.collected {
            return;
        }
        let Some(target) = magnet_target else {
            return;
        };
        let delta = target - self.center();
        let distance = delta.length();
        if distance > 1.0 && distance < radius {
            // Never step past the target
            let step = (pull_speed * dt).min(distance);
            self.pos += delta / distance * step;
        }
    }
}

/// Short-lived score feedback drifting upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    /// Center of the text
    pub pos: Vec2,
    /// Play clock time it was created
    pub born_at: f64,
}

impl FloatingText {
    /// Seconds until fully faded
    pub const DURATION: f64 = 0.8;
    /// Upward drift (px/s)
    pub const RISE_SPEED: f32 = 48.0;

    pub fn new(text: impl Into<String>, pos: Vec2, clock: f64) -> Self {
        Self {
            text: text.into(),
            pos,
            born_at: clock,
        }
    }

    /// Drift; returns false once expired
    pub fn update(&mut self, dt: f32, clock: f64) -> bool {
        self.pos.y -= Self::RISE_SPEED * dt;
        clock - self.born_at < Self::DURATION
    }

    /// Linear fade from 1 to 0 over the lifetime
    pub fn alpha(&self, clock: f64) -> f32 {
        (1.0 - (clock - self.born_at) / Self::DURATION).clamp(0.0, 1.0) as f32
    }
}
