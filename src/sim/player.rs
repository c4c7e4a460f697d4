//! The running dinosaur
//!
//! The player has a fixed horizontal lane; only `pos.y` moves. Size and sprite
//! are derived from skin + posture rather than stored, so they can never get
//! out of sync with the ducking flag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::assets::{AssetId, AssetRegistry};
use crate::consts::*;
use crate::tuning::Tuning;

/// Hitbox inset, making collisions slightly forgiving
const HITBOX_PADDING: f32 = 5.0;

/// Cosmetic skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Skin {
    #[default]
    Default,
    Alt,
}

impl Skin {
    pub fn other(self) -> Skin {
        match self {
            Skin::Default => Skin::Alt,
            Skin::Alt => Skin::Default,
        }
    }
}

/// Which skins have both of their sprites loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinAvailability {
    pub default: bool,
    pub alt: bool,
}

impl SkinAvailability {
    pub fn from_assets(assets: &AssetRegistry) -> Self {
        Self {
            default: assets.is_ready(AssetId::DinoNormal) && assets.is_ready(AssetId::DinoDuck),
            alt: assets.is_ready(AssetId::DinoAltNormal) && assets.is_ready(AssetId::DinoAltDuck),
        }
    }

    pub fn has(&self, skin: Skin) -> bool {
        match skin {
            Skin::Default => self.default,
            Skin::Alt => self.alt,
        }
    }
}

/// A power-up effect that lapses once the play clock passes `expires_at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub expires_at: f64,
}

impl TimedEffect {
    pub fn remaining(&self, clock: f64) -> f64 {
        (self.expires_at - clock).max(0.0)
    }
}

/// Result of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    Single,
    Double,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (px/s, negative is up)
    pub vel_y: f32,
    pub on_ground: bool,
    pub is_ducking: bool,
    pub is_jumping: bool,
    pub double_jump_used: bool,
    pub skin: Skin,
    pub shield: Option<TimedEffect>,
    pub magnet: Option<TimedEffect>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Standing on the ground in the default skin
    pub fn new() -> Self {
        let mut player = Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            vel_y: 0.0,
            on_ground: true,
            is_ducking: false,
            is_jumping: false,
            double_jump_used: false,
            skin: Skin::Default,
            shield: None,
            magnet: None,
        };
        player.snap_to_ground();
        player
    }

    /// Current width/height for the skin and posture
    pub fn size(&self) -> Vec2 {
        match (self.skin, self.is_ducking) {
            (Skin::Default, false) => DINO_SIZE,
            (Skin::Default, true) => DINO_DUCK_SIZE,
            (Skin::Alt, false) => DINO_ALT_SIZE,
            (Skin::Alt, true) => DINO_ALT_DUCK_SIZE,
        }
    }

    /// Sprite for the skin and posture
    pub fn sprite(&self) -> AssetId {
        match (self.skin, self.is_ducking) {
            (Skin::Default, false) => AssetId::DinoNormal,
            (Skin::Default, true) => AssetId::DinoDuck,
            (Skin::Alt, false) => AssetId::DinoAltNormal,
            (Skin::Alt, true) => AssetId::DinoAltDuck,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size())
    }

    /// Padded hitbox (no padding at the feet)
    pub fn bounds(&self) -> Rect {
        self.rect().inset(HITBOX_PADDING, HITBOX_PADDING, 0.0)
    }

    fn snap_to_ground(&mut self) {
        self.pos.y = GROUND_Y - self.size().y;
    }

    /// Jump from the ground, or double jump once while airborne
    pub fn jump(&mut self, tuning: &Tuning) -> Option<JumpKind> {
        if self.on_ground && !self.is_ducking {
            self.vel_y = tuning.jump_velocity;
            self.is_jumping = true;
            self.on_ground = false;
            self.double_jump_used = false;
            Some(JumpKind::Single)
        } else if tuning.double_jump_enabled && !self.on_ground && !self.double_jump_used {
            self.vel_y = tuning.jump_velocity * tuning.double_jump_factor;
            self.double_jump_used = true;
            self.is_jumping = true;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Crouch; only possible on the ground
    pub fn start_duck(&mut self) {
        if !self.is_ducking && self.on_ground {
            self.is_ducking = true;
            self.snap_to_ground();
        }
    }

    pub fn stop_duck(&mut self) {
        if self.is_ducking {
            self.is_ducking = false;
            if self.on_ground {
                self.snap_to_ground();
            }
        }
    }

    /// Toggle the skin if the target skin's sprites are loaded
    pub fn switch_skin(&mut self, available: SkinAvailability) -> bool {
        let target = self.skin.other();
        if !available.has(target) {
            log::warn!("Cannot switch to {:?} skin: sprites missing or failed to load", target);
            return false;
        }
        self.skin = target;
        if self.on_ground {
            self.snap_to_ground();
        }
        log::debug!("Switched to {:?} skin", target);
        true
    }

    /// Fall back to the default skin when the alt sprites are gone
    pub fn ensure_skin(&mut self, available: SkinAvailability) {
        if self.skin == Skin::Alt && !available.alt {
            self.skin = Skin::Default;
            if self.on_ground {
                self.snap_to_ground();
            }
        }
    }

    pub fn activate_shield(&mut self, clock: f64, duration: f64) {
        log::debug!("Shield activated for {duration}s");
        self.shield = Some(TimedEffect {
            expires_at: clock + duration,
        });
    }

    pub fn activate_magnet(&mut self, clock: f64, duration: f64) {
        log::debug!("Magnet activated for {duration}s");
        self.magnet = Some(TimedEffect {
            expires_at: clock + duration,
        });
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield.is_some()
    }

    #[inline]
    pub fn magnet_active(&self) -> bool {
        self.magnet.is_some()
    }

    /// Spend the shield on one collision; returns false if there was none
    pub fn consume_shield(&mut self) -> bool {
        self.shield.take().is_some()
    }

    /// Advance one frame: gravity, ground contact, posture, effect expiry
    pub fn update(&mut self, dt: f32, duck_intent: bool, clock: f64, tuning: &Tuning) {
        // Posture first, so the ground check below sees the final height
        if self.on_ground {
            if duck_intent && !self.is_ducking {
                self.start_duck();
            } else if !duck_intent && self.is_ducking {
                self.stop_duck();
            }
        } else {
            self.is_ducking = false;
        }

        self.vel_y += tuning.gravity * dt;
        self.pos.y += self.vel_y * dt;

        let height = self.size().y;
        if self.pos.y + height >= GROUND_Y {
            self.pos.y = GROUND_Y - height;
            self.vel_y = 0.0;
            self.is_jumping = false;
            if !self.on_ground {
                self.double_jump_used = false;
            }
            self.on_ground = true;
        } else {
            self.on_ground = false;
            self.is_ducking = false;
        }

        if self.shield.is_some_and(|e| clock > e.expires_at) {
            self.shield = None;
        }
        if self.magnet.is_some_and(|e| clock > e.expires_at) {
            self.magnet = None;
        }
    }
}
