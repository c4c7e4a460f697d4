//! Day/night cycle, snow and earthquakes
//!
//! Purely cosmetic: nothing in here feeds back into entity positions or
//! collision bounds. The shake offset is only applied to the render transform.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, AssetRegistry};
use crate::consts::*;
use crate::tuning::Tuning;

/// Fraction of each half period spent ramping between day and night
const RAMP_FRACTION: f64 = 0.2;

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear blend, rounded to the nearest integer
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| crate::lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub const DAY_BACKGROUND: Rgb = Rgb::new(255, 255, 255);
pub const NIGHT_BACKGROUND: Rgb = Rgb::new(50, 50, 50);
pub const DAY_LINE: Rgb = Rgb::new(0, 0, 0);
pub const NIGHT_LINE: Rgb = Rgb::new(200, 200, 200);

/// Background and ground-line colors for the current time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub line: Rgb,
}

impl Palette {
    pub fn for_transition(t: f32) -> Self {
        Self {
            background: DAY_BACKGROUND.lerp(NIGHT_BACKGROUND, t),
            line: DAY_LINE.lerp(NIGHT_LINE, t),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_transition(0.0)
    }
}

/// Day (0) to night (1) blend for a score.
///
/// Period is `2 * cycle`. Each half holds a plateau and ends with a linear ramp
/// over its last 20%, so the value is 0 at 0, 1 at `cycle`, and 0 again at
/// `2 * cycle`.
pub fn day_night_transition(score: f64, cycle: u32) -> f32 {
    let half = cycle.max(1) as f64;
    let ramp = half * RAMP_FRACTION;
    let s = score.max(0.0) % (2.0 * half);

    let t = if s < half - ramp {
        0.0
    } else if s < half {
        (s - (half - ramp)) / ramp
    } else if s < 2.0 * half - ramp {
        1.0
    } else {
        1.0 - (s - (2.0 * half - ramp)) / ramp
    };
    t.clamp(0.0, 1.0) as f32
}

/// Background image for the time of day; falls back to the other image when
/// the preferred one is not ready, and to `None` (palette fill) after that
pub fn background_for(transition: f32, assets: &AssetRegistry) -> Option<AssetId> {
    let (preferred, other) = if transition < 0.5 {
        (AssetId::BackgroundDay, AssetId::BackgroundNight)
    } else {
        (AssetId::BackgroundNight, AssetId::BackgroundDay)
    };
    [preferred, other].into_iter().find(|id| assets.is_ready(*id))
}

/// One snow particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Snowflake {
    pub pos: Vec2,
    /// Drift (px/s)
    pub vel: Vec2,
    /// Radius (px)
    pub size: f32,
}

impl Snowflake {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * WIDTH, rng.random::<f32>() * HEIGHT),
            vel: Vec2::new(rng.random::<f32>() * 36.0 - 18.0, rng.random::<f32>() * 60.0 + 48.0),
            size: rng.random::<f32>() * 2.0 + 1.0,
        }
    }

    /// Drift and wrap around the surface edges
    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        let s = self.size;
        if self.pos.y > HEIGHT + s {
            self.pos.y = -s;
        } else if self.pos.y < -s {
            self.pos.y = HEIGHT + s;
        }
        if self.pos.x > WIDTH + s {
            self.pos.x = -s;
        } else if self.pos.x < -s {
            self.pos.x = WIDTH + s;
        }
    }
}

/// An active screen shake
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shake {
    /// Seconds left
    pub remaining: f32,
    pub duration: f32,
    pub magnitude: f32,
}

impl Shake {
    /// Current amplitude, decaying linearly to zero
    pub fn intensity(&self) -> f32 {
        self.magnitude * (self.remaining / self.duration)
    }
}

/// Everything about the world backdrop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    /// Day/night blend in [0, 1]
    pub transition: f32,
    pub dark_mode: bool,
    pub palette: Palette,
    pub snow: Vec<Snowflake>,
    pub shake: Option<Shake>,
    /// Render-only translation for this frame
    pub shake_offset: Vec2,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to daylight, no snow, no shake
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Recompute the day/night state; snow appears when it gets dark and melts at dawn
    pub fn update_cycle(&mut self, score: f64, tuning: &Tuning, rng: &mut impl Rng) {
        self.transition = day_night_transition(score, tuning.day_night_cycle_score);
        self.palette = Palette::for_transition(self.transition);

        let dark = self.transition >= 0.5;
        if dark && self.snow.is_empty() {
            self.snow = (0..tuning.snowflake_count)
                .map(|_| Snowflake::random(rng))
                .collect();
        } else if !dark {
            self.snow.clear();
        }
        self.dark_mode = dark;
    }

    pub fn update_snow(&mut self, dt: f32) {
        for flake in &mut self.snow {
            flake.update(dt);
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Roll for a new earthquake; returns true if one started
    pub fn try_trigger_earthquake(
        &mut self,
        score: u64,
        dt: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> bool {
        if self.is_shaking() || score < tuning.earthquake_min_score as u64 {
            return false;
        }
        // Poisson arrival so the rate does not depend on frame length
        let p = (1.0 - (-tuning.earthquake_rate * dt as f64).exp()).clamp(0.0, 1.0);
        if !rng.random_bool(p) {
            return false;
        }
        log::debug!("Earthquake at score {}", score);
        self.shake = Some(Shake {
            remaining: tuning.earthquake_duration,
            duration: tuning.earthquake_duration,
            magnitude: tuning.earthquake_magnitude,
        });
        true
    }

    /// Count the shake down and pick this frame's random offset
    pub fn update_shake(&mut self, dt: f32, rng: &mut impl Rng) {
        self.shake_offset = Vec2::ZERO;
        let Some(shake) = &mut self.shake else {
            return;
        };
        shake.remaining -= dt;
        if shake.remaining <= 0.0 {
            self.shake = None;
            return;
        }
        let intensity = shake.intensity();
        self.shake_offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * intensity,
            (rng.random::<f32>() - 0.5) * intensity,
        );
    }
}
