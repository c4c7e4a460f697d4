//! Data-driven game balance
//!
//! All rates are per second so the simulation behaves the same at any
//! display refresh rate. Values can be overridden from JSON; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference frame rate the classic per-frame balance numbers were tuned at
const REFERENCE_FPS: f32 = 60.0;

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump (px/s, negative is up)
    pub jump_velocity: f32,
    pub double_jump_enabled: bool,
    /// Double jump strength relative to the first jump
    pub double_jump_factor: f32,

    // === World speed ===
    /// Scroll speed at score 0 (px/s)
    pub initial_speed: f32,
    /// Score interval between speed steps
    pub speed_step_interval: u32,
    /// Speed added per step (px/s)
    pub speed_step: f32,

    // === Spawning ===
    /// Seconds between spawn attempts at the start of a run
    pub initial_spawn_delay: f32,
    /// Lower bound for the spawn delay (seconds)
    pub min_spawn_delay: f32,
    /// Delay removed per `spawn_delay_score_step` points (seconds)
    pub spawn_delay_step: f32,
    pub spawn_delay_score_step: u32,
    /// Minimum free screen distance before the next spawn: base + speed × factor
    pub min_gap_base: f32,
    pub min_gap_speed_factor: f32,
    /// Timer rewind when the gap is too small (fraction of the delay kept)
    pub gap_retry_factor: f32,
    /// Timer rewind when every roll missed
    pub empty_roll_retry_factor: f32,

    // === Obstacles ===
    pub cactus_weight: f32,
    pub snake_pit_min_score: u32,
    pub snake_pit_weight: f32,
    pub boulder_min_score: u32,
    pub boulder_weight: f32,
    pub pterodactyl_min_score: u32,
    pub pterodactyl_weight: f32,
    /// Chance a spawned pterodactyl swoops
    pub swoop_chance: f64,
    pub kamikaze_min_score: u32,
    pub kamikaze_chance: f64,
    pub levitating_cactus_min_score: u32,
    pub levitating_cactus_chance: f64,
    /// Score awarded when an obstacle scrolls past the player
    pub pass_bonus: f64,

    // === Power-ups & coins ===
    pub powerup_min_score: u32,
    pub powerup_chance: f64,
    /// Shield lifetime (seconds)
    pub shield_duration: f64,
    /// Magnet lifetime (seconds)
    pub magnet_duration: f64,
    pub magnet_radius: f32,
    /// Collectible pull speed toward the player (px/s)
    pub magnet_pull_speed: f32,
    pub coin_chance: f64,
    pub coin_value: u32,

    // === Score ===
    /// Points per scrolled pixel
    pub score_per_pixel: f64,

    // === Environment ===
    /// Score length of one day (and of one night)
    pub day_night_cycle_score: u32,
    pub snowflake_count: usize,
    pub earthquake_min_score: u32,
    /// Earthquake trigger rate (events per second of play)
    pub earthquake_rate: f64,
    /// Shake duration (seconds)
    pub earthquake_duration: f32,
    /// Maximum shake offset (px)
    pub earthquake_magnitude: f32,

    // === Loop ===
    /// Upper bound for one frame step (seconds)
    pub max_frame_dt: f32,
    /// How long to wait for assets before giving up (milliseconds)
    pub asset_timeout_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        let fps = REFERENCE_FPS;
        Self {
            gravity: 0.8 * fps * fps,
            jump_velocity: -15.0 * fps,
            double_jump_enabled: true,
            double_jump_factor: 0.9,

            initial_speed: 5.0 * fps,
            speed_step_interval: 500,
            speed_step: 0.5 * fps,

            initial_spawn_delay: 110.0 / fps,
            min_spawn_delay: 55.0 / fps,
            spawn_delay_step: 1.0 / fps,
            spawn_delay_score_step: 150,
            min_gap_base: 100.0,
            min_gap_speed_factor: 6.0 / fps,
            gap_retry_factor: 0.8,
            empty_roll_retry_factor: 0.5,

            cactus_weight: 1.0,
            snake_pit_min_score: 100,
            snake_pit_weight: 0.12 * 8.0,
            boulder_min_score: 200,
            boulder_weight: 0.10 * 8.0,
            pterodactyl_min_score: 300,
            pterodactyl_weight: 0.18 * 8.0,
            swoop_chance: 0.4,
            kamikaze_min_score: 600,
            kamikaze_chance: 0.05,
            levitating_cactus_min_score: 450,
            levitating_cactus_chance: 0.08,
            pass_bonus: 10.0,

            powerup_min_score: 400,
            powerup_chance: 0.03,
            shield_duration: 8.0,
            magnet_duration: 10.0,
            magnet_radius: 150.0,
            magnet_pull_speed: 4.0 * fps,
            coin_chance: 0.33,
            coin_value: 1,

            score_per_pixel: 2.0 / fps as f64,

            day_night_cycle_score: 1500,
            snowflake_count: 200,
            earthquake_min_score: 800,
            earthquake_rate: 0.0003 * fps as f64,
            earthquake_duration: 2.5,
            earthquake_magnitude: 8.0,

            max_frame_dt: 0.1,
            asset_timeout_ms: 15_000.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; fields not present keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("initial_speed", self.initial_speed),
            ("initial_spawn_delay", self.initial_spawn_delay),
            ("min_spawn_delay", self.min_spawn_delay),
            ("earthquake_duration", self.earthquake_duration),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(field, "must be positive"));
            }
        }
        // Score must never go down and rates cannot be negative
        let non_negative = [
            ("score_per_pixel", self.score_per_pixel),
            ("pass_bonus", self.pass_bonus),
            ("earthquake_rate", self.earthquake_rate),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must be negative (upward)"));
        }
        if self.min_spawn_delay > self.initial_spawn_delay {
            return Err(invalid("min_spawn_delay", "exceeds initial_spawn_delay"));
        }
        if self.speed_step_interval == 0 || self.spawn_delay_score_step == 0 {
            return Err(invalid("speed_step_interval", "score intervals must be non-zero"));
        }
        if self.day_night_cycle_score == 0 {
            return Err(invalid("day_night_cycle_score", "must be non-zero"));
        }

        let chances = [
            ("swoop_chance", self.swoop_chance),
            ("kamikaze_chance", self.kamikaze_chance),
            ("levitating_cactus_chance", self.levitating_cactus_chance),
            ("powerup_chance", self.powerup_chance),
            ("coin_chance", self.coin_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "probability must be within [0, 1]"));
            }
        }

        let weights = [
            ("cactus_weight", self.cactus_weight),
            ("snake_pit_weight", self.snake_pit_weight),
            ("boulder_weight", self.boulder_weight),
            ("pterodactyl_weight", self.pterodactyl_weight),
        ];
        for (field, value) in weights {
            if value < 0.0 {
                return Err(invalid(field, "weight must not be negative"));
            }
        }
        if self.cactus_weight <= 0.0 {
            return Err(invalid("cactus_weight", "the base obstacle needs a positive weight"));
        }
        Ok(())
    }

    /// Scroll speed for a (floored) score: a monotonic step function
    pub fn speed_for_score(&self, score: u64) -> f32 {
        let level = score / self.speed_step_interval as u64;
        self.initial_speed + level as f32 * self.speed_step
    }

    /// Spawn delay after a successful spawn at this (floored) score
    pub fn spawn_delay_for_score(&self, score: u64) -> f32 {
        let steps = (score / self.spawn_delay_score_step as u64) as f32;
        (self.initial_spawn_delay - steps * self.spawn_delay_step).max(self.min_spawn_delay)
    }

    /// Minimum free distance at the right edge before spawning again
    pub fn min_spawn_gap(&self, speed: f32) -> f32 {
        self.min_gap_base + speed * self.min_gap_speed_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn defaults_match_classic_frame_tuning() {
        let t = Tuning::default();
        assert!((t.initial_speed - 300.0).abs() < 1e-3);
        assert!((t.gravity - 2880.0).abs() < 1e-2);
        assert!((t.jump_velocity + 900.0).abs() < 1e-3);
        // 100 px + 6 frames of travel at 5 px/frame
        assert!((t.min_spawn_gap(t.initial_speed) - 130.0).abs() < 1e-3);
    }

    #[test]
    fn speed_steps_every_interval() {
        let t = Tuning::default();
        assert_eq!(t.speed_for_score(0), t.initial_speed);
        assert_eq!(t.speed_for_score(499), t.initial_speed);
        assert_eq!(t.speed_for_score(500), t.initial_speed + t.speed_step);
        assert_eq!(t.speed_for_score(1750), t.initial_speed + 3.0 * t.speed_step);
    }

    #[test]
    fn spawn_delay_is_floor_clamped() {
        let t = Tuning::default();
        assert_eq!(t.spawn_delay_for_score(0), t.initial_spawn_delay);
        assert!(t.spawn_delay_for_score(150) < t.initial_spawn_delay);
        assert_eq!(t.spawn_delay_for_score(1_000_000), t.min_spawn_delay);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "coin_chance": 0.5, "boulder_min_score": 50 }"#).unwrap();
        assert_eq!(t.coin_chance, 0.5);
        assert_eq!(t.boulder_min_score, 50);
        assert_eq!(t.pterodactyl_min_score, Tuning::default().pterodactyl_min_score);
    }

    #[test]
    fn rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "coin_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "coin_chance", .. }));
    }

    #[test]
    fn rejects_negative_score_rates() {
        let err = Tuning::from_json(r#"{ "score_per_pixel": -0.1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "score_per_pixel", .. }));
        let err = Tuning::from_json(r#"{ "pass_bonus": -10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pass_bonus", .. }));
        let err = Tuning::from_json(r#"{ "earthquake_rate": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "earthquake_rate", .. }));
        assert!(Tuning::from_json(r#"{ "pass_bonus": 0 }"#).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
