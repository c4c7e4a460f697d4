//! Obstacles
//!
//! Each variant carries only its own motion parameters. All obstacles scroll
//! left with the shared world speed; some add vertical motion once they
//! cross a per-instance trigger line.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::assets::AssetId;
use crate::consts::*;

/// Obstacle family, as chosen by the spawn director
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleType {
    Cactus,
    Pterodactyl,
    SwoopingPterodactyl,
    KamikazePterodactyl,
    LevitatingCactus,
    Boulder,
    SnakePit,
}

impl ObstacleType {
    pub fn size(self) -> Vec2 {
        match self {
            ObstacleType::Cactus | ObstacleType::LevitatingCactus => CACTUS_SIZE,
            ObstacleType::Pterodactyl
            | ObstacleType::SwoopingPterodactyl
            | ObstacleType::KamikazePterodactyl => PTERODACTYL_SIZE,
            ObstacleType::Boulder => BOULDER_SIZE,
            ObstacleType::SnakePit => SNAKE_PIT_SIZE,
        }
    }

    pub fn sprite(self) -> AssetId {
        match self {
            ObstacleType::Cactus | ObstacleType::LevitatingCactus => AssetId::Cactus,
            ObstacleType::Pterodactyl
            | ObstacleType::SwoopingPterodactyl
            | ObstacleType::KamikazePterodactyl => AssetId::Pterodactyl,
            ObstacleType::Boulder => AssetId::Boulder,
            ObstacleType::SnakePit => AssetId::SnakePit,
        }
    }

    pub fn is_pterodactyl(self) -> bool {
        matches!(
            self,
            ObstacleType::Pterodactyl
                | ObstacleType::SwoopingPterodactyl
                | ObstacleType::KamikazePterodactyl
        )
    }
}

/// Levitating cactus progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevitationPhase {
    Grounded,
    Launching,
    Levitating,
}

/// Per-type state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus,
    Pterodactyl,
    SwoopingPterodactyl {
        /// Center x at which the dive starts
        trigger_x: f32,
        /// Bottom edge the dive stops at
        target_bottom: f32,
        /// Descent speed (px/s)
        speed: f32,
        swooping: bool,
    },
    KamikazePterodactyl {
        /// Fall speed (px/s)
        dive_speed: f32,
        landed: bool,
    },
    LevitatingCactus {
        /// Center x at which the launch starts
        trigger_x: f32,
        /// Vertical center the cactus hovers at
        target_center_y: f32,
        /// Climb speed (px/s)
        launch_speed: f32,
        phase: LevitationPhase,
    },
    Boulder {
        /// Radians
        rotation: f32,
        /// Radians per second
        rotation_speed: f32,
    },
    SnakePit,
}

impl ObstacleKind {
    pub fn obstacle_type(&self) -> ObstacleType {
        match self {
            ObstacleKind::Cactus => ObstacleType::Cactus,
            ObstacleKind::Pterodactyl => ObstacleType::Pterodactyl,
            ObstacleKind::SwoopingPterodactyl { .. } => ObstacleType::SwoopingPterodactyl,
            ObstacleKind::KamikazePterodactyl { .. } => ObstacleType::KamikazePterodactyl,
            ObstacleKind::LevitatingCactus { .. } => ObstacleType::LevitatingCactus,
            ObstacleKind::Boulder { .. } => ObstacleType::Boulder,
            ObstacleKind::SnakePit => ObstacleType::SnakePit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pass bonus already awarded
    pub passed: bool,
}

/// Random cruising altitude, returned as a top edge for the given height
fn pterodactyl_top(rng: &mut impl Rng, height: f32) -> f32 {
    let bottom = PTERODACTYL_HEIGHTS[rng.random_range(0..PTERODACTYL_HEIGHTS.len())];
    bottom - height
}

impl Obstacle {
    /// Create an obstacle just past the right edge with randomized parameters
    pub fn spawn(id: u32, ty: ObstacleType, rng: &mut impl Rng) -> Self {
        let size = ty.size();
        let x = WIDTH + rng.random::<f32>() * (WIDTH * 0.2) + WIDTH * 0.1;
        let ground_top = GROUND_Y - size.y;

        let (kind, y) = match ty {
            ObstacleType::Cactus => (ObstacleKind::Cactus, ground_top),
            ObstacleType::SnakePit => (ObstacleKind::SnakePit, ground_top),
            ObstacleType::Pterodactyl => (ObstacleKind::Pterodactyl, pterodactyl_top(rng, size.y)),
            ObstacleType::SwoopingPterodactyl => {
                let y = pterodactyl_top(rng, size.y);
                let kind = ObstacleKind::SwoopingPterodactyl {
                    target_bottom: GROUND_Y - DINO_SIZE.y - (rng.random::<f32>() * 15.0 + 5.0),
                    speed: (rng.random::<f32>() * 1.4 + 1.8) * 60.0,
                    trigger_x: WIDTH * (rng.random::<f32>() * 0.2 + 0.55),
                    swooping: false,
                };
                (kind, y)
            }
            ObstacleType::KamikazePterodactyl => {
                let y = rng.random::<f32>() * 20.0 + 5.0;
                let kind = ObstacleKind::KamikazePterodactyl {
                    dive_speed: (rng.random::<f32>() * 2.5 + 5.0) * 60.0,
                    landed: false,
                };
                (kind, y)
            }
            ObstacleType::LevitatingCactus => {
                let kind = ObstacleKind::LevitatingCactus {
                    trigger_x: WIDTH * (rng.random::<f32>() * 0.35 + 0.4),
                    target_center_y: rng.random::<f32>() * 40.0 + (HEIGHT / 2.0 - 10.0),
                    launch_speed: (rng.random::<f32>() * 2.5 + 4.0) * 60.0,
                    phase: LevitationPhase::Grounded,
                };
                (kind, ground_top)
            }
            ObstacleType::Boulder => {
                let kind = ObstacleKind::Boulder {
                    rotation: 0.0,
                    rotation_speed: (rng.random::<f32>() * 0.05 + 0.05) * 60.0,
                };
                (kind, ground_top)
            }
        };

        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            size,
            passed: false,
        }
    }

    pub fn obstacle_type(&self) -> ObstacleType {
        self.kind.obstacle_type()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Advance one frame
    pub fn update(&mut self, speed: f32, dt: f32) {
        self.pos.x -= speed * dt;
        let center_x = self.pos.x + self.size.x / 2.0;
        let height = self.size.y;

        match &mut self.kind {
            ObstacleKind::SwoopingPterodactyl {
                trigger_x,
                target_bottom,
                speed,
                swooping,
            } => {
                if !*swooping && center_x < *trigger_x {
                    *swooping = true;
                }
                if *swooping && self.pos.y + height < *target_bottom {
                    self.pos.y += *speed * dt;
                    if self.pos.y + height > *target_bottom {
                        self.pos.y = *target_bottom - height;
                    }
                }
            }
            ObstacleKind::KamikazePterodactyl { dive_speed, landed } => {
                if !*landed {
                    self.pos.y += *dive_speed * dt;
                    if self.pos.y + height >= GROUND_Y {
                        self.pos.y = GROUND_Y - height;
                        *landed = true;
                    }
                }
            }
            ObstacleKind::LevitatingCactus {
                trigger_x,
                target_center_y,
                launch_speed,
                phase,
            } => {
                if *phase == LevitationPhase::Grounded && center_x < *trigger_x {
                    *phase = LevitationPhase::Launching;
                }
                if *phase == LevitationPhase::Launching {
                    self.pos.y -= *launch_speed * dt;
                    if self.pos.y + height / 2.0 <= *target_center_y {
                        self.pos.y = *target_center_y - height / 2.0;
                        *phase = LevitationPhase::Levitating;
                    }
                }
            }
            ObstacleKind::Boulder {
                rotation,
                rotation_speed,
            } => {
                *rotation += *rotation_speed * dt;
            }
            ObstacleKind::Cactus | ObstacleKind::Pterodactyl | ObstacleKind::SnakePit => {}
        }
    }

    /// Padded hitbox; flat and round obstacles get less horizontal slack
    pub fn bounds(&self) -> Rect {
        let (pad_x, pad_y) = match self.kind {
            ObstacleKind::SnakePit => (2.0, 0.0),
            ObstacleKind::Boulder { .. } => (2.0, 3.0),
            _ => (3.0, 3.0),
        };
        self.rect().inset(pad_x, pad_y, pad_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn spawn(ty: ObstacleType, seed: u64) -> Obstacle {
        let mut rng = Pcg32::seed_from_u64(seed);
        Obstacle::spawn(1, ty, &mut rng)
    }

    #[test]
    fn spawns_past_right_edge() {
        for seed in 0..50 {
            let o = spawn(ObstacleType::Cactus, seed);
            assert!(o.pos.x >= WIDTH * 1.1 && o.pos.x <= WIDTH * 1.3);
            assert_eq!(o.pos.y + o.size.y, GROUND_Y);
        }
    }

    #[test]
    fn scrolls_left_with_world_speed() {
        let mut o = spawn(ObstacleType::Cactus, 1);
        let x0 = o.pos.x;
        o.update(300.0, 0.5);
        assert!((o.pos.x - (x0 - 150.0)).abs() < 1e-3);
        assert_eq!(o.pos.y + o.size.y, GROUND_Y);
    }

    #[test]
    fn pterodactyl_cruises_at_fixed_altitudes() {
        for seed in 0..20 {
            let o = spawn(ObstacleType::Pterodactyl, seed);
            let bottom = o.pos.y + o.size.y;
            assert!(PTERODACTYL_HEIGHTS.contains(&bottom));
        }
    }

    #[test]
    fn swooper_waits_for_trigger_then_descends_to_target() {
        let mut o = spawn(ObstacleType::SwoopingPterodactyl, 7);
        let ObstacleKind::SwoopingPterodactyl {
            trigger_x,
            target_bottom,
            ..
        } = o.kind
        else {
            panic!("wrong kind");
        };
        let y0 = o.pos.y;

        // Step until just before the trigger: altitude unchanged
        while o.pos.x + o.size.x / 2.0 - 300.0 * DT >= trigger_x {
            o.update(300.0, DT);
            assert_eq!(o.pos.y, y0);
        }

        for _ in 0..600 {
            o.update(300.0, DT);
        }
        assert!(matches!(
            o.kind,
            ObstacleKind::SwoopingPterodactyl { swooping: true, .. }
        ));
        assert!((o.pos.y + o.size.y - target_bottom).abs() < 1e-3);
    }

    #[test]
    fn kamikaze_dives_until_ground_then_stays() {
        let mut o = spawn(ObstacleType::KamikazePterodactyl, 3);
        assert!(o.pos.y <= 25.0);
        for _ in 0..120 {
            o.update(300.0, DT);
        }
        assert!(matches!(
            o.kind,
            ObstacleKind::KamikazePterodactyl { landed: true, .. }
        ));
        assert_eq!(o.pos.y + o.size.y, GROUND_Y);
        o.update(300.0, DT);
        assert_eq!(o.pos.y + o.size.y, GROUND_Y);
    }

    #[test]
    fn levitating_cactus_launches_then_hovers() {
        let mut o = spawn(ObstacleType::LevitatingCactus, 11);
        let ObstacleKind::LevitatingCactus {
            target_center_y, ..
        } = o.kind
        else {
            panic!("wrong kind");
        };
        assert_eq!(o.pos.y + o.size.y, GROUND_Y);

        let mut saw_launching = false;
        for _ in 0..600 {
            o.update(300.0, DT);
            if let ObstacleKind::LevitatingCactus { phase, .. } = o.kind {
                saw_launching |= phase == LevitationPhase::Launching;
            }
        }
        assert!(saw_launching);
        assert!(matches!(
            o.kind,
            ObstacleKind::LevitatingCactus {
                phase: LevitationPhase::Levitating,
                ..
            }
        ));
        assert!((o.pos.y + o.size.y / 2.0 - target_center_y).abs() < 1e-3);
    }

    #[test]
    fn boulder_rotates_at_its_own_rate() {
        let mut o = spawn(ObstacleType::Boulder, 5);
        let ObstacleKind::Boulder { rotation_speed, .. } = o.kind else {
            panic!("wrong kind");
        };
        assert!((3.0..=6.0).contains(&rotation_speed));
        o.update(300.0, 0.5);
        let ObstacleKind::Boulder { rotation, .. } = o.kind else {
            panic!("wrong kind");
        };
        assert!((rotation - rotation_speed * 0.5).abs() < 1e-5);
    }

    #[test]
    fn hitboxes_are_padded_per_type() {
        let cactus = spawn(ObstacleType::Cactus, 1);
        let b = cactus.bounds();
        assert_eq!(b.w, CACTUS_SIZE.x - 6.0);
        assert_eq!(b.h, CACTUS_SIZE.y - 6.0);

        let pit = spawn(ObstacleType::SnakePit, 1);
        let b = pit.bounds();
        assert_eq!(b.w, SNAKE_PIT_SIZE.x - 4.0);
        assert_eq!(b.h, SNAKE_PIT_SIZE.y);
    }

    #[test]
    fn off_screen_once_fully_past_left_edge() {
        let mut o = spawn(ObstacleType::Cactus, 1);
        o.pos.x = -o.size.x;
        assert!(!o.is_off_screen());
        o.pos.x -= 0.1;
        assert!(o.is_off_screen());
    }
}
