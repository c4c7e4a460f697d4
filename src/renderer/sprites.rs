//! Per-entity drawing
//!
//! Every entity draws its sprite when the image is ready and a solid-color
//! placeholder otherwise. Drawing only reads entity state.

use glam::Vec2;

use super::surface::{Color, Surface, TextStyle, colors};
use crate::assets::{AssetId, AssetRegistry};
use crate::consts::*;
use crate::sim::{Collectible, FloatingText, Obstacle, ObstacleKind, Player, PowerUp, Rect, Snowflake};

/// Read-only context shared by all entity draws in a frame
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub assets: &'a AssetRegistry,
    /// Play clock, for fades
    pub clock: f64,
    pub magnet_radius: f32,
}

impl DrawContext<'_> {
    /// Image if ready, otherwise a filled rectangle
    fn image_or_fill(&self, surface: &mut dyn Surface, image: AssetId, rect: Rect, rotation: f32, fallback: Color) {
        if self.assets.is_ready(image) {
            surface.draw_image(image, rect, rotation, 1.0);
        } else {
            surface.fill_rect(rect, fallback);
        }
    }
}

/// Something that can put itself on a surface
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext);
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        let rect = self.rect();
        ctx.image_or_fill(surface, self.sprite(), rect, 0.0, colors::PLAYER_FALLBACK);

        let center = self.center();
        if self.shield_active() {
            if ctx.assets.is_ready(AssetId::ShieldEffect) {
                let effect = centered_rect(center, SHIELD_EFFECT_SIZE);
                surface.draw_image(AssetId::ShieldEffect, effect, 0.0, 0.6);
            } else {
                surface.stroke_circle(center, rect.w * 0.7, 3.0, colors::BLUE.with_alpha(0.6));
            }
        }
        if self.magnet_active() {
            surface.stroke_circle(center, ctx.magnet_radius * 0.8, 2.0, colors::MAGNET_RING);
        }
    }
}

impl Draw for Obstacle {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        let (rotation, fallback) = match self.kind {
            ObstacleKind::Boulder { rotation, .. } => (rotation, colors::BROWN),
            ObstacleKind::SnakePit => (0.0, colors::DARK_GREEN),
            _ => (0.0, colors::RED),
        };
        ctx.image_or_fill(surface, self.obstacle_type().sprite(), self.rect(), rotation, fallback);
    }
}

impl Draw for PowerUp {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        if self.collected {
            return;
        }
        ctx.image_or_fill(surface, self.kind.icon(), self.rect(), 0.0, colors::YELLOW);
    }
}

impl Draw for Collectible {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        if self.collected {
            return;
        }
        let sprite = self.kind.sprite();
        if ctx.assets.is_ready(sprite) {
            surface.draw_image(sprite, self.rect(), 0.0, 1.0);
            return;
        }
        surface.fill_rect(self.rect(), colors::YELLOW);
        let style = TextStyle::new(10.0, colors::BLACK).centered();
        surface.text(&self.value.to_string(), self.center(), &style);
    }
}

impl Draw for FloatingText {
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        let color = colors::YELLOW.with_alpha(self.alpha(ctx.clock));
        let style = TextStyle::new(18.0, color).bold().centered();
        surface.text(&self.text, self.pos, &style);
    }
}

impl Draw for Snowflake {
    fn draw(&self, surface: &mut dyn Surface, _ctx: &DrawContext) {
        surface.fill_circle(self.pos, self.size, colors::SNOW);
    }
}

/// Draw a list of entities in order
pub fn draw_all<'a, T: Draw + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    surface: &mut dyn Surface,
    ctx: &DrawContext,
) {
    for item in items {
        item.draw(surface, ctx);
    }
}

/// Top-left of a box of `size` centered on `center`
pub fn centered_rect(center: Vec2, size: Vec2) -> Rect {
    Rect::from_pos_size(center - size / 2.0, size)
}
