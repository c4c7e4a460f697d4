//! Canvas-like drawing surface
//!
//! The scene only talks to this trait. The browser implements it over a 2D
//! canvas context; [`super::MeshSurface`] implements it by tessellating into
//! vertex lists.

use glam::Vec2;

use crate::assets::AssetId;
use crate::sim::{Rect, Rgb};

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Normalized channels for GPU buffers
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::rgb(c.r, c.g, c.b)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(200, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BROWN: Color = Color::rgb(139, 69, 19);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const PLAYER_FALLBACK: Color = Color::rgb(0, 180, 0);
    pub const SNOW: Color = Color::rgb(220, 220, 220);
    pub const MAGNET_RING: Color = Color::rgba(255, 255, 0, 0.5);
    pub const BUTTON_BG: Color = Color::rgba(100, 100, 100, 0.7);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 0.7);
    pub const TITLE_OVERLAY: Color = Color::rgba(0, 0, 0, 0.5);
    pub const ERROR_BG: Color = Color::rgb(200, 0, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Font and placement for one text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Centered both ways
    pub fn centered(self) -> Self {
        self.align(TextAlign::Center).baseline(TextBaseline::Middle)
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px Arial", weight, self.size)
    }
}

/// Draw primitives the scene needs
pub trait Surface {
    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Draw a loaded image stretched over `rect`, rotated about its center
    fn draw_image(&mut self, image: AssetId, rect: Rect, rotation: f32, alpha: f32);

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_strings() {
        assert_eq!(colors::BROWN.to_css(), "rgb(139, 69, 19)");
        assert_eq!(colors::BUTTON_BG.to_css(), "rgba(100, 100, 100, 0.7)");
    }

    #[test]
    fn fonts() {
        assert_eq!(TextStyle::new(24.0, colors::WHITE).font(), "24px Arial");
        assert_eq!(TextStyle::new(48.0, colors::WHITE).bold().font(), "bold 48px Arial");
    }
}
