//! Backend-agnostic surface
//!
//! [`MeshSurface`] tessellates vector primitives into [`Vertex`] triangles and
//! records image quads and text runs separately, so a GPU backend can upload
//! the triangles in one buffer and batch sprites and glyphs on its own.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::surface::{Color, Surface, TextStyle};
use super::vertex::Vertex;
use crate::assets::AssetId;
use crate::sim::Rect;

/// A vector primitive as it was requested, in surface space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteQuad {
    pub image: AssetId,
    pub rect: Rect,
    pub rotation: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

#[derive(Debug, Default)]
pub struct MeshSurface {
    vertices: Vec<Vertex>,
    ops: Vec<DrawOp>,
    images: Vec<SpriteQuad>,
    texts: Vec<TextRun>,
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded, ready for the next frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.ops.clear();
        self.images.clear();
        self.texts.clear();
        self.offset = Vec2::ZERO;
        self.saved.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn images(&self) -> &[SpriteQuad] {
        &self.images
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Every text run's string, in draw order
    pub fn text_strings(&self) -> Vec<&str> {
        self.texts.iter().map(|t| t.text.as_str()).collect()
    }

    fn push(&mut self, op: DrawOp, vertices: Vec<Vertex>) {
        self.ops.push(op);
        self.vertices.extend(vertices);
    }
}

impl Surface for MeshSurface {
    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.translated(self.offset);
        self.push(DrawOp::FillRect { rect, color }, shapes::rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let center = center + self.offset;
        self.push(
            DrawOp::FillCircle { center, radius, color },
            shapes::circle(center, radius, color, CIRCLE_SEGMENTS),
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let center = center + self.offset;
        let half = width / 2.0;
        self.push(
            DrawOp::StrokeCircle {
                center,
                radius,
                width,
                color,
            },
            shapes::ring(center, (radius - half).max(0.0), radius + half, color, CIRCLE_SEGMENTS),
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let (from, to) = (from + self.offset, to + self.offset);
        self.push(
            DrawOp::Line {
                from,
                to,
                width,
                color,
            },
            shapes::line(from, to, width, color),
        );
    }

    fn draw_image(&mut self, image: AssetId, rect: Rect, rotation: f32, alpha: f32) {
        self.images.push(SpriteQuad {
            image,
            rect: rect.translated(self.offset),
            rotation,
            alpha,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.texts.push(TextRun {
            text: text.to_string(),
            pos: pos + self.offset,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::colors;

    #[test]
    fn translate_applies_until_restore() {
        let mut s = MeshSurface::new();
        s.save();
        s.translate(Vec2::new(5.0, -3.0));
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::RED);
        s.restore();
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::RED);

        assert_eq!(
            s.ops()[0],
            DrawOp::FillRect {
                rect: Rect::new(5.0, -3.0, 1.0, 1.0),
                color: colors::RED
            }
        );
        assert_eq!(
            s.ops()[1],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                color: colors::RED
            }
        );
        assert_eq!(s.vertices().len(), 12);
    }

    #[test]
    fn images_and_text_are_recorded_apart() {
        let mut s = MeshSurface::new();
        s.draw_image(AssetId::Cactus, Rect::new(0.0, 0.0, 25.0, 50.0), 0.0, 1.0);
        s.text("hi", Vec2::ZERO, &TextStyle::new(12.0, colors::BLACK));
        assert!(s.ops().is_empty());
        assert!(s.vertices().is_empty());
        assert_eq!(s.images().len(), 1);
        assert_eq!(s.text_strings(), vec!["hi"]);

        s.clear();
        assert!(s.images().is_empty() && s.texts().is_empty());
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut s = MeshSurface::new();
        s.translate(Vec2::X);
        s.restore();
        s.fill_circle(Vec2::ZERO, 2.0, colors::SNOW);
        assert_eq!(
            s.ops()[0],
            DrawOp::FillCircle {
                center: Vec2::X,
                radius: 2.0,
                color: colors::SNOW
            }
        );
    }
}
