//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::surface::Color;
use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used for full circles
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: Rect, color: Color) -> Vec<Vertex> {
    let tl = Vec2::new(rect.x, rect.y);
    let tr = Vec2::new(rect.right(), rect.y);
    let bl = Vec2::new(rect.x, rect.bottom());
    let br = Vec2::new(rect.right(), rect.bottom());
    quad(tl, tr, bl, br, color)
}

/// Rectangle rotated by `rotation` radians about its center
pub fn rotated_rect(rect: Rect, rotation: f32, color: Color) -> Vec<Vertex> {
    let center = rect.center();
    let half = Vec2::new(rect.w, rect.h) / 2.0;
    let rot = Vec2::from_angle(rotation);
    let corner = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));
    quad(
        corner(-half.x, -half.y),
        corner(half.x, -half.y),
        corner(-half.x, half.y),
        corner(half.x, half.y),
        color,
    )
}

fn quad(tl: Vec2, tr: Vec2, bl: Vec2, br: Vec2, color: Color) -> Vec<Vertex> {
    vec![
        Vertex::at(tl, color),
        Vertex::at(bl, color),
        Vertex::at(tr, color),
        Vertex::at(tr, color),
        Vertex::at(bl, color),
        Vertex::at(br, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let dir1 = Vec2::from_angle((i as f32 / segments as f32) * 2.0 * PI);
        let dir2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * 2.0 * PI);

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(from + perp, to + perp, from - perp, to - perp, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Color = Color::rgb(10, 20, 30);

    #[test]
    fn rect_is_two_triangles_inside_bounds() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let v = rect(r, C);
        assert_eq!(v.len(), 6);
        for vert in &v {
            let p = vert.pos();
            assert!(p.x >= 10.0 && p.x <= 40.0);
            assert!(p.y >= 20.0 && p.y <= 60.0);
        }
    }

    #[test]
    fn circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let v = circle(center, 10.0, C, CIRCLE_SEGMENTS);
        assert_eq!(v.len(), (CIRCLE_SEGMENTS * 3) as usize);
        assert!(v.iter().all(|vert| vert.pos().distance(center) <= 10.0 + 1e-3));
    }

    #[test]
    fn ring_lies_between_radii() {
        let v = ring(Vec2::ZERO, 8.0, 10.0, C, 16);
        assert_eq!(v.len(), 96);
        for vert in &v {
            let d = vert.pos().length();
            assert!(d > 8.0 - 1e-3 && d < 10.0 + 1e-3);
        }
    }

    #[test]
    fn degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, C).is_empty());
        assert_eq!(line(Vec2::ZERO, Vec2::X * 5.0, 2.0, C).len(), 6);
    }

    #[test]
    fn rotated_rect_keeps_center() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        let v = rotated_rect(r, 1.0, C);
        let sum: Vec2 = [v[0].pos(), v[2].pos(), v[1].pos(), v[5].pos()].into_iter().sum();
        assert!((sum / 4.0).distance(r.center()) < 1e-3);
    }
}
