//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in playfield units (y down).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Square of side `size` centered on `center`
pub fn square(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    rect(center - Vec2::splat(size / 2.0), Vec2::splat(size), color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let a = Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;
        let b = Vec2::from_angle((i + 1) as f32 / segments as f32 * TAU) * radius;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(center.x + a.x, center.y + a.y, color));
        vertices.push(Vertex::new(center.x + b.x, center.y + b.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let d1 = Vec2::from_angle(i as f32 / segments as f32 * TAU);
        let d2 = Vec2::from_angle((i + 1) as f32 / segments as f32 * TAU);
        let (inner1, outer1) = (center + d1 * inner_radius, center + d1 * outer_radius);
        let (inner2, outer2) = (center + d2 * inner_radius, center + d2 * outer_radius);

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Dashed outline of a rectangle, `dash` units on, `dash` units off
pub fn dashed_outline(
    pos: Vec2,
    size: Vec2,
    thickness: f32,
    dash: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut x = 0.0;
    while x < size.x {
        let len = dash.min(size.x - x);
        vertices.extend(rect(pos + Vec2::new(x, 0.0), Vec2::new(len, thickness), color));
        vertices.extend(rect(
            pos + Vec2::new(x, size.y - thickness),
            Vec2::new(len, thickness),
            color,
        ));
        x += dash * 2.0;
    }
    let mut y = 0.0;
    while y < size.y {
        let len = dash.min(size.y - y);
        vertices.extend(rect(pos + Vec2::new(0.0, y), Vec2::new(thickness, len), color));
        vertices.extend(rect(
            pos + Vec2::new(size.x - thickness, y),
            Vec2::new(thickness, len),
            color,
        ));
        y += dash * 2.0;
    }
    vertices
}

/// HSL (all components in [0, 1]) to linear-ish RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

pub fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgb(0.5, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn test_rect_bounds() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 8.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        for vert in &v {
            assert!((10.0..=15.0).contains(&vert.position[0]));
            assert!((20.0..=28.0).contains(&vert.position[1]));
        }
    }

    #[test]
    fn test_circle_radius() {
        let center = Vec2::new(3.0, 4.0);
        for v in circle(center, 2.0, [1.0; 4], 12) {
            let d = Vec2::from(v.position).distance(center);
            assert!(d < 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_dashed_outline_stays_inside() {
        let size = Vec2::new(100.0, 60.0);
        let v = dashed_outline(Vec2::ZERO, size, 2.0, 5.0, [1.0; 4]);
        assert!(!v.is_empty());
        for vert in &v {
            assert!(vert.position[0] >= 0.0 && vert.position[0] <= size.x);
            assert!(vert.position[1] >= 0.0 && vert.position[1] <= size.y);
        }
    }
}
