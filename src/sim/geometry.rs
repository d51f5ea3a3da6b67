//! Polygon geometry kernel
//!
//! Pure functions over vertex slices. Polygons are closed implicitly: the last
//! vertex connects back to the first. Degenerate edges are absorbed here and
//! never reach callers as NaN or panics.

use glam::Vec2;

/// Squared length below which an edge is treated as a single point
const DEGENERATE_EDGE_SQ: f32 = 1e-12;

/// Unit vector pointing along `theta`
#[inline]
pub fn direction_vector(theta: f32) -> Vec2 {
    // Re-normalize: cos/sin drift slightly off the unit circle in f32
    Vec2::new(theta.cos(), theta.sin()).normalize()
}

/// `v` rotated a quarter turn counter-clockwise
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Signed angle from `from` to `to`, in (-π, π]
#[inline]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Even-odd containment test using a horizontal ray cast toward +x
///
/// An edge counts as crossed when the point's y lies in `(y1, y2]` (or
/// `(y2, y1]`), so a vertex shared by two edges is counted once. Points
/// exactly on a left or vertical edge count as inside.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut p1 = vertices[0];
    for i in 1..=n {
        let p2 = vertices[i % n];

        // Horizontal edges can never be crossed by a horizontal ray
        if p1.y != p2.y
            && ((p1.y < point.y && point.y <= p2.y) || (p2.y < point.y && point.y <= p1.y))
        {
            // Interpolate from the lower endpoint so both windings round identically
            let (lo, hi) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
            let x_intersect = (point.y - lo.y) * (hi.x - lo.x) / (hi.y - lo.y) + lo.x;
            if point.x <= x_intersect {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}

/// Closest point to `query` on the segment `a`-`b`
#[inline]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, query: Vec2) -> Vec2 {
    let edge = b - a;
    let len_sq = edge.length_squared();
    if len_sq < DEGENERATE_EDGE_SQ {
        return a;
    }
    let t = ((query - a).dot(edge) / len_sq).clamp(0.0, 1.0);
    a + edge * t
}

/// Closest point to `query` on the polygon's boundary
///
/// Ties resolve to the first edge in vertex order. Returns `None` only for an
/// empty vertex list.
pub fn closest_point_on_boundary(vertices: &[Vec2], query: Vec2) -> Option<Vec2> {
    let n = vertices.len();
    let mut best: Option<(Vec2, f32)> = None;

    for i in 0..n {
        let candidate = closest_point_on_segment(vertices[i], vertices[(i + 1) % n], query);
        let dist_sq = candidate.distance_squared(query);
        match best {
            Some((_, best_sq)) if dist_sq >= best_sq => {}
            _ => best = Some((candidate, dist_sq)),
        }
    }

    best.map(|(point, _)| point)
}
