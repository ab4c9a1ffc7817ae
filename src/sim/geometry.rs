//! Segment intersection and reflection primitives
//!
//! Pure functions over `Vec2`. Degenerate inputs (parallel segments,
//! zero-length motion) report no intersection instead of failing.

use glam::Vec2;

/// Intersection point of two finite segments `p1→p2` and `q1→q2`.
///
/// Uses the parametric cross-product form `p1 + t·r = q1 + u·s` and accepts
/// the hit only when both `t` and `u` lie in `[0, 1]`. Parallel and collinear
/// segments (`r × s == 0`) are reported as no intersection, even when they
/// overlap.
pub fn segment_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> Option<Vec2> {
    let r = p2 - p1;
    let s = q2 - q1;

    let rxs = r.perp_dot(s);
    if rxs == 0.0 {
        return None;
    }

    let qp = q1 - p1;
    let t = qp.perp_dot(s) / rxs;
    let u = qp.perp_dot(r) / rxs;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + t * r)
    } else {
        None
    }
}

/// First point where segment `p1→p2` meets the circle boundary.
///
/// Solves `|p1 + t·d - center|² = radius²` for `t`. The smaller root wins
/// when it lies on the segment, otherwise the larger one; a segment that
/// starts inside the circle therefore reports its exit point.
pub fn segment_circle_intersect(p1: Vec2, p2: Vec2, center: Vec2, radius: f32) -> Option<Vec2> {
    let d = p2 - p1;
    let f = p1 - center;

    let a = d.dot(d);
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let c = f.dot(f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    let t = if (0.0..=1.0).contains(&t1) {
        t1
    } else if (0.0..=1.0).contains(&t2) {
        t2
    } else {
        return None;
    };

    Some(p1 + t * d)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit normal of the edge `a→b` (its direction rotated a quarter turn counter-clockwise)
#[inline]
pub fn edge_normal(a: Vec2, b: Vec2) -> Vec2 {
    let dir = (b - a).normalize_or_zero();
    Vec2::new(-dir.y, dir.x)
}
