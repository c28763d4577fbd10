//! Segment intersection and containment predicates.
//!
//! - `intersection_parameters`: 2×2 solve for the parameters `(s, t)` where two
//!   supporting lines meet.
//! - `segments_intersect`: proper crossings only; shared endpoints do not count.
//! - `point_in_polygon`: +x ray cast over an edge list.
use nalgebra::Matrix2;

use super::types::{Edge, Point};

/// Solve `e1.p1 + s·(e1.p2 - e1.p1) = e2.p1 + t·(e2.p2 - e2.p1)` for `(s, t)`.
///
/// Returns `None` when the edges are parallel (`|det| <= eps_det`).
pub fn intersection_parameters(e1: &Edge, e2: &Edge, eps_det: f64) -> Option<(f64, f64)> {
    let d1 = e1.dir();
    let d2 = e2.dir();
    // columns: [d1, -d2] · (s, t)^T = e2.p1 - e1.p1
    let a = Matrix2::from_columns(&[d1, -d2]);
    let det = a.determinant();
    if !det.is_finite() || det.abs() <= eps_det {
        return None;
    }
    let inv = a.try_inverse()?;
    let st = inv * (e2.p1 - e1.p1);
    Some((st.x, st.y))
}

/// True iff both parameters lie strictly inside `(eps, 1 - eps)`.
///
/// Touching at an endpoint is excluded so that adjacent edges sharing a
/// vertex never count as intersecting.
pub fn segments_intersect(e1: &Edge, e2: &Edge, eps: f64, eps_det: f64) -> bool {
    match intersection_parameters(e1, e2, eps_det) {
        Some((s, t)) => inside_open(s, eps) && inside_open(t, eps),
        None => false,
    }
}

#[inline]
fn inside_open(x: f64, eps: f64) -> bool {
    x > eps && x < 1.0 - eps
}

/// Ray cast in the +x direction; odd crossing count ⇒ inside.
///
/// A crossing counts when the ray parameter is positive and the edge
/// parameter lies strictly inside `(eps, 1 - eps)`. Points on the boundary are
/// not classified reliably; pair with `point_on_boundary` when that matters.
pub fn point_in_polygon(p: Point, edges: &[Edge], eps: f64, eps_det: f64) -> bool {
    let ray = Edge::new(p, p + Point::new(1.0, 0.0));
    let crossings = edges
        .iter()
        .filter(|e| match intersection_parameters(&ray, e, eps_det) {
            Some((s, t)) => s > 0.0 && inside_open(t, eps),
            None => false,
        })
        .count();
    crossings % 2 == 1
}

/// Distance from `p` to some edge is at most `eps`.
pub fn point_on_boundary(p: Point, edges: &[Edge], eps: f64) -> bool {
    edges.iter().any(|e| distance_to_segment(p, e) <= eps)
}

fn distance_to_segment(p: Point, e: &Edge) -> f64 {
    let d = e.dir();
    let len2 = d.norm_squared();
    if len2 <= 0.0 {
        return (p - e.p1).norm();
    }
    let s = ((p - e.p1).dot(&d) / len2).clamp(0.0, 1.0);
    (p - e.at(s)).norm()
}
