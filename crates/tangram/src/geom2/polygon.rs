//! Vertex-loop polygon with derived area and interior angles.
//!
//! Invariants:
//! - Vertex order is the winding order; the loop closes implicitly.
//! - No normalization on construction. Use `to_ccw` before comparing
//!   angle sequences of polygons from different sources.

use serde::{Deserialize, Serialize};

use super::types::{approx_eq, Edge, Point};
use super::util::{angle, centroid, signed_area};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn from_xy(points: &[[f64; 2]]) -> Self {
        Self {
            vertices: points.iter().map(|p| Point::new(p[0], p[1])).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i` with wrap-around in both directions.
    #[inline]
    pub fn vertex(&self, i: isize) -> Point {
        let n = self.vertices.len() as isize;
        self.vertices[i.rem_euclid(n) as usize]
    }

    /// Unsigned shoelace area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same loop in counterclockwise order (reversed if needed).
    pub fn to_ccw(&self) -> Polygon {
        let mut out = self.clone();
        if !out.is_ccw() {
            out.vertices.reverse();
        }
        out
    }

    #[inline]
    pub fn centroid(&self) -> Point {
        centroid(&self.vertices)
    }

    /// Edges `v[i] → v[i+1]`, closing edge included.
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Interior angles in degrees, one per vertex, range `[0, 360)`.
    ///
    /// Computed from `next - v` and `prev - v` with the reflex fix, which is
    /// the interior angle for counterclockwise loops. For clockwise loops the
    /// result is the exterior angle; see `interior_angles_both`.
    pub fn interior_angles(&self) -> Vec<f64> {
        let n = self.vertices.len() as isize;
        (0..n)
            .map(|i| {
                let v = self.vertex(i);
                let a = self.vertex(i + 1) - v;
                let b = self.vertex(i - 1) - v;
                angle(a, b, true)
            })
            .collect()
    }

    /// Angles for both winding interpretations: `(as_given, 360 - as_given)`.
    pub fn interior_angles_both(&self) -> (Vec<f64>, Vec<f64>) {
        let first = self.interior_angles();
        let second = first.iter().map(|a| 360.0 - a).collect();
        (first, second)
    }

    /// Translate, then return a new polygon.
    pub fn translated(&self, by: Point) -> Polygon {
        Polygon::new(self.vertices.iter().map(|p| p + by).collect())
    }

    pub fn scaled(&self, factor: f64) -> Polygon {
        Polygon::new(self.vertices.iter().map(|p| p * factor).collect())
    }

    /// Drop consecutive vertices closer than `eps` (closing pair included).
    pub fn dedup(&self, eps: f64) -> Polygon {
        let mut out: Vec<Point> = Vec::with_capacity(self.vertices.len());
        for &p in &self.vertices {
            if out.last().is_none_or(|&q| !approx_eq(p, q, eps)) {
                out.push(p);
            }
        }
        while out.len() > 1 && approx_eq(out[0], out[out.len() - 1], eps) {
            out.pop();
        }
        Polygon::new(out)
    }

    /// Each vertex of `self` has a counterpart in `other` within `eps`, and the counts agree.
    pub fn same_vertex_set(&self, other: &Polygon, eps: f64) -> bool {
        self.len() == other.len()
            && self
                .vertices
                .iter()
                .all(|p| other.vertices.iter().any(|q| approx_eq(*p, *q, eps)))
    }
}
