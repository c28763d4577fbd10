//! Basic 2D types and tolerances.
//!
//! - `GeomCfg`: centralizes the epsilons used by equality and intersection tests.
//! - `Edge`: a segment `p1 → p2` with direction-sensitive and
//!   direction-insensitive equality.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A 2D point (or vector). Arithmetic comes from nalgebra.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// `eps` is used for point equality and for the endpoint exclusion zone of
/// `segments_intersect` / `point_in_polygon`; `eps_det` guards the 2×2 solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    pub eps: f64,
    pub eps_det: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            eps_det: 1e-12,
        }
    }
}

/// `|p - q| <= eps`.
#[inline]
pub fn approx_eq(p: Point, q: Point, eps: f64) -> bool {
    (p - q).norm() <= eps
}

/// Segment between two points. Order matters only for `same_directed`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub p1: Point,
    pub p2: Point,
}

impl Edge {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`.
    #[inline]
    pub fn dir(&self) -> Point {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.dir().norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.p1 + self.p2) * 0.5
    }

    /// Point at parameter `s` along the edge (`s=0` → `p1`, `s=1` → `p2`).
    #[inline]
    pub fn at(&self, s: f64) -> Point {
        self.p1 + self.dir() * s
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            p1: self.p2,
            p2: self.p1,
        }
    }

    /// Same endpoints in the same order.
    #[inline]
    pub fn same_directed(&self, other: &Edge, eps: f64) -> bool {
        approx_eq(self.p1, other.p1, eps) && approx_eq(self.p2, other.p2, eps)
    }

    /// Same endpoints in either order.
    #[inline]
    pub fn same_undirected(&self, other: &Edge, eps: f64) -> bool {
        self.same_directed(other, eps) || self.same_directed(&other.reversed(), eps)
    }

    /// True if `p` is one of the two endpoints.
    #[inline]
    pub fn touches(&self, p: Point, eps: f64) -> bool {
        approx_eq(self.p1, p, eps) || approx_eq(self.p2, p, eps)
    }
}
