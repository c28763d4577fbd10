//! Shadow pieces and decomposer tolerances.

use serde::{Deserialize, Serialize};

use crate::geom2::Polygon;

/// Decomposer tolerances. Distances are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeCfg {
    /// Corners closer than this are merged into their mean.
    pub merge_distance: f64,
    /// Two merged corners within this distance are the same vertex.
    pub vertex_eps: f64,
    /// Max distance (degrees) to snap an angle onto a multiple of 45°.
    pub angle_tolerance: f64,
}

impl Default for DecomposeCfg {
    fn default() -> Self {
        Self {
            merge_distance: 10.0,
            vertex_eps: 0.5,
            angle_tolerance: 22.5,
        }
    }
}

/// A simple target polygon in pixel space.
///
/// Invariant: the loop is closed and simple, counterclockwise, no 180° vertices,
/// and `interior_angles` is aligned with `polygon.vertices`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub polygon: Polygon,
    pub interior_angles: Vec<f64>,
    /// Shoelace pixel area divided by `area_factor`.
    pub area: f64,
}

impl Shadow {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }

    /// Area rounded to the nearest half unit (the granularity of block areas).
    pub fn snapped_area(&self) -> f64 {
        (self.area * 2.0).round() / 2.0
    }

    /// `(n - 2) · 180` matches the angle sum.
    pub fn angle_sum_consistent(&self) -> bool {
        let ideal = (self.vertex_count() as f64 - 2.0) * 180.0;
        let sum: f64 = self.interior_angles.iter().sum();
        (sum - ideal).abs() < 1e-6
    }
}
