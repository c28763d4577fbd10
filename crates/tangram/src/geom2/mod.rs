//! 2D geometry kernel for noisy polygon outlines.
//!
//! Purpose
//! - Provide the small set of pure, stateless predicates the classifier,
//!   decomposer and solver share: reflex-aware angles, shoelace areas,
//!   segment intersection parameters and a ray-cast point-in-polygon test.
//! - Keep every tolerance explicit (`GeomCfg`) instead of ambient constants.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` in whatever frame the caller uses
//!   (pixel space for measured outlines, puzzle frame inside the solver).
//! - Angles are degrees. Rotations are counterclockwise in the input frame.
//! - Equality is always epsilon-based (`approx_eq`, `Edge::same_undirected`).
//!
//! Code cross-refs: `Polygon`, `Edge`, `GeomCfg`

mod polygon;
mod solvers;
mod types;
mod util;

pub use polygon::Polygon;
pub use solvers::{
    intersection_parameters, point_in_polygon, point_on_boundary, segments_intersect,
};
pub use types::{approx_eq, Edge, GeomCfg, Point};
pub use util::{
    angle, centroid, normalize_degrees, rotate_about, rotate_points, signed_angle, signed_area,
    snap_to, snap_to_multiple,
};

#[cfg(test)]
mod tests;
