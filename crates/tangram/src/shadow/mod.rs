//! Shadow decomposer: raw silhouette contours → simple target polygons.
//!
//! Purpose
//! - A silhouette traced by the vision step may be non-simple: two pieces of
//!   the target touching at a single corner come back as one contour that
//!   visits that corner twice. Split it there, so every `Shadow` is a simple
//!   counterclockwise loop the solver can cover piece by piece.
//! - Snap corner angles onto multiples of 45° and drop straight vertices.
//!
//! Conventions
//! - Input and output are pixel space; `Shadow::area` is in puzzle units.
//! - A loop whose snapped angles match neither winding's `(n - 2) · 180` sum is
//!   kept with the closer winding and logged at `warn`.
//!
//! Code cross-refs: `Decomposer`, `Shadow`, `DecomposeCfg`, `geom2::Polygon`

mod decompose;
mod types;

pub use decompose::Decomposer;
pub use types::{DecomposeCfg, Shadow};
