//! Shape classifier: measured block contours → canonical tangram shapes.
//!
//! Purpose
//! - Normalize noisy measurements (area, corner angles) onto the canonical
//!   values of the five tangram shapes and pick the shape.
//! - Measure each block's rotation against its shape's canonical orientation,
//!   reduced by the shape's rotational symmetry (90° square, 180°
//!   parallelogram, none for triangles).
//!
//! Code cross-refs: `ShapeType`, `Block`, `Classifier`, `geom2::Polygon`

mod classify;
mod types;

pub(crate) use classify::same_multiset;
pub use classify::{ClassifyCfg, Classifier};
pub use types::{Block, BlockId, ShapeType};
