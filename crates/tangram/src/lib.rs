//! Tangram shadow solver: block classification, silhouette decomposition and
//! placement search.
//!
//! Pipeline
//! - `shape`: measured block contour + pixel area → `Block` (one of five shapes,
//!   with rotation relative to the canonical orientation).
//! - `shadow`: silhouette contour → simple `Shadow` pieces.
//! - `solver`: blocks × shadows → `Solution` (placements, unsolved pieces).
//! - `api::solve_scene` runs all three over a whole scene.
//!
//! Every tolerance is configuration (`config::Config`); nothing reads globals.
//! Logging goes through `tracing`; installing a subscriber is the caller's job.

pub mod api;
pub mod config;
pub mod error;
pub mod geom2;
pub mod shadow;
pub mod shape;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{Config, Units};
pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{solve_scene, Contour, Scene, SceneReport};
    pub use crate::config::{Config, Units};
    pub use crate::geom2::{GeomCfg, Point, Polygon};
    pub use crate::shadow::{DecomposeCfg, Decomposer, Shadow};
    pub use crate::shape::{Block, BlockId, ClassifyCfg, Classifier, ShapeType};
    pub use crate::solver::{Placement, SearchCfg, Solution, Solver, UnsolvedReason};
}
