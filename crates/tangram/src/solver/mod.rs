//! Placement solver: cover shadow pieces with classified blocks.
//!
//! Purpose
//! - For each shadow (ascending area) find blocks, target positions and
//!   rotations that reproduce it, or report it as unsolved.
//!
//! Search and pruning
//! - Exact-match fast path: a remaining block congruent to the whole piece is
//!   placed directly after a vertex-by-vertex check.
//! - General search: lay a block corner into a shadow corner whose angle is at
//!   least as large, aligned with either adjacent shadow edge. A placement is
//!   valid when no edges cross properly and `block − piece` is below
//!   `coverage_tolerance`. The residual `piece − block` joins the queue.
//! - Blocks larger than the piece are skipped; a branch fails as soon as the
//!   remaining block area cannot cover the queue.
//! - The used-mask is a `u64` passed by value, so backtracking needs no undo.
//!
//! Frames
//! - Search geometry runs in the puzzle frame (pixels / `length_factor`);
//!   `Placement::position` is pixel space again.
//!
//! Code cross-refs: `Solver`, `SearchCfg`, `Solution`, `shape::ShapeType::placed`

mod dfs;
mod residual;
mod types;

pub use dfs::{Solver, MAX_BLOCKS};
pub use types::{Placement, SearchCfg, SearchStats, Solution, UnsolvedPiece, UnsolvedReason};

#[cfg(test)]
mod tests;
