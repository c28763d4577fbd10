//! Search configuration and result types.

use serde::{Deserialize, Serialize};

use crate::geom2::Point;
use crate::shadow::Shadow;
use crate::shape::{BlockId, ShapeType};

/// Search configuration. Areas and distances are in the puzzle frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCfg {
    /// Max area of `block − piece` for a placement to count as inside.
    /// Also the slack for area comparisons (pruning, exact match).
    pub coverage_tolerance: f64,
    /// Residual components below this area are dropped as slivers.
    pub min_piece_area: f64,
    /// Per-vertex distance for the fast-path outline check.
    pub vertex_match_tolerance: f64,
    /// Max distance (degrees) to snap a residual angle onto a multiple of 45°.
    pub angle_tolerance: f64,
    /// Max general-search nodes per shadow piece. `None` runs unbounded.
    pub node_budget: Option<u64>,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            coverage_tolerance: 0.02,
            min_piece_area: 0.05,
            vertex_match_tolerance: 0.1,
            angle_tolerance: 22.5,
            node_budget: None,
        }
    }
}

/// Where one block goes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub block: BlockId,
    pub shape: ShapeType,
    /// Index of the input shadow this placement covers.
    pub shadow: usize,
    /// Target centroid (vertex mean), pixel space.
    pub position: Point,
    /// Target rotation in degrees, in `[0, period)`.
    pub rotation: f64,
    pub via_fast_path: bool,
}

impl Placement {
    /// Canonical outline at the target pose, in pixel space.
    pub fn outline(&self, length_factor: f64) -> Vec<Point> {
        self.shape.placed(self.position, self.rotation, length_factor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsolvedReason {
    /// Search exhausted every combination.
    NoPlacement,
    /// The pool was empty when this piece came up.
    NoBlocksLeft,
    /// `SearchCfg::node_budget` ran out.
    BudgetExhausted,
}

/// A shadow the solver could not cover. Non-fatal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnsolvedPiece {
    /// Index of the input shadow.
    pub index: usize,
    pub shadow: Shadow,
    pub reason: UnsolvedReason,
}

/// Search counters, summed over all pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes_expanded: u64,
    pub candidates_tried: u64,
    pub fast_path_hits: u64,
    pub rejected_by_angle: u64,
    pub rejected_by_coverage: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// In the order the pieces were solved (ascending shadow area).
    pub placements: Vec<Placement>,
    pub unsolved: Vec<UnsolvedPiece>,
    pub unused_blocks: Vec<BlockId>,
    pub stats: SearchStats,
}

impl Solution {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unsolved.is_empty()
    }
}
