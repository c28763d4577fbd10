//! Backtracking placement search over a `u64` used-mask.

use tracing::{debug, info, warn};

use crate::config::Units;
use crate::error::SolveError;
use crate::geom2::{
    centroid, normalize_degrees, rotate_about, segments_intersect, signed_angle, GeomCfg, Point,
    Polygon,
};
use crate::shadow::Shadow;
use crate::shape::{same_multiset, Block, BlockId, ShapeType};

use super::residual::{difference_area, subtract, Piece};
use super::types::{
    Placement, SearchCfg, SearchStats, Solution, UnsolvedPiece, UnsolvedReason,
};

/// Blocks addressable by the used-mask.
pub const MAX_BLOCKS: usize = 64;

/// Outcome of covering a piece queue.
enum Step {
    /// Placements in order, plus the mask after placing them.
    Found(Vec<Placement>, u64),
    Fail,
    Exhausted,
}

/// What the search needs to know about a block.
#[derive(Clone, Copy, Debug)]
struct PoolEntry {
    id: BlockId,
    shape: ShapeType,
}

impl PoolEntry {
    #[inline]
    fn bit(self) -> u64 {
        1u64 << self.id.0
    }
}

fn full_mask(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Places blocks onto shadows.
#[derive(Clone, Copy, Debug)]
pub struct Solver {
    units: Units,
    geom: GeomCfg,
    cfg: SearchCfg,
}

impl Solver {
    pub fn new(units: Units, geom: GeomCfg, cfg: SearchCfg) -> Self {
        Self { units, geom, cfg }
    }

    /// Cover each shadow with blocks from the shared pool.
    ///
    /// Pieces are handled in ascending area. A piece that cannot be covered is
    /// reported in `Solution::unsolved` and leaves the pool untouched.
    pub fn solve(&self, blocks: &[Block], shadows: &[Shadow]) -> Result<Solution, SolveError> {
        if blocks.len() > MAX_BLOCKS {
            return Err(SolveError::TooManyBlocks {
                got: blocks.len(),
                max: MAX_BLOCKS,
            });
        }
        let lf = self.units.length_factor;
        let mut pieces: Vec<(usize, Piece)> = shadows
            .iter()
            .enumerate()
            .map(|(i, s)| (i, Piece::from_shadow(s, lf)))
            .collect();
        pieces.sort_by(|a, b| a.1.area.total_cmp(&b.1.area));

        if !blocks.is_empty() {
            let available: f64 = blocks.iter().map(|b| b.shape.area()).sum();
            let required: f64 = pieces.iter().map(|(_, p)| p.area).sum();
            if available + self.cfg.coverage_tolerance < required {
                return Err(SolveError::InsufficientBlocks {
                    available,
                    required,
                });
            }
        }

        let mut runner = DfsRunner::new(blocks, self.geom, self.cfg, lf);
        let full = full_mask(blocks.len());
        let mut used = 0u64;
        let mut solution = Solution::default();

        for (index, piece) in pieces {
            let reason = if used == full {
                Some(UnsolvedReason::NoBlocksLeft)
            } else {
                runner.begin_piece(index);
                match runner.cover(vec![piece], used) {
                    Step::Found(placements, mask) => {
                        info!(
                            shadow = index,
                            blocks = placements.len(),
                            nodes = runner.piece_nodes,
                            "shadow solved"
                        );
                        used = mask;
                        solution.placements.extend(placements);
                        None
                    }
                    Step::Fail => Some(UnsolvedReason::NoPlacement),
                    Step::Exhausted => Some(UnsolvedReason::BudgetExhausted),
                }
            };
            if let Some(reason) = reason {
                warn!(shadow = index, ?reason, "shadow left unsolved");
                solution.unsolved.push(UnsolvedPiece {
                    index,
                    shadow: shadows[index].clone(),
                    reason,
                });
            }
        }

        solution.unused_blocks = (0..blocks.len())
            .filter(|&i| used & (1u64 << i) == 0)
            .map(BlockId)
            .collect();
        solution.stats = runner.stats;
        Ok(solution)
    }
}

/// DFS runner carrying the pool, tolerances and counters.
struct DfsRunner {
    /// Descending area, ties by id.
    pool: Vec<PoolEntry>,
    geom: GeomCfg,
    cfg: SearchCfg,
    length_factor: f64,
    shadow: usize,
    piece_nodes: u64,
    stats: SearchStats,
}

impl DfsRunner {
    fn new(blocks: &[Block], geom: GeomCfg, cfg: SearchCfg, length_factor: f64) -> Self {
        let mut pool: Vec<PoolEntry> = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| PoolEntry {
                id: BlockId(i),
                shape: b.shape,
            })
            .collect();
        pool.sort_by(|a, b| b.shape.area().total_cmp(&a.shape.area()));
        Self {
            pool,
            geom,
            cfg,
            length_factor,
            shadow: 0,
            piece_nodes: 0,
            stats: SearchStats::default(),
        }
    }

    fn begin_piece(&mut self, shadow: usize) {
        self.shadow = shadow;
        self.piece_nodes = 0;
    }

    fn remaining_area(&self, mask: u64) -> f64 {
        self.pool
            .iter()
            .filter(|e| mask & e.bit() == 0)
            .map(|e| e.shape.area())
            .sum()
    }

    fn cover(&mut self, queue: Vec<Piece>, mask: u64) -> Step {
        let Some((piece, rest)) = queue.split_first() else {
            return Step::Found(Vec::new(), mask);
        };
        let queue_area: f64 = queue.iter().map(|p| p.area).sum();
        if self.remaining_area(mask) + self.cfg.coverage_tolerance < queue_area {
            return Step::Fail;
        }

        if let Some((placement, bit)) = self.fast_path(piece, mask) {
            match self.cover(rest.to_vec(), mask | bit) {
                Step::Found(mut tail, m) => {
                    tail.insert(0, placement);
                    return Step::Found(tail, m);
                }
                Step::Exhausted => return Step::Exhausted,
                Step::Fail => {}
            }
        }

        if self.cfg.node_budget.is_some_and(|b| self.piece_nodes >= b) {
            return Step::Exhausted;
        }
        self.piece_nodes += 1;
        self.stats.nodes_expanded += 1;

        for sv in 0..piece.poly.len() {
            // identical shapes are interchangeable: try each type once per vertex
            let mut tried = [false; 5];
            for k in 0..self.pool.len() {
                let entry = self.pool[k];
                if mask & entry.bit() != 0 || tried[entry.shape.index()] {
                    continue;
                }
                tried[entry.shape.index()] = true;
                if entry.shape.area() > piece.area + self.cfg.coverage_tolerance {
                    continue;
                }
                for bv in 0..entry.shape.distinct_vertices() {
                    let shadow_angle = piece.angles[sv];
                    let block_angle = entry.shape.interior_angles()[bv];
                    if shadow_angle < block_angle {
                        self.stats.rejected_by_angle += 1;
                        continue;
                    }
                    let exact = (shadow_angle - block_angle).abs() < 1e-9;
                    for theta in candidate_rotations(&piece.poly, sv, entry.shape, bv, exact) {
                        self.stats.candidates_tried += 1;
                        let verts = instantiate(entry.shape, bv, theta, piece.poly.vertices[sv]);
                        let Some(residual) = self.validate(piece, &verts) else {
                            self.stats.rejected_by_coverage += 1;
                            continue;
                        };
                        let mut next = rest.to_vec();
                        next.extend(residual);
                        next.sort_by(|a, b| a.area.total_cmp(&b.area));
                        match self.cover(next, mask | entry.bit()) {
                            Step::Found(mut tail, m) => {
                                tail.insert(0, self.placement(entry, &verts, theta, false));
                                return Step::Found(tail, m);
                            }
                            Step::Exhausted => return Step::Exhausted,
                            Step::Fail => {}
                        }
                    }
                }
            }
        }
        Step::Fail
    }

    /// A remaining block congruent to the whole piece, verified vertex by vertex.
    fn fast_path(&mut self, piece: &Piece, mask: u64) -> Option<(Placement, u64)> {
        let tol = self.cfg.coverage_tolerance;
        for k in 0..self.pool.len() {
            let entry = self.pool[k];
            let shape = entry.shape;
            if mask & entry.bit() != 0
                || shape.vertex_count() != piece.poly.len()
                || (shape.area() - piece.area).abs() > tol
                || !same_multiset(&piece.angles, shape.interior_angles())
            {
                continue;
            }
            let center = piece.poly.centroid();
            let Some(r) = shape.reference_vertex(&piece.poly, &piece.angles) else {
                continue;
            };
            let theta = signed_angle(shape.canonical_direction(), piece.poly.vertices[r] - center);
            let outline = Polygon::new(shape.placed(center, theta, 1.0));
            if !outline.same_vertex_set(&piece.poly, self.cfg.vertex_match_tolerance) {
                debug!(?shape, "exact match failed vertex check");
                continue;
            }
            self.stats.fast_path_hits += 1;
            let placement = self.placement(entry, &outline.vertices, theta, true);
            return Some((placement, entry.bit()));
        }
        None
    }

    /// Inside the piece (no proper edge crossing, `block − piece` below
    /// tolerance), then the residual `piece − block`.
    fn validate(&self, piece: &Piece, verts: &[Point]) -> Option<Vec<Piece>> {
        let GeomCfg { eps, eps_det } = self.geom;
        let block_edges = Polygon::new(verts.to_vec()).edges();
        let piece_edges = piece.poly.edges();
        let crosses = block_edges.iter().any(|e| {
            piece_edges
                .iter()
                .any(|f| segments_intersect(e, f, eps, eps_det))
        });
        if crosses {
            return None;
        }
        if difference_area(verts, &piece.poly.vertices) > self.cfg.coverage_tolerance {
            return None;
        }
        subtract(&piece.poly, verts, self.geom, &self.cfg)
    }

    fn placement(&self, entry: PoolEntry, verts: &[Point], theta: f64, via_fast_path: bool) -> Placement {
        Placement {
            block: entry.id,
            shape: entry.shape,
            shadow: self.shadow,
            position: centroid(verts) * self.length_factor,
            rotation: normalize_degrees(theta, entry.shape.period()),
            via_fast_path,
        }
    }
}

/// Rotations that lay block vertex `bv` into shadow vertex `sv`.
///
/// One aligns the edges towards the next vertices, one the edges towards the
/// previous vertices. When the corner angles are equal both describe the same
/// pose up to noise, and a single rotation is returned: their circular mean
/// weighted by `|shadow edge| · |block edge|`.
fn candidate_rotations(
    shadow: &Polygon,
    sv: usize,
    shape: ShapeType,
    bv: usize,
    exact: bool,
) -> Vec<f64> {
    let (sv, bv) = (sv as isize, bv as isize);
    let s = shadow.vertex(sv);
    let sn = shadow.vertex(sv + 1) - s;
    let sp = shadow.vertex(sv - 1) - s;
    let model = shape.model();
    let b = model.vertex(bv);
    let bn = model.vertex(bv + 1) - b;
    let bp = model.vertex(bv - 1) - b;

    let t_next = signed_angle(bn, sn);
    let t_prev = signed_angle(bp, sp);
    if !exact {
        return vec![t_next, t_prev];
    }
    let w_next = sn.norm() * bn.norm();
    let w_prev = sp.norm() * bp.norm();
    let (s1, c1) = t_next.to_radians().sin_cos();
    let (s2, c2) = t_prev.to_radians().sin_cos();
    let mean = (w_next * s1 + w_prev * s2)
        .atan2(w_next * c1 + w_prev * c2)
        .to_degrees();
    vec![mean]
}

/// Canonical model rotated by `theta` with vertex `bv` moved onto `at`.
fn instantiate(shape: ShapeType, bv: usize, theta: f64, at: Point) -> Vec<Point> {
    let model = shape.model();
    let pivot = model.vertices[bv];
    model
        .vertices
        .iter()
        .map(|&m| rotate_about(m - pivot, Point::zeros(), theta) + at)
        .collect()
}
