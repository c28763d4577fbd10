//! Silhouette contour → simple sub-shadows.
//!
//! Steps: merge near-duplicate corners, build the undirected edge set, find
//! split points (degree ≥ 4), carve one closed loop per split point, trace the
//! remaining edges into loops, then snap angles and pick the winding.

use tracing::{debug, warn};

use crate::config::Units;
use crate::error::InputError;
use crate::geom2::{approx_eq, snap_to_multiple, Point, Polygon};

use super::types::{DecomposeCfg, Shadow};

/// Undirected edge between two vertex ids, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VEdge {
    a: usize,
    b: usize,
}

impl VEdge {
    fn new(u: usize, v: usize) -> Self {
        if u < v {
            Self { a: u, b: v }
        } else {
            Self { a: v, b: u }
        }
    }

    #[inline]
    fn touches(self, v: usize) -> bool {
        self.a == v || self.b == v
    }

    #[inline]
    fn other(self, v: usize) -> usize {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// Distinct vertices and deduplicated edges of one silhouette.
#[derive(Debug)]
struct EdgeGraph {
    vertices: Vec<Point>,
    edges: Vec<VEdge>,
}

impl EdgeGraph {
    fn build(corners: &[Point], eps: f64) -> Self {
        let mut vertices: Vec<Point> = Vec::new();
        let ids: Vec<usize> = corners
            .iter()
            .map(|&p| match vertices.iter().position(|&q| approx_eq(p, q, eps)) {
                Some(i) => i,
                None => {
                    vertices.push(p);
                    vertices.len() - 1
                }
            })
            .collect();

        let n = ids.len();
        let mut edges: Vec<VEdge> = Vec::with_capacity(n);
        for i in 0..n {
            let (u, v) = (ids[i], ids[(i + 1) % n]);
            if u == v {
                continue;
            }
            let e = VEdge::new(u, v);
            if !edges.contains(&e) {
                edges.push(e);
            }
        }
        Self { vertices, edges }
    }

    /// Vertices with four or more incident edges, in id order.
    fn split_points(&self) -> Vec<usize> {
        let mut degree = vec![0usize; self.vertices.len()];
        for e in &self.edges {
            degree[e.a] += 1;
            degree[e.b] += 1;
        }
        degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d >= 4)
            .map(|(v, _)| v)
            .collect()
    }
}

/// Merge every group of corners closer than `dist` into its mean, sweeping in order.
fn merge_corners(corners: &[Point], dist: f64) -> Vec<Point> {
    let mut pts = corners.to_vec();
    for i in 0..pts.len() {
        let a = pts[i];
        let near: Vec<usize> = (0..pts.len())
            .filter(|&j| j == i || (pts[j] - a).norm() < dist)
            .collect();
        let mean = near.iter().fold(Point::zeros(), |acc, &j| acc + pts[j]) / near.len() as f64;
        for j in near {
            pts[j] = mean;
        }
    }
    pts
}

/// Depth-first walk from `cur` back to `start` through unused edges.
/// Entering a split point other than `start` fails the branch.
fn walk(
    pool: &[VEdge],
    used: &mut [bool],
    path: &mut Vec<usize>,
    start: usize,
    cur: usize,
    splits: &[usize],
) -> bool {
    if cur == start {
        return true;
    }
    if splits.contains(&cur) {
        return false;
    }
    for i in 0..pool.len() {
        if used[i] || !pool[i].touches(cur) {
            continue;
        }
        used[i] = true;
        path.push(i);
        if walk(pool, used, path, start, pool[i].other(cur), splits) {
            return true;
        }
        used[i] = false;
        path.pop();
    }
    false
}

/// First closed loop through `start`, as vertex ids in walk order.
fn carve_at(pool: &[VEdge], start: usize, splits: &[usize]) -> Option<(Vec<usize>, Vec<usize>)> {
    let mut used = vec![false; pool.len()];
    for (i, e) in pool.iter().enumerate() {
        if !e.touches(start) {
            continue;
        }
        used[i] = true;
        let mut path = vec![i];
        if walk(pool, &mut used, &mut path, start, e.other(start), splits) {
            let mut cur = start;
            let mut ids = Vec::with_capacity(path.len());
            for &k in &path {
                ids.push(cur);
                cur = pool[k].other(cur);
            }
            return Some((ids, path));
        }
        used[i] = false;
    }
    None
}

/// Split the edge pool at each split point; returns carved loops and leftover edges.
fn carve(mut pool: Vec<VEdge>, splits: &[usize]) -> (Vec<Vec<usize>>, Vec<VEdge>) {
    let mut loops = Vec::new();
    for &s in splits {
        if let Some((ids, path)) = carve_at(&pool, s, splits) {
            pool = pool
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !path.contains(i))
                .map(|(_, e)| e)
                .collect();
            loops.push(ids);
        }
    }
    (loops, pool)
}

/// Order leftover edges into vertex loops by following shared vertices.
/// Chains that do not close are dropped.
fn trace_loops(mut rest: Vec<VEdge>) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    while !rest.is_empty() {
        let first = rest.remove(0);
        let mut seq = vec![first.a, first.b];
        let mut cur = first.b;
        while cur != first.a {
            match rest.iter().position(|e| e.touches(cur)) {
                Some(i) => {
                    cur = rest.remove(i).other(cur);
                    seq.push(cur);
                }
                None => break,
            }
        }
        if cur != first.a {
            warn!(vertices = seq.len(), "dropping open edge chain");
            continue;
        }
        seq.pop();
        if seq.len() < 3 {
            warn!(vertices = seq.len(), "dropping degenerate loop");
            continue;
        }
        loops.push(seq);
    }
    loops
}

/// Splits raw silhouettes into `Shadow`s.
#[derive(Clone, Copy, Debug)]
pub struct Decomposer {
    units: Units,
    cfg: DecomposeCfg,
}

impl Decomposer {
    pub fn new(units: Units, cfg: DecomposeCfg) -> Self {
        Self { units, cfg }
    }

    /// Decompose one silhouette (pixel-space corners in contour order).
    pub fn decompose(&self, corners: &[Point]) -> Result<Vec<Shadow>, InputError> {
        if corners.len() < 3 {
            return Err(InputError::TooFewVertices(corners.len()));
        }
        if corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::NonFinite);
        }
        let merged = merge_corners(corners, self.cfg.merge_distance);
        let graph = EdgeGraph::build(&merged, self.cfg.vertex_eps);
        if graph.edges.is_empty() {
            return Err(InputError::NoEdges);
        }
        if graph.vertices.len() < 3 {
            return Err(InputError::TooFewVertices(graph.vertices.len()));
        }

        let splits = graph.split_points();
        let (mut loops, rest) = carve(graph.edges.clone(), &splits);
        loops.extend(trace_loops(rest));

        let shadows: Vec<Shadow> = loops
            .into_iter()
            .filter_map(|ids| self.shadow_from_loop(ids.iter().map(|&i| graph.vertices[i]).collect()))
            .collect();
        debug!(
            corners = corners.len(),
            vertices = graph.vertices.len(),
            split_points = splits.len(),
            pieces = shadows.len(),
            "decomposed silhouette"
        );
        Ok(shadows)
    }

    /// Snap angles for both windings, drop straight vertices, keep the winding
    /// whose angle sum is `(n - 2) · 180`. The result is counterclockwise.
    fn shadow_from_loop(&self, points: Vec<Point>) -> Option<Shadow> {
        let tol = self.cfg.angle_tolerance;
        let snap = |v: Vec<f64>| -> Vec<f64> {
            v.into_iter()
                .map(|a| snap_to_multiple(a, 45.0, 8, tol))
                .collect()
        };
        let (first, second) = Polygon::new(points.clone()).interior_angles_both();
        let (first, second) = (snap(first), snap(second));

        let mut vertices = Vec::with_capacity(points.len());
        let mut a1 = Vec::with_capacity(points.len());
        let mut a2 = Vec::with_capacity(points.len());
        for ((p, x), y) in points.into_iter().zip(first).zip(second) {
            if x != 180.0 {
                vertices.push(p);
                a1.push(x);
                a2.push(y);
            }
        }
        let n = vertices.len();
        if n < 3 {
            warn!(vertices = n, "loop collapsed after dropping straight vertices");
            return None;
        }

        let ideal = (n as f64 - 2.0) * 180.0;
        let d1 = (a1.iter().sum::<f64>() - ideal).abs();
        let d2 = (a2.iter().sum::<f64>() - ideal).abs();
        let use_first = if d1 < 1e-9 {
            true
        } else if d2 < 1e-9 {
            false
        } else {
            warn!(
                vertices = n,
                ideal,
                off_first = d1,
                off_second = d2,
                "no winding matches the angle sum, using the closest"
            );
            d1 <= d2
        };

        let (polygon, interior_angles) = if use_first {
            (Polygon::new(vertices), a1)
        } else {
            vertices.reverse();
            a2.reverse();
            (Polygon::new(vertices), a2)
        };
        let area = self.units.area_to_units(polygon.area());
        Some(Shadow {
            polygon,
            interior_angles,
            area,
        })
    }
}
