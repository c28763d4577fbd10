//! Shadow pieces in the puzzle frame and polygon clipping via `i_overlay`.
//!
//! `i_overlay` returns shapes as lists of contours, the first being the outer
//! boundary. Orientation of its output is normalized here before any angle is
//! read.

use i_overlay::core::{fill_rule::FillRule, overlay_rule::OverlayRule};
use i_overlay::float::single::SingleFloatOverlay;

use crate::geom2::{approx_eq, signed_area, snap_to_multiple, GeomCfg, Point, Polygon};
use crate::shadow::Shadow;

use super::types::SearchCfg;

/// A shadow piece in the puzzle frame, counterclockwise, angles aligned with `poly`.
#[derive(Clone, Debug)]
pub(crate) struct Piece {
    pub poly: Polygon,
    pub angles: Vec<f64>,
    /// Geometric area in the puzzle frame.
    pub area: f64,
}

impl Piece {
    pub fn from_shadow(shadow: &Shadow, length_factor: f64) -> Self {
        let mut poly = shadow.polygon.scaled(1.0 / length_factor);
        let mut angles = shadow.interior_angles.clone();
        if !poly.is_ccw() {
            poly.vertices.reverse();
            angles.reverse();
        }
        let area = poly.area();
        Self { poly, angles, area }
    }
}

fn to_contour(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

fn from_contour(contour: &[[f64; 2]]) -> Vec<Point> {
    contour.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

fn clip(subject: &[Point], clip: &[Point], rule: OverlayRule) -> Vec<Vec<Vec<[f64; 2]>>> {
    let subj = to_contour(subject);
    let clip = to_contour(clip);
    subj.overlay(&[clip], rule, FillRule::NonZero)
}

/// Outer area minus hole areas, summed over shapes.
fn shapes_area(shapes: &[Vec<Vec<[f64; 2]>>]) -> f64 {
    shapes
        .iter()
        .map(|shape| match shape.split_first() {
            Some((outer, holes)) => {
                let holes: f64 = holes
                    .iter()
                    .map(|h| signed_area(&from_contour(h)).abs())
                    .sum();
                signed_area(&from_contour(outer)).abs() - holes
            }
            None => 0.0,
        })
        .sum()
}

/// Area of `a − b`.
pub(crate) fn difference_area(a: &[Point], b: &[Point]) -> f64 {
    shapes_area(&clip(a, b, OverlayRule::Difference))
}

/// Area of `a ∩ b`.
#[cfg(test)]
pub(crate) fn overlap_area(a: &[Point], b: &[Point]) -> f64 {
    shapes_area(&clip(a, b, OverlayRule::Intersect))
}

/// `piece − block` as cleaned pieces. `None` when the residual has a hole.
pub(crate) fn subtract(
    piece: &Polygon,
    block: &[Point],
    geom: GeomCfg,
    cfg: &SearchCfg,
) -> Option<Vec<Piece>> {
    let mut out = Vec::new();
    for shape in clip(&piece.vertices, block, OverlayRule::Difference) {
        let Some((outer, holes)) = shape.split_first() else {
            continue;
        };
        let hole_area: f64 = holes
            .iter()
            .map(|h| signed_area(&from_contour(h)).abs())
            .sum();
        if hole_area >= cfg.min_piece_area {
            return None;
        }
        for points in split_pinched(from_contour(outer), geom.eps) {
            if let Some(p) = clean(points, geom.eps, cfg) {
                out.push(p);
            }
        }
    }
    Some(out)
}

/// Split a contour that revisits a vertex into simple loops.
fn split_pinched(points: Vec<Point>, eps: f64) -> Vec<Vec<Point>> {
    let mut stack = vec![points];
    let mut out = Vec::new();
    while let Some(pts) = stack.pop() {
        let pinch = (0..pts.len()).find_map(|i| {
            ((i + 1)..pts.len())
                .find(|&j| approx_eq(pts[i], pts[j], eps))
                .map(|j| (i, j))
        });
        match pinch {
            Some((i, j)) => {
                let inner = pts[i..j].to_vec();
                let mut outer = pts[j..].to_vec();
                outer.extend_from_slice(&pts[..i]);
                stack.push(inner);
                stack.push(outer);
            }
            None => out.push(pts),
        }
    }
    out
}

/// Dedup, orient counterclockwise, snap angles, drop straight vertices until
/// none remain. Slivers below `min_piece_area` vanish.
fn clean(points: Vec<Point>, eps: f64, cfg: &SearchCfg) -> Option<Piece> {
    let mut poly = Polygon::new(points).dedup(eps);
    loop {
        if poly.len() < 3 {
            return None;
        }
        poly = poly.to_ccw();
        let angles: Vec<f64> = poly
            .interior_angles()
            .into_iter()
            .map(|a| snap_to_multiple(a, 45.0, 7, cfg.angle_tolerance))
            .collect();
        let kept: Vec<Point> = poly
            .vertices
            .iter()
            .zip(&angles)
            .filter(|&(_, &a)| a != 180.0)
            .map(|(&p, _)| p)
            .collect();
        if kept.len() == poly.len() {
            let area = poly.area();
            if area < cfg.min_piece_area {
                return None;
            }
            return Some(Piece { poly, angles, area });
        }
        poly = Polygon::new(kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
    }

    #[test]
    fn square_minus_corner_triangle_is_triangle() {
        let tri = Polygon::from_xy(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).vertices;
        let pieces = subtract(&unit_square(), &tri, GeomCfg::default(), &SearchCfg::default())
            .unwrap();
        assert_eq!(pieces.len(), 1);
        let p = &pieces[0];
        assert_eq!(p.poly.len(), 3);
        assert!(p.poly.is_ccw());
        assert!((p.area - 0.5).abs() < 1e-6);
        let mut angles = p.angles.clone();
        angles.sort_by(f64::total_cmp);
        assert_eq!(angles, vec![45.0, 45.0, 90.0]);
    }

    #[test]
    fn hole_in_the_middle_is_rejected() {
        let big = Polygon::from_xy(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        let small = Polygon::from_xy(&[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]).vertices;
        assert!(subtract(&big, &small, GeomCfg::default(), &SearchCfg::default()).is_none());
    }

    #[test]
    fn difference_and_overlap_areas() {
        let sq = unit_square().vertices;
        let shifted = unit_square().translated(Point::new(0.5, 0.0)).vertices;
        assert!((difference_area(&shifted, &sq) - 0.5).abs() < 1e-6);
        assert!((overlap_area(&shifted, &sq) - 0.5).abs() < 1e-6);
        assert!(difference_area(&sq, &sq).abs() < 1e-6);
    }

    #[test]
    fn pinched_contour_splits_into_two_loops() {
        let c = Point::new(1.0, 1.0);
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            c,
            Point::new(2.0, 1.0),
            Point::new(2.0, 2.0),
            c,
            Point::new(0.0, 1.0),
        ];
        let loops = split_pinched(pts, 1e-9);
        assert_eq!(loops.len(), 2);
        let total: usize = loops.iter().map(|l| l.len()).sum();
        assert_eq!(total, 7);
    }
}
