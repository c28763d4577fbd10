use super::*;
use nalgebra::vector;
use proptest::prelude::*;

fn unit_square() -> Polygon {
    Polygon::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
}

#[test]
fn angle_reflex_fix_covers_full_turn() {
    let a = vector![1.0, 0.0];
    let b = vector![0.0, 1.0];
    assert!((angle(a, b, false) - 90.0).abs() < 1e-12);
    assert!((angle(b, a, false) - 90.0).abs() < 1e-12);
    // b→a is a clockwise quarter turn: reflex when fixed
    assert!((angle(b, a, true) - 270.0).abs() < 1e-12);
    // Zero-length input does not produce NaN
    assert_eq!(angle(Point::zeros(), b, true), 0.0);
    // Rounding past ±1 is clamped
    let c = vector![1.0, 1e-17];
    assert!(angle(a, c, true).is_finite());
}

#[test]
fn signed_angle_orientation() {
    let x = vector![1.0, 0.0];
    assert!((signed_angle(x, vector![0.0, 1.0]) - 90.0).abs() < 1e-12);
    assert!((signed_angle(x, vector![0.0, -1.0]) + 90.0).abs() < 1e-12);
    assert!((signed_angle(x, vector![-1.0, 0.0]) - 180.0).abs() < 1e-12);
}

#[test]
fn shoelace_area_and_winding() {
    let sq = unit_square();
    assert!((sq.area() - 1.0).abs() < 1e-12);
    assert!(sq.is_ccw());
    let mut cw = sq.clone();
    cw.vertices.reverse();
    assert!((cw.signed_area() + 1.0).abs() < 1e-12);
    assert!(cw.to_ccw().is_ccw());
}

#[test]
fn interior_angles_of_ccw_and_cw_loops() {
    let sq = unit_square();
    assert!(sq.interior_angles().iter().all(|a| (a - 90.0).abs() < 1e-9));
    // L-shape has one reflex corner
    let l = Polygon::from_xy(&[
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ]);
    let angles = l.interior_angles();
    assert!((angles[3] - 270.0).abs() < 1e-9);
    assert!((angles.iter().sum::<f64>() - 720.0).abs() < 1e-9);
    // Clockwise traversal: second interpretation is the interior one
    let mut cw = l.clone();
    cw.vertices.reverse();
    let (first, second) = cw.interior_angles_both();
    assert!((first.iter().sum::<f64>() - 1440.0).abs() < 1e-9);
    assert!((second.iter().sum::<f64>() - 720.0).abs() < 1e-9);
}

#[test]
fn intersection_parameters_and_endpoint_exclusion() {
    let cfg = GeomCfg::default();
    let e1 = Edge::new(vector![0.0, 0.0], vector![2.0, 2.0]);
    let e2 = Edge::new(vector![0.0, 2.0], vector![2.0, 0.0]);
    let (s, t) = intersection_parameters(&e1, &e2, cfg.eps_det).unwrap();
    assert!((s - 0.5).abs() < 1e-12 && (t - 0.5).abs() < 1e-12);
    assert!(segments_intersect(&e1, &e2, cfg.eps, cfg.eps_det));

    // Shared vertex: not an intersection
    let e3 = Edge::new(vector![2.0, 2.0], vector![3.0, 0.0]);
    assert!(!segments_intersect(&e1, &e3, cfg.eps, cfg.eps_det));

    // Parallel: no solution
    let e4 = Edge::new(vector![0.0, 1.0], vector![2.0, 3.0]);
    assert!(intersection_parameters(&e1, &e4, cfg.eps_det).is_none());
    assert!(!segments_intersect(&e1, &e4, cfg.eps, cfg.eps_det));
}

#[test]
fn ray_cast_point_in_polygon() {
    let cfg = GeomCfg::default();
    let edges = unit_square().edges();
    assert!(point_in_polygon(vector![0.5, 0.5], &edges, cfg.eps, cfg.eps_det));
    assert!(!point_in_polygon(vector![1.5, 0.5], &edges, cfg.eps, cfg.eps_det));
    assert!(!point_in_polygon(vector![-0.5, 0.3], &edges, cfg.eps, cfg.eps_det));
    assert!(point_on_boundary(vector![1.0, 0.25], &edges, cfg.eps));
    assert!(!point_on_boundary(vector![0.5, 0.5], &edges, cfg.eps));
}

#[test]
fn edge_equality_modes() {
    let eps = 1e-9;
    let a = Edge::new(vector![0.0, 0.0], vector![1.0, 0.0]);
    let b = a.reversed();
    assert!(a.same_undirected(&b, eps));
    assert!(!a.same_directed(&b, eps));
    let c = Edge::new(vector![0.0, 1e-12], vector![1.0, 0.0]);
    assert!(a.same_directed(&c, eps));
}

#[test]
fn snapping_helpers() {
    assert_eq!(snap_to(0.93, &[0.5, 1.0, 2.0], 0.25), Some(1.0));
    assert_eq!(snap_to(1.5, &[0.5, 1.0, 2.0], 0.25), None);
    assert_eq!(snap_to_multiple(133.0, 45.0, 7, 22.5), 135.0);
    assert_eq!(snap_to_multiple(181.0, 45.0, 7, 22.5), 180.0);
    // Outside the allowed multiples: left as measured
    assert_eq!(snap_to_multiple(5.0, 45.0, 7, 22.5), 5.0);
    assert!((normalize_degrees(-30.0, 90.0) - 60.0).abs() < 1e-12);
    assert!((normalize_degrees(400.0, 360.0) - 40.0).abs() < 1e-12);
}

#[test]
fn dedup_drops_repeated_and_closing_vertices() {
    let p = Polygon::from_xy(&[[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
    assert_eq!(p.dedup(1e-9).len(), 3);
}

proptest! {
    #[test]
    fn rotation_roundtrip_restores_vertices(
        theta in -720.0f64..720.0,
        cx in -50.0f64..50.0,
        cy in -50.0f64..50.0,
    ) {
        let pts = unit_square().vertices;
        let center = vector![cx, cy];
        let back = rotate_points(&rotate_points(&pts, center, theta), center, -theta);
        for (p, q) in pts.iter().zip(back.iter()) {
            prop_assert!((p - q).norm() < 1e-9);
        }
    }

    #[test]
    fn rotation_preserves_area_and_angles(theta in 0.0f64..360.0) {
        let sq = unit_square();
        let rotated = Polygon::new(rotate_points(&sq.vertices, sq.centroid(), theta));
        prop_assert!((rotated.area() - 1.0).abs() < 1e-9);
        for a in rotated.interior_angles() {
            prop_assert!((a - 90.0).abs() < 1e-6);
        }
    }
}
