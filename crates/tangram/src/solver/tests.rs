use super::residual::overlap_area;
use super::*;
use crate::config::Units;
use crate::error::SolveError;
use crate::geom2::{rotate_points, GeomCfg, Point, Polygon};
use crate::shadow::{DecomposeCfg, Decomposer, Shadow};
use crate::shape::{Block, BlockId, ClassifyCfg, Classifier, ShapeType};

const L: f64 = 123.0;

/// Canonical model in pixels, rotated about its centroid, centroid at `center`.
fn px(shape: ShapeType, rotation: f64, center: Point) -> Vec<Point> {
    let model = shape.model().scaled(L);
    let c = model.centroid();
    rotate_points(&model.vertices, c, rotation)
        .into_iter()
        .map(|p| p - c + center)
        .collect()
}

fn block(shape: ShapeType, rotation: f64, center: Point) -> Block {
    let units = Units::default();
    Classifier::new(units, ClassifyCfg::default())
        .classify(&px(shape, rotation, center), shape.area() * units.area_factor)
        .unwrap()
}

fn shadow(corners: &[Point]) -> Shadow {
    let mut pieces = Decomposer::new(Units::default(), DecomposeCfg::default())
        .decompose(corners)
        .unwrap();
    assert_eq!(pieces.len(), 1);
    pieces.remove(0)
}

fn square_shadow(origin: Point) -> Shadow {
    let corners: Vec<Point> = Polygon::from_xy(&[[0.0, 0.0], [L, 0.0], [L, L], [0.0, L]])
        .vertices
        .into_iter()
        .map(|p| p + origin)
        .collect();
    shadow(&corners)
}

fn solver(cfg: SearchCfg) -> Solver {
    Solver::new(Units::default(), GeomCfg::default(), cfg)
}

/// Placements for `index` cover its shadow and do not overlap each other.
fn assert_tiles(solution: &Solution, index: usize, target: &Shadow) {
    let outlines: Vec<Vec<Point>> = solution
        .placements
        .iter()
        .filter(|p| p.shadow == index)
        .map(|p| p.outline(L))
        .collect();
    let target_area = target.polygon.area();
    let covered: f64 = outlines
        .iter()
        .map(|o| overlap_area(o, &target.polygon.vertices))
        .sum();
    assert!(
        (covered - target_area).abs() < 1e-3 * target_area,
        "covered {covered} of {target_area}"
    );
    for i in 0..outlines.len() {
        for j in (i + 1)..outlines.len() {
            let overlap = overlap_area(&outlines[i], &outlines[j]);
            assert!(overlap < 1e-3 * target_area, "placements {i} and {j} overlap by {overlap}");
        }
    }
}

#[test]
fn exact_match_uses_fast_path() {
    let center = Point::new(300.0, 300.0);
    let target = shadow(&px(ShapeType::LargeTriangle, 90.0, center));
    let blocks = vec![block(ShapeType::LargeTriangle, 10.0, Point::new(900.0, 100.0))];
    // the fast path does not consume search nodes
    let cfg = SearchCfg {
        node_budget: Some(0),
        ..SearchCfg::default()
    };
    let solution = solver(cfg).solve(&blocks, &[target.clone()]).unwrap();

    assert!(solution.is_complete());
    assert_eq!(solution.placements.len(), 1);
    let p = &solution.placements[0];
    assert!(p.via_fast_path);
    assert_eq!(p.block, BlockId(0));
    assert!((p.position - center).norm() < 1e-6);
    assert!((p.rotation - 90.0).abs() < 1e-6);
    assert_eq!(solution.stats.nodes_expanded, 0);
    assert_eq!(solution.stats.fast_path_hits, 1);
    assert!(solution.unused_blocks.is_empty());
    assert_tiles(&solution, 0, &target);
}

#[test]
fn two_small_triangles_cover_square() {
    let target = square_shadow(Point::new(50.0, 80.0));
    let blocks = vec![
        block(ShapeType::SmallTriangle, 0.0, Point::new(600.0, 100.0)),
        block(ShapeType::SmallTriangle, 200.0, Point::new(800.0, 100.0)),
    ];
    let solution = solver(SearchCfg::default()).solve(&blocks, &[target.clone()]).unwrap();

    assert!(solution.is_complete());
    assert_eq!(solution.placements.len(), 2);
    assert!(solution.stats.nodes_expanded >= 1);
    assert!(solution.unused_blocks.is_empty());
    assert_tiles(&solution, 0, &target);
}

#[test]
fn large_triangle_from_square_and_two_small_triangles() {
    let target = shadow(&px(ShapeType::LargeTriangle, 0.0, Point::new(400.0, 400.0)));
    let blocks = vec![
        block(ShapeType::SmallTriangle, 15.0, Point::new(100.0, 900.0)),
        block(ShapeType::Square, 30.0, Point::new(300.0, 900.0)),
        block(ShapeType::SmallTriangle, 45.0, Point::new(500.0, 900.0)),
    ];
    let solution = solver(SearchCfg::default()).solve(&blocks, &[target.clone()]).unwrap();

    assert!(solution.is_complete());
    assert_eq!(solution.placements.len(), 3);
    let mut used: Vec<usize> = solution.placements.iter().map(|p| p.block.0).collect();
    used.sort_unstable();
    assert_eq!(used, vec![0, 1, 2]);
    assert_tiles(&solution, 0, &target);
}

#[test]
fn empty_pool_reports_piece_unsolved() {
    let target = square_shadow(Point::zeros());
    let solution = solver(SearchCfg::default()).solve(&[], &[target.clone()]).unwrap();

    assert!(!solution.is_complete());
    assert!(solution.placements.is_empty());
    assert_eq!(solution.unsolved.len(), 1);
    assert_eq!(solution.unsolved[0].index, 0);
    assert_eq!(solution.unsolved[0].reason, UnsolvedReason::NoBlocksLeft);
    assert_eq!(solution.unsolved[0].shadow, target);
}

#[test]
fn insufficient_area_is_fatal() {
    let target = square_shadow(Point::zeros());
    let blocks = vec![block(ShapeType::SmallTriangle, 0.0, Point::new(500.0, 0.0))];
    let err = solver(SearchCfg::default())
        .solve(&blocks, &[target])
        .unwrap_err();
    match err {
        SolveError::InsufficientBlocks {
            available,
            required,
        } => {
            assert_eq!(available, 0.5);
            assert!((required - 1.0).abs() < 1e-9);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn failed_piece_leaves_pool_for_later_pieces() {
    // Square cannot be tiled by a medium triangle; the large triangle shadow
    // still gets the large triangle.
    let square = square_shadow(Point::zeros());
    let big = shadow(&px(ShapeType::LargeTriangle, 180.0, Point::new(600.0, 600.0)));
    let blocks = vec![
        block(ShapeType::MediumTriangle, 0.0, Point::new(1000.0, 0.0)),
        block(ShapeType::LargeTriangle, 0.0, Point::new(1000.0, 500.0)),
    ];
    let solution = solver(SearchCfg::default())
        .solve(&blocks, &[big.clone(), square])
        .unwrap();

    assert_eq!(solution.unsolved.len(), 1);
    assert_eq!(solution.unsolved[0].index, 1);
    assert_eq!(solution.unsolved[0].reason, UnsolvedReason::NoPlacement);
    assert_eq!(solution.placements.len(), 1);
    assert_eq!(solution.placements[0].block, BlockId(1));
    assert_eq!(solution.placements[0].shadow, 0);
    assert_eq!(solution.unused_blocks, vec![BlockId(0)]);
    assert!(solution.stats.rejected_by_coverage > 0);
    assert_tiles(&solution, 0, &big);
}

#[test]
fn node_budget_bounds_general_search() {
    let target = shadow(&px(ShapeType::LargeTriangle, 0.0, Point::new(400.0, 400.0)));
    let blocks = vec![
        block(ShapeType::SmallTriangle, 0.0, Point::new(100.0, 900.0)),
        block(ShapeType::Square, 0.0, Point::new(300.0, 900.0)),
        block(ShapeType::SmallTriangle, 0.0, Point::new(500.0, 900.0)),
    ];
    let cfg = SearchCfg {
        node_budget: Some(0),
        ..SearchCfg::default()
    };
    let solution = solver(cfg).solve(&blocks, &[target]).unwrap();

    assert_eq!(solution.unsolved.len(), 1);
    assert_eq!(solution.unsolved[0].reason, UnsolvedReason::BudgetExhausted);
    assert_eq!(solution.stats.nodes_expanded, 0);
    assert_eq!(solution.unused_blocks.len(), 3);
}

#[test]
fn too_many_blocks_is_rejected() {
    let one = block(ShapeType::SmallTriangle, 0.0, Point::zeros());
    let blocks = vec![one; MAX_BLOCKS + 1];
    let err = solver(SearchCfg::default()).solve(&blocks, &[]).unwrap_err();
    assert_eq!(
        err,
        SolveError::TooManyBlocks {
            got: MAX_BLOCKS + 1,
            max: MAX_BLOCKS
        }
    );
}

#[test]
fn placement_outline_is_canonical_shape() {
    let p = Placement {
        block: BlockId(0),
        shape: ShapeType::Square,
        shadow: 0,
        position: Point::new(L / 2.0, L / 2.0),
        rotation: 0.0,
        via_fast_path: false,
    };
    let outline = Polygon::new(p.outline(L));
    let expected = Polygon::from_xy(&[[0.0, 0.0], [L, 0.0], [L, L], [0.0, L]]);
    assert!(outline.same_vertex_set(&expected, 1e-9));
}
