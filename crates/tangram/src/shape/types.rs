//! The five tangram shapes and classified blocks.
//!
//! Canonical models are unit scale (the square has side 1), counterclockwise,
//! and define rotation 0 for their shape.

use serde::{Deserialize, Serialize};

use crate::geom2::{rotate_about, Point, Polygon};

/// Closed set of block shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Square,
    Parallelogram,
    SmallTriangle,
    MediumTriangle,
    LargeTriangle,
}

const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const SMALL_TRIANGLE: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
const MEDIUM_TRIANGLE: [[f64; 2]; 3] = [[0.0, 0.0], [2.0, 0.0], [1.0, 1.0]];
const LARGE_TRIANGLE: [[f64; 2]; 3] = [[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];
const PARALLELOGRAM: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 1.0], [1.0, 2.0], [0.0, 1.0]];

impl ShapeType {
    pub const ALL: [ShapeType; 5] = [
        ShapeType::Square,
        ShapeType::Parallelogram,
        ShapeType::SmallTriangle,
        ShapeType::MediumTriangle,
        ShapeType::LargeTriangle,
    ];

    /// Dense index in `0..5`, stable across runs.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ShapeType::Square => 0,
            ShapeType::Parallelogram => 1,
            ShapeType::SmallTriangle => 2,
            ShapeType::MediumTriangle => 3,
            ShapeType::LargeTriangle => 4,
        }
    }

    pub fn vertices(self) -> &'static [[f64; 2]] {
        match self {
            ShapeType::Square => &SQUARE,
            ShapeType::Parallelogram => &PARALLELOGRAM,
            ShapeType::SmallTriangle => &SMALL_TRIANGLE,
            ShapeType::MediumTriangle => &MEDIUM_TRIANGLE,
            ShapeType::LargeTriangle => &LARGE_TRIANGLE,
        }
    }

    /// Interior angles aligned with `vertices()`.
    pub fn interior_angles(self) -> &'static [f64] {
        match self {
            ShapeType::Square => &[90.0, 90.0, 90.0, 90.0],
            ShapeType::Parallelogram => &[45.0, 135.0, 45.0, 135.0],
            ShapeType::SmallTriangle => &[90.0, 45.0, 45.0],
            ShapeType::MediumTriangle => &[45.0, 45.0, 90.0],
            ShapeType::LargeTriangle => &[90.0, 45.0, 45.0],
        }
    }

    /// Area in puzzle units.
    pub fn area(self) -> f64 {
        match self {
            ShapeType::SmallTriangle => 0.5,
            ShapeType::Square | ShapeType::Parallelogram | ShapeType::MediumTriangle => 1.0,
            ShapeType::LargeTriangle => 2.0,
        }
    }

    /// Rotational symmetry period in degrees.
    pub fn period(self) -> f64 {
        match self {
            ShapeType::Square => 90.0,
            ShapeType::Parallelogram => 180.0,
            _ => 360.0,
        }
    }

    #[inline]
    pub fn vertex_count(self) -> usize {
        self.vertices().len()
    }

    /// Number of vertices not related by the rotational symmetry.
    /// Placing any of the others reproduces one of these placements.
    #[inline]
    pub fn distinct_vertices(self) -> usize {
        (self.vertex_count() as f64 * self.period() / 360.0).round() as usize
    }

    pub fn model(self) -> Polygon {
        Polygon::from_xy(self.vertices())
    }

    /// Index of the reference vertex of a measured (or canonical) outline.
    ///
    /// Square: topmost vertex (smallest y). Parallelogram: first 45° vertex.
    /// Triangles: the 90° vertex. `angles` must be aligned with `poly`.
    pub fn reference_vertex(self, poly: &Polygon, angles: &[f64]) -> Option<usize> {
        match self {
            ShapeType::Square => poly
                .vertices
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                    Some((_, y)) if y <= p.y => best,
                    _ => Some((i, p.y)),
                })
                .map(|(i, _)| i),
            ShapeType::Parallelogram => angles.iter().position(|&a| a == 45.0),
            _ => angles.iter().position(|&a| a == 90.0),
        }
    }

    /// Direction from the canonical centroid to the canonical reference vertex.
    pub fn canonical_direction(self) -> Point {
        let model = self.model();
        let idx = self
            .reference_vertex(&model, self.interior_angles())
            .unwrap_or(0);
        model.vertices[idx] - model.centroid()
    }

    /// Fan triangulation of the canonical model.
    pub fn sub_triangles(self) -> Vec<[Point; 3]> {
        let v = self.model().vertices;
        (1..v.len() - 1).map(|i| [v[0], v[i], v[i + 1]]).collect()
    }

    /// Canonical model scaled by `scale`, rotated by `rotation` degrees about its
    /// centroid, with the centroid moved to `position`.
    pub fn placed(self, position: Point, rotation: f64, scale: f64) -> Vec<Point> {
        let model = self.model();
        let c0 = model.centroid();
        model
            .vertices
            .iter()
            .map(|&p| rotate_about((p - c0) * scale, Point::zeros(), rotation) + position)
            .collect()
    }
}

/// Index of a block in the solver's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub usize);

/// A classified block in pixel space.
///
/// Invariant: `polygon.len() == shape.vertex_count()` and the sorted
/// `interior_angles` equal the shape's canonical angles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub shape: ShapeType,
    /// Measured corners, counterclockwise.
    pub polygon: Polygon,
    /// Snapped interior angles aligned with `polygon`.
    pub interior_angles: Vec<f64>,
    /// Snapped area in puzzle units.
    pub area: f64,
    /// Vertex mean of the measured corners.
    pub center: Point,
    /// Degrees relative to the canonical orientation, in `[0, period)`.
    pub rotation: f64,
}

impl Block {
    /// Canonical outline at this block's pose, in pixel space.
    pub fn outline(&self, length_factor: f64) -> Vec<Point> {
        self.shape.placed(self.center, self.rotation, length_factor)
    }
}
