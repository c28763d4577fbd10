use thiserror::Error;

use crate::shape::ShapeType;

/// Malformed polygon input. Fatal for that contour only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("polygon has {0} vertices, need at least 3")]
    TooFewVertices(usize),

    #[error("polygon has no edges after deduplication")]
    NoEdges,

    #[error("invalid contour area {0}")]
    InvalidArea(f64),

    #[error("non-finite coordinate in polygon")]
    NonFinite,
}

/// A contour that is not one of the five block shapes. Non-fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifyError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("unrecognized area {scaled:.3} (puzzle units)")]
    UnrecognizedArea { scaled: f64 },

    #[error("no shape with {vertices} vertices and area {area}")]
    Unrecognized { vertices: usize, area: f64 },

    #[error("angles {angles:?} do not match {shape:?}")]
    AngleMismatch { shape: ShapeType, angles: Vec<f64> },
}

/// Solver preconditions. Unsolved pieces are not errors; see `Solution::unsolved`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("cannot solve: insufficient blocks (block area {available:.3} < shadow area {required:.3})")]
    InsufficientBlocks { available: f64, required: f64 },

    #[error("at most {max} blocks are supported, got {got}")]
    TooManyBlocks { got: usize, max: usize },
}

/// Any library error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("decomposition failed: {0}")]
    Decompose(#[from] InputError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
