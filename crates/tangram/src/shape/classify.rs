//! Contour → block classification.

use serde::{Deserialize, Serialize};

use crate::config::Units;
use crate::error::{ClassifyError, InputError};
use crate::geom2::{normalize_degrees, signed_angle, snap_to, Point, Polygon};

use super::types::{Block, ShapeType};

/// Canonical block areas in puzzle units.
const BLOCK_AREAS: [f64; 3] = [0.5, 1.0, 2.0];
/// Canonical block corner angles.
const BLOCK_ANGLES: [f64; 3] = [45.0, 90.0, 135.0];

/// Classifier tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyCfg {
    /// Max distance (puzzle area units) to snap a measured area onto 0.5/1/2.
    pub area_tolerance: f64,
    /// Max distance (degrees) to snap a corner onto 45/90/135.
    pub angle_tolerance: f64,
}

impl Default for ClassifyCfg {
    fn default() -> Self {
        Self {
            area_tolerance: 0.25,
            angle_tolerance: 22.5,
        }
    }
}

/// Turns measured contours into `Block`s.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    units: Units,
    cfg: ClassifyCfg,
}

impl Classifier {
    pub fn new(units: Units, cfg: ClassifyCfg) -> Self {
        Self { units, cfg }
    }

    /// Raw pixel area → puzzle units, rounded to 0.1 and snapped onto a block area.
    pub fn scaled_area(&self, raw_area: f64) -> Result<f64, ClassifyError> {
        if !raw_area.is_finite() || raw_area <= 0.0 {
            return Err(InputError::InvalidArea(raw_area).into());
        }
        let scaled = (self.units.area_to_units(raw_area) * 10.0).round() / 10.0;
        snap_to(scaled, &BLOCK_AREAS, self.cfg.area_tolerance)
            .ok_or(ClassifyError::UnrecognizedArea { scaled })
    }

    /// Interior angles snapped onto 45/90/135 where close enough; others stay as measured.
    pub fn snapped_angles(&self, poly: &Polygon) -> Vec<f64> {
        poly.interior_angles()
            .into_iter()
            .map(|a| snap_to(a, &BLOCK_ANGLES, self.cfg.angle_tolerance).unwrap_or(a))
            .collect()
    }

    /// Classify one contour given its corners (pixel space) and raw pixel area.
    pub fn classify(&self, corners: &[Point], raw_area: f64) -> Result<Block, ClassifyError> {
        if corners.len() < 3 {
            return Err(InputError::TooFewVertices(corners.len()).into());
        }
        if corners.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::NonFinite.into());
        }
        let area = self.scaled_area(raw_area)?;
        let polygon = Polygon::new(corners.to_vec()).to_ccw();
        let angles = self.snapped_angles(&polygon);

        let shape = dispatch(polygon.len(), area, &angles).ok_or(ClassifyError::Unrecognized {
            vertices: polygon.len(),
            area,
        })?;
        if !same_multiset(&angles, shape.interior_angles()) {
            return Err(ClassifyError::AngleMismatch { shape, angles });
        }

        let center = polygon.centroid();
        let reference = shape
            .reference_vertex(&polygon, &angles)
            .ok_or_else(|| ClassifyError::AngleMismatch {
                shape,
                angles: angles.clone(),
            })?;
        let measured = polygon.vertices[reference] - center;
        let rotation = normalize_degrees(
            signed_angle(shape.canonical_direction(), measured),
            shape.period(),
        );

        tracing::debug!(
            ?shape,
            area,
            rotation,
            center_x = center.x,
            center_y = center.y,
            "classified block"
        );

        Ok(Block {
            shape,
            polygon,
            interior_angles: angles,
            area,
            center,
            rotation,
        })
    }
}

/// Shape from (vertex count, snapped area, max angle).
fn dispatch(vertices: usize, area: f64, angles: &[f64]) -> Option<ShapeType> {
    let max_angle = angles.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    match (vertices, area) {
        (4, a) if a == 1.0 && max_angle == 135.0 => Some(ShapeType::Parallelogram),
        (4, a) if a == 1.0 && max_angle == 90.0 => Some(ShapeType::Square),
        (3, a) if a == 0.5 => Some(ShapeType::SmallTriangle),
        (3, a) if a == 1.0 => Some(ShapeType::MediumTriangle),
        (3, a) if a == 2.0 => Some(ShapeType::LargeTriangle),
        _ => None,
    }
}

/// Equal as multisets (values are snapped, so exact comparison is intended).
pub(crate) fn same_multiset(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);
    a == b
}
