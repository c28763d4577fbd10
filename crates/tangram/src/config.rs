//! Configuration for the whole pipeline.
//!
//! Policy
//! - Every tolerance lives in a small `*Cfg` struct with a `Default` carrying
//!   the calibrated values; nothing reads ambient globals.
//! - `Config` aggregates them for callers that own I/O (the CLI reads it from
//!   JSON; missing fields fall back to defaults).

use serde::{Deserialize, Serialize};

use crate::geom2::GeomCfg;
use crate::shadow::DecomposeCfg;
use crate::shape::ClassifyCfg;
use crate::solver::SearchCfg;

/// Pixel ↔ puzzle unit conversion.
///
/// One puzzle length unit is the leg of the small triangle (the square's side).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Units {
    /// Pixel² per puzzle area unit.
    pub area_factor: f64,
    /// Pixels per puzzle length unit.
    pub length_factor: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            area_factor: 16000.0,
            length_factor: 123.0,
        }
    }
}

impl Units {
    #[inline]
    pub fn area_to_units(&self, pixel_area: f64) -> f64 {
        pixel_area / self.area_factor
    }
}

/// All knobs in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub units: Units,
    pub geom: GeomCfg,
    pub classify: ClassifyCfg,
    pub decompose: DecomposeCfg,
    pub search: SearchCfg,
}
