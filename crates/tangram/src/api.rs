//! Scene-level entry points for callers that own I/O.
//!
//! A scene is what the vision step hands over: block contours (corners plus
//! raw pixel area) and silhouette contours. `solve_scene` classifies,
//! decomposes and solves, collecting per-contour failures instead of aborting.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geom2::Point;
use crate::shadow::{Decomposer, Shadow};
use crate::shape::{Block, Classifier};
use crate::solver::{Solution, Solver};

/// One measured block contour, pixel space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub corners: Vec<[f64; 2]>,
    /// Raw contour area in pixels².
    pub area: f64,
}

/// Scene input as the vision step produces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub blocks: Vec<Contour>,
    pub silhouettes: Vec<Vec<[f64; 2]>>,
}

/// A contour excluded from the scene, with the reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rejected {
    /// Index of the contour in the scene input.
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneReport {
    /// Classified blocks. `Placement::block` indexes into this list.
    pub blocks: Vec<Block>,
    /// Scene contour index of each entry in `blocks`.
    pub block_sources: Vec<usize>,
    pub rejected_blocks: Vec<Rejected>,
    /// Decomposed pieces. `UnsolvedPiece::index` and `Placement::shadow` index into this list.
    pub shadows: Vec<Shadow>,
    /// Scene silhouette index of each entry in `shadows`.
    pub shadow_sources: Vec<usize>,
    pub rejected_silhouettes: Vec<Rejected>,
    pub solution: Solution,
}

fn points(xy: &[[f64; 2]]) -> Vec<Point> {
    xy.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

/// Classify every contour; failures are collected, not fatal.
pub fn classify_all(contours: &[Contour], cfg: &Config) -> (Vec<(usize, Block)>, Vec<Rejected>) {
    let classifier = Classifier::new(cfg.units, cfg.classify);
    let mut blocks = Vec::new();
    let mut rejected = Vec::new();
    for (index, c) in contours.iter().enumerate() {
        match classifier.classify(&points(&c.corners), c.area) {
            Ok(b) => blocks.push((index, b)),
            Err(e) => {
                debug!(index, error = %e, "block contour rejected");
                rejected.push(Rejected {
                    index,
                    reason: Error::from(e).to_string(),
                });
            }
        }
    }
    (blocks, rejected)
}

/// Decompose every silhouette; failures are collected, not fatal.
pub fn decompose_all(
    silhouettes: &[Vec<[f64; 2]>],
    cfg: &Config,
) -> (Vec<(usize, Shadow)>, Vec<Rejected>) {
    let decomposer = Decomposer::new(cfg.units, cfg.decompose);
    let mut shadows = Vec::new();
    let mut rejected = Vec::new();
    for (index, s) in silhouettes.iter().enumerate() {
        match decomposer.decompose(&points(s)) {
            Ok(pieces) => shadows.extend(pieces.into_iter().map(|p| (index, p))),
            Err(e) => {
                debug!(index, error = %e, "silhouette rejected");
                rejected.push(Rejected {
                    index,
                    reason: Error::from(e).to_string(),
                });
            }
        }
    }
    (shadows, rejected)
}

/// Classify, decompose and solve a whole scene.
///
/// Only solver preconditions are fatal (`Error::Solve`); malformed or
/// unrecognized contours end up in the `rejected_*` lists.
pub fn solve_scene(scene: &Scene, cfg: &Config) -> Result<SceneReport> {
    let (blocks, rejected_blocks) = classify_all(&scene.blocks, cfg);
    let (shadows, rejected_silhouettes) = decompose_all(&scene.silhouettes, cfg);
    let (block_sources, blocks): (Vec<usize>, Vec<Block>) = blocks.into_iter().unzip();
    let (shadow_sources, shadows): (Vec<usize>, Vec<Shadow>) = shadows.into_iter().unzip();

    let solution = Solver::new(cfg.units, cfg.geom, cfg.search).solve(&blocks, &shadows)?;
    info!(
        blocks = blocks.len(),
        shadows = shadows.len(),
        placements = solution.placements.len(),
        unsolved = solution.unsolved.len(),
        "scene solved"
    );
    Ok(SceneReport {
        blocks,
        block_sources,
        rejected_blocks,
        shadows,
        shadow_sources,
        rejected_silhouettes,
        solution,
    })
}
