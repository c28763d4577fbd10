//! JSON I/O for scenes, configuration and reports.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tangram::api::Scene;
use tangram::Config;

pub fn read_scene(path: &Path) -> Result<Scene> {
    let bytes = fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
}

/// Defaults when `path` is `None`; fields missing from the file also default.
pub fn read_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing config {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
