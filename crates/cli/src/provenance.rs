//! Provenance sidecars: `<artifact-stem>.provenance.json` next to each output.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the parameters that went in and a few counts
/// that came out.
pub struct Payload {
    pub params: Value,
    pub counts: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            counts: Value::Null,
        }
    }

    pub fn with_counts(mut self, counts: Value) -> Self {
        self.counts = counts;
        self
    }
}

/// Write the sidecar with git revision, library version, callsite, params and counts.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "tangram_version": tangram::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "counts": payload.counts,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("result"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_follows_artifact_stem() {
        let derived = provenance_path(Path::new("/tmp/out/result.json"));
        assert_eq!(derived, Path::new("/tmp/out/result.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_counts() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("solved.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new(json!({ "input": "scene.json" }))
            .with_counts(json!({ "placements": 2 }));
        let path = write_sidecar(&artifact, payload).unwrap();
        assert!(path.ends_with("solved.provenance.json"));

        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(doc["params"]["input"], "scene.json");
        assert_eq!(doc["counts"]["placements"], 2);
        assert_eq!(doc["tangram_version"], tangram::VERSION);
    }
}
