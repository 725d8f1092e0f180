//! Classifier artifact location.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// File name of the default posture classifier.
pub const CLASSIFIER_FILENAME: &str = "posture_classifier.safetensors";

/// An artifact found in a models directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// File stem.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Returns the models directory path.
///
/// Uses `XDG_DATA_HOME/posture-watch/models` or `~/.local/share/posture-watch/models`.
#[must_use]
pub fn models_dir() -> PathBuf {
    data_dir().join("models")
}

/// Returns the default classifier path inside `dir`, or the default models directory.
#[must_use]
pub fn classifier_path(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(models_dir, Path::to_path_buf)
        .join(CLASSIFIER_FILENAME)
}

/// Returns the application data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("posture-watch")
}

/// Lists safetensors artifacts in `dir`, sorted by name.
///
/// A missing directory has no models.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be read.
pub fn list_models(dir: &Path) -> Result<Vec<ModelEntry>> {
    if !dir.is_dir() {
        debug!("Models directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read models directory: {}", dir.display()))?;

    let mut models: Vec<ModelEntry> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|e| e == "safetensors")
        })
        .map(|path| ModelEntry {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            path,
        })
        .collect();

    models.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(models)
}
