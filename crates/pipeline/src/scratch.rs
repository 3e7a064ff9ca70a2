//! Scratch area for intermediate bundles.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::TaskError;

/// Default scratch directory, relative to the workspace root.
pub const SCRATCH_DIR: &str = "tmp";

/// Transient directory holding the unminified bundle between the bundle and
/// minify steps.
#[derive(Debug, Clone)]
pub struct ScratchArea {
    path: PathBuf,
}

impl ScratchArea {
    /// Scratch area at `path`. Nothing is touched until a method is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scratch directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `file_name` inside the scratch area.
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Remove any leftover contents.
    pub async fn reset(&self) -> Result<(), TaskError> {
        remove_if_present(&self.path)
            .await
            .map_err(|source| TaskError::Scratch { path: self.path.clone(), source })
    }

    /// Create the scratch directory (and its parents).
    pub async fn create(&self) -> Result<(), TaskError> {
        fs::create_dir_all(&self.path)
            .await
            .map_err(|source| TaskError::Scratch { path: self.path.clone(), source })
    }

    /// Best-effort removal; failures are logged and ignored.
    pub async fn discard(&self) {
        if let Err(err) = remove_if_present(&self.path).await {
            tracing::warn!("Cannot remove scratch area {}: {}", self.path.display(), err);
        }
    }
}

async fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path).await {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
