//! Whole-file writes that never leave a truncated target behind.

use std::path::{Path, PathBuf};
use tokio::fs;

/// Write `contents` to a sibling `.<name>.partial` file, then rename it over `path`.
///
/// The target either keeps its previous content or receives all of `contents`.
pub async fn write_atomic(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    if let Err(e) = fs::write(&partial, contents.as_ref()).await {
        let _ = fs::remove_file(&partial).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&partial, path).await {
        let _ = fs::remove_file(&partial).await;
        return Err(e);
    }

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app.min.css");

        write_atomic(&target, "body{margin:0}").await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "body{margin:0}");
        assert!(!dir.path().join(".app.min.css.partial").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("index.html");
        std::fs::write(&target, "old").unwrap();

        write_atomic(&target, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_missing_parent_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("app.min.js");

        assert!(write_atomic(&target, "x").await.is_err());
        assert!(!target.exists());
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("dist/app.min.js")),
            PathBuf::from("dist/.app.min.js.partial")
        );
    }
}
