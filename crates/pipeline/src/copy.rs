//! Static file copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors raised while copying a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// The source could not be read
    #[error("cannot read copy source {}: {source}", .path.display())]
    Source {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The destination could not be written
    #[error("cannot write copy destination {}: {source}", .path.display())]
    Destination {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The copy worker panicked or was cancelled
    #[error("copy worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Copy `src` to `dest`, overwriting existing files.
///
/// A directory is copied recursively; a file is copied after its
/// destination's parent directories are created. Symbolic links inside a
/// copied tree are skipped.
pub async fn copy_entry(src: &Path, dest: &Path) -> Result<(), CopyError> {
    let src = src.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || copy_blocking(&src, &dest)).await?
}

fn copy_blocking(src: &Path, dest: &Path) -> Result<(), CopyError> {
    let meta = fs::metadata(src).map_err(|source| CopyError::Source {
        path: src.to_path_buf(),
        source,
    })?;

    let src_real = fs::canonicalize(src).map_err(|source| CopyError::Source {
        path: src.to_path_buf(),
        source,
    })?;
    let dest_real = canonicalize_existing(dest).map_err(|source| CopyError::Destination {
        path: dest.to_path_buf(),
        source,
    })?;

    // a tree copied into itself would keep walking what it just created
    let overlaps = if meta.is_dir() {
        dest_real.starts_with(&src_real)
    } else {
        dest_real == src_real
    };
    if overlaps {
        return Err(CopyError::Destination {
            path: dest.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "cannot copy a path into itself"),
        });
    }

    if meta.is_dir() {
        copy_tree(src, dest)
    } else {
        copy_file(src, dest)
    }
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest.
fn canonicalize_existing(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        match fs::canonicalize(existing) {
            Ok(real) => {
                return Ok(missing.iter().rev().fold(real, |acc: PathBuf, part| acc.join(part)));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(err);
                };
                missing.push(name);
                existing = parent;
            }
            Err(err) => return Err(err),
        }
    }
}

fn copy_tree(src: &Path, dest: &Path) -> Result<(), CopyError> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(src).to_path_buf();
            CopyError::Source {
                path,
                source: err.into(),
            }
        })?;

        // walkdir only yields paths below `src`
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|source| CopyError::Destination { path: target, source })?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(|source| copy_error(entry.path(), &target, source))?;
        } else {
            tracing::warn!("Skipping {} (not a regular file)", entry.path().display());
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), CopyError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CopyError::Destination {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::copy(src, dest).map_err(|source| copy_error(src, dest, source))?;
    Ok(())
}

/// Attribute an `fs::copy` failure to whichever side is unusable.
fn copy_error(src: &Path, dest: &Path, source: io::Error) -> CopyError {
    if fs::File::open(src).is_err() {
        CopyError::Source {
            path: src.to_path_buf(),
            source,
        }
    } else {
        CopyError::Destination {
            path: dest.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("favicon.ico");
        fs::write(&src, b"icon").unwrap();
        let dest = dir.path().join("out/assets/img/favicon.ico");

        copy_entry(&src, &dest).await.unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"icon");
    }

    #[tokio::test]
    async fn test_copy_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old contents").unwrap();

        copy_entry(&src, &dest).await.unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_copy_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("static");
        fs::create_dir_all(src.join("fonts/woff")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("robots.txt"), "User-agent: *").unwrap();
        fs::write(src.join("fonts/woff/a.woff"), [0u8, 1, 2]).unwrap();

        let dest = dir.path().join("out/static");
        copy_entry(&src, &dest).await.unwrap();

        assert_eq!(fs::read_to_string(dest.join("robots.txt")).unwrap(), "User-agent: *");
        assert_eq!(fs::read(dest.join("fonts/woff/a.woff")).unwrap(), vec![0u8, 1, 2]);
        assert!(dest.join("empty").is_dir());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("missing");

        let err = copy_entry(&src, &dir.path().join("out")).await.unwrap_err();
        assert!(matches!(err, CopyError::Source { path, .. } if path == src));
    }

    #[tokio::test]
    async fn test_tree_into_itself_is_refused() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("site");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "<p></p>").unwrap();

        let err = copy_entry(&src, &src.join("backup")).await.unwrap_err();
        assert!(matches!(err, CopyError::Destination { .. }));
        assert!(!src.join("backup").exists());
        assert_eq!(fs::read_dir(&src).unwrap().count(), 1);

        // same check through a non-normalized path
        let err = copy_entry(&src, &dir.path().join("site/../site/nested/deeper")).await.unwrap_err();
        assert!(matches!(err, CopyError::Destination { .. }));
        assert!(!src.join("nested").exists());
    }

    #[tokio::test]
    async fn test_file_onto_itself_is_refused() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "keep").unwrap();

        let err = copy_entry(&src, &src).await.unwrap_err();
        assert!(matches!(err, CopyError::Destination { .. }));
        assert_eq!(fs::read_to_string(&src).unwrap(), "keep");
    }

    #[tokio::test]
    async fn test_sibling_with_common_prefix_is_allowed() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("site");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();

        copy_entry(&src, &dir.path().join("site-backup")).await.unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("site-backup/a.txt")).unwrap(), "a");
    }

    #[tokio::test]
    async fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "x").unwrap();
        // a regular file where a parent directory is needed
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = copy_entry(&src, &blocker.join("a.txt")).await.unwrap_err();
        assert!(matches!(err, CopyError::Destination { .. }));
    }
}
