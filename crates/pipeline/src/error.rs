//! Build errors.

use appbuild_quality::LintError;
use appbuild_storage::LoadError;
use std::path::PathBuf;

use crate::copy::CopyError;

/// Errors that abort a single task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A clean directory could not be removed or recreated
    #[error("cannot clean {}: {source}", .path.display())]
    Clean {
        /// Directory
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The scratch area could not be reset or created
    #[error("cannot prepare scratch area {}: {source}", .path.display())]
    Scratch {
        /// Scratch directory
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The destination directory neither exists nor can be created
    #[error("invalid destination directory {}: {source}", .path.display())]
    Directory {
        /// Destination directory
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The bundler failed
    #[error("bundling failed: {0:#}")]
    Bundle(anyhow::Error),

    /// The minifier failed
    #[error("minification failed: {0:#}")]
    Minify(anyhow::Error),

    /// A stylesheet could not be read
    #[error("cannot read stylesheet {}: {source}", .path.display())]
    Css {
        /// Stylesheet
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The HTML template could not be read
    #[error("cannot read HTML template {}: {source}", .path.display())]
    Html {
        /// Template
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// An artifact could not be written
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A copy entry failed
    #[error(transparent)]
    Copy(#[from] CopyError),
}

/// Errors that end a build run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Project metadata missing or unparseable
    #[error("cannot load project metadata: {0}")]
    Metadata(#[source] LoadError),

    /// Build configuration missing, unparseable or invalid
    #[error("cannot load build configuration: {0}")]
    Config(#[source] LoadError),

    /// A lint pass reported errors
    #[error(transparent)]
    Lint(#[from] LintError),

    /// A task failed
    #[error("task '{task}' failed: {source}")]
    Task {
        /// Task name
        task: String,
        /// Failing step
        source: TaskError,
    },

    /// The build counter could not be written back
    #[error("cannot save project metadata: {0}")]
    Persist(#[source] LoadError),
}
