//! Build pipeline (task execution and artifact integrity)
//!
//! Runs the configured tasks in order: clean, bundle and minify scripts,
//! assemble stylesheets, rewrite the HTML template with integrity hashes,
//! and copy static files. The first failure stops the whole run.

#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod css;
pub mod html;
pub mod copy;
pub mod scratch;
pub mod context;
pub mod executor;
pub mod report;
pub mod runner;

pub use error::{BuildError, TaskError};
pub use hash::digest;
pub use css::{assemble, clean_css, CssBundle};
pub use html::{minify_html, ArtifactRef, HtmlRewriter};
pub use copy::{copy_entry, CopyError};
pub use scratch::ScratchArea;
pub use context::{ArtifactHashes, RunState};
pub use executor::{TaskOutcome, TaskPipeline, Toolchain};
pub use runner::{BuildRunner, RunReport};
