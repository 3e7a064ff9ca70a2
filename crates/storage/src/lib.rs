//! Configuration and metadata storage for AppBuild.
//!
//! Reads the build configuration and the project metadata from the
//! workspace root, validates them, and writes the build counter back.

#![warn(missing_docs)]

pub mod error;
pub mod json_store;
pub mod atomic;

pub use error::{LoadError, Result};
pub use json_store::{JsonStore, MetadataDocument, CONFIG_FILE, METADATA_FILE, STYLE_LINT_CONFIG};
pub use atomic::write_atomic;
