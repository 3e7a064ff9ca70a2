//! AppBuild core data models.
//!
//! This crate defines the configuration and metadata structures shared by
//! the loader, the tool adapters and the build pipeline.

#![warn(missing_docs)]

// Project metadata
mod project;

// Build configuration
mod config;
mod task;

// Generated artifacts
mod integrity;

// Re-exports
pub use project::{Author, ProjectMetadata};
pub use config::{
    BuildConfig, HtmlPlaceholders, ValidationError, DEFAULT_SCRIPT_PLACEHOLDER,
    DEFAULT_STYLE_PLACEHOLDER,
};
pub use task::{BuildType, CopyDescriptor, TaskSpec};
pub use integrity::IntegrityToken;
