//! JSON file store.
//!
//! The build configuration (`AppBuilder.json`) and the project metadata
//! (`package.json`) live at the workspace root. Relative paths found in the
//! configuration are resolved against the same root.

use appbuild_core::{BuildConfig, ProjectMetadata};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{write_atomic, LoadError, Result};

/// Build configuration file name.
pub const CONFIG_FILE: &str = "AppBuilder.json";

/// Project metadata file name.
pub const METADATA_FILE: &str = "package.json";

/// Stylelint rule file used when the configuration names none.
pub const STYLE_LINT_CONFIG: &str = "StyleLintConfig.js";

/// File-based JSON store rooted at the workspace directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store. Nothing is read until a load method is called.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a configured path against the workspace root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Load and validate the build configuration.
    pub async fn load_config(&self) -> Result<BuildConfig> {
        let path = self.config_path();
        let config: BuildConfig = read_json(&path).await?;
        config
            .validate()
            .map_err(|source| LoadError::Invalid { path: path.clone(), source })?;

        tracing::debug!("Loaded {} task(s) from {}", config.tasks.len(), path.display());
        Ok(config)
    }

    /// Load the project metadata; the returned document already carries the
    /// next build number.
    pub async fn load_metadata(&self) -> Result<MetadataDocument> {
        let path = self.metadata_path();
        let value: Value = read_json(&path).await?;

        let Value::Object(raw) = value else {
            return Err(LoadError::NotAnObject { path });
        };

        let current: ProjectMetadata = serde_json::from_value(Value::Object(raw.clone()))
            .map_err(|source| LoadError::Parse { path: path.clone(), source })?;

        let metadata = current
            .next_build()
            .ok_or_else(|| LoadError::BuildNumberOverflow { path: path.clone() })?;

        Ok(MetadataDocument { raw, metadata })
    }

    /// Write the metadata back, 4-space indented, with the new build number.
    pub async fn save_metadata(&self, document: &MetadataDocument) -> Result<()> {
        let path = self.metadata_path();
        let json = document
            .to_json_string()
            .map_err(|source| LoadError::Parse { path: path.clone(), source })?;

        write_atomic(&path, json)
            .await
            .map_err(|source| LoadError::Write { path: path.clone(), source })?;

        tracing::debug!("Saved build {} to {}", document.metadata.build_number, path.display());
        Ok(())
    }
}

/// Project metadata plus the untouched document it came from.
#[derive(Debug, Clone)]
pub struct MetadataDocument {
    raw: Map<String, Value>,
    metadata: ProjectMetadata,
}

impl MetadataDocument {
    /// Typed metadata for this run.
    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Serialize the original document with only `buildNumber` changed.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut raw = self.raw.clone();
        raw.insert(
            "buildNumber".to_string(),
            Value::from(self.metadata.build_number),
        );

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        raw.serialize(&mut ser)?;

        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&json).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
}
