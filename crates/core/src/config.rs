//! Build configuration - the ordered task list and the lint file sets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::task::TaskSpec;

/// Default placeholder replaced by the minified script tag.
pub const DEFAULT_SCRIPT_PLACEHOLDER: &str = r#"<script src="main.js" type="module"></script>"#;

/// Default placeholder replaced by the assembled stylesheet tag.
pub const DEFAULT_STYLE_PLACEHOLDER: &str = r#"<link rel="stylesheet" href="EncryptDecrypt.css" />"#;

/// Contents of `AppBuilder.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Tasks, executed in this order
    pub tasks: Vec<TaskSpec>,

    /// Files checked (and auto-fixed) by ESLint before any task runs
    #[serde(rename = "ESLintFiles", default)]
    pub eslint_files: Vec<String>,

    /// Files checked by Stylelint before any task runs
    #[serde(default)]
    pub style_lint_files: Vec<String>,

    /// Stylelint rule file
    #[serde(default)]
    pub style_lint_config: Option<PathBuf>,

    /// Literal tags rewritten in HTML templates
    #[serde(flatten)]
    pub placeholders: HtmlPlaceholders,
}

impl BuildConfig {
    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut names = HashSet::new();

        for task in &self.tasks {
            if task.name.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    task: task.name.clone(),
                    field: "name",
                });
            }
            if task.build_type.as_str().is_empty() {
                return Err(ValidationError::MissingField {
                    task: task.name.clone(),
                    field: "type",
                });
            }
            if task.dest_dir.as_os_str().is_empty() {
                return Err(ValidationError::MissingField {
                    task: task.name.clone(),
                    field: "destDir",
                });
            }
            for copy in &task.copy_files {
                if copy.src.as_os_str().is_empty() || copy.dest.as_os_str().is_empty() {
                    return Err(ValidationError::EmptyCopy {
                        task: task.name.clone(),
                    });
                }
            }
            if !names.insert(task.name.as_str()) {
                return Err(ValidationError::DuplicateTask(task.name.clone()));
            }
        }

        if self.placeholders.script.is_empty() || self.placeholders.style.is_empty() {
            return Err(ValidationError::EmptyPlaceholder);
        }

        Ok(())
    }

}

/// Placeholder tags substituted by the HTML rewriter.
///
/// These are matched literally, never as patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlPlaceholders {
    /// Tag replaced by the minified script reference
    #[serde(rename = "scriptPlaceholder", default = "default_script_placeholder")]
    pub script: String,

    /// Tag replaced by the assembled stylesheet reference
    #[serde(rename = "stylePlaceholder", default = "default_style_placeholder")]
    pub style: String,
}

impl Default for HtmlPlaceholders {
    fn default() -> Self {
        Self {
            script: default_script_placeholder(),
            style: default_style_placeholder(),
        }
    }
}

fn default_script_placeholder() -> String {
    DEFAULT_SCRIPT_PLACEHOLDER.to_string()
}

fn default_style_placeholder() -> String {
    DEFAULT_STYLE_PLACEHOLDER.to_string()
}

/// Invalid build configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Two tasks share a name
    #[error("duplicate task name '{0}'")]
    DuplicateTask(String),

    /// A required task field is empty
    #[error("task '{task}': field '{field}' must not be empty")]
    MissingField {
        /// Task name
        task: String,
        /// Offending field
        field: &'static str,
    },

    /// A copy entry without source or destination
    #[error("task '{task}': copy entries need both 'src' and 'dest'")]
    EmptyCopy {
        /// Task name
        task: String,
    },

    /// A placeholder tag configured as an empty string
    #[error("HTML placeholders must not be empty")]
    EmptyPlaceholder,
}
