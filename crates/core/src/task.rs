//! Task model - one named unit of the build producing artifacts for one destination.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// A build task as declared in the build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Unique task name, also the base name of the generated JS/CSS files
    pub name: String,

    /// Build type that activates this task
    #[serde(rename = "type")]
    pub build_type: BuildType,

    /// Destination directory for every artifact of the task
    pub dest_dir: PathBuf,

    /// Entry point of the JS module graph
    #[serde(default, deserialize_with = "empty_as_none")]
    pub js_file: Option<PathBuf>,

    /// Stylesheets, concatenated in this order
    #[serde(default)]
    pub css_files: Vec<PathBuf>,

    /// HTML template
    #[serde(default, deserialize_with = "empty_as_none")]
    pub html_file: Option<PathBuf>,

    /// Directories deleted and recreated empty before the task runs
    #[serde(default)]
    pub clean_dirs: Vec<PathBuf>,

    /// Files and directory trees copied once the artifacts are built
    #[serde(default)]
    pub copy_files: Vec<CopyDescriptor>,
}

impl TaskSpec {
    /// Create a task with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        build_type: impl Into<BuildType>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            build_type: build_type.into(),
            dest_dir: dest_dir.into(),
            js_file: None,
            css_files: Vec::new(),
            html_file: None,
            clean_dirs: Vec::new(),
            copy_files: Vec::new(),
        }
    }

    /// Set the JS entry file.
    pub fn with_js_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.js_file = Some(path.into());
        self
    }

    /// Append a stylesheet.
    pub fn with_css_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.css_files.push(path.into());
        self
    }

    /// Set the HTML template.
    pub fn with_html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_file = Some(path.into());
        self
    }

    /// Append a directory to clean.
    pub fn with_clean_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.clean_dirs.push(path.into());
        self
    }

    /// Append a copy descriptor.
    pub fn with_copy(mut self, src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        self.copy_files.push(CopyDescriptor {
            src: src.into(),
            dest: dest.into(),
        });
        self
    }

    /// Whether the task runs for the selected build type.
    pub fn is_selected(&self, selected: Option<&BuildType>) -> bool {
        selected == Some(&self.build_type)
    }

    /// File name of the minified script, `<name>.min.js`.
    pub fn js_output_name(&self) -> String {
        format!("{}.min.js", self.name)
    }

    /// File name of the assembled stylesheet, `<name>.min.css`.
    pub fn css_output_name(&self) -> String {
        format!("{}.min.css", self.name)
    }

    /// File name of the intermediate bundle in the scratch area, `<name>.js`.
    pub fn bundle_name(&self) -> String {
        format!("{}.js", self.name)
    }

    /// Base name of the HTML template; the directory part is discarded.
    pub fn html_output_name(&self) -> Option<&std::ffi::OsStr> {
        self.html_file.as_deref().and_then(Path::file_name)
    }
}

/// A `{src, dest}` copy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyDescriptor {
    /// File or directory to copy
    pub src: PathBuf,

    /// Target path
    pub dest: PathBuf,
}

/// Tag selecting which tasks run, e.g. `debug` or `release`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildType(String);

impl BuildType {
    /// The build type that turns on stylesheet minification.
    pub const RELEASE: &'static str = "release";

    /// Create a build type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether output should be minified.
    pub fn is_release(&self) -> bool {
        self.0 == Self::RELEASE
    }
}

impl From<&str> for BuildType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for BuildType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl std::str::FromStr for BuildType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Treat `""` the same as an absent path.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        let json = r#"{"name": "app", "type": "debug", "destDir": "./out/"}"#;
        let task: TaskSpec = serde_json::from_str(json).unwrap();

        assert_eq!(task.name, "app");
        assert_eq!(task.build_type.as_str(), "debug");
        assert!(task.js_file.is_none());
        assert!(task.css_files.is_empty());
        assert!(task.clean_dirs.is_empty());
        assert!(task.copy_files.is_empty());
    }

    #[test]
    fn test_empty_paths_are_absent() {
        let json = r#"{"name": "app", "type": "debug", "destDir": "out", "jsFile": "", "htmlFile": ""}"#;
        let task: TaskSpec = serde_json::from_str(json).unwrap();

        assert!(task.js_file.is_none());
        assert!(task.html_file.is_none());
    }

    #[test]
    fn test_output_names() {
        let task = TaskSpec::new("EncryptDecrypt", "release", "dist")
            .with_html_file("src/html/index.html");

        assert_eq!(task.js_output_name(), "EncryptDecrypt.min.js");
        assert_eq!(task.css_output_name(), "EncryptDecrypt.min.css");
        assert_eq!(task.bundle_name(), "EncryptDecrypt.js");
        assert_eq!(task.html_output_name().unwrap(), "index.html");
    }

    #[test]
    fn test_selection() {
        let task = TaskSpec::new("app", "debug", "out");

        assert!(task.is_selected(Some(&BuildType::new("debug"))));
        assert!(!task.is_selected(Some(&BuildType::new("release"))));
        assert!(!task.is_selected(None));
    }

    #[test]
    fn test_release_flag() {
        assert!(BuildType::new("release").is_release());
        assert!(!BuildType::new("debug").is_release());
        assert!(!BuildType::new("Release").is_release());
    }
}
