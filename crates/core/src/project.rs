//! Project metadata - identity and build counter of the application being built.

use serde::{Deserialize, Serialize};

/// Project metadata read from the project's `package.json`.
///
/// Only the fields the build needs are typed here. The loader keeps the
/// original document around so that writing the counter back does not
/// drop anything else the file contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Project name
    pub name: String,

    /// Project version
    pub version: String,

    /// License identifier
    pub license: String,

    /// URL of the source repository
    pub sources: String,

    /// Monotonically incrementing build counter
    pub build_number: u64,

    /// Author, used in the copyright line of the script preamble
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl ProjectMetadata {
    /// Return a copy with the build counter advanced by exactly one, or
    /// `None` when the counter is already at its maximum.
    pub fn next_build(&self) -> Option<Self> {
        Some(Self {
            build_number: self.build_number.checked_add(1)?,
            ..self.clone()
        })
    }

    /// Name of the author, if one is declared.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(Author::name)
    }
}

/// Author entry, either the short string form or the object form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    /// `"author": "Jane Doe <jane@example.org>"`
    Short(String),
    /// `"author": { "name": "Jane Doe", ... }`
    Person {
        /// Display name
        name: String,
    },
}

impl Author {
    /// Display name of the author.
    pub fn name(&self) -> &str {
        match self {
            Author::Short(name) => name,
            Author::Person { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_package_json() {
        let json = r#"{
            "name": "EncryptDecrypt",
            "version": "2.1.0",
            "license": "GPL-3.0",
            "sources": "https://github.com/wwwouaiebe/EncryptDecrypt",
            "buildNumber": 41,
            "dependencies": { "rollup": "^4.0.0" }
        }"#;

        let metadata: ProjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.name, "EncryptDecrypt");
        assert_eq!(metadata.build_number, 41);
        assert!(metadata.author.is_none());
    }

    #[test]
    fn test_next_build_increments_once() {
        let json = r#"{"name":"a","version":"1","license":"MIT","sources":"s","buildNumber":7}"#;
        let metadata: ProjectMetadata = serde_json::from_str(json).unwrap();

        let next = metadata.next_build().unwrap();
        assert_eq!(next.build_number, 8);
        assert_eq!(metadata.build_number, 7);
        assert_eq!(next.name, metadata.name);
    }

    #[test]
    fn test_next_build_at_maximum() {
        let json = r#"{"name":"a","version":"1","license":"MIT","sources":"s","buildNumber":18446744073709551615}"#;
        let metadata: ProjectMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.build_number, u64::MAX);
        assert!(metadata.next_build().is_none());
    }

    #[test]
    fn test_missing_build_number_is_rejected() {
        let json = r#"{"name":"a","version":"1","license":"MIT","sources":"s"}"#;
        assert!(serde_json::from_str::<ProjectMetadata>(json).is_err());
    }

    #[test]
    fn test_author_forms() {
        let short: Author = serde_json::from_str(r#""wwwouaiebe""#).unwrap();
        assert_eq!(short.name(), "wwwouaiebe");

        let person: Author =
            serde_json::from_str(r#"{"name": "wwwouaiebe", "url": "https://www.ouaie.be/"}"#).unwrap();
        assert_eq!(person.name(), "wwwouaiebe");
    }
}
