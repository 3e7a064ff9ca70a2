//! Subresource-integrity token.

use serde::{Deserialize, Serialize};

/// Base64-encoded SHA-384 digest of an artifact's final bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrityToken(String);

impl IntegrityToken {
    /// Algorithm prefix used in `integrity` attributes.
    pub const ALGORITHM: &'static str = "sha384";

    /// Wrap an already base64-encoded digest.
    pub fn from_base64(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// The bare base64 digest.
    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Value of the `integrity` attribute, `sha384-<digest>`.
    pub fn attribute_value(&self) -> String {
        format!("{}-{}", Self::ALGORITHM, self.0)
    }
}

impl std::fmt::Display for IntegrityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.attribute_value())
    }
}
