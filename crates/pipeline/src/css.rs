//! Stylesheet assembly.

use appbuild_core::IntegrityToken;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::fs;

use crate::error::TaskError;
use crate::hash::digest;

/// Concatenated stylesheet and its integrity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssBundle {
    /// Final stylesheet content
    pub content: String,

    /// Digest of `content`
    pub integrity: IntegrityToken,
}

/// Concatenate `files` in order; in release mode clean the result.
///
/// The digest is taken over the final content.
pub async fn assemble(files: &[PathBuf], release: bool) -> Result<CssBundle, TaskError> {
    let mut content = String::new();
    for file in files {
        let css = fs::read_to_string(file)
            .await
            .map_err(|source| TaskError::Css { path: file.clone(), source })?;
        content.push_str(&css);
    }

    if release {
        content = clean_css(&content);
    }

    let integrity = digest(&content);
    Ok(CssBundle { content, integrity })
}

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\r\n\t]").expect("static regex"))
}

fn comments() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("static regex"))
}

fn space_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("static regex"))
}

/// Lossy stylesheet minification: line breaks and tabs become spaces,
/// `/* */` comments go, space runs collapse, and spaces around `:` and
/// before `{` are dropped.
pub fn clean_css(css: &str) -> String {
    let css = line_breaks().replace_all(css, " ");
    let css = comments().replace_all(&css, "");
    let css = space_runs().replace_all(&css, " ");

    css.replace(": ", ":").replace(" :", ":").replace(" {", "{")
}
