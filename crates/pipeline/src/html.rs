//! HTML post-processing.
//!
//! Placeholder tags are swapped for references to the task's generated
//! artifacts, then comments and redundant whitespace are stripped. This is
//! literal text substitution, not a DOM transform.

use appbuild_core::{HtmlPlaceholders, IntegrityToken};
use regex::Regex;
use std::sync::OnceLock;

/// A generated artifact referenced from the HTML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    /// File name relative to the HTML output
    pub file_name: String,

    /// Digest of the file's exact content
    pub integrity: IntegrityToken,
}

impl ArtifactRef {
    /// Reference `file_name` with its digest.
    pub fn new(file_name: impl Into<String>, integrity: IntegrityToken) -> Self {
        Self {
            file_name: file_name.into(),
            integrity,
        }
    }
}

/// Rewrites HTML templates for one build configuration.
#[derive(Debug, Clone, Default)]
pub struct HtmlRewriter {
    placeholders: HtmlPlaceholders,
}

impl HtmlRewriter {
    /// Create a rewriter matching `placeholders`.
    pub fn new(placeholders: HtmlPlaceholders) -> Self {
        Self { placeholders }
    }

    /// Produce the final HTML for `template`.
    ///
    /// Each placeholder is replaced only when the matching artifact exists;
    /// comment and whitespace stripping always applies.
    pub fn rewrite(
        &self,
        template: &str,
        script: Option<&ArtifactRef>,
        style: Option<&ArtifactRef>,
    ) -> String {
        let mut html = template.to_string();

        if let Some(script) = script {
            html = html.replace(&self.placeholders.script, &script_tag(script));
        }
        if let Some(style) = style {
            html = html.replace(&self.placeholders.style, &style_tag(style));
        }

        minify_html(&html)
    }
}

/// `<script>` tag with subresource integrity.
pub fn script_tag(artifact: &ArtifactRef) -> String {
    format!(
        r#"<script src="{}" integrity="{}" crossorigin="anonymous" ></script>"#,
        artifact.file_name,
        artifact.integrity.attribute_value()
    )
}

/// Stylesheet `<link>` tag with subresource integrity.
pub fn style_tag(artifact: &ArtifactRef) -> String {
    format!(
        r#"<link rel="stylesheet" href="{}" integrity="{}" crossorigin="anonymous" />"#,
        artifact.file_name,
        artifact.integrity.attribute_value()
    )
}

fn comments() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"))
}

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r\n|\r|\n|\t").expect("static regex"))
}

fn space_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("static regex"))
}

/// Strip `<!-- -->` comments, turn line breaks and tabs into spaces, and
/// collapse space runs.
///
/// Whitespace inside `<pre>` and `<script>` bodies is collapsed too.
pub fn minify_html(html: &str) -> String {
    let mut html = html.to_string();

    // removing one comment can splice the halves of an enclosing one together
    loop {
        let stripped = comments().replace_all(&html, "");
        if stripped == html {
            break;
        }
        html = stripped.into_owned();
    }

    let html = line_breaks().replace_all(&html, " ");
    space_runs().replace_all(&html, " ").into_owned()
}
