//! Quality Assurance
//!
//! Project-wide lint passes run before any build task.

#![warn(missing_docs)]

pub mod engine;
pub mod linters;
pub mod parser;

pub use engine::{LintError, LintPass};
pub use linters::{EslintLinter, LintReport, ScriptLinter, StyleLinter, StylelintLinter};
