//! Lint pass engine.

use appbuild_core::BuildConfig;
use std::path::PathBuf;
use std::sync::Arc;

use crate::linters::{LintReport, ScriptLinter, StyleLinter};

/// Errors raised by a lint pass.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// The linter ran and reported errors
    #[error("{linter} reported {errors} error(s)")]
    Failed {
        /// Linter name
        linter: &'static str,
        /// Error count
        errors: usize,
    },

    /// The linter could not be run
    #[error("{linter} failed: {source}")]
    Tool {
        /// Linter name
        linter: &'static str,
        /// Underlying error
        source: anyhow::Error,
    },
}

/// Runs the project-wide ESLint then Stylelint passes.
pub struct LintPass {
    script: Arc<dyn ScriptLinter>,
    style: Arc<dyn StyleLinter>,
    style_config: PathBuf,
}

impl LintPass {
    /// Create a lint pass; `style_config` is the Stylelint rule file.
    pub fn new(
        script: Arc<dyn ScriptLinter>,
        style: Arc<dyn StyleLinter>,
        style_config: impl Into<PathBuf>,
    ) -> Self {
        Self {
            script,
            style,
            style_config: style_config.into(),
        }
    }

    /// Run both passes in order, stopping at the first one that fails.
    ///
    /// A pass whose file set is empty is skipped.
    pub async fn run(&self, config: &BuildConfig) -> Result<(), LintError> {
        self.run_eslint(&config.eslint_files).await?;
        self.run_stylelint(&config.style_lint_files).await
    }

    async fn run_eslint(&self, files: &[String]) -> Result<(), LintError> {
        if files.is_empty() {
            return Ok(());
        }

        tracing::info!("Running ESLint");
        let report = self
            .script
            .lint(files)
            .await
            .map_err(|source| LintError::Tool { linter: "ESLint", source })?;
        judge("ESLint", report)
    }

    async fn run_stylelint(&self, files: &[String]) -> Result<(), LintError> {
        if files.is_empty() {
            return Ok(());
        }

        tracing::info!("Running StyleLint");
        let report = self
            .style
            .lint(files, &self.style_config)
            .await
            .map_err(|source| LintError::Tool { linter: "StyleLint", source })?;
        judge("StyleLint", report)
    }
}

fn judge(linter: &'static str, report: LintReport) -> Result<(), LintError> {
    if !report.report.is_empty() {
        eprintln!("{}", report.report);
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(LintError::Failed {
            linter,
            errors: report.error_count,
        })
    }
}
