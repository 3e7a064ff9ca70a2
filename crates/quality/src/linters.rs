//! ESLint and Stylelint adapters.

use appbuild_tools::{Tool, ToolInput, ToolOutput};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::parser::{parse_stylish_errors, report_has_error};

/// Outcome of a lint pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    /// Human-readable report, echoed to the diagnostic stream
    pub report: String,

    /// Number of errors found
    pub error_count: usize,
}

impl LintReport {
    /// Whether the pass found no errors.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

/// Lints (and auto-fixes) script files.
#[async_trait]
pub trait ScriptLinter: Send + Sync {
    /// Lint `files` (paths or globs).
    async fn lint(&self, files: &[String]) -> Result<LintReport, anyhow::Error>;
}

/// Lints stylesheets against a rule configuration.
#[async_trait]
pub trait StyleLinter: Send + Sync {
    /// Lint `files` (paths or globs) with the rules in `config`.
    async fn lint(&self, files: &[String], config: &Path) -> Result<LintReport, anyhow::Error>;
}

/// ESLint with every fix type enabled and the `stylish` formatter.
pub struct EslintLinter {
    tool: Arc<dyn Tool>,
    cwd: Option<PathBuf>,
}

impl EslintLinter {
    /// Fix types applied automatically.
    pub const FIX_TYPES: &'static str = "directive,problem,suggestion,layout";

    /// Create a linter running through `tool`.
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self { tool, cwd: None }
    }

    /// Run eslint from the project directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[async_trait]
impl ScriptLinter for EslintLinter {
    async fn lint(&self, files: &[String]) -> Result<LintReport, anyhow::Error> {
        let mut args = vec![
            "eslint".to_string(),
            "--fix".to_string(),
            "--fix-type".to_string(),
            Self::FIX_TYPES.to_string(),
            "--format".to_string(),
            "stylish".to_string(),
        ];
        args.extend(files.iter().cloned());

        let mut input = ToolInput::new(args);
        input.cwd = self.cwd.clone();
        let output = self.tool.execute(&input).await?;

        // 0: clean, 1: lint errors remain, anything else: eslint itself failed
        if output.exit_code > 1 || output.exit_code < 0 {
            output.check("eslint")?;
        }

        let report = combined(&output);
        let error_count = parse_stylish_errors(&report)
            .unwrap_or(if output.success() { 0 } else { 1 });

        Ok(LintReport { report, error_count })
    }
}

/// Stylelint with the `string` formatter.
pub struct StylelintLinter {
    tool: Arc<dyn Tool>,
    cwd: Option<PathBuf>,
}

impl StylelintLinter {
    /// Create a linter running through `tool`.
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self { tool, cwd: None }
    }

    /// Run stylelint from the project directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[async_trait]
impl StyleLinter for StylelintLinter {
    async fn lint(&self, files: &[String], config: &Path) -> Result<LintReport, anyhow::Error> {
        let mut args = vec![
            "stylelint".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "--formatter".to_string(),
            "string".to_string(),
        ];
        args.extend(files.iter().cloned());

        let mut input = ToolInput::new(args);
        input.cwd = self.cwd.clone();
        let output = self.tool.execute(&input).await?;

        let report = combined(&output);
        if report_has_error(&report) {
            return Ok(LintReport { report, error_count: 1 });
        }

        // 2 is reserved for lint problems, which the report check above covers
        if output.exit_code != 2 {
            output.check("stylelint")?;
        }

        Ok(LintReport { report, error_count: 0 })
    }
}

fn combined(output: &ToolOutput) -> String {
    let stdout = output.stdout.trim_end();
    let stderr = output.stderr.trim_end();
    match (stdout.is_empty(), stderr.is_empty()) {
        (_, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n{}", stdout, stderr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeNpx {
        exit_code: i32,
        stdout: String,
        calls: Mutex<Vec<ToolInput>>,
    }

    #[async_trait]
    impl Tool for FakeNpx {
        fn name(&self) -> &str {
            "npx"
        }

        fn description(&self) -> &str {
            "fake"
        }

        async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
            self.calls.lock().unwrap().push(input.clone());
            Ok(ToolOutput {
                exit_code: self.exit_code,
                stdout: self.stdout.clone(),
                stderr: String::new(),
                duration: std::time::Duration::ZERO,
            })
        }
    }

    fn fake(exit_code: i32, stdout: &str) -> Arc<FakeNpx> {
        Arc::new(FakeNpx {
            exit_code,
            stdout: stdout.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn files() -> Vec<String> {
        vec!["src/**/*.js".to_string()]
    }

    #[tokio::test]
    async fn test_eslint_clean() {
        let tool = fake(0, "");
        let report = EslintLinter::new(tool.clone()).lint(&files()).await.unwrap();

        assert!(report.is_clean());
        let calls = tool.calls.lock().unwrap();
        assert_eq!(
            calls[0].args,
            vec!["eslint", "--fix", "--fix-type", EslintLinter::FIX_TYPES, "--format", "stylish", "src/**/*.js"]
        );
    }

    #[tokio::test]
    async fn test_eslint_errors() {
        let tool = fake(1, "src/main.js\n  1:1  error  x  no-undef\n\n✖ 3 problems (2 errors, 1 warning)\n");
        let report = EslintLinter::new(tool).lint(&files()).await.unwrap();

        assert_eq!(report.error_count, 2);
        assert!(report.report.contains("no-undef"));
    }

    #[tokio::test]
    async fn test_eslint_warnings_only() {
        let tool = fake(0, "✖ 1 problem (0 errors, 1 warning)\n");
        let report = EslintLinter::new(tool).lint(&files()).await.unwrap();
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_eslint_crash() {
        let tool = fake(2, "Oops! Something went wrong!");
        assert!(EslintLinter::new(tool).lint(&files()).await.is_err());
    }

    #[tokio::test]
    async fn test_stylelint_arguments() {
        let tool = fake(0, "");
        let report = StylelintLinter::new(tool.clone())
            .with_cwd("/work")
            .lint(&["src/**/*.css".to_string()], Path::new("StyleLintConfig.js"))
            .await
            .unwrap();

        assert!(report.is_clean());
        let calls = tool.calls.lock().unwrap();
        assert_eq!(
            calls[0].args,
            vec!["stylelint", "--config", "StyleLintConfig.js", "--formatter", "string", "src/**/*.css"]
        );
        assert_eq!(calls[0].cwd, Some(PathBuf::from("/work")));
    }

    #[tokio::test]
    async fn test_stylelint_error_in_report() {
        let tool = fake(2, "src/a.css\n 3:5  ✖  Unexpected empty block  block-no-empty\n\n1 problem (1 error, 0 warnings)");
        let report = StylelintLinter::new(tool)
            .lint(&["src/a.css".to_string()], Path::new("rules.js"))
            .await
            .unwrap();

        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_stylelint_fatal() {
        let tool = fake(78, "");
        assert!(StylelintLinter::new(tool)
            .lint(&["src/a.css".to_string()], Path::new("rules.js"))
            .await
            .is_err());
    }
}
