//! Seam between the build and the external Node.js tools.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// An external program the build shells out to.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Program name, as shown in failures.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Run once to completion; no retry, no timeout.
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error>;
}

/// Command line and process setup for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    /// Arguments after the program name
    pub args: Vec<String>,

    /// Extra environment variables
    pub env: HashMap<String, String>,

    /// Text piped to the process
    pub stdin: Option<String>,

    /// Working directory
    pub cwd: Option<PathBuf>,
}

impl ToolInput {
    /// Create an input from arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Feed `stdin` to the process.
    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    /// Run the process in `cwd`.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Output from a tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code
    pub exit_code: i32,

    /// Standard output
    pub stdout: String,

    /// Standard error
    pub stderr: String,

    /// Execution duration
    pub duration: std::time::Duration,
}

impl ToolOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into an error carrying stderr.
    pub fn check(&self, tool: &str) -> Result<(), ToolFailure> {
        if self.success() {
            Ok(())
        } else {
            Err(ToolFailure {
                tool: tool.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// A tool ran but reported failure.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{tool} exited with code {exit_code}: {stderr}")]
pub struct ToolFailure {
    /// Tool name
    pub tool: String,

    /// Exit code
    pub exit_code: i32,

    /// Captured standard error
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn output(exit_code: i32, stderr: &str) -> ToolOutput {
        ToolOutput {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_tool_input_builder() {
        let input = ToolInput::new(["rollup", "main.js"])
            .with_stdin("code")
            .with_cwd("/work");

        assert_eq!(input.args, vec!["rollup", "main.js"]);
        assert_eq!(input.stdin.as_deref(), Some("code"));
        assert_eq!(input.cwd, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_check_success() {
        assert!(output(0, "").check("rollup").is_ok());
    }

    #[test]
    fn test_check_failure() {
        let err = output(1, "  Could not resolve entry module\n").check("rollup").unwrap_err();
        assert_eq!(err.exit_code, 1);
        assert_eq!(err.to_string(), "rollup exited with code 1: Could not resolve entry module");
    }
}
