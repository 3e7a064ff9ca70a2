//! Script minification.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use super::{Tool, ToolInput};

/// Minifies script source and prepends a banner.
#[async_trait]
pub trait Minifier: Send + Sync {
    /// Return `preamble` followed by the minified `source`.
    async fn minify(&self, source: &str, preamble: &str) -> Result<String, anyhow::Error>;
}

/// Terser, reached through `npx`, mangling and compressing from stdin.
pub struct TerserMinifier {
    tool: Arc<dyn Tool>,
    ecma: u16,
    cwd: Option<PathBuf>,
}

impl TerserMinifier {
    /// Create a minifier running through `tool`.
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self {
            tool,
            ecma: 2020,
            cwd: None,
        }
    }

    /// Run terser from the project directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[async_trait]
impl Minifier for TerserMinifier {
    async fn minify(&self, source: &str, preamble: &str) -> Result<String, anyhow::Error> {
        let mut input = ToolInput::new([
            "terser".to_string(),
            "--mangle".to_string(),
            "--compress".to_string(),
            "--ecma".to_string(),
            self.ecma.to_string(),
        ])
        .with_stdin(source);
        input.cwd = self.cwd.clone();

        let output = self.tool.execute(&input).await?;
        output.check("terser")?;
        if output.stdout.trim().is_empty() && !source.trim().is_empty() {
            anyhow::bail!("terser produced no output");
        }

        let mut code = String::with_capacity(preamble.len() + output.stdout.len());
        code.push_str(preamble);
        code.push_str(output.stdout.trim_end());
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolOutput;
    use std::sync::Mutex;

    struct FakeTerser {
        stdout: String,
        exit_code: i32,
        calls: Mutex<Vec<ToolInput>>,
    }

    #[async_trait]
    impl Tool for FakeTerser {
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
                stderr: "Parse error".to_string(),
                duration: std::time::Duration::ZERO,
            })
        }
    }

    fn fake(stdout: &str, exit_code: i32) -> Arc<FakeTerser> {
        Arc::new(FakeTerser {
            stdout: stdout.to_string(),
            exit_code,
            calls: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_preamble_is_prepended() {
        let tool = fake("!function(){console.log(1)}();\n", 0);
        let code = TerserMinifier::new(tool.clone())
            .minify("(function () { console.log(1); })();", "/* banner */\n\n")
            .await
            .unwrap();

        assert_eq!(code, "/* banner */\n\n!function(){console.log(1)}();");

        let calls = tool.calls.lock().unwrap();
        assert_eq!(calls[0].args, vec!["terser", "--mangle", "--compress", "--ecma", "2020"]);
        assert_eq!(calls[0].stdin.as_deref(), Some("(function () { console.log(1); })();"));
    }

    #[tokio::test]
    async fn test_terser_failure() {
        let err = TerserMinifier::new(fake("", 1)).minify("x(", "").await.unwrap_err();
        assert!(err.to_string().contains("terser exited with code 1"));
    }

    #[tokio::test]
    async fn test_empty_output() {
        let err = TerserMinifier::new(fake("  \n", 0)).minify("var a = 1;", "").await.unwrap_err();
        assert!(err.to_string().contains("no output"));
    }
}
