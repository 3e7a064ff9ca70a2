//! Built-in process tool.

use super::r#trait::*;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs an external program with the tool input as its command line.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: String,
    description: String,
}

impl ProcessTool {
    /// Create a tool running `program`.
    pub fn new(program: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: description.into(),
        }
    }

    /// `npx`, used to reach the Node.js build tools installed in the project.
    pub fn npx() -> Self {
        Self::new("npx", "Node.js package runner")
    }
}

#[async_trait]
impl Tool for ProcessTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
        let start = std::time::Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&input.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if input.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        if let Some(cwd) = &input.cwd {
            cmd.current_dir(cwd);
        }

        for (k, v) in &input.env {
            cmd.env(k, v);
        }

        tracing::debug!("Running {} {}", self.program, input.args.join(" "));
        let mut child = cmd
            .spawn()
            .map_err(|e| anyhow::anyhow!("cannot start {}: {}", self.program, e))?;

        // stdin is written from its own task while stdout/stderr are drained.
        let writer = match (child.stdin.take(), input.stdin.clone()) {
            (Some(mut pipe), Some(data)) => Some(tokio::spawn(async move {
                pipe.write_all(data.as_bytes()).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };

        let output = child.wait_with_output().await?;

        if let Some(writer) = writer {
            writer.await??;
        }

        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        })
    }
}
