//! Module bundling.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Tool, ToolInput};

/// Bundles a module graph from an entry point into a single self-executing script.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Bundle `entry` into `output`.
    async fn bundle(&self, entry: &Path, output: &Path) -> Result<(), anyhow::Error>;
}

/// Rollup, reached through `npx`, producing an IIFE bundle.
pub struct RollupBundler {
    tool: Arc<dyn Tool>,
    cwd: Option<PathBuf>,
}

impl RollupBundler {
    /// Create a bundler running through `tool`.
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self { tool, cwd: None }
    }

    /// Run rollup from the project directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn input(&self, entry: &Path, output: &Path) -> ToolInput {
        let mut input = ToolInput::new([
            "rollup".to_string(),
            entry.display().to_string(),
            "--file".to_string(),
            output.display().to_string(),
            "--format".to_string(),
            "iife".to_string(),
        ]);
        input.cwd = self.cwd.clone();
        input
    }
}

#[async_trait]
impl Bundler for RollupBundler {
    async fn bundle(&self, entry: &Path, output: &Path) -> Result<(), anyhow::Error> {
        let input = self.input(entry, output);
        self.tool.execute(&input).await?.check("rollup")?;

        if !tokio::fs::try_exists(output).await? {
            anyhow::bail!("rollup did not produce {}", output.display());
        }
        Ok(())
    }
}
