//! Task execution.
//!
//! A task runs its steps in a fixed order: clean, scripts, stylesheets,
//! HTML, copies. Scripts and stylesheets come before the HTML step because
//! the HTML embeds their digests. The first failing step ends the task.

use appbuild_core::{IntegrityToken, ProjectMetadata, TaskSpec};
use appbuild_quality::{EslintLinter, ScriptLinter, StyleLinter, StylelintLinter};
use appbuild_storage::{write_atomic, JsonStore};
use appbuild_tools::{license_preamble, Bundler, Minifier, ProcessTool, RollupBundler, TerserMinifier, Tool};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::context::RunState;
use crate::copy::copy_entry;
use crate::css::assemble;
use crate::error::TaskError;
use crate::hash::digest;
use crate::html::{ArtifactRef, HtmlRewriter};
use crate::scratch::{ScratchArea, SCRATCH_DIR};

/// External capabilities used by a build.
#[derive(Clone)]
pub struct Toolchain {
    /// Project-wide script linter
    pub script_linter: Arc<dyn ScriptLinter>,

    /// Project-wide stylesheet linter
    pub style_linter: Arc<dyn StyleLinter>,

    /// Module bundler
    pub bundler: Arc<dyn Bundler>,

    /// Script minifier
    pub minifier: Arc<dyn Minifier>,
}

impl Toolchain {
    /// ESLint, Stylelint, Rollup and Terser through `npx`, run from `root`.
    pub fn npx(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let npx: Arc<dyn Tool> = Arc::new(ProcessTool::npx());

        Self {
            script_linter: Arc::new(EslintLinter::new(npx.clone()).with_cwd(root)),
            style_linter: Arc::new(StylelintLinter::new(npx.clone()).with_cwd(root)),
            bundler: Arc::new(RollupBundler::new(npx.clone()).with_cwd(root)),
            minifier: Arc::new(TerserMinifier::new(npx).with_cwd(root)),
        }
    }
}

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task's type was not selected; nothing was touched
    Skipped,
    /// Every step completed
    Built,
}

/// Runs single tasks against the workspace.
pub struct TaskPipeline {
    store: JsonStore,
    scratch: ScratchArea,
    rewriter: HtmlRewriter,
    toolchain: Toolchain,
}

impl TaskPipeline {
    /// Create a pipeline using the default scratch area under the workspace root.
    pub fn new(store: JsonStore, rewriter: HtmlRewriter, toolchain: Toolchain) -> Self {
        let scratch = ScratchArea::new(store.resolve(SCRATCH_DIR));
        Self {
            store,
            scratch,
            rewriter,
            toolchain,
        }
    }

    /// Scratch area used for intermediate bundles.
    pub fn scratch(&self) -> &ScratchArea {
        &self.scratch
    }

    /// Run `task` if its type is selected.
    pub async fn run_task(&self, task: &TaskSpec, state: &mut RunState) -> Result<TaskOutcome, TaskError> {
        if !task.is_selected(state.build_type.as_ref()) {
            tracing::debug!("Skipping task {} (type {})", task.name, task.build_type);
            return Ok(TaskOutcome::Skipped);
        }

        tracing::info!("Building task {}", task.name);
        self.clean_dirs(task).await?;
        state.begin_task(&task.name);
        self.scratch.reset().await?;

        let dest = self.store.resolve(&task.dest_dir);
        prepare_destination(&dest).await?;

        if let Some(entry) = &task.js_file {
            self.scratch.create().await?;
            let built = self.build_script(task, entry, &dest, &state.metadata).await;
            self.scratch.discard().await;
            state.hashes.js = Some(built?);
        }

        if !task.css_files.is_empty() {
            tracing::info!("Building CSS");
            let files: Vec<PathBuf> = task.css_files.iter().map(|f| self.store.resolve(f)).collect();
            let bundle = assemble(&files, state.is_release()).await?;
            write_artifact(&dest.join(task.css_output_name()), &bundle.content).await?;
            state.hashes.css = Some(bundle.integrity);
        }

        if let Some(template) = &task.html_file {
            tracing::info!("Building HTML");
            self.build_html(task, template, &dest, state).await?;
        }

        if !task.copy_files.is_empty() {
            tracing::info!("Copying files");
            for copy in &task.copy_files {
                copy_entry(&self.store.resolve(&copy.src), &self.store.resolve(&copy.dest)).await?;
            }
        }

        Ok(TaskOutcome::Built)
    }

    async fn clean_dirs(&self, task: &TaskSpec) -> Result<(), TaskError> {
        if task.clean_dirs.is_empty() {
            return Ok(());
        }

        tracing::info!("Cleaning dirs");
        for dir in &task.clean_dirs {
            let path = self.store.resolve(dir);
            clean_dir(&path)
                .await
                .map_err(|source| TaskError::Clean { path, source })?;
        }
        Ok(())
    }

    /// Bundle, minify and write the task's script; returns its digest.
    async fn build_script(
        &self,
        task: &TaskSpec,
        entry: &Path,
        dest: &Path,
        metadata: &ProjectMetadata,
    ) -> Result<IntegrityToken, TaskError> {
        let bundle = self.scratch.file(&task.bundle_name());

        tracing::info!("Running Rollup");
        self.toolchain
            .bundler
            .bundle(&self.store.resolve(entry), &bundle)
            .await
            .map_err(TaskError::Bundle)?;

        let source = fs::read_to_string(&bundle)
            .await
            .map_err(|err| TaskError::Bundle(err.into()))?;

        tracing::info!("Running Terser");
        let preamble = license_preamble(metadata, &chrono::Local::now());
        let minified = self
            .toolchain
            .minifier
            .minify(&source, &preamble)
            .await
            .map_err(TaskError::Minify)?;

        write_artifact(&dest.join(task.js_output_name()), &minified).await?;
        Ok(digest(&minified))
    }

    async fn build_html(
        &self,
        task: &TaskSpec,
        template: &Path,
        dest: &Path,
        state: &RunState,
    ) -> Result<(), TaskError> {
        let path = self.store.resolve(template);
        let Some(file_name) = task.html_output_name() else {
            return Err(TaskError::Html {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "template has no file name"),
            });
        };

        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| TaskError::Html { path: path.clone(), source })?;

        let script = state
            .hashes
            .js
            .clone()
            .map(|hash| ArtifactRef::new(task.js_output_name(), hash));
        let style = state
            .hashes
            .css
            .clone()
            .map(|hash| ArtifactRef::new(task.css_output_name(), hash));

        let html = self.rewriter.rewrite(&content, script.as_ref(), style.as_ref());
        write_artifact(&dest.join(file_name), &html).await
    }
}

/// Delete `path` if present and recreate it as an empty directory.
///
/// A file or symbolic link in the way is removed; a link is never followed.
async fn clean_dir(path: &Path) -> std::io::Result<()> {
    match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await?,
        Ok(_) => fs::remove_file(path).await?,
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => return Err(err),
        Err(_) => {}
    }
    fs::create_dir_all(path).await
}

async fn prepare_destination(dest: &Path) -> Result<(), TaskError> {
    fs::create_dir_all(dest)
        .await
        .map_err(|source| TaskError::Directory { path: dest.to_path_buf(), source })
}

async fn write_artifact(path: &Path, content: &str) -> Result<(), TaskError> {
    write_atomic(path, content)
        .await
        .map_err(|source| TaskError::Write { path: path.to_path_buf(), source })
}
