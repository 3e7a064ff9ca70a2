//! Build run controller.
//!
//! One run: load metadata, announce, load the configuration, lint the
//! project, run every task in order, then persist the new build number.
//! The first error ends the run and the build number is left untouched.

use appbuild_core::BuildType;
use appbuild_quality::LintPass;
use appbuild_storage::{JsonStore, STYLE_LINT_CONFIG};
use chrono::Local;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::context::RunState;
use crate::error::BuildError;
use crate::executor::{TaskOutcome, TaskPipeline, Toolchain};
use crate::html::HtmlRewriter;
use crate::report::{failure_banner, start_banner, success_banner};

/// Summary of a finished run.
#[derive(Debug)]
pub struct RunReport {
    /// Error that ended the run, if any
    pub error: Option<BuildError>,

    /// Wall-clock time of the run
    pub elapsed: Duration,

    /// Tasks whose steps all completed
    pub tasks_built: usize,

    /// Tasks not selected by the build type
    pub tasks_skipped: usize,

    /// Build number written back, on success
    pub build_number: Option<u64>,
}

impl RunReport {
    /// Whether the run succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Process exit status: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Runs one build of the workspace.
pub struct BuildRunner {
    store: JsonStore,
    toolchain: Toolchain,
    build_type: Option<BuildType>,
}

#[derive(Default)]
struct Tally {
    built: usize,
    skipped: usize,
}

impl BuildRunner {
    /// Create a runner; `build_type` selects the tasks to run.
    pub fn new(store: JsonStore, toolchain: Toolchain, build_type: Option<BuildType>) -> Self {
        Self {
            store,
            toolchain,
            build_type,
        }
    }

    /// Execute the run and print the closing banner.
    pub async fn run(&self) -> RunReport {
        let started = Instant::now();

        let document = match self.store.load_metadata().await {
            Ok(document) => document,
            Err(err) => {
                let err = BuildError::Metadata(err);
                tracing::error!("{}", err);
                eprintln!("{}", failure_banner(started.elapsed()));
                return RunReport {
                    error: Some(err),
                    elapsed: started.elapsed(),
                    tasks_built: 0,
                    tasks_skipped: 0,
                    build_number: None,
                };
            }
        };

        let mut state = RunState::new(self.build_type.clone(), document.metadata().clone());
        state.started_at = started;
        eprintln!("{}", start_banner(&state.metadata, &Local::now()));

        let mut tally = Tally::default();
        let mut result = self.execute(&mut state, &mut tally).await;
        if result.is_ok() {
            result = self.store.save_metadata(&document).await.map_err(BuildError::Persist);
        }

        let elapsed = state.elapsed();
        match &result {
            Ok(()) => eprintln!("{}", success_banner(&state.metadata, elapsed, &Local::now())),
            Err(err) => {
                tracing::error!("{}", err);
                eprintln!("{}", failure_banner(elapsed));
            }
        }

        RunReport {
            build_number: result.is_ok().then_some(state.metadata.build_number),
            error: result.err(),
            elapsed,
            tasks_built: tally.built,
            tasks_skipped: tally.skipped,
        }
    }

    async fn execute(&self, state: &mut RunState, tally: &mut Tally) -> Result<(), BuildError> {
        let config = self.store.load_config().await.map_err(BuildError::Config)?;

        let style_config = self
            .store
            .resolve(config.style_lint_config.as_deref().unwrap_or(Path::new(STYLE_LINT_CONFIG)));
        LintPass::new(
            self.toolchain.script_linter.clone(),
            self.toolchain.style_linter.clone(),
            style_config,
        )
        .run(&config)
        .await?;

        if state.build_type.is_none() {
            tracing::warn!("No --type given; every task will be skipped");
        }

        let pipeline = TaskPipeline::new(
            self.store.clone(),
            HtmlRewriter::new(config.placeholders.clone()),
            self.toolchain.clone(),
        );

        for task in &config.tasks {
            let outcome = pipeline
                .run_task(task, state)
                .await
                .map_err(|source| BuildError::Task {
                    task: task.name.clone(),
                    source,
                })?;

            match outcome {
                TaskOutcome::Built => tally.built += 1,
                TaskOutcome::Skipped => tally.skipped += 1,
            }
        }

        Ok(())
    }
}
