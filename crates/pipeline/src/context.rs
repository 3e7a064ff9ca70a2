//! Per-run state shared by the controller and the task pipeline.

use appbuild_core::{BuildType, IntegrityToken, ProjectMetadata};
use std::time::{Duration, Instant};

/// Integrity tokens produced by the current task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactHashes {
    /// Digest of the minified script, once written
    pub js: Option<IntegrityToken>,

    /// Digest of the assembled stylesheet, once written
    pub css: Option<IntegrityToken>,
}

/// State of one build run.
///
/// Failure is not stored here; every stage returns a `Result` instead.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Selected build type; `None` selects no task
    pub build_type: Option<BuildType>,

    /// Metadata for this run, build number already incremented
    pub metadata: ProjectMetadata,

    /// When the run started
    pub started_at: Instant,

    /// Name of the task being executed
    pub current_task: Option<String>,

    /// Hashes of the current task's artifacts
    pub hashes: ArtifactHashes,
}

impl RunState {
    /// Start a run now.
    pub fn new(build_type: Option<BuildType>, metadata: ProjectMetadata) -> Self {
        Self {
            build_type,
            metadata,
            started_at: Instant::now(),
            current_task: None,
            hashes: ArtifactHashes::default(),
        }
    }

    /// Whether the selected type is `release`.
    pub fn is_release(&self) -> bool {
        self.build_type.as_ref().is_some_and(BuildType::is_release)
    }

    /// Enter task `name` with empty hash state.
    pub fn begin_task(&mut self, name: &str) {
        self.current_task = Some(name.to_string());
        self.hashes = ArtifactHashes::default();
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
