//! Error types for the analysis engine
//!
//! Covers the failure taxonomy of one request:
//! - Malformed requests (rejected before any backend call)
//! - Document extraction failures
//! - Per-graph execution failures
//! - Configuration defects

use crate::backend::GenerationError;
use crate::extract::ExtractError;
use crate::types::TaskId;

/// Top-level error for one analysis request
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Malformed request, no backend calls were made
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequestError),

    /// Document could not be turned into text
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// A task graph failed to execute
    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),

    /// Configuration defect detected before first use
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed analysis request
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// Document text is empty
    #[error("document text is empty")]
    EmptyDocument,

    /// No artifacts requested
    #[error("no artifacts requested")]
    NoArtifacts,
}

/// Failure while executing one artifact's task graph
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// A task referenced a role missing from the registry
    #[error(transparent)]
    UnknownRole(#[from] UnknownRoleError),

    /// The generation backend failed for a task; the graph aborts here
    #[error("task {task_id} ({role}) failed: {source}")]
    TaskFailed {
        /// Id of the failing task
        task_id: TaskId,
        /// Role the task was assigned
        role: String,
        /// Underlying backend failure
        source: GenerationError,
    },

    /// A task ran before one of its dependencies produced output
    #[error("task {task_id} depends on {dependency}, which has no recorded output")]
    MissingDependency {
        /// The task whose prompt could not be assembled
        task_id: TaskId,
        /// The dependency with no output
        dependency: TaskId,
    },

    /// A task's output was recorded twice
    #[error("output for task {0} was already recorded")]
    DuplicateResult(TaskId),

    /// The graph is not acyclic
    #[error("task graph contains a cycle")]
    CycleDetected,
}

impl ExecutionError {
    /// Whether the failure came from the generation backend
    #[inline]
    #[must_use]
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::TaskFailed { .. })
    }
}

/// Referenced role is not registered (a configuration defect)
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

/// Configuration defect
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required credential is absent
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// A numeric knob is out of range
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Configuration field name
        name: &'static str,
        /// Why the value is rejected
        reason: String,
    },
}
