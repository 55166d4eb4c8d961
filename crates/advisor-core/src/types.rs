//! Core types for the analysis engine
//!
//! Defines the fundamental types of one analysis request:
//! - Task identifiers and tasks
//! - Per-artifact task graphs
//! - The write-once execution context
//! - Request and result records

use crate::error::ExecutionError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use ulid::Ulid;

/// Unique task identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Ulid);

impl TaskId {
    /// Generate new task ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three analysis artifacts a request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Document summary
    Summary,
    /// Clause-by-clause analysis
    Clauses,
    /// Risk flags with explanations
    Risks,
}

impl ArtifactKind {
    /// All artifact kinds, in presentation order
    pub const ALL: [ArtifactKind; 3] = [Self::Summary, Self::Clauses, Self::Risks];

    /// Name of the role that produces this artifact
    #[inline]
    #[must_use]
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Summary | Self::Clauses => crate::roles::CLAUSE_ANALYZER,
            Self::Risks => crate::roles::RISK_DETECTOR,
        }
    }

    /// Instruction text for this artifact's analysis task
    #[must_use]
    pub fn task_description(&self) -> &'static str {
        match self {
            Self::Summary => {
                "Provide a comprehensive summary of the legal document including key \
                 parties, subject matter, duration, and main obligations."
            }
            Self::Clauses => {
                "Identify and analyze all important clauses in the document including \
                 payment terms, confidentiality, termination, liability, and any other \
                 significant provisions."
            }
            Self::Risks => {
                "Identify and flag all potentially risky clauses with explanations of \
                 the risks and potential consequences."
            }
        }
    }

    /// Output-shape hint passed to the backend and stripped from echoes
    #[inline]
    #[must_use]
    pub fn expected_output(&self) -> &'static str {
        match self {
            Self::Summary => "A clear summary of the document",
            Self::Clauses => "Detailed analysis of all important clauses",
            Self::Risks => "List of risky clauses with risk level and explanations",
        }
    }

    /// Placeholder shown when generation produced nothing usable
    #[inline]
    #[must_use]
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Summary => "No summary available",
            Self::Clauses => "No clause analysis available",
            Self::Risks => "No risk analysis available",
        }
    }

    /// Placeholder shown when this artifact's graph was cancelled
    #[inline]
    #[must_use]
    pub fn cancelled_fallback(&self) -> &'static str {
        match self {
            Self::Summary => "Summary analysis cancelled",
            Self::Clauses => "Clause analysis cancelled",
            Self::Risks => "Risk analysis cancelled",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Clauses => write!(f, "clauses"),
            Self::Risks => write!(f, "risks"),
        }
    }
}

/// One unit of generation work
///
/// Immutable once built; produced output lives in the [`ExecutionContext`],
/// never on the task itself.
#[derive(Debug, Clone)]
pub struct Task {
    /// Task identifier
    pub id: TaskId,
    /// Instruction text (may embed truncated upstream document text)
    pub description: String,
    /// Free-text contract for the desired output shape (prompt hint only)
    pub expected_output: String,
    /// Name of the assigned role in the registry
    pub role: String,
    /// Upstream task ids whose outputs feed this task's prompt
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Create new task
    #[inline]
    #[must_use]
    pub fn new(
        role: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            description: description.into(),
            expected_output: expected_output.into(),
            role: role.into(),
            dependencies: Vec::new(),
        }
    }

    /// With dependency
    #[inline]
    #[must_use]
    pub fn depends_on(mut self, task_id: TaskId) -> Self {
        self.dependencies.push(task_id);
        self
    }
}

/// The acyclic set of tasks for one artifact's pipeline
///
/// Stored as an arena of [`Task`] records with explicit dependency-id lists,
/// not inter-task object references.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// The artifact this graph produces
    pub artifact: ArtifactKind,
    /// Task arena, in insertion order
    tasks: Vec<Task>,
}

impl TaskGraph {
    /// Create new graph for an artifact
    #[inline]
    #[must_use]
    pub fn new(artifact: ArtifactKind) -> Self {
        Self {
            artifact,
            tasks: Vec::new(),
        }
    }

    /// Add a task to the arena
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// All tasks, in insertion order
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks in the graph
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The terminal task: the one no other task depends on
    ///
    /// Its output is the graph's artifact text. Returns `None` for an empty
    /// graph or when every task is depended upon.
    #[must_use]
    pub fn terminal_id(&self) -> Option<TaskId> {
        self.tasks
            .iter()
            .map(|t| t.id)
            .find(|id| !self.tasks.iter().any(|t| t.dependencies.contains(id)))
    }
}

/// Accumulated task outputs within one graph's run
///
/// Entries are write-once and the context is per-graph; it is never shared
/// across artifact graphs, so no locking is needed.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    outputs: HashMap<TaskId, String>,
}

impl ExecutionContext {
    /// Create empty context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task's output
    ///
    /// # Errors
    /// Returns [`ExecutionError::DuplicateResult`] if the task already has an
    /// output recorded.
    pub fn record(&mut self, id: TaskId, output: String) -> Result<(), ExecutionError> {
        if self.outputs.contains_key(&id) {
            return Err(ExecutionError::DuplicateResult(id));
        }
        self.outputs.insert(id, output);
        Ok(())
    }

    /// Get a completed task's output
    #[inline]
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&str> {
        self.outputs.get(&id).map(String::as_str)
    }

    /// Number of completed tasks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether no task has completed yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Default number of document characters embedded in the extraction prompt
pub const DEFAULT_TRUNCATION_LIMIT: usize = 8000;

/// One document-analysis request
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Raw extracted document text
    pub document_text: String,
    /// First N characters of the document used for extraction input
    pub truncation_limit: usize,
    /// Which artifacts to produce
    pub artifacts: Vec<ArtifactKind>,
}

impl AnalysisRequest {
    /// Create request with default truncation limit and all three artifacts
    #[inline]
    #[must_use]
    pub fn new(document_text: impl Into<String>) -> Self {
        Self {
            document_text: document_text.into(),
            truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            artifacts: ArtifactKind::ALL.to_vec(),
        }
    }

    /// With truncation limit
    #[inline]
    #[must_use]
    pub fn with_truncation_limit(mut self, limit: usize) -> Self {
        self.truncation_limit = limit;
        self
    }

    /// With requested artifacts
    #[inline]
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Vec<ArtifactKind>) -> Self {
        self.artifacts = artifacts;
        self
    }
}

/// Sanitized analysis output, one text per requested artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    texts: BTreeMap<ArtifactKind, String>,
}

impl AnalysisResult {
    /// Create empty result
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an artifact's text
    pub fn set(&mut self, kind: ArtifactKind, text: String) {
        self.texts.insert(kind, text);
    }

    /// Get an artifact's text, if it was requested
    #[inline]
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&str> {
        self.texts.get(&kind).map(String::as_str)
    }

    /// Summary text, if requested
    #[inline]
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get(ArtifactKind::Summary)
    }

    /// Clause analysis text, if requested
    #[inline]
    #[must_use]
    pub fn clauses(&self) -> Option<&str> {
        self.get(ArtifactKind::Clauses)
    }

    /// Risk analysis text, if requested
    #[inline]
    #[must_use]
    pub fn risks(&self) -> Option<&str> {
        self.get(ArtifactKind::Risks)
    }

    /// Iterate artifacts in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &str)> {
        self.texts.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_generation() {
        let id1 = TaskId::new();
        let id2 = TaskId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn task_builder() {
        let upstream = TaskId::new();
        let task = Task::new("clause-analyzer", "summarize", "A clear summary")
            .depends_on(upstream);

        assert_eq!(task.role, "clause-analyzer");
        assert_eq!(task.dependencies, vec![upstream]);
    }

    #[test]
    fn artifact_roles() {
        assert_eq!(ArtifactKind::Summary.role_name(), "clause-analyzer");
        assert_eq!(ArtifactKind::Clauses.role_name(), "clause-analyzer");
        assert_eq!(ArtifactKind::Risks.role_name(), "risk-detector");
    }

    #[test]
    fn graph_terminal_is_undepended_task() {
        let extract = Task::new("extractor", "extract", "Raw text");
        let extract_id = extract.id;
        let analyze = Task::new("clause-analyzer", "analyze", "Analysis").depends_on(extract_id);
        let analyze_id = analyze.id;

        let mut graph = TaskGraph::new(ArtifactKind::Clauses);
        graph.push(extract);
        graph.push(analyze);

        assert_eq!(graph.terminal_id(), Some(analyze_id));
        assert_eq!(graph.task(extract_id).unwrap().role, "extractor");
    }

    #[test]
    fn context_entries_are_write_once() {
        let mut ctx = ExecutionContext::new();
        let id = TaskId::new();

        ctx.record(id, "first".to_string()).unwrap();
        let err = ctx.record(id, "second".to_string()).unwrap_err();

        assert!(matches!(err, ExecutionError::DuplicateResult(d) if d == id));
        assert_eq!(ctx.get(id), Some("first"));
    }

    #[test]
    fn request_defaults() {
        let request = AnalysisRequest::new("some contract");
        assert_eq!(request.truncation_limit, DEFAULT_TRUNCATION_LIMIT);
        assert_eq!(request.artifacts.len(), 3);
    }

    #[test]
    fn result_accessors() {
        let mut result = AnalysisResult::new();
        result.set(ArtifactKind::Summary, "SUMMARY_OK".to_string());

        assert_eq!(result.summary(), Some("SUMMARY_OK"));
        assert_eq!(result.risks(), None);
    }
}
