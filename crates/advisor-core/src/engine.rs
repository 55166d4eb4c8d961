//! Legal document analysis engine
//!
//! The top-level orchestrator that:
//! - Validates the request and builds per-artifact task graphs
//! - Runs the graphs concurrently, bounded by a worker pool
//! - Maps per-graph outcomes to sanitized artifact texts
//! - Keeps one artifact's failure from affecting the others
//!
//! Request-level failures (extraction, malformed request, configuration,
//! internal defects) abort before or instead of the per-artifact fallbacks.

use crate::backend::GenerationBackend;
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::executor::CrewExecutor;
use crate::extract;
use crate::graph::TaskGraphBuilder;
use crate::roles::RoleRegistry;
use crate::sanitize::sanitize_output;
use crate::types::{AnalysisRequest, AnalysisResult, TaskGraph};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// The analysis engine for one process
///
/// Stateless per request: every call to [`analyze`](Self::analyze) builds
/// fresh task graphs and discards them afterwards.
#[derive(Clone)]
pub struct LegalAdvisor {
    config: AdvisorConfig,
    builder: TaskGraphBuilder,
    executor: CrewExecutor,
    /// Bounds concurrent artifact graphs to the backend rate limit
    graph_permits: Arc<Semaphore>,
}

impl LegalAdvisor {
    /// Create engine with the builtin role registry
    #[must_use]
    pub fn new(config: AdvisorConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        let registry = Arc::new(RoleRegistry::builtin());
        let graph_permits = Arc::new(Semaphore::new(config.max_concurrent_graphs.max(1)));

        Self {
            config,
            builder: TaskGraphBuilder::new(),
            executor: CrewExecutor::new(backend, registry),
            graph_permits,
        }
    }

    /// Analyze a document already extracted to text
    ///
    /// Runs one independent graph per requested artifact. A generation
    /// failure or timeout in one graph substitutes that artifact's fallback
    /// text; the other artifacts proceed untouched.
    ///
    /// # Errors
    /// - [`AdvisorError::InvalidRequest`] for an empty document or artifact set
    /// - [`AdvisorError::Execution`] for internal defects (unknown role, cycle)
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AdvisorError> {
        let graphs = self.builder.build(&request)?;
        tracing::info!(
            artifacts = graphs.len(),
            document_chars = request.document_text.chars().count(),
            "analyzing document"
        );

        let (artifacts, handles): (Vec<_>, Vec<_>) = graphs
            .into_iter()
            .map(|graph| (graph.artifact, self.spawn_graph(graph)))
            .unzip();

        let mut result = AnalysisResult::new();
        for (artifact, outcome) in artifacts.into_iter().zip(join_all(handles).await) {
            match outcome {
                Ok(Ok(text)) => result.set(artifact, text),
                Ok(Err(err)) => return Err(err),
                Err(join_err) => {
                    // A panicked worker forfeits only its own artifact.
                    tracing::error!(%artifact, error = %join_err, "artifact worker panicked");
                    result.set(artifact, artifact.fallback().to_string());
                }
            }
        }

        Ok(result)
    }

    /// Extract a document from disk, then analyze it
    ///
    /// # Errors
    /// [`AdvisorError::Extraction`] for unsupported formats or read failures,
    /// plus everything [`analyze`](Self::analyze) can return.
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisResult, AdvisorError> {
        let document_text = extract::extract(path)?;
        self.analyze(self.request_for(document_text)).await
    }

    /// Request with this engine's configured truncation limit
    #[must_use]
    pub fn request_for(&self, document_text: impl Into<String>) -> AnalysisRequest {
        AnalysisRequest::new(document_text).with_truncation_limit(self.config.truncation_limit)
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Run one artifact's graph on its own worker
    fn spawn_graph(&self, graph: TaskGraph) -> JoinHandle<Result<String, AdvisorError>> {
        let executor = self.executor.clone();
        let permits = Arc::clone(&self.graph_permits);
        let deadline = Duration::from_secs(self.config.graph_timeout_secs);

        tokio::spawn(async move {
            // The deadline covers time spent queued behind the permit cap,
            // not just the execution itself.
            let run = async {
                match permits.acquire().await {
                    Ok(_permit) => Some(executor.execute(&graph).await),
                    // Semaphore closed only on engine teardown mid-request.
                    Err(_) => None,
                }
            };

            match tokio::time::timeout(deadline, run).await {
                Ok(Some(Ok(context))) => Ok(artifact_text(&graph, &context)),
                Ok(Some(Err(err))) if err.is_generation_failure() => {
                    tracing::warn!(
                        artifact = %graph.artifact,
                        error = %err,
                        "artifact generation failed, substituting fallback"
                    );
                    Ok(graph.artifact.fallback().to_string())
                }
                Ok(Some(Err(err))) => Err(err.into()),
                Ok(None) | Err(_) => {
                    tracing::warn!(artifact = %graph.artifact, "artifact graph cancelled");
                    Ok(graph.artifact.cancelled_fallback().to_string())
                }
            }
        })
    }
}

/// Sanitized terminal-task output for a completed graph
///
/// Echo markers are every task's expected-output hint; the artifact's
/// fallback covers an empty-after-strip result (and the impossible case of a
/// graph with no terminal task).
fn artifact_text(graph: &TaskGraph, context: &crate::types::ExecutionContext) -> String {
    let markers: Vec<&str> = graph
        .tasks()
        .iter()
        .map(|t| t.expected_output.as_str())
        .collect();

    let raw = graph
        .terminal_id()
        .and_then(|id| context.get(id))
        .unwrap_or_default();

    sanitize_output(raw, &markers, graph.artifact.fallback())
}
