//! Task graph construction
//!
//! Builds one independent task graph per requested artifact: an extraction
//! task embedding the (truncated) document text, and one analysis task
//! depending on it. Keeping the graphs independent means a failure in one
//! artifact's pipeline cannot affect another's, at the cost of repeating the
//! extraction call per artifact.

use crate::error::InvalidRequestError;
use crate::roles::EXTRACTOR;
use crate::types::{AnalysisRequest, Task, TaskGraph};

/// Expected-output contract of every extraction task; also the echo marker
/// the sanitizer strips from downstream outputs.
pub const RAW_TEXT_MARKER: &str = "Raw text content of the document";

/// Builds per-artifact task graphs from an analysis request
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskGraphBuilder;

impl TaskGraphBuilder {
    /// Create new builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build one graph per requested artifact
    ///
    /// # Errors
    /// Returns [`InvalidRequestError`] if the document text is empty or no
    /// artifacts were requested. No backend calls are made here.
    pub fn build(&self, request: &AnalysisRequest) -> Result<Vec<TaskGraph>, InvalidRequestError> {
        if request.document_text.trim().is_empty() {
            return Err(InvalidRequestError::EmptyDocument);
        }
        if request.artifacts.is_empty() {
            return Err(InvalidRequestError::NoArtifacts);
        }

        let excerpt = truncate_chars(&request.document_text, request.truncation_limit);

        let graphs = request
            .artifacts
            .iter()
            .map(|&artifact| {
                let extract = Task::new(
                    EXTRACTOR,
                    format!(
                        "Extract text from the uploaded legal document:\n\n{excerpt}"
                    ),
                    RAW_TEXT_MARKER,
                );
                let extract_id = extract.id;

                let analyze = Task::new(
                    artifact.role_name(),
                    artifact.task_description(),
                    artifact.expected_output(),
                )
                .depends_on(extract_id);

                let mut graph = TaskGraph::new(artifact);
                graph.push(extract);
                graph.push(analyze);
                graph
            })
            .collect();

        Ok(graphs)
    }
}

/// First `limit` characters of `text`
///
/// Lossy and silent; it exists to keep extraction prompts bounded. Operates on
/// characters, not bytes, so the cut never splits a code point.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
