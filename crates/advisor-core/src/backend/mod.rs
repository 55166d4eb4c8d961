//! Generation backend boundary
//!
//! The orchestrator invokes exactly one operation per task: give the backend a
//! role framing and a prompt, get generated text back. Implementations are
//! swappable, rate-limited, and may fail transiently; retry policy (if any)
//! lives behind this trait, never in the orchestrator.

mod openai;

pub use openai::OpenAiBackend;

use crate::roles::Role;

/// A text-generation service invoked once per task
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce text for a prompt under a role's behavioral framing
    async fn generate(&self, role: &Role, prompt: &str) -> Result<String, GenerationError>;

    /// Backend name, for logging
    fn name(&self) -> &str;
}

/// Backend call failure
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("backend error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The service answered successfully but produced no text
    #[error("backend returned no generated text")]
    EmptyResponse,
}
