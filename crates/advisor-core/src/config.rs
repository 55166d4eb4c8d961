//! Engine configuration
//!
//! Loaded once at process start, validated before first use, never mutated
//! mid-request. Credentials come from the environment, not from source.

use crate::error::ConfigError;
use crate::types::DEFAULT_TRUNCATION_LIMIT;

/// Environment variable holding the backend API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Process-wide engine configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Backend API key, if present in the environment
    pub api_key: Option<String>,
    /// Backend model name
    pub model: String,
    /// Backend base URL
    pub base_url: String,
    /// Document characters embedded in extraction prompts
    pub truncation_limit: usize,
    /// Concurrent artifact graphs, sized to the backend rate limit
    pub max_concurrent_graphs: usize,
    /// Deadline for one artifact graph, in seconds
    pub graph_timeout_secs: u64,
    /// Deadline for one backend HTTP call, in seconds
    pub request_timeout_secs: u64,
}

impl AdvisorConfig {
    /// Create default configuration (no credential)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }

    /// With backend model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With backend base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// With truncation limit
    #[inline]
    #[must_use]
    pub fn with_truncation_limit(mut self, limit: usize) -> Self {
        self.truncation_limit = limit;
        self
    }

    /// With graph timeout in seconds
    #[inline]
    #[must_use]
    pub fn with_graph_timeout_secs(mut self, secs: u64) -> Self {
        self.graph_timeout_secs = secs;
        self
    }

    /// Validate before first use
    ///
    /// # Errors
    /// Returns [`ConfigError`] for a missing API key or out-of-range knobs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingCredential(API_KEY_VAR));
        }
        if self.truncation_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "truncation_limit",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_concurrent_graphs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_concurrent_graphs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            max_concurrent_graphs: 3,
            graph_timeout_secs: 120,
            request_timeout_secs: 60,
        }
    }
}
