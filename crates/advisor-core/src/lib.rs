//! Legal document analysis engine
//!
//! A dependency-aware orchestration core that:
//! - Defines three fixed analysis roles (extractor, clause analyzer, risk detector)
//! - Builds one independent task graph per requested artifact
//! - Executes each graph in topological order against a generation backend
//! - Sanitizes raw generated text into presentable artifacts
//!
//! # Example
//!
//! ```rust,ignore
//! use advisor_core::{AdvisorConfig, LegalAdvisor, OpenAiBackend};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdvisorConfig::from_env();
//! config.validate()?;
//!
//! let backend = Arc::new(OpenAiBackend::from_config(&config)?);
//! let advisor = LegalAdvisor::new(config, backend);
//!
//! let result = advisor.analyze_file("contract.pdf".as_ref()).await?;
//! println!("{}", result.summary().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod graph;
pub mod roles;
pub mod sanitize;
pub mod types;

mod executor;

// Re-exports for convenience
pub use backend::{GenerationBackend, GenerationError, OpenAiBackend};
pub use config::AdvisorConfig;
pub use engine::LegalAdvisor;
pub use error::{
    AdvisorError, ConfigError, ExecutionError, InvalidRequestError, UnknownRoleError,
};
pub use executor::CrewExecutor;
pub use extract::{ExtractError, UNSUPPORTED_FORMAT_MESSAGE};
pub use graph::TaskGraphBuilder;
pub use roles::{Role, RoleRegistry};
pub use sanitize::sanitize_output;
pub use types::{
    AnalysisRequest, AnalysisResult, ArtifactKind, ExecutionContext, Task, TaskGraph, TaskId,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the analysis engine
    pub use crate::{
        AdvisorConfig, AnalysisRequest, AnalysisResult, ArtifactKind, CrewExecutor,
        GenerationBackend, LegalAdvisor, RoleRegistry, TaskGraphBuilder,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
