//! Command-line front end for the legal document analysis engine
//!
//! Extracts text from a PDF or TXT contract, runs the three analysis
//! pipelines, and prints one section per artifact.

use advisor_core::{AdvisorConfig, ArtifactKind, LegalAdvisor, OpenAiBackend};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "legal-advisor", version, about = "Analyze a legal document")]
struct Cli {
    /// Path to the document (.pdf or .txt)
    document: PathBuf,

    /// Artifacts to produce (default: all three)
    #[arg(long, value_enum, value_delimiter = ',')]
    artifacts: Vec<ArtifactArg>,

    /// Document characters embedded in the extraction prompt
    #[arg(long)]
    truncation_limit: Option<usize>,

    /// Backend model name
    #[arg(long)]
    model: Option<String>,

    /// Backend base URL (OpenAI-compatible)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-artifact deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ArtifactArg {
    Summary,
    Clauses,
    Risks,
}

impl From<ArtifactArg> for ArtifactKind {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Summary => ArtifactKind::Summary,
            ArtifactArg::Clauses => ArtifactKind::Clauses,
            ArtifactArg::Risks => ArtifactKind::Risks,
        }
    }
}

fn section_title(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Summary => "Document Summary",
        ArtifactKind::Clauses => "Clause Analysis",
        ArtifactKind::Risks => "Risk Analysis",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let mut config = AdvisorConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(limit) = cli.truncation_limit {
        config = config.with_truncation_limit(limit);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_graph_timeout_secs(timeout);
    }
    config.validate().context("configuration is incomplete")?;

    let backend = OpenAiBackend::from_config(&config).context("failed to build backend")?;
    let advisor = LegalAdvisor::new(config, Arc::new(backend));

    let mut request = advisor.request_for(
        advisor_core::extract::extract(&cli.document)
            .with_context(|| format!("could not extract {}", cli.document.display()))?,
    );
    if !cli.artifacts.is_empty() {
        request = request.with_artifacts(cli.artifacts.iter().map(|&a| a.into()).collect());
    }

    let result = advisor.analyze(request).await?;

    for (kind, text) in result.iter() {
        println!("{}", section_title(kind));
        println!("{}", "=".repeat(section_title(kind).len()));
        println!();
        println!("{text}");
        println!();
    }

    Ok(())
}
