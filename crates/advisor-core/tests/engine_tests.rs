//! End-to-end engine tests with scripted backends

use advisor_core::{
    AdvisorConfig, AnalysisRequest, ArtifactKind, GenerationBackend, GenerationError,
    LegalAdvisor, Role,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend scripted per role name; failures are per-role too.
#[derive(Default)]
struct ScriptedBackend {
    replies: HashMap<String, String>,
    fail_roles: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self::default()
    }

    fn reply(mut self, role: &str, text: &str) -> Self {
        self.replies.insert(role.to_string(), text.to_string());
        self
    }

    fn fail_for(mut self, role: &str) -> Self {
        self.fail_roles.push(role.to_string());
        self
    }
}

#[async_trait::async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, role: &Role, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(role.name.clone());

        if self.fail_roles.contains(&role.name) {
            return Err(GenerationError::Api {
                status: 429,
                body: "rate limited".to_string(),
            });
        }

        Ok(self
            .replies
            .get(&role.name)
            .cloned()
            .unwrap_or_else(|| format!("output from {}", role.name)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Backend that fails every call.
struct AlwaysFailing;

#[async_trait::async_trait]
impl GenerationBackend for AlwaysFailing {
    async fn generate(&self, _role: &Role, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Api {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    fn name(&self) -> &str {
        "always-failing"
    }
}

/// Backend that never answers within any reasonable deadline.
struct HangingBackend {
    started: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl GenerationBackend for HangingBackend {
    async fn generate(&self, _role: &Role, _prompt: &str) -> Result<String, GenerationError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GenerationError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

fn advisor_with(backend: Arc<dyn GenerationBackend>) -> LegalAdvisor {
    LegalAdvisor::new(AdvisorConfig::new(), backend)
}

#[tokio::test]
async fn summary_scenario_returns_backend_text() {
    let backend = Arc::new(ScriptedBackend::new().reply("clause-analyzer", "SUMMARY_OK"));
    let advisor = advisor_with(backend);

    let request = AnalysisRequest::new("This agreement is between A and B for 12 months...")
        .with_artifacts(vec![ArtifactKind::Summary]);
    let result = advisor.analyze(request).await.unwrap();

    assert_eq!(result.summary(), Some("SUMMARY_OK"));
    assert_eq!(result.clauses(), None);
    assert_eq!(result.risks(), None);
}

#[tokio::test]
async fn all_three_artifacts_by_default() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .reply("clause-analyzer", "ANALYSIS")
            .reply("risk-detector", "RISKS"),
    );
    let advisor = advisor_with(backend);

    let result = advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();

    assert_eq!(result.summary(), Some("ANALYSIS"));
    assert_eq!(result.clauses(), Some("ANALYSIS"));
    assert_eq!(result.risks(), Some("RISKS"));
}

#[tokio::test]
async fn extraction_repeats_once_per_artifact() {
    let backend = Arc::new(ScriptedBackend::new());
    let advisor = advisor_with(Arc::clone(&backend) as Arc<dyn GenerationBackend>);

    advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();

    let calls = backend.calls.lock().unwrap();
    let extractions = calls.iter().filter(|r| r.as_str() == "extractor").count();
    assert_eq!(extractions, 3);
    assert_eq!(calls.len(), 6);
}

#[tokio::test]
async fn risk_failure_leaves_other_artifacts_intact() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .reply("clause-analyzer", "VALID ANALYSIS")
            .fail_for("risk-detector"),
    );
    let advisor = advisor_with(backend);

    let result = advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();

    assert_eq!(result.summary(), Some("VALID ANALYSIS"));
    assert_eq!(result.clauses(), Some("VALID ANALYSIS"));
    assert_eq!(result.risks(), Some("No risk analysis available"));
}

#[tokio::test]
async fn every_call_failing_still_returns_fallbacks() {
    let advisor = advisor_with(Arc::new(AlwaysFailing));

    let result = advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();

    assert_eq!(result.summary(), Some("No summary available"));
    assert_eq!(result.clauses(), Some("No clause analysis available"));
    assert_eq!(result.risks(), Some("No risk analysis available"));
}

#[tokio::test]
async fn echoed_scaffolding_is_stripped_from_artifacts() {
    // Backend echoes the extraction task's output contract, as real models do.
    let backend = Arc::new(ScriptedBackend::new().reply(
        "clause-analyzer",
        "Raw text content of the document\nThe term is 12 months.",
    ));
    let advisor = advisor_with(backend);

    let request = AnalysisRequest::new("contract text")
        .with_artifacts(vec![ArtifactKind::Summary]);
    let result = advisor.analyze(request).await.unwrap();

    assert_eq!(result.summary(), Some("The term is 12 months."));
}

#[tokio::test(start_paused = true)]
async fn timed_out_graphs_get_cancelled_fallbacks() {
    let started = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(HangingBackend {
        started: Arc::clone(&started),
    });
    let advisor = LegalAdvisor::new(
        AdvisorConfig::new().with_graph_timeout_secs(5),
        backend,
    );

    let result = advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();

    assert_eq!(result.summary(), Some("Summary analysis cancelled"));
    assert_eq!(result.clauses(), Some("Clause analysis cancelled"));
    assert_eq!(result.risks(), Some("Risk analysis cancelled"));
    // Every graph got as far as its first backend call before the deadline.
    assert_eq!(started.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn queued_graphs_share_the_same_deadline() {
    let started = Arc::new(AtomicUsize::new(0));
    let backend = Arc::new(HangingBackend {
        started: Arc::clone(&started),
    });
    let mut config = AdvisorConfig::new().with_graph_timeout_secs(5);
    config.max_concurrent_graphs = 1;
    let advisor = LegalAdvisor::new(config, backend);

    let begun = tokio::time::Instant::now();
    let result = advisor
        .analyze(AnalysisRequest::new("contract text"))
        .await
        .unwrap();
    let elapsed = begun.elapsed();

    assert_eq!(result.summary(), Some("Summary analysis cancelled"));
    assert_eq!(result.clauses(), Some("Clause analysis cancelled"));
    assert_eq!(result.risks(), Some("Risk analysis cancelled"));
    // Time spent waiting for a worker permit burns the per-graph deadline;
    // graphs queued behind a hung worker must not serialize their deadlines.
    assert!(
        elapsed < Duration::from_secs(7),
        "expected one shared deadline window, took {elapsed:?}"
    );
}

#[tokio::test]
async fn unsupported_file_builds_no_graphs() {
    let backend = Arc::new(ScriptedBackend::new());
    let advisor = advisor_with(Arc::clone(&backend) as Arc<dyn GenerationBackend>);

    let err = advisor
        .analyze_file(std::path::Path::new("contract.docx"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "extraction failed: Unsupported file format. Please upload PDF or TXT."
    );
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn txt_file_flows_through_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contract.txt");
    std::fs::write(&path, "This agreement is between A and B.").unwrap();

    let backend = Arc::new(ScriptedBackend::new().reply("clause-analyzer", "SUMMARY_OK"));
    let advisor = advisor_with(backend);

    let result = advisor.analyze_file(&path).await.unwrap();
    assert_eq!(result.summary(), Some("SUMMARY_OK"));
}
