//! Crew executor
//!
//! Runs one artifact's task graph in dependency order, threading upstream
//! outputs into downstream prompts. The executor is a generic topological
//! walker even though the current graph template is depth-2: richer pipelines
//! fit the same contract without changes here.

use crate::backend::GenerationBackend;
use crate::error::ExecutionError;
use crate::roles::RoleRegistry;
use crate::types::{ExecutionContext, Task, TaskGraph, TaskId};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use std::sync::Arc;

/// Label separating instruction text from supplied upstream context
const CONTEXT_LABEL: &str = "Context from a previous task:";

/// Executes task graphs against a generation backend
#[derive(Clone)]
pub struct CrewExecutor {
    backend: Arc<dyn GenerationBackend>,
    registry: Arc<RoleRegistry>,
}

impl CrewExecutor {
    /// Create new executor
    #[inline]
    #[must_use]
    pub fn new(backend: Arc<dyn GenerationBackend>, registry: Arc<RoleRegistry>) -> Self {
        Self { backend, registry }
    }

    /// Execute every task in the graph, in topological order
    ///
    /// A task runs only after all of its dependencies have recorded output.
    /// The first backend failure aborts the run; no retry is attempted here.
    ///
    /// # Errors
    /// - [`ExecutionError::CycleDetected`] if the graph is not acyclic
    /// - [`ExecutionError::UnknownRole`] for an unregistered role
    /// - [`ExecutionError::TaskFailed`] wrapping the first backend failure
    pub async fn execute(&self, graph: &TaskGraph) -> Result<ExecutionContext, ExecutionError> {
        let order = execution_order(graph)?;
        let mut context = ExecutionContext::new();

        tracing::debug!(
            artifact = %graph.artifact,
            tasks = order.len(),
            backend = self.backend.name(),
            "executing task graph"
        );

        for task_id in order {
            // A dependency id with no task in the arena has no output to
            // record; the dependent task surfaces it as MissingDependency.
            let Some(task) = graph.task(task_id) else {
                continue;
            };
            let output = self.run_task(task, &context).await?;
            context.record(task_id, output)?;
        }

        Ok(context)
    }

    /// Run a single task: assemble its prompt, invoke the backend
    async fn run_task(
        &self,
        task: &Task,
        context: &ExecutionContext,
    ) -> Result<String, ExecutionError> {
        let role = self.registry.get(&task.role)?;
        let prompt = assemble_prompt(task, context)?;

        tracing::debug!(task = %task.id, role = %role.name, "invoking generation backend");

        match self.backend.generate(role, &prompt).await {
            Ok(output) => Ok(output),
            Err(source) => {
                tracing::warn!(task = %task.id, role = %role.name, error = %source, "task failed");
                Err(ExecutionError::TaskFailed {
                    task_id: task.id,
                    role: task.role.clone(),
                    source,
                })
            }
        }
    }
}

/// Effective prompt: static description plus one labeled block per dependency
///
/// The upstream output is included verbatim so the backend can distinguish
/// instruction text from supplied context.
fn assemble_prompt(task: &Task, context: &ExecutionContext) -> Result<String, ExecutionError> {
    let mut prompt = task.description.clone();

    for &dependency in &task.dependencies {
        let upstream = context
            .get(dependency)
            .ok_or(ExecutionError::MissingDependency {
                task_id: task.id,
                dependency,
            })?;
        prompt.push_str("\n\n");
        prompt.push_str(CONTEXT_LABEL);
        prompt.push('\n');
        prompt.push_str(upstream);
    }

    prompt.push_str("\n\nExpected output: ");
    prompt.push_str(&task.expected_output);

    Ok(prompt)
}

/// Topological order over the graph's task arena
fn execution_order(graph: &TaskGraph) -> Result<Vec<TaskId>, ExecutionError> {
    let mut dag: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for task in graph.tasks() {
        dag.add_node(task.id);
        for &dependency in &task.dependencies {
            dag.add_edge(dependency, task.id, ());
        }
    }

    toposort(&dag, None).map_err(|_| ExecutionError::CycleDetected)
}
