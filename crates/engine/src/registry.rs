//! Model and task registration
//!
//! The registry is deliberately permissive about payload types: a model is
//! whatever handle `H` the caller hands in, a task owns its input data `D`,
//! and evaluation produces predictions `P`. The engine never inspects any of
//! the three, it only threads them through the evaluation and scoring
//! closures registered here.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use modelbench_domain::{Metadata, MetricName, ModelId, TaskId};

use crate::error::RegistryError;

/// Evaluation closure: produces predictions for a model handle on task data.
pub type EvalFn<H, D, P> = Arc<dyn Fn(&H, &D) -> anyhow::Result<P> + Send + Sync>;

/// Scoring closure: reduces predictions against task data to a single score.
pub type ScoreFn<D, P> = Arc<dyn Fn(&P, &D) -> anyhow::Result<f64> + Send + Sync>;

/// A named metric attached to a task.
pub struct MetricDef<D, P> {
    /// Name under which scores are recorded
    pub name: MetricName,
    score: ScoreFn<D, P>,
}

impl<D, P> MetricDef<D, P> {
    /// Create a metric from a name and a scoring closure.
    pub fn new(
        name: impl Into<MetricName>,
        score: impl Fn(&P, &D) -> anyhow::Result<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            score: Arc::new(score),
        }
    }

    /// Score predictions against task data.
    pub fn apply(&self, predictions: &P, data: &D) -> anyhow::Result<f64> {
        (self.score)(predictions, data)
    }
}

impl<D, P> Clone for MetricDef<D, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            score: Arc::clone(&self.score),
        }
    }
}

impl<D, P> fmt::Debug for MetricDef<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A registered model: an opaque handle plus descriptive metadata.
pub struct ModelEntry<H> {
    /// Opaque handle passed to task evaluation closures
    pub handle: H,
    /// Free-form descriptive fields carried into reports
    pub metadata: Metadata,
}

impl<H> ModelEntry<H> {
    /// Bundle a handle with its metadata.
    pub fn new(handle: H, metadata: Metadata) -> Self {
        Self { handle, metadata }
    }
}

impl<H> fmt::Debug for ModelEntry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// A registered task: evaluation closure, input data, metrics, metadata.
pub struct TaskEntry<H, D, P> {
    evaluate: EvalFn<H, D, P>,
    /// Input payload handed to every trial
    pub data: D,
    /// Metrics applied after every trial, in declaration order
    pub metrics: Vec<MetricDef<D, P>>,
    /// Free-form descriptive fields carried into reports
    pub metadata: Metadata,
}

impl<H, D, P> TaskEntry<H, D, P> {
    /// Bundle an evaluation closure with its data, metrics and metadata.
    pub fn new(
        evaluate: impl Fn(&H, &D) -> anyhow::Result<P> + Send + Sync + 'static,
        data: D,
        metrics: Vec<MetricDef<D, P>>,
        metadata: Metadata,
    ) -> Self {
        Self {
            evaluate: Arc::new(evaluate),
            data,
            metrics,
            metadata,
        }
    }

    /// Produce predictions for a model handle on this task's data.
    pub fn evaluate(&self, handle: &H) -> anyhow::Result<P> {
        (self.evaluate)(handle, &self.data)
    }
}

impl<H, D, P> fmt::Debug for TaskEntry<H, D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskEntry")
            .field("metrics", &self.metrics)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Registered models and tasks, in registration order.
pub struct Registry<H, D, P> {
    models: IndexMap<ModelId, ModelEntry<H>>,
    tasks: IndexMap<TaskId, TaskEntry<H, D, P>>,
}

impl<H, D, P> Registry<H, D, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            models: IndexMap::new(),
            tasks: IndexMap::new(),
        }
    }

    /// Register a model, replacing any previous entry under the same id.
    ///
    /// Replacement keeps the model's position in registration order.
    pub fn register_model(&mut self, id: ModelId, entry: ModelEntry<H>) {
        self.models.insert(id, entry);
    }

    /// Register a task, replacing any previous entry under the same id.
    ///
    /// The metric list must be non-empty and free of duplicate names; a
    /// rejected entry leaves the registry untouched.
    pub fn register_task(
        &mut self,
        id: TaskId,
        entry: TaskEntry<H, D, P>,
    ) -> Result<(), RegistryError> {
        if entry.metrics.is_empty() {
            return Err(RegistryError::EmptyMetrics { task: id });
        }
        let mut seen = HashSet::new();
        for metric in &entry.metrics {
            if !seen.insert(metric.name.as_str()) {
                return Err(RegistryError::DuplicateMetricName {
                    task: id,
                    name: metric.name.clone(),
                });
            }
        }

        self.tasks.insert(id, entry);
        Ok(())
    }

    /// Look up a model by id.
    pub fn model(&self, id: &ModelId) -> Option<&ModelEntry<H>> {
        self.models.get(id)
    }

    /// Look up a task by id.
    pub fn task(&self, id: &TaskId) -> Option<&TaskEntry<H, D, P>> {
        self.tasks.get(id)
    }

    /// Whether a model id is registered.
    pub fn contains_model(&self, id: &ModelId) -> bool {
        self.models.contains_key(id)
    }

    /// Whether a task id is registered.
    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// All model ids, in registration order.
    pub fn model_ids(&self) -> Vec<ModelId> {
        self.models.keys().cloned().collect()
    }

    /// All task ids, in registration order.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.keys().cloned().collect()
    }

    /// Iterate over registered models in registration order.
    pub fn models(&self) -> impl Iterator<Item = (&ModelId, &ModelEntry<H>)> {
        self.models.iter()
    }

    /// Number of registered models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl<H, D, P> Default for Registry<H, D, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, D, P> fmt::Debug for Registry<H, D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("model_count", &self.models.len())
            .field("task_count", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestRegistry = Registry<u8, Vec<u8>, Vec<u8>>;

    fn echo_task(metrics: Vec<MetricDef<Vec<u8>, Vec<u8>>>) -> TaskEntry<u8, Vec<u8>, Vec<u8>> {
        TaskEntry::new(
            |_handle, data: &Vec<u8>| Ok(data.clone()),
            vec![1, 2, 3],
            metrics,
            Metadata::new(),
        )
    }

    fn constant_metric(name: &str, value: f64) -> MetricDef<Vec<u8>, Vec<u8>> {
        MetricDef::new(name, move |_, _| Ok(value))
    }

    #[test]
    fn test_models_keep_registration_order() {
        let mut registry = TestRegistry::new();
        registry.register_model("zulu".into(), ModelEntry::new(1, Metadata::new()));
        registry.register_model("alpha".into(), ModelEntry::new(2, Metadata::new()));

        let ids: Vec<String> = registry
            .model_ids()
            .into_iter()
            .map(|id| id.into_string())
            .collect();
        assert_eq!(ids, vec!["zulu", "alpha"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = TestRegistry::new();
        registry.register_model("a".into(), ModelEntry::new(1, Metadata::new()));
        registry.register_model("b".into(), ModelEntry::new(2, Metadata::new()));
        registry.register_model("a".into(), ModelEntry::new(9, Metadata::new()));

        assert_eq!(registry.model_count(), 2);
        assert_eq!(registry.model(&"a".into()).map(|m| m.handle), Some(9));
        let ids: Vec<String> = registry
            .model_ids()
            .into_iter()
            .map(|id| id.into_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_task_without_metrics_is_rejected() {
        let mut registry = TestRegistry::new();
        let result = registry.register_task("empty".into(), echo_task(vec![]));

        assert!(matches!(
            result,
            Err(RegistryError::EmptyMetrics { .. })
        ));
        assert_eq!(registry.task_count(), 0);
    }

    #[test]
    fn test_duplicate_metric_names_are_rejected() {
        let mut registry = TestRegistry::new();
        let metrics = vec![
            constant_metric("accuracy", 1.0),
            constant_metric("latency", 0.5),
            constant_metric("accuracy", 0.0),
        ];
        let result = registry.register_task("dup".into(), echo_task(metrics));

        match result {
            Err(RegistryError::DuplicateMetricName { name, .. }) => {
                assert_eq!(name.as_str(), "accuracy");
            }
            other => panic!("expected duplicate-name rejection, got {other:?}"),
        }
        assert_eq!(registry.task_count(), 0);
    }

    #[test]
    fn test_task_evaluation_uses_registered_data() {
        let mut registry = TestRegistry::new();
        registry
            .register_task(
                "echo".into(),
                echo_task(vec![constant_metric("noop", 0.0)]),
            )
            .unwrap();

        let task = registry.task(&"echo".into()).unwrap();
        let predictions = task.evaluate(&0).unwrap();
        assert_eq!(predictions, vec![1, 2, 3]);
        assert_eq!(task.metrics[0].apply(&predictions, &task.data).unwrap(), 0.0);
    }
}
