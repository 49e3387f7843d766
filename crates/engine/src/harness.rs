//! Trial execution over model/task combinations
//!
//! The harness owns a [`Registry`] and a [`ResultStore`] and keeps the two in
//! step: registering a model reserves its result slot, and every run appends
//! samples and refreshes aggregates before returning. Trials execute in
//! deterministic order (models outer, tasks inner, repetitions innermost) so
//! two runs over the same registrations touch the store identically.

use std::fmt;
use std::time::Instant;

use indexmap::IndexMap;
use modelbench_domain::{Metadata, ModelId, ResultStore, TaskId, TrialSample};
use tracing::{debug, info, instrument, warn};

use crate::aggregate;
use crate::error::{EngineResult, RunError};
use crate::registry::{ModelEntry, Registry, TaskEntry};

/// Selection of what to run and how many times.
#[derive(Debug, Clone)]
pub struct RunSpec {
    /// Models to run; `None` selects every registered model
    pub models: Option<Vec<ModelId>>,
    /// Tasks to run; `None` selects every registered task
    pub tasks: Option<Vec<TaskId>>,
    /// Trials per model/task pair
    pub repetitions: u32,
}

impl RunSpec {
    /// Run every registered model against every registered task, once.
    pub fn all() -> Self {
        Self {
            models: None,
            tasks: None,
            repetitions: 1,
        }
    }

    /// Restrict the run to the given models, in the given order.
    pub fn with_models<I, T>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ModelId>,
    {
        self.models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict the run to the given tasks, in the given order.
    pub fn with_tasks<I, T>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.tasks = Some(tasks.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of trials per model/task pair.
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }
}

impl Default for RunSpec {
    fn default() -> Self {
        Self::all()
    }
}

/// Drives repeated trials and accumulates their samples.
pub struct Harness<H, D, P> {
    registry: Registry<H, D, P>,
    results: ResultStore,
}

impl<H, D, P> Harness<H, D, P> {
    /// Create a harness with no registrations and an empty store.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            results: ResultStore::new(),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry<H, D, P> {
        &self.registry
    }

    /// Accumulated results from every run so far.
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Register a model, replacing any previous entry under the same id.
    ///
    /// The model's result container is created up front, so re-registering a
    /// handle never discards samples already recorded against the id.
    pub fn register_model(&mut self, id: ModelId, handle: H, metadata: Metadata) {
        self.results.ensure_model(&id);
        self.registry
            .register_model(id, ModelEntry::new(handle, metadata));
    }

    /// Register a task, replacing any previous entry under the same id.
    pub fn register_task(&mut self, id: TaskId, entry: TaskEntry<H, D, P>) -> EngineResult<()> {
        self.registry.register_task(id, entry)?;
        Ok(())
    }

    /// Metadata of every registered model, in registration order.
    pub fn model_metadata(&self) -> IndexMap<ModelId, Metadata> {
        self.registry
            .models()
            .map(|(id, entry)| (id.clone(), entry.metadata.clone()))
            .collect()
    }

    /// Execute the selected trials and refresh aggregates.
    ///
    /// The whole selection is validated before anything executes, so a
    /// request naming an unknown id or zero repetitions leaves the store
    /// untouched. Samples append to whatever previous runs recorded; each
    /// pair's `repetitions` field is overwritten with this run's count.
    ///
    /// A trial failure aborts the run immediately. Samples recorded before
    /// the failure are kept and their aggregates are still refreshed.
    #[instrument(skip(self, spec), fields(repetitions = spec.repetitions))]
    pub fn run(&mut self, spec: &RunSpec) -> EngineResult<&ResultStore> {
        if spec.repetitions == 0 {
            return Err(RunError::InvalidRepetitions(0).into());
        }

        let model_ids = match &spec.models {
            Some(ids) => ids.clone(),
            None => self.registry.model_ids(),
        };
        let task_ids = match &spec.tasks {
            Some(ids) => ids.clone(),
            None => self.registry.task_ids(),
        };
        for id in &model_ids {
            if !self.registry.contains_model(id) {
                return Err(RunError::UnknownModel(id.clone()).into());
            }
        }
        for id in &task_ids {
            if !self.registry.contains_task(id) {
                return Err(RunError::UnknownTask(id.clone()).into());
            }
        }

        info!(
            models = model_ids.len(),
            tasks = task_ids.len(),
            "starting run"
        );

        let outcome = run_trials(
            &self.registry,
            &mut self.results,
            &model_ids,
            &task_ids,
            spec.repetitions,
        );

        // Aggregates must track samples even when a trial aborts partway.
        aggregate::recompute(&mut self.results);

        outcome?;
        Ok(&self.results)
    }
}

impl<H, D, P> Default for Harness<H, D, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, D, P> fmt::Debug for Harness<H, D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("registry", &self.registry)
            .field("pair_count", &self.results.pair_count())
            .finish()
    }
}

fn run_trials<H, D, P>(
    registry: &Registry<H, D, P>,
    results: &mut ResultStore,
    model_ids: &[ModelId],
    task_ids: &[TaskId],
    repetitions: u32,
) -> Result<(), RunError> {
    for model_id in model_ids {
        let model = registry
            .model(model_id)
            .ok_or_else(|| RunError::UnknownModel(model_id.clone()))?;

        for task_id in task_ids {
            let task = registry
                .task(task_id)
                .ok_or_else(|| RunError::UnknownTask(task_id.clone()))?;

            results.pair_mut(model_id, task_id).repetitions = repetitions;

            for trial in 1..=repetitions {
                // Wall time covers evaluation only, never scoring.
                let started = Instant::now();
                let predictions =
                    task.evaluate(&model.handle)
                        .map_err(|source| RunError::Evaluation {
                            model: model_id.clone(),
                            task: task_id.clone(),
                            source,
                        })?;
                let wall_time = started.elapsed().as_secs_f64();

                let mut sample = TrialSample::new(wall_time);
                for metric in &task.metrics {
                    let value =
                        metric
                            .apply(&predictions, &task.data)
                            .map_err(|source| RunError::Metric {
                                model: model_id.clone(),
                                task: task_id.clone(),
                                metric: metric.name.clone(),
                                source,
                            })?;
                    if !value.is_finite() {
                        warn!(
                            model = %model_id,
                            task = %task_id,
                            metric = %metric.name,
                            value,
                            "non-finite metric value recorded"
                        );
                    }
                    sample.metric_scores.insert(metric.name.clone(), value);
                }

                debug!(model = %model_id, task = %task_id, trial, wall_time, "trial complete");
                results.pair_mut(model_id, task_id).record(sample);
            }
        }
    }

    Ok(())
}
