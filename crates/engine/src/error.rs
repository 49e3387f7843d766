//! Error types for registration and runs

use modelbench_domain::{MetricName, ModelId, TaskId};
use thiserror::Error;

/// Errors raised while registering models or tasks.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A task was declared without any metrics
    #[error("task {task} declares no metrics")]
    EmptyMetrics {
        /// Task being registered
        task: TaskId,
    },

    /// Two metrics on the same task share a name
    #[error("task {task} declares metric {name} more than once")]
    DuplicateMetricName {
        /// Task being registered
        task: TaskId,
        /// Name declared more than once
        name: MetricName,
    },
}

/// Errors raised while executing a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The run requested a model that was never registered
    #[error("unknown model: {0}")]
    UnknownModel(ModelId),

    /// The run requested a task that was never registered
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The run requested zero repetitions
    #[error("repetitions must be at least 1, got {0}")]
    InvalidRepetitions(u32),

    /// A model failed to produce predictions for a task
    #[error("evaluation failed for model {model} on task {task}")]
    Evaluation {
        /// Model being evaluated
        model: ModelId,
        /// Task being evaluated
        task: TaskId,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },

    /// A metric failed to score predictions
    #[error("metric {metric} failed for model {model} on task {task}")]
    Metric {
        /// Model being evaluated
        model: ModelId,
        /// Task being evaluated
        task: TaskId,
        /// Metric being applied
        metric: MetricName,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },
}

/// Any error the engine can produce.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Registration failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Run failure
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
