//! Accumulated samples, aggregate statistics, and the result store.
//!
//! Results are keyed by (model, task) pair. Each pair accumulates raw
//! runtime and metric samples across runs; aggregate statistics are derived
//! from the full sample sequences and never fold in previous aggregates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifiers::{MetricName, ModelId, TaskId};
use crate::sample::TrialSample;

/// Arithmetic mean of a sample sequence, 0.0 when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `n`) of a sample sequence.
///
/// Sequences shorter than two elements have a standard deviation of 0.0:
/// a single measurement carries no spread.
pub fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Aggregate statistics over one sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Arithmetic mean of the samples
    pub avg: f64,

    /// Population standard deviation of the samples
    pub std: f64,
}

impl SampleStats {
    /// Compute statistics over a sample sequence.
    pub fn from_samples(values: &[f64]) -> Self {
        Self {
            avg: mean(values),
            std: population_std(values),
        }
    }
}

/// Accumulated measurements for one (model, task) pair.
///
/// Repeated runs append to the sample sequences; `repetitions` records only
/// the count requested by the most recent run, so the authoritative total is
/// `runtime_samples.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    /// Wall-clock seconds of every recorded trial, oldest first
    pub runtime_samples: Vec<f64>,

    /// Raw metric samples, one sequence per metric name
    pub metric_samples: IndexMap<MetricName, Vec<f64>>,

    /// Repetition count requested by the most recent run
    pub repetitions: u32,

    /// Runtime statistics over the full sample sequence, once aggregated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_stats: Option<SampleStats>,

    /// Per-metric statistics over the full sample sequences, once aggregated
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metric_stats: IndexMap<MetricName, SampleStats>,
}

impl PairResult {
    /// Create an empty pair entry with no recorded trials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trial's measurements to the sample sequences.
    ///
    /// Metric sequences are created on first use, so metrics added by a
    /// task re-registration start accumulating from the next run.
    pub fn record(&mut self, sample: TrialSample) {
        self.runtime_samples.push(sample.wall_time);
        for (name, value) in sample.metric_scores {
            self.metric_samples.entry(name).or_default().push(value);
        }
    }

    /// Number of trials recorded across all runs.
    pub fn sample_count(&self) -> usize {
        self.runtime_samples.len()
    }

    /// Whether any trial has been recorded.
    pub fn is_empty(&self) -> bool {
        self.runtime_samples.is_empty()
    }
}

/// Results for every (model, task) pair, in registration/run order.
///
/// The store is owned by the harness and mutated in place during runs;
/// reporting adapters receive it read-only. A pair entry outlives the
/// registry entries that produced it, so re-registering a model or task
/// never discards accumulated measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    entries: IndexMap<ModelId, IndexMap<TaskId, PairResult>>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a per-model container exists, keeping any existing results.
    pub fn ensure_model(&mut self, model: &ModelId) {
        if !self.entries.contains_key(model) {
            self.entries.insert(model.clone(), IndexMap::new());
        }
    }

    /// Look up the entry for a pair.
    pub fn pair(&self, model: &ModelId, task: &TaskId) -> Option<&PairResult> {
        self.entries.get(model)?.get(task)
    }

    /// Get the entry for a pair, creating an empty one as needed.
    pub fn pair_mut(&mut self, model: &ModelId, task: &TaskId) -> &mut PairResult {
        self.entries
            .entry(model.clone())
            .or_default()
            .entry(task.clone())
            .or_default()
    }

    /// Iterate models and their per-task results in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ModelId, &IndexMap<TaskId, PairResult>)> {
        self.entries.iter()
    }

    /// Iterate every pair entry in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&ModelId, &TaskId, &PairResult)> {
        self.entries.iter().flat_map(|(model, tasks)| {
            tasks.iter().map(move |(task, pair)| (model, task, pair))
        })
    }

    /// Iterate every pair entry mutably, for aggregation.
    pub fn pairs_mut(&mut self) -> impl Iterator<Item = (&ModelId, &TaskId, &mut PairResult)> {
        self.entries.iter_mut().flat_map(|(model, tasks)| {
            tasks.iter_mut().map(move |(task, pair)| (model, task, pair))
        })
    }

    /// Number of models with a result container.
    pub fn model_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of (model, task) pair entries.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    /// Whether the store holds no model containers at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
