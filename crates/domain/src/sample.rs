//! The single-trial measurement record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifiers::MetricName;

/// Measurements taken from one evaluation of a model on a task.
///
/// `wall_time` covers the evaluation call itself; lookup and bookkeeping
/// around it are excluded. Metric scores appear in the order the task
/// declared its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSample {
    /// Elapsed wall-clock seconds for the evaluation call
    pub wall_time: f64,

    /// Score produced by each of the task's metrics for this trial
    pub metric_scores: IndexMap<MetricName, f64>,
}

impl TrialSample {
    /// Create a sample with the given wall time and no scores yet.
    pub fn new(wall_time: f64) -> Self {
        Self {
            wall_time,
            metric_scores: IndexMap::new(),
        }
    }

    /// Attach a metric score, consuming and returning the sample.
    pub fn with_score(mut self, name: impl Into<MetricName>, value: f64) -> Self {
        self.metric_scores.insert(name.into(), value);
        self
    }
}
