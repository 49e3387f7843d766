//! Snapshot documents tying results to a benchmark name.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use modelbench_domain::{Metadata, ModelId, ReportId, ResultStore};
use serde::{Deserialize, Serialize};

/// A self-contained snapshot of a benchmark's accumulated results.
///
/// Documents are immutable once created; rerunning a benchmark produces a
/// new document with a fresh id rather than rewriting an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Unique, time-ordered identifier for this snapshot
    pub report_id: ReportId,

    /// Name of the benchmark the snapshot belongs to
    pub benchmark: String,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// Metadata of every registered model, in registration order
    pub models: IndexMap<ModelId, Metadata>,

    /// Accumulated samples and aggregates
    pub results: ResultStore,
}

impl ReportDocument {
    /// Snapshot the given results under a fresh report id.
    pub fn new(
        benchmark: impl Into<String>,
        models: IndexMap<ModelId, Metadata>,
        results: ResultStore,
    ) -> Self {
        Self {
            report_id: ReportId::new(),
            benchmark: benchmark.into(),
            created_at: Utc::now(),
            models,
            results,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
