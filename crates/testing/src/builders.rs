//! Fluent builder for assembling harnesses in tests.

use modelbench_domain::{ModelId, TaskId};
use modelbench_engine::{EngineResult, TaskEntry};

use crate::fixtures::{accuracy_metric, fake_metadata, FixtureHarness};

/// Collects model and task registrations, then builds a ready-to-run
/// harness.
///
/// Registration order is preserved, so tests asserting on run order can rely
/// on the order of `with_*` calls.
#[derive(Default)]
pub struct HarnessBuilder {
    models: Vec<(ModelId, Vec<u8>)>,
    tasks: Vec<(TaskId, TaskEntry<Vec<u8>, Vec<u8>, Vec<u8>>)>,
}

impl HarnessBuilder {
    /// Start with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model whose predictions are the handle itself.
    pub fn with_model(mut self, id: impl Into<ModelId>, handle: Vec<u8>) -> Self {
        self.models.push((id.into(), handle));
        self
    }

    /// Register an arbitrary task.
    pub fn with_task(
        mut self,
        id: impl Into<TaskId>,
        entry: TaskEntry<Vec<u8>, Vec<u8>, Vec<u8>>,
    ) -> Self {
        self.tasks.push((id.into(), entry));
        self
    }

    /// Register a task that echoes the model handle as predictions and
    /// scores it with exact-match accuracy against `labels`.
    pub fn with_accuracy_task(self, id: impl Into<TaskId>, labels: Vec<u8>) -> Self {
        let entry = TaskEntry::new(
            |handle: &Vec<u8>, _: &Vec<u8>| Ok(handle.clone()),
            labels,
            vec![accuracy_metric()],
            fake_metadata(),
        );
        self.with_task(id, entry)
    }

    /// Build the harness, registering everything in declaration order.
    pub fn build(self) -> EngineResult<FixtureHarness> {
        let mut harness = FixtureHarness::new();
        for (id, handle) in self.models {
            harness.register_model(id, handle, fake_metadata());
        }
        for (id, entry) in self.tasks {
            harness.register_task(id, entry)?;
        }
        Ok(harness)
    }
}
