//! Deterministic fixtures over byte-vector models and tasks.
//!
//! Every fixture uses the same tiny classification scenario: a model is the
//! prediction vector it returns, the task data is the label vector, and the
//! single metric is exact-match accuracy. All expected values are known
//! constants, so tests built on these fixtures can assert exact aggregates.

use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use modelbench_domain::{Metadata, ResultStore};
use modelbench_engine::{Harness, MetricDef, RunSpec};

use crate::builders::HarnessBuilder;

/// Predictions the fixture baseline model returns.
pub const FIXTURE_PREDICTIONS: [u8; 4] = [1, 0, 1, 1];

/// Labels the fixture task scores against.
pub const FIXTURE_LABELS: [u8; 4] = [1, 0, 0, 1];

/// Accuracy of [`FIXTURE_PREDICTIONS`] against [`FIXTURE_LABELS`].
pub const FIXTURE_ACCURACY: f64 = 0.75;

/// Harness shape shared by all fixtures: byte vectors for handles, task
/// data and predictions alike.
pub type FixtureHarness = Harness<Vec<u8>, Vec<u8>, Vec<u8>>;

/// Exact-match accuracy between a prediction vector and the label vector.
pub fn accuracy_metric() -> MetricDef<Vec<u8>, Vec<u8>> {
    MetricDef::new("accuracy", |predictions: &Vec<u8>, labels: &Vec<u8>| {
        anyhow::ensure!(
            predictions.len() == labels.len(),
            "prediction and label lengths differ"
        );
        let hits = predictions
            .iter()
            .zip(labels)
            .filter(|(p, l)| p == l)
            .count();
        Ok(hits as f64 / labels.len() as f64)
    })
}

/// Plausible descriptive metadata for a model or task.
pub fn fake_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("author".to_string(), Name().fake::<String>().into());
    metadata.insert("notes".to_string(), Sentence(3..8).fake::<String>().into());
    metadata
}

/// A harness with the baseline and challenger models registered against one
/// accuracy-scored task.
///
/// The baseline scores [`FIXTURE_ACCURACY`]; the challenger predicts the
/// labels themselves and scores a perfect 1.0.
pub fn create_test_harness() -> FixtureHarness {
    HarnessBuilder::new()
        .with_model("baseline", FIXTURE_PREDICTIONS.to_vec())
        .with_model("challenger", FIXTURE_LABELS.to_vec())
        .with_accuracy_task("parity-check", FIXTURE_LABELS.to_vec())
        .build()
        .expect("fixture task definitions are valid")
}

/// A fully aggregated store: the fixture harness run for three repetitions.
pub fn create_test_store() -> ResultStore {
    let mut harness = create_test_harness();
    harness
        .run(&RunSpec::all().with_repetitions(3))
        .expect("fixture harness runs cleanly");
    harness.results().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_constants_agree() {
        let metric = accuracy_metric();
        let score = metric
            .apply(&FIXTURE_PREDICTIONS.to_vec(), &FIXTURE_LABELS.to_vec())
            .unwrap();
        assert_eq!(score, FIXTURE_ACCURACY);
    }

    #[test]
    fn test_store_fixture_is_aggregated_and_consistent() {
        let store = create_test_store();

        assert_eq!(store.model_count(), 2);
        assert_eq!(store.pair_count(), 2);
        let pair = store
            .pair(&"baseline".into(), &"parity-check".into())
            .unwrap();
        assert_eq!(pair.sample_count(), 3);
        assert_eq!(pair.metric_stats["accuracy"].avg, FIXTURE_ACCURACY);
        assert!(store.validate().is_valid());
    }

    #[test]
    fn test_fake_metadata_is_populated() {
        let metadata = fake_metadata();
        assert!(metadata.contains_key("author"));
        assert!(metadata.contains_key("notes"));
    }
}
