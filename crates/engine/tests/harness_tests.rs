//! End-to-end harness behavior over a small deterministic scenario.
//!
//! Models here are just prediction vectors and tasks echo the handle back,
//! so every score is known in advance and the tests can assert exact
//! aggregates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use modelbench_domain::result::{mean, population_std};
use modelbench_domain::Metadata;
use modelbench_engine::{
    EngineError, Harness, MetricDef, RegistryError, RunError, RunSpec, TaskEntry,
};

type TestHarness = Harness<Vec<u8>, Vec<u8>, Vec<u8>>;
type TestMetric = MetricDef<Vec<u8>, Vec<u8>>;
type TestTask = TaskEntry<Vec<u8>, Vec<u8>, Vec<u8>>;

const PREDICTIONS: [u8; 4] = [1, 0, 1, 1];
const LABELS: [u8; 4] = [1, 0, 0, 1];

fn accuracy() -> TestMetric {
    MetricDef::new("accuracy", |predictions: &Vec<u8>, labels: &Vec<u8>| {
        anyhow::ensure!(predictions.len() == labels.len(), "length mismatch");
        let hits = predictions
            .iter()
            .zip(labels)
            .filter(|(p, l)| p == l)
            .count();
        Ok(hits as f64 / labels.len() as f64)
    })
}

fn zero() -> TestMetric {
    MetricDef::new("zero", |_: &Vec<u8>, _: &Vec<u8>| Ok(0.0))
}

fn echo_task(metrics: Vec<TestMetric>) -> TestTask {
    TaskEntry::new(
        |handle: &Vec<u8>, _: &Vec<u8>| Ok(handle.clone()),
        LABELS.to_vec(),
        metrics,
        Metadata::new(),
    )
}

fn harness_with(metrics: Vec<TestMetric>) -> TestHarness {
    let mut harness = TestHarness::new();
    harness.register_model("baseline".into(), PREDICTIONS.to_vec(), Metadata::new());
    harness
        .register_task("parity".into(), echo_task(metrics))
        .unwrap();
    harness
}

#[test]
fn repetitions_accumulate_samples_and_stats() {
    let mut harness = harness_with(vec![accuracy()]);
    harness
        .run(&RunSpec::all().with_repetitions(4))
        .unwrap();

    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.repetitions, 4);
    assert_eq!(pair.runtime_samples.len(), 4);
    assert!(pair.runtime_samples.iter().all(|t| *t >= 0.0));
    assert_eq!(pair.metric_samples["accuracy"], vec![0.75; 4]);

    let runtime = pair.runtime_stats.unwrap();
    assert_eq!(runtime.avg, mean(&pair.runtime_samples));
    assert_eq!(runtime.std, population_std(&pair.runtime_samples));

    let score = pair.metric_stats["accuracy"];
    assert_eq!(score.avg, 0.75);
    assert_eq!(score.std, 0.0);
}

#[test]
fn aggregation_is_idempotent() {
    let mut harness = harness_with(vec![accuracy(), zero()]);
    harness
        .run(&RunSpec::all().with_repetitions(3))
        .unwrap();

    let before = harness.results().clone();
    let mut after = before.clone();
    modelbench_engine::recompute(&mut after);

    assert_eq!(before, after);
    assert_eq!(
        serde_json::to_string(&before).unwrap(),
        serde_json::to_string(&after).unwrap()
    );
}

#[test]
fn reruns_append_samples_and_overwrite_repetitions() {
    let mut harness = harness_with(vec![accuracy()]);
    harness
        .run(&RunSpec::all().with_repetitions(3))
        .unwrap();
    harness
        .run(&RunSpec::all().with_repetitions(2))
        .unwrap();

    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.runtime_samples.len(), 5);
    assert_eq!(pair.metric_samples["accuracy"].len(), 5);
    assert_eq!(pair.repetitions, 2);
    assert!(harness.results().validate().is_valid());
}

#[test]
fn unknown_model_fails_before_anything_runs() {
    let mut harness = harness_with(vec![accuracy()]);
    let spec = RunSpec::all().with_models(["baseline", "ghost"]);

    let err = harness.run(&spec).unwrap_err();
    match err {
        EngineError::Run(RunError::UnknownModel(id)) => assert_eq!(id.as_str(), "ghost"),
        other => panic!("expected unknown-model rejection, got {other}"),
    }
    assert_eq!(harness.results().pair_count(), 0);
}

#[test]
fn unknown_task_fails_before_anything_runs() {
    let mut harness = harness_with(vec![accuracy()]);
    let spec = RunSpec::all().with_tasks(["ghost"]);

    let err = harness.run(&spec).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Run(RunError::UnknownTask(_))
    ));
    assert_eq!(harness.results().pair_count(), 0);
}

#[test]
fn zero_repetitions_are_rejected() {
    let mut harness = harness_with(vec![accuracy()]);

    let err = harness
        .run(&RunSpec::all().with_repetitions(0))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Run(RunError::InvalidRepetitions(0))
    ));
    assert_eq!(harness.results().pair_count(), 0);
}

#[test]
fn single_repetition_has_zero_deviation() {
    let mut harness = harness_with(vec![accuracy()]);
    harness.run(&RunSpec::all()).unwrap();

    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.runtime_stats.unwrap().std, 0.0);
    assert_eq!(pair.metric_stats["accuracy"].std, 0.0);
}

#[test]
fn metric_declaration_order_shapes_samples_not_aggregates() {
    let mut forward = harness_with(vec![accuracy(), zero()]);
    forward.run(&RunSpec::all().with_repetitions(2)).unwrap();
    let mut reversed = harness_with(vec![zero(), accuracy()]);
    reversed.run(&RunSpec::all().with_repetitions(2)).unwrap();

    let forward_pair = forward
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    let reversed_pair = reversed
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();

    let forward_names: Vec<&str> = forward_pair
        .metric_samples
        .keys()
        .map(|n| n.as_str())
        .collect();
    let reversed_names: Vec<&str> = reversed_pair
        .metric_samples
        .keys()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(forward_names, vec!["accuracy", "zero"]);
    assert_eq!(reversed_names, vec!["zero", "accuracy"]);

    assert_eq!(
        forward_pair.metric_stats["accuracy"],
        reversed_pair.metric_stats["accuracy"]
    );
    assert_eq!(
        forward_pair.metric_stats["zero"],
        reversed_pair.metric_stats["zero"]
    );
}

#[test]
fn evaluation_failure_aborts_and_keeps_prior_samples() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let flaky = TaskEntry::new(
        move |handle: &Vec<u8>, _: &Vec<u8>| {
            if counter.fetch_add(1, Ordering::SeqCst) >= 2 {
                anyhow::bail!("synthetic device loss");
            }
            Ok(handle.clone())
        },
        LABELS.to_vec(),
        vec![accuracy()],
        Metadata::new(),
    );

    let mut harness = TestHarness::new();
    harness.register_model("baseline".into(), PREDICTIONS.to_vec(), Metadata::new());
    harness.register_task("parity".into(), flaky).unwrap();

    let err = harness
        .run(&RunSpec::all().with_repetitions(5))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "evaluation failed for model baseline on task parity"
    );
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("synthetic device loss"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // The two completed trials survive, with aggregates refreshed over them.
    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.runtime_samples.len(), 2);
    assert_eq!(pair.metric_samples["accuracy"], vec![0.75, 0.75]);
    assert_eq!(pair.metric_stats["accuracy"].avg, 0.75);
    assert_eq!(pair.repetitions, 5);
    assert!(!harness.results().validate().is_valid());
}

#[test]
fn metric_failure_carries_metric_context() {
    let boom = MetricDef::new("boom", |_: &Vec<u8>, _: &Vec<u8>| {
        anyhow::bail!("division by absent labels")
    });
    let mut harness = harness_with(vec![accuracy(), boom]);

    let err = harness.run(&RunSpec::all()).unwrap_err();
    match err {
        EngineError::Run(RunError::Metric { metric, .. }) => {
            assert_eq!(metric.as_str(), "boom");
        }
        other => panic!("expected metric failure, got {other}"),
    }

    // The sample under construction was never recorded.
    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert!(pair.is_empty());
}

#[test]
fn task_registration_failures_pass_through() {
    let mut harness = TestHarness::new();

    let err = harness
        .register_task("bare".into(), echo_task(vec![]))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Registry(RegistryError::EmptyMetrics { .. })
    ));

    let err = harness
        .register_task("dup".into(), echo_task(vec![accuracy(), accuracy()]))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Registry(RegistryError::DuplicateMetricName { .. })
    ));
    assert_eq!(harness.registry().task_count(), 0);
}

#[test]
fn pairs_run_in_registration_order() {
    let mut harness = harness_with(vec![accuracy()]);
    harness.register_model("zulu".into(), LABELS.to_vec(), Metadata::new());
    harness
        .register_task("alpha-task".into(), echo_task(vec![accuracy()]))
        .unwrap();
    harness.run(&RunSpec::all()).unwrap();

    let order: Vec<(String, String)> = harness
        .results()
        .pairs()
        .map(|(m, t, _)| (m.to_string(), t.to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("baseline".to_string(), "parity".to_string()),
            ("baseline".to_string(), "alpha-task".to_string()),
            ("zulu".to_string(), "parity".to_string()),
            ("zulu".to_string(), "alpha-task".to_string()),
        ]
    );
}

#[test]
fn selection_runs_only_named_pairs() {
    let mut harness = harness_with(vec![accuracy()]);
    harness.register_model("rival".into(), LABELS.to_vec(), Metadata::new());
    harness
        .register_task("extra".into(), echo_task(vec![accuracy()]))
        .unwrap();

    let spec = RunSpec::all().with_models(["rival"]).with_tasks(["parity"]);
    harness.run(&spec).unwrap();

    assert_eq!(harness.results().pair_count(), 1);
    let pair = harness
        .results()
        .pair(&"rival".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.metric_samples["accuracy"], vec![1.0]);
}

#[test]
fn reregistering_a_model_keeps_prior_results() {
    let mut harness = harness_with(vec![accuracy()]);
    harness.run(&RunSpec::all()).unwrap();

    // Same id, better handle: history must survive the swap.
    harness.register_model("baseline".into(), LABELS.to_vec(), Metadata::new());
    harness.run(&RunSpec::all()).unwrap();

    let pair = harness
        .results()
        .pair(&"baseline".into(), &"parity".into())
        .unwrap();
    assert_eq!(pair.metric_samples["accuracy"], vec![0.75, 1.0]);
}
