//! Demo benchmark suite
//!
//! A self-contained forecasting scenario: three toy predictors are run
//! against two numeric series tasks and scored on absolute error. It
//! exercises the whole pipeline (registration, trials, aggregation,
//! reporting) without wiring in a real model.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use modelbench_domain::Metadata;
use modelbench_engine::{Harness, MetricDef, RunSpec, TaskEntry};
use modelbench_report::{self as report, ReportDocument};

use crate::output::results_table;

/// A toy forecaster over a numeric series.
#[derive(Debug, Clone, Copy)]
pub enum Predictor {
    /// Repeats the last observed value
    LastValue,
    /// Averages the whole history
    WindowMean,
    /// Extends the average step between first and last observation
    Drift,
}

impl Predictor {
    /// Forecast the next value of a series. Empty histories forecast 0.0.
    fn forecast(&self, history: &[f64]) -> f64 {
        let (first, last) = match (history.first(), history.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };

        match self {
            Predictor::LastValue => last,
            Predictor::WindowMean => history.iter().sum::<f64>() / history.len() as f64,
            Predictor::Drift => {
                if history.len() < 2 {
                    last
                } else {
                    last + (last - first) / (history.len() - 1) as f64
                }
            }
        }
    }
}

/// One forecasting case: an observed history and the value that followed it.
#[derive(Debug, Clone)]
pub struct SeriesCase {
    /// Observed values, oldest first
    pub history: Vec<f64>,
    /// The value the predictor should forecast
    pub target: f64,
}

/// Task data for the demo suite.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Forecasting cases, evaluated in order
    pub cases: Vec<SeriesCase>,
}

fn case(history: &[f64], target: f64) -> SeriesCase {
    SeriesCase {
        history: history.to_vec(),
        target,
    }
}

fn steady_dataset() -> Dataset {
    Dataset {
        cases: vec![
            case(&[5.0, 5.1, 4.9], 5.0),
            case(&[10.0, 10.0, 10.0], 10.0),
            case(&[2.0, 1.9, 2.1], 2.0),
        ],
    }
}

fn trending_dataset() -> Dataset {
    Dataset {
        cases: vec![
            case(&[1.0, 2.0, 3.0], 4.0),
            case(&[10.0, 20.0, 30.0], 40.0),
            case(&[5.0, 5.5, 6.0], 6.5),
        ],
    }
}

fn mae_metric() -> MetricDef<Dataset, Vec<f64>> {
    MetricDef::new("mae", |predictions: &Vec<f64>, data: &Dataset| {
        anyhow::ensure!(!data.cases.is_empty(), "dataset has no cases");
        anyhow::ensure!(
            predictions.len() == data.cases.len(),
            "prediction count does not match case count"
        );
        let total: f64 = predictions
            .iter()
            .zip(&data.cases)
            .map(|(p, case)| (p - case.target).abs())
            .sum();
        Ok(total / data.cases.len() as f64)
    })
}

fn hit_rate_metric() -> MetricDef<Dataset, Vec<f64>> {
    MetricDef::new("hit-rate", |predictions: &Vec<f64>, data: &Dataset| {
        anyhow::ensure!(!data.cases.is_empty(), "dataset has no cases");
        anyhow::ensure!(
            predictions.len() == data.cases.len(),
            "prediction count does not match case count"
        );
        let hits = predictions
            .iter()
            .zip(&data.cases)
            .filter(|(p, case)| (*p - case.target).abs() <= 0.5)
            .count();
        Ok(hits as f64 / data.cases.len() as f64)
    })
}

fn meta(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::from(*value)))
        .collect()
}

/// Assemble the demo harness: three predictors, two series tasks.
pub fn build_demo_harness() -> Result<Harness<Predictor, Dataset, Vec<f64>>> {
    let mut harness = Harness::new();

    harness.register_model(
        "last-value".into(),
        Predictor::LastValue,
        meta(&[("family", "naive"), ("description", "repeats the last observation")]),
    );
    harness.register_model(
        "window-mean".into(),
        Predictor::WindowMean,
        meta(&[("family", "naive"), ("description", "averages the whole history")]),
    );
    harness.register_model(
        "drift".into(),
        Predictor::Drift,
        meta(&[("family", "trend"), ("description", "extends the first-to-last slope")]),
    );

    let evaluate = |model: &Predictor, data: &Dataset| -> anyhow::Result<Vec<f64>> {
        Ok(data
            .cases
            .iter()
            .map(|case| model.forecast(&case.history))
            .collect())
    };

    harness.register_task(
        "steady-series".into(),
        TaskEntry::new(
            evaluate,
            steady_dataset(),
            vec![mae_metric(), hit_rate_metric()],
            meta(&[("regime", "flat")]),
        ),
    )?;
    harness.register_task(
        "trending-series".into(),
        TaskEntry::new(
            evaluate,
            trending_dataset(),
            vec![mae_metric(), hit_rate_metric()],
            meta(&[("regime", "linear-growth")]),
        ),
    )?;

    Ok(harness)
}

/// Run the demo suite and write its report.
pub fn run(repetitions: u32, output_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let base_path = output_dir.as_deref();

    println!("{}", "Running Demo Benchmark Suite".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    let mut harness = build_demo_harness()?;
    println!(
        "Registered {} models and {} tasks",
        harness.registry().model_count().to_string().bold(),
        harness.registry().task_count().to_string().bold()
    );
    println!(
        "Repetitions per pair: {}",
        repetitions.to_string().bold()
    );
    println!();

    harness.run(&RunSpec::all().with_repetitions(repetitions))?;

    let document = ReportDocument::new(
        "demo-suite",
        harness.model_metadata(),
        harness.results().clone(),
    );

    println!("{}", results_table(&document)?);

    report::ensure_output_dir(base_path)?;
    let document_path = report::write_document(&document, base_path)?;
    let summary_path = report::write_summary(&document, base_path)?;

    println!();
    println!("{}", "Output files:".bold());
    println!("  Report: {}", document_path.display());
    println!("  Summary: {}", summary_path.display());

    if json {
        println!();
        println!("{}", "Full Report JSON:".bold());
        println!("{}", document.to_json()?);
    }

    Ok(())
}
