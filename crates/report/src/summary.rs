//! Markdown summary generation.
//!
//! The summary is a point-in-time rendering of one document, written next to
//! the raw JSON so results stay legible without tooling. Columns are the
//! union of metric names across pairs, so tasks with different metrics share
//! one table; a pair that never saw a metric gets `-`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use modelbench_domain::{MetricName, TaskId};

use crate::document::ReportDocument;
use crate::json::SUMMARY_FILE;

/// Render a document as a markdown summary.
pub fn generate_summary(document: &ReportDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Benchmark Summary: {}\n\n", document.benchmark));
    out.push_str(&format!("Report: {}\n", document.report_id));
    out.push_str(&format!(
        "Generated: {}\n\n",
        document.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if document.results.pair_count() == 0 {
        out.push_str("## Results\n\nNo results recorded.\n");
        return out;
    }

    let metric_names: IndexSet<&MetricName> = document
        .results
        .pairs()
        .flat_map(|(_, _, pair)| pair.metric_samples.keys())
        .collect();

    out.push_str("## Results\n\n");
    out.push_str("| Model | Task | Runs | Avg Runtime (s) |");
    for name in &metric_names {
        out.push_str(&format!(" {name} |"));
    }
    out.push_str("\n|---|---|---|---|");
    for _ in &metric_names {
        out.push_str("---|");
    }
    out.push('\n');

    for (model, task, pair) in document.results.pairs() {
        let runtime = pair
            .runtime_stats
            .map_or_else(|| "-".to_string(), |stats| format!("{:.6}", stats.avg));
        out.push_str(&format!(
            "| {} | {} | {} | {} |",
            model,
            task,
            pair.sample_count(),
            runtime
        ));
        for name in &metric_names {
            let cell = pair
                .metric_stats
                .get(*name)
                .map_or_else(|| "-".to_string(), |stats| format!("{:.4}", stats.avg));
            out.push_str(&format!(" {cell} |"));
        }
        out.push('\n');
    }

    let task_ids: IndexSet<&TaskId> = document
        .results
        .pairs()
        .map(|(_, task, _)| task)
        .collect();

    out.push_str("\n## Comparison\n\n");
    out.push_str("Cells are the mean of each task's first declared metric.\n\n");
    out.push_str("| Model |");
    for task in &task_ids {
        out.push_str(&format!(" {task} |"));
    }
    out.push_str("\n|---|");
    for _ in &task_ids {
        out.push_str("---|");
    }
    out.push('\n');

    for (model, tasks) in document.results.iter() {
        out.push_str(&format!("| {model} |"));
        for task in &task_ids {
            let cell = tasks
                .get(*task)
                .and_then(|pair| pair.metric_stats.first())
                .map_or_else(|| "-".to_string(), |(_, stats)| format!("{:.4}", stats.avg));
            out.push_str(&format!(" {cell} |"));
        }
        out.push('\n');
    }

    out
}

/// Writes the markdown summary to the canonical location.
///
/// # Arguments
///
/// * `document` - The document to summarize
/// * `base_path` - Optional base path (defaults to current directory)
///
/// # Returns
///
/// The path to the written file on success.
pub fn write_summary(document: &ReportDocument, base_path: Option<&Path>) -> Result<PathBuf> {
    let base = base_path.unwrap_or(Path::new("."));
    let summary_path = base.join(SUMMARY_FILE);

    if let Some(parent) = summary_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&summary_path, generate_summary(document))
        .with_context(|| format!("Failed to write summary: {}", summary_path.display()))?;

    Ok(summary_path)
}
