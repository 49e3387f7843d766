//! Table formatting utilities

use anyhow::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};
use modelbench_domain::MetricName;
use modelbench_report::ReportDocument;

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a simple table with headers and rows
    pub fn simple(headers: Vec<&str>, rows: Vec<Vec<String>>) -> Result<String> {
        let mut table = Self::new();
        table.set_header(headers);

        for row in rows {
            table.add_row(row);
        }

        Ok(table.to_string())
    }

    /// Create a key-value table
    pub fn key_value(items: Vec<(&str, String)>) -> Result<String> {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![key, &value]);
        }

        Ok(table.to_string())
    }
}

/// Render a document's results, one row per model/task pair.
///
/// Metric columns are the union across pairs; pairs that never saw a metric
/// show `-`. Cells carry mean and population deviation.
pub fn results_table(document: &ReportDocument) -> Result<String> {
    let mut metric_names: Vec<&MetricName> = Vec::new();
    for (_, _, pair) in document.results.pairs() {
        for name in pair.metric_samples.keys() {
            if !metric_names.contains(&name) {
                metric_names.push(name);
            }
        }
    }

    let mut headers = vec![
        "Model".to_string(),
        "Task".to_string(),
        "Runs".to_string(),
        "Runtime (s)".to_string(),
    ];
    headers.extend(metric_names.iter().map(|name| name.to_string()));

    let mut rows = Vec::new();
    for (model, task, pair) in document.results.pairs() {
        let mut row = vec![
            model.to_string(),
            task.to_string(),
            pair.sample_count().to_string(),
            pair.runtime_stats.map_or_else(
                || "-".to_string(),
                |stats| format!("{:.6} ± {:.6}", stats.avg, stats.std),
            ),
        ];
        for name in &metric_names {
            row.push(pair.metric_stats.get(*name).map_or_else(
                || "-".to_string(),
                |stats| format!("{:.4} ± {:.4}", stats.avg, stats.std),
            ));
        }
        rows.push(row);
    }

    TableFormatter::simple(headers.iter().map(String::as_str).collect(), rows)
}
