//! Report summary display

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use modelbench_report as report;

use crate::output::{results_table, TableFormatter};

/// Show the most recent report in the output directory.
pub fn show(output_dir: Option<PathBuf>) -> Result<()> {
    let base_path = output_dir.as_deref();

    let documents = report::read_all_documents(base_path)?;

    if documents.is_empty() {
        println!("{}", "No reports found.".yellow());
        println!("Run 'modelbench demo' to produce one.");
        return Ok(());
    }

    let latest = &documents[0];

    println!("{}", "Latest Benchmark Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    let info = TableFormatter::key_value(vec![
        ("Benchmark", latest.benchmark.clone()),
        ("Report", latest.report_id.to_string()),
        ("Created", latest.created_at.to_rfc3339()),
        ("Models", latest.models.len().to_string()),
        ("Pairs", latest.results.pair_count().to_string()),
    ])?;
    println!("{info}");
    println!();
    println!("{}", results_table(latest)?);

    if documents.len() > 1 {
        println!();
        println!(
            "{} earlier report(s) in the same directory.",
            (documents.len() - 1).to_string().dimmed()
        );
    }

    Ok(())
}
