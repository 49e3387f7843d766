//! Reading and writing report documents.
//!
//! Documents live as individual JSON files in the canonical output
//! directory, one file per snapshot, named so a directory listing reads
//! chronologically.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::ReportDocument;

/// Default output directory for report documents.
pub const DEFAULT_OUTPUT_DIR: &str = "benchmarks/output";

/// Default summary file name.
pub const SUMMARY_FILE: &str = "benchmarks/output/summary.md";

/// Reduce a benchmark name to a filename-safe slug.
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Writes a report document to the output directory.
///
/// # Arguments
///
/// * `document` - The document to write
/// * `base_path` - Optional base path (defaults to current directory)
///
/// # Returns
///
/// The path to the written file on success.
pub fn write_document(document: &ReportDocument, base_path: Option<&Path>) -> Result<PathBuf> {
    let base = base_path.unwrap_or(Path::new("."));
    let output_dir = base.join(DEFAULT_OUTPUT_DIR);

    // Ensure the directory exists
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    // Benchmark slug and timestamp keep listings readable; the report id
    // keeps names unique within a second.
    let timestamp = document.created_at.format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}_{}_{}.json",
        slug(&document.benchmark),
        timestamp,
        document.report_id.as_uuid().simple()
    );
    let file_path = output_dir.join(&filename);

    let file = File::create(&file_path)
        .with_context(|| format!("Failed to create file: {}", file_path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| "Failed to serialize report document")?;

    writer.flush()?;

    Ok(file_path)
}

/// Reads a report document from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Returns
///
/// The deserialized `ReportDocument`.
pub fn read_document(path: &Path) -> Result<ReportDocument> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse report document from: {}", path.display()))
}

/// Reads all report documents from the output directory.
///
/// Files that are not JSON, or JSON that does not parse as a document, are
/// skipped with a warning rather than failing the whole listing.
///
/// # Arguments
///
/// * `base_path` - Optional base path (defaults to current directory)
///
/// # Returns
///
/// All documents found, newest first.
pub fn read_all_documents(base_path: Option<&Path>) -> Result<Vec<ReportDocument>> {
    let base = base_path.unwrap_or(Path::new("."));
    let output_dir = base.join(DEFAULT_OUTPUT_DIR);

    if !output_dir.exists() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();

    for entry in fs::read_dir(&output_dir)
        .with_context(|| format!("Failed to read directory: {}", output_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.extension().map_or(false, |ext| ext == "json") {
            match read_document(&path) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                }
            }
        }
    }

    // Sort by creation time, newest first
    documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(documents)
}

/// Ensures the canonical output directory exists.
///
/// # Arguments
///
/// * `base_path` - Optional base path (defaults to current directory)
///
/// # Returns
///
/// `Ok(())` if the directory was created or already exists.
pub fn ensure_output_dir(base_path: Option<&Path>) -> Result<()> {
    let base = base_path.unwrap_or(Path::new("."));
    let output_dir = base.join(DEFAULT_OUTPUT_DIR);

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    Ok(())
}
