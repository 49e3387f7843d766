//! Reporting adapter for Modelbench
//!
//! Turns an accumulated result store into durable artifacts: a snapshot
//! document tagged with a report id, JSON files under the canonical output
//! directory, and a human-readable markdown summary. Everything here reads
//! the store; nothing mutates it.
//!
//! # Architecture
//!
//! - `document` - Snapshot documents tying results to a benchmark name
//! - `json` - Reading and writing documents in the output directory
//! - `summary` - Markdown summary generation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod json;
pub mod summary;

pub use document::ReportDocument;
pub use json::{
    ensure_output_dir, read_all_documents, read_document, write_document, DEFAULT_OUTPUT_DIR,
    SUMMARY_FILE,
};
pub use summary::{generate_summary, write_summary};
