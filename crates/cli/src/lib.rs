//! Modelbench CLI Library
//!
//! This library provides the core functionality for the `modelbench`
//! command-line interface: the demo benchmark suite, report inspection and
//! output formatting.

pub mod commands;
pub mod output;

pub use output::TableFormatter;

/// Re-export common types
pub use anyhow::{Context, Result};
