//! CLI commands

pub mod demo;
pub mod summary;
