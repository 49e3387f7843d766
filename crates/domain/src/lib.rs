//! Modelbench Domain Types
//!
//! This crate provides the core domain model for the modelbench harness.
//! It defines the identifiers, measurement samples, and accumulated result
//! structures shared by the execution engine and the reporting adapters.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed keys for models, tasks, and metrics
//! - **metadata**: Free-form descriptive attributes attached to entries
//! - **sample**: The single-trial measurement record
//! - **result**: Accumulated samples, aggregate statistics, and the result store
//! - **validation**: Structural consistency checks over accumulated results
//!
//! ## Usage
//!
//! ```rust
//! use modelbench_domain::identifiers::{ModelId, TaskId};
//! use modelbench_domain::result::ResultStore;
//!
//! let model = ModelId::from("resnet-small");
//! let task = TaskId::from("image-labels");
//!
//! let mut store = ResultStore::new();
//! store.ensure_model(&model);
//! assert!(store.pair(&model, &task).is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod identifiers;
pub mod metadata;
pub mod result;
pub mod sample;
pub mod validation;

// Re-export commonly used types
pub use identifiers::{MetricName, ModelId, ReportId, TaskId};
pub use metadata::Metadata;
pub use result::{PairResult, ResultStore, SampleStats};
pub use sample::TrialSample;
pub use validation::{IssueSeverity, ValidationIssue, ValidationResult};
