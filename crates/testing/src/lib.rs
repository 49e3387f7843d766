//! Testing utilities for Modelbench
//!
//! This crate provides shared test utilities including:
//! - Deterministic fixtures over byte-vector models and tasks
//! - A builder for assembling harnesses in tests
//! - Fake metadata generation
//!
//! # Examples
//!
//! ```
//! use modelbench_testing::{builders::*, fixtures::*};
//! use modelbench_engine::RunSpec;
//!
//! let mut harness = HarnessBuilder::new()
//!     .with_model("baseline", FIXTURE_PREDICTIONS.to_vec())
//!     .with_accuracy_task("parity-check", FIXTURE_LABELS.to_vec())
//!     .build()
//!     .unwrap();
//!
//! harness.run(&RunSpec::all()).unwrap();
//! ```

pub mod builders;
pub mod fixtures;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
