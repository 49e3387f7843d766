//! Execution engine for Modelbench
//!
//! This crate owns the runnable half of the system: the registry that binds
//! model handles and task definitions together, the harness that drives
//! repeated trials over them, and the aggregation pass that keeps summary
//! statistics in step with the recorded samples.
//!
//! # Architecture
//!
//! - `registry` - Model and task registration, metric definitions
//! - `harness` - Trial execution over model/task combinations
//! - `aggregate` - Statistics recomputation over a result store
//! - `error` - Error types for registration and runs
//!
//! # Usage
//!
//! ```
//! use modelbench_domain::Metadata;
//! use modelbench_engine::{Harness, MetricDef, RunSpec, TaskEntry};
//!
//! # fn main() -> modelbench_engine::EngineResult<()> {
//! let mut harness: Harness<i64, Vec<i64>, i64> = Harness::new();
//!
//! harness.register_model("doubler".into(), 2, Metadata::new());
//! harness.register_task(
//!     "sum".into(),
//!     TaskEntry::new(
//!         |factor: &i64, data: &Vec<i64>| Ok(data.iter().sum::<i64>() * factor),
//!         vec![1, 2, 3],
//!         vec![MetricDef::new("total", |total: &i64, _: &Vec<i64>| {
//!             Ok(*total as f64)
//!         })],
//!         Metadata::new(),
//!     ),
//! )?;
//!
//! let results = harness.run(&RunSpec::all().with_repetitions(3))?;
//! assert_eq!(results.pair_count(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod error;
pub mod harness;
pub mod registry;

pub use aggregate::recompute;
pub use error::{EngineError, EngineResult, RegistryError, RunError};
pub use harness::{Harness, RunSpec};
pub use registry::{EvalFn, MetricDef, ModelEntry, Registry, ScoreFn, TaskEntry};
