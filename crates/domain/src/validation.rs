//! Structural consistency checks over accumulated results.
//!
//! Validation never mutates the store and never blocks the harness; it
//! reports shape violations (errors) and suspicious-but-legal states
//! (warnings) so callers can decide what to do with a store that has been
//! through aborted runs or hand assembly.

use serde::{Deserialize, Serialize};

use crate::result::{ResultStore, SampleStats};

/// Result of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Shape violations; the store should not be reported as-is
    pub errors: Vec<ValidationIssue>,

    /// Suspicious states that do not invalidate the store
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create an empty (passing) result.
    pub fn success() -> Self {
        Self::default()
    }

    /// Record an error-level issue.
    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(
            path,
            message,
            IssueSeverity::Error,
        ));
    }

    /// Record a warning-level issue.
    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(
            path,
            message,
            IssueSeverity::Warning,
        ));
    }

    /// Whether the pass found no errors (warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Location of the finding, e.g. `"baseline/parity-check/accuracy"`
    pub path: String,

    /// Human-readable description of the finding
    pub message: String,

    /// Severity of the finding
    pub severity: IssueSeverity,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>, severity: IssueSeverity) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Shape violation
    Error,
    /// Suspicious but legal
    Warning,
}

fn bitwise_eq(a: SampleStats, b: SampleStats) -> bool {
    a.avg.to_bits() == b.avg.to_bits() && a.std.to_bits() == b.std.to_bits()
}

impl ResultStore {
    /// Check the structural consistency of every pair entry.
    ///
    /// Errors:
    /// - a metric sequence whose length differs from the runtime sequence
    /// - `repetitions == 0` on a pair with recorded samples
    /// - `repetitions` exceeding the recorded sample count (the signature of
    ///   a run that aborted partway through a pair)
    /// - aggregates that do not match a recomputation over the current
    ///   samples
    ///
    /// Warnings:
    /// - samples present but not yet aggregated
    /// - non-finite sample values, which poison means and deviations
    pub fn validate(&self) -> ValidationResult {
        let mut report = ValidationResult::success();

        for (model, task, pair) in self.pairs() {
            let path = format!("{model}/{task}");
            let runs = pair.runtime_samples.len();

            if runs > 0 && pair.repetitions == 0 {
                report.add_error(&path, "repetitions is zero on a pair with recorded samples");
            }
            if pair.repetitions as usize > runs {
                report.add_error(
                    &path,
                    format!(
                        "repetitions {} exceeds recorded sample count {}",
                        pair.repetitions, runs
                    ),
                );
            }

            if pair.runtime_samples.iter().any(|v| !v.is_finite()) {
                report.add_warning(format!("{path}/runtime"), "non-finite sample value");
            }
            match pair.runtime_stats {
                Some(stats) => {
                    let fresh = SampleStats::from_samples(&pair.runtime_samples);
                    if !bitwise_eq(stats, fresh) {
                        report.add_error(
                            format!("{path}/runtime"),
                            "aggregates do not match a recomputation over the current samples",
                        );
                    }
                }
                None if runs > 0 => {
                    report.add_warning(
                        format!("{path}/runtime"),
                        "samples present but aggregates not yet computed",
                    );
                }
                None => {}
            }

            for (metric, samples) in &pair.metric_samples {
                let metric_path = format!("{path}/{metric}");

                if samples.len() != runs {
                    report.add_error(
                        &metric_path,
                        format!(
                            "{} metric samples recorded against {} runtime samples",
                            samples.len(),
                            runs
                        ),
                    );
                }
                if samples.iter().any(|v| !v.is_finite()) {
                    report.add_warning(&metric_path, "non-finite sample value");
                }

                match pair.metric_stats.get(metric) {
                    Some(&stats) => {
                        let fresh = SampleStats::from_samples(samples);
                        if !bitwise_eq(stats, fresh) {
                            report.add_error(
                                &metric_path,
                                "aggregates do not match a recomputation over the current samples",
                            );
                        }
                    }
                    None => {
                        report.add_warning(
                            &metric_path,
                            "samples present but aggregates not yet computed",
                        );
                    }
                }
            }
        }

        report
    }
}
