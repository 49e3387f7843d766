//! Free-form descriptive attributes for registered models and tasks.

use indexmap::IndexMap;

/// Ordered map of descriptive attributes attached to a model or task entry.
///
/// Values are arbitrary JSON so callers can record whatever provenance they
/// care about (parameter counts, dataset revisions, hardware notes). The
/// harness never interprets the contents; it only carries them through to
/// reports. Insertion order is preserved end to end.
pub type Metadata = IndexMap<String, serde_json::Value>;
