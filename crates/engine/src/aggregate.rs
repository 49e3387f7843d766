//! Statistics recomputation over a result store

use modelbench_domain::{ResultStore, SampleStats};
use tracing::debug;

/// Rebuild every aggregate in the store from its current samples.
///
/// The pass is idempotent: recomputing an already-consistent store leaves it
/// bitwise unchanged. Pairs without samples get their aggregates cleared, so
/// "never ran" stays distinguishable from "ran and scored zero".
pub fn recompute(store: &mut ResultStore) {
    let mut pairs = 0usize;
    for (_, _, pair) in store.pairs_mut() {
        pairs += 1;

        pair.runtime_stats = if pair.runtime_samples.is_empty() {
            None
        } else {
            Some(SampleStats::from_samples(&pair.runtime_samples))
        };
        pair.metric_stats = pair
            .metric_samples
            .iter()
            .map(|(name, samples)| (name.clone(), SampleStats::from_samples(samples)))
            .collect();
    }
    debug!(pairs, "aggregates recomputed");
}
