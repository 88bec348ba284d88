use std::collections::HashMap;

use tracing::debug;

use crate::record::{CaseRecord, RecordKey};

/// Merges a previously stored dataset with a freshly fetched one.
///
/// Records are keyed by `RecordKey`; when both inputs carry the same
/// (province, date) observation the fresh record replaces the prior one
/// wholesale. Which duplicate wins is decided by insertion order into the
/// map (prior first, fresh second), not by hash iteration order, and the
/// output order comes solely from the final canonical sort.
///
/// Accepts empty inputs on either side and cannot fail; merging the same
/// fresh set twice is a no-op.
pub fn merge(prior: Vec<CaseRecord>, fresh: Vec<CaseRecord>) -> Vec<CaseRecord> {
    let mut by_key: HashMap<RecordKey, CaseRecord> =
        HashMap::with_capacity(prior.len() + fresh.len());
    let (prior_len, fresh_len) = (prior.len(), fresh.len());

    for record in prior {
        by_key.insert(record.key(), record);
    }
    for record in fresh {
        by_key.insert(record.key(), record);
    }

    let mut merged: Vec<CaseRecord> = by_key.into_values().collect();
    merged.sort_by(|a, b| a.canonical_cmp(b));
    debug!(
        "Merged {} prior and {} fresh records into {}",
        prior_len,
        fresh_len,
        merged.len()
    );
    merged
}
