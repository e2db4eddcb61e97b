//! Keep-list cross-check
//!
//! Counts how many recorded keep entries are still in the expected set and
//! compares that with the number of entries the partition put in `keep`. This
//! catches lines lost or mangled between the in-memory partition and the
//! recorded list. It does not prove the partition itself is right: a wrong
//! entry that happens to match the expected set passes.

use crate::reconcile::local::ExpectedSet;
use tracing::{debug, warn};

/// Returns true iff exactly `keep_count` recorded entries are expected names
pub fn verify<S: AsRef<str>>(
    expected: &ExpectedSet,
    recorded_keep: &[S],
    keep_count: usize,
) -> bool {
    let confirmed = recorded_keep
        .iter()
        .filter(|name| expected.contains(name.as_ref().trim_end_matches(['\r', '\n'])))
        .count();

    if confirmed == keep_count {
        debug!("Keep list verified: {} entries", confirmed);
        true
    } else {
        warn!(
            "Keep list mismatch: {} recorded entries confirmed, {} expected",
            confirmed, keep_count
        );
        false
    }
}
