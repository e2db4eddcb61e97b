//! Splitting local names into the ones to keep and the ones to delete

use crate::reconcile::local::{ExpectedSet, LocalFileSet};
use crate::reconcile::verify;

/// Local names split by membership in the expected set
///
/// `keep` and `delete` are disjoint and together hold every local name, each
/// in the order the local names were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Local names referenced by the modlist
    pub keep: Vec<String>,
    /// Local names the modlist does not reference
    pub delete: Vec<String>,
}

impl Reconciliation {
    /// Whether there is anything to delete
    pub fn is_in_sync(&self) -> bool {
        self.delete.is_empty()
    }

    /// Total number of local names covered
    pub fn total(&self) -> usize {
        self.keep.len() + self.delete.len()
    }

    /// Run the keep-list cross-check against the in-memory partition
    pub fn verify(&self, expected: &ExpectedSet) -> bool {
        verify::verify(expected, &self.keep, self.keep.len())
    }
}

/// Partition `local` names, keeping their order
pub fn partition<S: AsRef<str>>(expected: &ExpectedSet, local: &[S]) -> Reconciliation {
    let mut result = Reconciliation::default();

    for name in local {
        let name = name.as_ref();
        if expected.contains(name) {
            result.keep.push(name.to_string());
        } else {
            result.delete.push(name.to_string());
        }
    }

    result
}

/// Partition a scanned directory listing
pub fn reconcile(expected: &ExpectedSet, local: &LocalFileSet) -> Reconciliation {
    partition(expected, local.names())
}
