//! Property tests for the reconcile module

use super::*;
use crate::parse_wabbajack::ArchiveManifest;
use proptest::prelude::*;
use std::collections::HashSet;

fn file_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-e]{1,2}\\.(zip|7z)", 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: keep and delete together hold exactly the local names and never overlap.
    #[test]
    fn property_partition_is_complete_and_disjoint(
        expected in file_names(),
        local in file_names(),
    ) {
        let expected_set = ExpectedSet::new(expected.iter().cloned());
        let result = partition(&expected_set, &local);

        prop_assert_eq!(result.total(), local.len());

        let keep: HashSet<&String> = result.keep.iter().collect();
        let delete: HashSet<&String> = result.delete.iter().collect();
        prop_assert!(keep.is_disjoint(&delete));

        let mut rejoined: Vec<String> =
            result.keep.iter().chain(result.delete.iter()).cloned().collect();
        let mut original = local.clone();
        rejoined.sort();
        original.sort();
        prop_assert_eq!(rejoined, original);
    }

    /// PROPERTY: delete holds exactly the local names missing from expected, in local order.
    #[test]
    fn property_delete_is_ordered_difference(expected in file_names(), local in file_names()) {
        let expected_set = ExpectedSet::new(expected.iter().cloned());
        let result = partition(&expected_set, &local);

        let difference: Vec<String> = local
            .iter()
            .filter(|name| !expected.contains(*name))
            .cloned()
            .collect();
        prop_assert_eq!(result.delete, difference);
    }

    /// PROPERTY: the in-memory cross-check always passes on an untouched partition.
    #[test]
    fn property_verify_passes_on_fresh_partition(expected in file_names(), local in file_names()) {
        let expected_set = ExpectedSet::new(expected.iter().cloned());
        let result = partition(&expected_set, &local);
        prop_assert!(result.verify(&expected_set));
    }

    /// PROPERTY: dropping any recorded keep line makes the cross-check fail.
    #[test]
    fn property_verify_detects_dropped_line(
        expected in file_names(),
        local in file_names(),
        drop_index in any::<prop::sample::Index>(),
    ) {
        let expected_set = ExpectedSet::new(expected.iter().cloned());
        let result = partition(&expected_set, &local);
        prop_assume!(!result.keep.is_empty());

        let mut recorded = result.keep.clone();
        recorded.remove(drop_index.index(recorded.len()));
        prop_assert!(!verify(&expected_set, &recorded, result.keep.len()));
    }

    /// PROPERTY: reconciling the same inputs twice yields identical partitions.
    #[test]
    fn property_reconcile_is_idempotent(expected in file_names(), local in file_names()) {
        let expected_set = ExpectedSet::new(expected.iter().cloned());
        let local_set = LocalFileSet::new(local.iter().cloned());

        prop_assert_eq!(reconcile(&expected_set, &local_set), reconcile(&expected_set, &local_set));
    }

    /// PROPERTY: a merged manifest holds every name of both inputs with no name added twice
    /// beyond the first manifest's own duplicates.
    #[test]
    fn property_union_covers_both_without_new_duplicates(
        first in file_names(),
        second in file_names(),
    ) {
        let merged = ArchiveManifest::from_names(first.clone())
            .union(&ArchiveManifest::from_names(second.clone()));

        prop_assert_eq!(&merged.names[..first.len()], &first[..]);

        let merged_set: HashSet<&String> = merged.names.iter().collect();
        for name in first.iter().chain(second.iter()) {
            prop_assert!(merged_set.contains(name));
        }

        let first_set: HashSet<&String> = first.iter().collect();
        let appended = &merged.names[first.len()..];
        let appended_set: HashSet<&String> = appended.iter().collect();
        prop_assert_eq!(appended_set.len(), appended.len());
        prop_assert!(appended.iter().all(|name| !first_set.contains(name)));
    }
}

#[test]
fn test_merged_expected_set_scenario() {
    let merged = ArchiveManifest::from_names(["a.zip", "b.zip"])
        .union(&ArchiveManifest::from_names(["b.zip", "c.zip"]));
    let expected = ExpectedSet::from(&merged);
    let local = LocalFileSet::new(["c.zip", "d.zip", "a.zip"]);

    let result = reconcile(&expected, &local);
    assert_eq!(result.keep, vec!["a.zip", "c.zip"]);
    assert_eq!(result.delete, vec!["d.zip"]);
    assert!(result.verify(&expected));
}
