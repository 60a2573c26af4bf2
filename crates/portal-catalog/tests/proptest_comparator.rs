// crates/portal-catalog/tests/proptest_comparator.rs
// ============================================================================
// Module: Comparator Property-Based Tests
// Description: Property tests for catalog ordering determinism.
// Purpose: Detect intransitivity and asymmetry across wide input ranges.
// ============================================================================

//! Property-based tests for sort comparator invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::cmp::Ordering;

use portal_catalog::CatalogEntry;
use portal_catalog::SortMode;
use portal_catalog::compare_entries;
use portal_core::ANNOTATION_DISPLAY_NAME;
use portal_core::CatalogItem;
use portal_core::LABEL_FEATURED_SCORE;
use portal_core::LABEL_STAGE;
use portal_core::ObjectMeta;
use proptest::prelude::*;

/// Builds an entry from generated identity fields.
fn entry(
    name: &str,
    namespace: &str,
    display_name: &str,
    stage: &str,
    featured: Option<u8>,
) -> CatalogEntry {
    let mut metadata = ObjectMeta {
        name: name.to_string(),
        namespace: namespace.to_string(),
        ..ObjectMeta::default()
    };
    metadata.annotations.insert(ANNOTATION_DISPLAY_NAME.to_string(), display_name.to_string());
    metadata.labels.insert(LABEL_STAGE.to_string(), stage.to_string());
    if let Some(score) = featured {
        metadata.labels.insert(LABEL_FEATURED_SCORE.to_string(), score.to_string());
    }
    CatalogEntry {
        item: CatalogItem {
            metadata,
            ..CatalogItem::default()
        },
        incident: None,
    }
}

/// Strategy over entry identity fields.
fn entry_strategy() -> impl Strategy<Value = CatalogEntry> {
    (
        "[a-d]{1,3}",
        "[a-d]{1,3}",
        "[a-d]{1,3}",
        prop_oneof![
            Just("prod".to_string()),
            Just("event".to_string()),
            Just("test".to_string()),
            Just("dev".to_string()),
            Just("weird".to_string()),
        ],
        proptest::option::of(0u8 ..= 9),
    )
        .prop_map(|(name, namespace, display_name, stage, featured)| {
            entry(&name, &namespace, &display_name, &stage, featured)
        })
}

/// Strategy over sort modes.
fn mode_strategy() -> impl Strategy<Value = SortMode> {
    prop_oneof![
        Just(SortMode::DisplayName),
        Just(SortMode::Az),
        Just(SortMode::Za),
        Just(SortMode::Featured),
        Just(SortMode::Rating),
    ]
}

proptest! {
    #[test]
    fn comparator_is_antisymmetric(
        left in entry_strategy(),
        right in entry_strategy(),
        mode in mode_strategy(),
    ) {
        let forward = compare_entries(&left, &right, mode);
        let backward = compare_entries(&right, &left, mode);
        prop_assert_eq!(forward, backward.reverse());
    }

    #[test]
    fn comparator_is_transitive(
        a in entry_strategy(),
        b in entry_strategy(),
        c in entry_strategy(),
        mode in mode_strategy(),
    ) {
        let ab = compare_entries(&a, &b, mode);
        let bc = compare_entries(&b, &c, mode);
        if ab == bc {
            prop_assert_eq!(compare_entries(&a, &c, mode), ab);
        }
    }

    #[test]
    fn default_mode_is_total_on_distinct_identity(
        left in entry_strategy(),
        right in entry_strategy(),
    ) {
        let ordering = compare_entries(&left, &right, SortMode::DisplayName);
        let same_identity = left.item.metadata.name == right.item.metadata.name
            && left.item.metadata.namespace == right.item.metadata.namespace
            && left.item.display_name() == right.item.display_name()
            && left.item.stage() == right.item.stage();
        if ordering == Ordering::Equal {
            prop_assert!(same_identity);
        }
    }
}

#[test]
fn equal_names_resolve_by_namespace_then_name() {
    let a = entry("alpha", "ns1", "Demo", "prod", None);
    let b = entry("beta", "ns1", "Demo", "prod", None);
    let c = entry("alpha", "ns2", "Demo", "prod", None);
    assert_eq!(compare_entries(&a, &b, SortMode::DisplayName), Ordering::Less);
    assert_eq!(compare_entries(&b, &c, SortMode::DisplayName), Ordering::Less);
    assert_eq!(compare_entries(&a, &c, SortMode::DisplayName), Ordering::Less);
}

#[test]
fn scored_items_rank_above_unscored_ones() {
    let scored = entry("alpha", "ns1", "Demo", "prod", Some(3));
    let unscored = entry("beta", "ns1", "Demo", "prod", None);
    assert_eq!(compare_entries(&scored, &unscored, SortMode::Featured), Ordering::Less);
    assert_eq!(compare_entries(&unscored, &scored, SortMode::Featured), Ordering::Greater);

    let higher = entry("gamma", "ns1", "Demo", "prod", Some(9));
    assert_eq!(compare_entries(&higher, &scored, SortMode::Featured), Ordering::Less);
}

#[test]
fn stage_priority_breaks_display_name_ties() {
    let prod = entry("alpha", "ns1", "Demo", "prod", None);
    let event = entry("alpha", "ns1", "Demo", "event", None);
    let dev = entry("alpha", "ns1", "Demo", "dev", None);
    assert_eq!(compare_entries(&prod, &event, SortMode::DisplayName), Ordering::Less);
    assert_eq!(compare_entries(&event, &dev, SortMode::DisplayName), Ordering::Less);
}
