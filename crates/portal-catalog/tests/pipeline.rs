// crates/portal-catalog/tests/pipeline.rs
// ============================================================================
// Module: Catalog Pipeline Tests
// Description: Tests for the fixed-order filter, rank, and partition flow.
// ============================================================================
//! ## Overview
//! Validates access filtering ahead of every facet, enrichment, the
//! search/sort split, and the operational-before-disabled partition.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use portal_catalog::ActiveIncident;
use portal_catalog::CatalogEntry;
use portal_catalog::CatalogFilter;
use portal_catalog::enrich_catalog_items;
use portal_catalog::filter_catalog;
use portal_catalog::strip_tags;
use portal_core::ANNOTATION_OPS;
use portal_core::AccessControl;
use portal_core::CatalogItem;
use portal_core::CatalogItemSpec;
use portal_core::LABEL_ASSET_UUID;
use portal_core::LABEL_CATEGORY;
use portal_core::LABEL_STAGE;
use portal_core::ObjectMeta;
use portal_core::SessionContext;
use portal_core::Stage;

/// Builds an item in a namespace with a category and optional allow groups.
fn item(name: &str, namespace: &str, category: &str, allow_groups: &[&str]) -> CatalogItem {
    let mut metadata = ObjectMeta {
        name: name.to_string(),
        namespace: namespace.to_string(),
        ..ObjectMeta::default()
    };
    metadata.labels.insert(LABEL_CATEGORY.to_string(), category.to_string());
    let access_control = (!allow_groups.is_empty()).then(|| AccessControl {
        allow_groups: allow_groups.iter().map(ToString::to_string).collect(),
        deny_groups: Vec::new(),
    });
    CatalogItem {
        metadata,
        spec: CatalogItemSpec {
            access_control,
            ..CatalogItemSpec::default()
        },
    }
}

/// Wraps items as entries without incidents.
fn entries(items: Vec<CatalogItem>) -> Vec<CatalogEntry> {
    enrich_catalog_items(items, &[])
}

/// Session in the `ns1-users` group.
fn session() -> SessionContext {
    SessionContext {
        email: "user@example.com".to_string(),
        groups: vec!["ns1-users".to_string()],
        ..SessionContext::default()
    }
}

#[test]
fn access_denied_items_never_appear() {
    let items = vec![
        item("pg", "ns1", "databases", &["ns1-users"]),
        item("mysql", "ns1", "databases", &["ns1-users"]),
        item("vault", "ns2", "databases", &["ns2-users"]),
    ];
    let unfiltered = filter_catalog(entries(items.clone()), &session(), &CatalogFilter::default());
    assert_eq!(unfiltered.len(), 2);
    assert!(unfiltered.iter().all(|entry| entry.item.metadata.namespace == "ns1"));

    let filtered = filter_catalog(entries(items), &session(), &CatalogFilter {
        category: Some("databases".to_string()),
        ..CatalogFilter::default()
    });
    let names: Vec<&str> =
        filtered.iter().map(|entry| entry.item.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["mysql", "pg"]);
}

#[test]
fn category_filter_drops_other_categories() {
    let items = vec![
        item("pg", "ns1", "databases", &[]),
        item("router", "ns1", "networking", &[]),
    ];
    let filtered = filter_catalog(entries(items), &session(), &CatalogFilter {
        category: Some("databases".to_string()),
        ..CatalogFilter::default()
    });
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].item.metadata.name, "pg");
}

#[test]
fn admin_status_facet_applies_only_to_admins() {
    let mut degraded = item("pg", "ns1", "databases", &[]);
    degraded.metadata.annotations.insert(
        ANNOTATION_OPS.to_string(),
        r#"{"status":{"id":"degraded-performance"}}"#.to_string(),
    );
    let items = vec![degraded, item("mysql", "ns1", "databases", &[])];
    let filter = CatalogFilter {
        admin_statuses: vec!["degraded-performance".to_string()],
        ..CatalogFilter::default()
    };

    let as_user = filter_catalog(entries(items.clone()), &session(), &filter);
    assert_eq!(as_user.len(), 2);

    let admin = SessionContext {
        is_admin: true,
        ..session()
    };
    let as_admin = filter_catalog(entries(items), &admin, &filter);
    assert_eq!(as_admin.len(), 1);
    assert_eq!(as_admin[0].item.metadata.name, "pg");
}

#[test]
fn disabled_entries_sort_after_operational_ones() {
    let mut outage = item("aurora", "ns1", "databases", &[]);
    outage
        .metadata
        .annotations
        .insert(ANNOTATION_OPS.to_string(), r#"{"status":{"id":"major-outage"}}"#.to_string());
    let items = vec![outage, item("zebra", "ns1", "databases", &[])];
    let ordered = filter_catalog(entries(items), &session(), &CatalogFilter::default());
    let names: Vec<&str> = ordered.iter().map(|entry| entry.item.metadata.name.as_str()).collect();
    // `aurora` sorts first alphabetically but is pushed behind by the outage.
    assert_eq!(names, vec!["zebra", "aurora"]);
}

#[test]
fn incident_attaches_by_asset_uuid_and_stage() {
    let mut flagged = item("pg", "ns1", "databases", &[]);
    flagged.metadata.labels.insert(LABEL_ASSET_UUID.to_string(), "uuid-1".to_string());
    flagged.metadata.labels.insert(LABEL_STAGE.to_string(), "prod".to_string());
    let incidents = vec![
        ActiveIncident {
            asset_uuid: "uuid-1".to_string(),
            stage: Stage::Dev,
            status: "major-outage".to_string(),
            disabled: true,
            message: None,
        },
        ActiveIncident {
            asset_uuid: "uuid-1".to_string(),
            stage: Stage::Prod,
            status: "degraded-performance".to_string(),
            disabled: false,
            message: Some("slow provisioning".to_string()),
        },
    ];
    let enriched = enrich_catalog_items(vec![flagged], &incidents);
    let incident = enriched[0].incident.as_ref().unwrap();
    assert_eq!(incident.status, "degraded-performance");
    assert!(!enriched[0].is_disabled());
}

#[test]
fn search_ranking_replaces_comparator_order() {
    let mut kafka = item("kafka", "ns1", "streaming", &[]);
    kafka.metadata.annotations.insert(
        portal_core::ANNOTATION_DISPLAY_NAME.to_string(),
        "Kafka Streams".to_string(),
    );
    let items = vec![item("aaa", "ns1", "streaming", &[]), kafka];
    let filtered = filter_catalog(entries(items), &session(), &CatalogFilter {
        search: Some("kafka".to_string()),
        ..CatalogFilter::default()
    });
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].item.metadata.name, "kafka");
}

#[test]
fn strip_tags_flattens_markup() {
    let html = "<p>A <b>managed</b> cluster&nbsp;&amp; tools</p>";
    assert_eq!(strip_tags(html), "A managed cluster & tools");
}
