// crates/portal-services/tests/cache.rs
// ============================================================================
// Module: Cache Reconciliation Tests
// ============================================================================
//! ## Overview
//! Checks uid-keyed replacement and splicing, and that stale deltas whose
//! uid is no longer cached reconcile as no-ops.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use portal_core::ObjectMeta;
use portal_core::ResourceClaim;
use portal_core::Service;
use portal_services::CacheDelta;
use portal_services::reconcile_cache;

/// Claim-backed service with the given identity.
fn service(name: &str, uid: &str) -> Service {
    Service::ResourceClaim(ResourceClaim {
        metadata: ObjectMeta {
            name: name.to_string(),
            namespace: "user-sandbox".to_string(),
            uid: uid.to_string(),
            ..ObjectMeta::default()
        },
        status: None,
    })
}

#[test]
fn update_replaces_by_uid_preserving_order() {
    let mut cached = vec![service("a", "uid-a"), service("b", "uid-b"), service("c", "uid-c")];

    reconcile_cache(
        &mut cached,
        &[CacheDelta::Update(Box::new(service("b-renamed", "uid-b")))],
    );

    let names: Vec<&str> =
        cached.iter().map(|service| service.metadata().name.as_str()).collect();
    assert_eq!(names, vec!["a", "b-renamed", "c"]);
}

#[test]
fn delete_splices_by_uid() {
    let mut cached = vec![service("a", "uid-a"), service("b", "uid-b")];

    reconcile_cache(
        &mut cached,
        &[CacheDelta::Delete {
            uid: "uid-a".to_string(),
        }],
    );

    assert_eq!(cached, vec![service("b", "uid-b")]);
}

#[test]
fn deltas_for_uncached_uids_are_no_ops() {
    let mut cached = vec![service("a", "uid-a")];

    reconcile_cache(
        &mut cached,
        &[
            CacheDelta::Update(Box::new(service("ghost", "uid-ghost"))),
            CacheDelta::Delete {
                uid: "uid-phantom".to_string(),
            },
        ],
    );

    assert_eq!(cached, vec![service("a", "uid-a")]);
}
