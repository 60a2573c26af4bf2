// crates/portal-services/src/list.rs
// ============================================================================
// Module: Service List Filter
// Description: Shaping of the top-level service list.
// Purpose: Hide implementation-detail records and order by recency.
// Dependencies: portal-core, serde, crate
// ============================================================================

//! ## Overview
//! The top-level list shows independent orderable units only. Resource
//! claims that belong to a workshop are that workshop's implementation
//! detail and never appear regardless of other filters; soft-deleted records
//! and claims provisioned through the request-configmap provider (hidden
//! from non-admins) are dropped as well, and workshops that are themselves
//! owned by a claim are listed through their claim instead. Survivors order
//! by creation timestamp descending.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::ANNOTATION_DISPLAY_NAME;
use portal_core::LABEL_PROVIDER;
use portal_core::Service;
use portal_core::SessionContext;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Filter
// ============================================================================

/// Provider label value hidden from non-admin users.
const REQUEST_CONFIGMAP_PROVIDER: &str = "service-request-configmap";

/// Criteria for the top-level service list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListFilter {
    /// Case-insensitive keyword matched against name, namespace, and
    /// display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Filters and orders services for the top-level list.
#[must_use]
pub fn filter_services(
    services: Vec<Service>,
    session: &SessionContext,
    filter: &ServiceListFilter,
) -> Vec<Service> {
    let keyword = filter.keyword.as_deref().map(str::to_lowercase).filter(|kw| !kw.is_empty());
    let mut survivors: Vec<Service> = services
        .into_iter()
        .filter(|service| is_listable(service, session))
        .filter(|service| {
            keyword.as_deref().is_none_or(|keyword| matches_keyword(service, keyword))
        })
        .collect();
    survivors.sort_by(|left, right| {
        right.creation_timestamp().cmp(&left.creation_timestamp())
    });
    survivors
}

/// Returns whether the service is an independent orderable unit visible to
/// the session.
fn is_listable(service: &Service, session: &SessionContext) -> bool {
    if service.metadata().is_deleting() {
        return false;
    }
    match service {
        Service::ResourceClaim(claim) => {
            if claim.is_workshop_member() {
                return false;
            }
            session.is_admin
                || claim.metadata.label(LABEL_PROVIDER) != Some(REQUEST_CONFIGMAP_PROVIDER)
        }
        Service::Workshop(workshop) => !workshop.is_claim_owned(),
    }
}

/// Case-insensitive keyword match over identity fields.
fn matches_keyword(service: &Service, keyword: &str) -> bool {
    let metadata = service.metadata();
    if metadata.name.to_lowercase().contains(keyword)
        || metadata.namespace.to_lowercase().contains(keyword)
    {
        return true;
    }
    metadata
        .annotation(ANNOTATION_DISPLAY_NAME)
        .is_some_and(|display_name| display_name.to_lowercase().contains(keyword))
}
