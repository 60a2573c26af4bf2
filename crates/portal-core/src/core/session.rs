// crates/portal-core/src/core/session.rs
// ============================================================================
// Module: Portal Session Context
// Description: Read-only description of the current user session.
// Purpose: Carry identity, group membership, and namespace grants.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The session context is supplied by the authentication collaborator and
//! treated as read-only input by every engine. It drives access-control
//! checks, admin-only facets, and the namespace choices offered at ordering
//! time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Session Context
// ============================================================================

/// Current user session, as reported by the authentication collaborator.
///
/// # Invariants
/// - Read-only input; the engines never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// User email, used as requester identity on audit writes.
    pub email: String,
    /// Group memberships used by access-control rules.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Grants admin-only facets and bulk views.
    #[serde(default)]
    pub is_admin: bool,
    /// Namespaces the user may order into.
    #[serde(default)]
    pub service_namespaces: Vec<ServiceNamespace>,
    /// Catalog item names the user has bookmarked.
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// One namespace the user may order into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceNamespace {
    /// Namespace name.
    pub name: String,
    /// Human-facing display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
