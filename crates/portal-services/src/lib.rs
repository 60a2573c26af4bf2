// crates/portal-services/src/lib.rs
// ============================================================================
// Module: Portal Services
// Description: Service list shaping and the bulk action orchestrator.
// Purpose: Drive lifecycle actions across heterogeneous service selections.
// Dependencies: portal-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Portal Services owns the top-level service list and the bulk action flow:
//! the list filter drops records that are implementation details (workshop
//! member claims, soft-deleted records, request-configmap claims for
//! non-admins) and orders by creation time descending; the orchestrator
//! dispatches one action across a mixed selection of resource claims and
//! workshops with per-kind routing, collects per-entity failures without
//! blocking siblings, and emits uid-keyed cache deltas the caller applies to
//! its local list.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod actions;
pub mod cache;
pub mod list;
pub mod workshop;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use actions::BulkAction;
pub use actions::BulkFailure;
pub use actions::BulkFailureKind;
pub use actions::BulkOutcome;
pub use actions::apply_bulk_action;
pub use cache::CacheDelta;
pub use cache::reconcile_cache;
pub use list::ServiceListFilter;
pub use list::filter_services;
pub use workshop::earliest_auto_stop;
pub use workshop::earliest_provision_start;
pub use workshop::workshop_can_start;
pub use workshop::workshop_can_stop;
pub use workshop::workshop_lifespan;
