// crates/portal-services/src/workshop.rs
// ============================================================================
// Module: Workshop Aggregation
// Description: Derived schedule and lifecycle state for workshop aggregates.
// Purpose: Fold member claims and provisions into workshop-level answers.
// Dependencies: portal-core
// ============================================================================

//! ## Overview
//! A workshop has no runtime state of its own. Its schedule and lifecycle
//! gates derive from its provisions and member claims: the start time is the
//! earliest provision lifespan start, the auto-stop time is the earliest
//! scheduled stop across member resources, and the start/stop gates pass
//! when any member claim passes its own gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::Lifespan;
use portal_core::ResourceClaim;
use portal_core::Timestamp;
use portal_core::Workshop;
use portal_core::WorkshopProvision;

// ============================================================================
// SECTION: Schedule
// ============================================================================

/// Returns the earliest scheduled lifespan start across the provisions.
#[must_use]
pub fn earliest_provision_start(provisions: &[WorkshopProvision]) -> Option<Timestamp> {
    provisions
        .iter()
        .filter_map(|provision| provision.spec.lifespan.as_ref())
        .filter_map(|lifespan| lifespan.start)
        .min()
}

/// Returns the earliest scheduled stop across the member claims' resources.
#[must_use]
pub fn earliest_auto_stop(members: &[ResourceClaim]) -> Option<Timestamp> {
    members
        .iter()
        .filter_map(|claim| claim.status.as_ref())
        .flat_map(|status| status.resources.iter())
        .filter_map(|resource| resource.action_schedule.as_ref())
        .filter_map(|schedule| schedule.stop)
        .min()
}

/// Returns the workshop's effective lifespan window: the earliest provision
/// start paired with the workshop's own scheduled end.
#[must_use]
pub fn workshop_lifespan(workshop: &Workshop, provisions: &[WorkshopProvision]) -> Lifespan {
    Lifespan {
        start: earliest_provision_start(provisions),
        end: workshop
            .status
            .as_ref()
            .and_then(|status| status.lifespan.as_ref())
            .and_then(|lifespan| lifespan.end),
    }
}

// ============================================================================
// SECTION: Lifecycle Gates
// ============================================================================

/// Returns whether any member claim is startable.
#[must_use]
pub fn workshop_can_start(members: &[ResourceClaim]) -> bool {
    members.iter().any(ResourceClaim::can_start)
}

/// Returns whether any member claim is stoppable.
#[must_use]
pub fn workshop_can_stop(members: &[ResourceClaim]) -> bool {
    members.iter().any(ResourceClaim::can_stop)
}
