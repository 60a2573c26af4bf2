// crates/portal-core/src/core/service.rs
// ============================================================================
// Module: Portal Service Records
// Description: Resource claims, workshops, and the tagged service union.
// Purpose: Model provisioned orders and their lifecycle-relevant state.
// Dependencies: serde, serde_json, crate::core::metadata, crate::core::time
// ============================================================================

//! ## Overview
//! A provisioned order is either a resource claim (one service instance) or a
//! workshop (a multi-attendee aggregate whose member claims are related by a
//! label back-reference, not ownership). The two kinds share the metadata
//! envelope but differ in status shape, so generic handling goes through the
//! [`Service`] tagged union and matches on the kind discriminant.
//!
//! A claim carrying the workshop label is an implementation detail of that
//! workshop: it never appears in the top-level service list and individual
//! start/stop actions skip it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::metadata::LABEL_WORKSHOP;
use crate::core::metadata::ObjectMeta;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Resource Claim
// ============================================================================

/// One provisioned service instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceClaim {
    /// Identity, labels, and annotations.
    pub metadata: ObjectMeta,
    /// Provisioning status; absent until the backend has acted on the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceClaimStatus>,
}

impl ResourceClaim {
    /// Returns the owning workshop's name when this claim is a workshop member.
    #[must_use]
    pub fn workshop_name(&self) -> Option<&str> {
        self.metadata.label(LABEL_WORKSHOP)
    }

    /// Returns whether this claim belongs to a workshop.
    #[must_use]
    pub fn is_workshop_member(&self) -> bool {
        self.workshop_name().is_some()
    }

    /// Returns whether the claim is pool-backed and uses the lightweight
    /// schedule endpoints instead of per-resource mutation.
    #[must_use]
    pub fn is_pool_backed(&self) -> bool {
        self.status.as_ref().is_some_and(|status| status.summary.is_some())
    }

    /// Returns whether every provisioned resource is stopped and startable.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.current_states(|state| state == "stopped")
    }

    /// Returns whether every provisioned resource is running and stoppable.
    #[must_use]
    pub fn can_stop(&self) -> bool {
        self.current_states(|state| state == "started" || state == "running")
    }

    /// Returns the claim's lifespan window, when reported.
    #[must_use]
    pub fn lifespan(&self) -> Option<&Lifespan> {
        self.status.as_ref().and_then(|status| status.lifespan.as_ref())
    }

    /// Tests a predicate against every resource's current state. Pool-backed
    /// claims report one aggregate state through the summary instead.
    fn current_states(&self, predicate: impl Fn(&str) -> bool) -> bool {
        let Some(status) = &self.status else {
            return false;
        };
        if let Some(summary) = &status.summary {
            return summary.runtime_status.as_deref().is_some_and(&predicate);
        }
        !status.resources.is_empty()
            && status
                .resources
                .iter()
                .all(|resource| resource.current_state.as_deref().is_some_and(&predicate))
    }
}

/// Status block of a resource claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceClaimStatus {
    /// Per-resource provisioning entries for directly-managed claims.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceStatusEntry>,
    /// Aggregate summary reported for pool-backed claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ResourceSummary>,
    /// Scheduled lifespan window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<Lifespan>,
}

/// One provisioned resource inside a claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatusEntry {
    /// Resource name within the claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current runtime state (`started`, `stopped`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    /// Next scheduled action, when one is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_schedule: Option<ActionSchedule>,
    /// Backend-specific provisioning variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Value>,
}

/// Aggregate status for pool-backed claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    /// Aggregate runtime state across the pooled resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_status: Option<String>,
}

/// Pending scheduled action on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSchedule {
    /// Time at which the resource stops automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Timestamp>,
    /// Time at which the resource starts automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
}

/// Scheduled lifespan window on a claim or workshop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifespan {
    /// Scheduled start of life.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    /// Scheduled end of life.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

// ============================================================================
// SECTION: Workshop
// ============================================================================

/// Multi-attendee aggregate of resource claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    /// Identity, labels, and annotations.
    pub metadata: ObjectMeta,
    /// Workshop configuration.
    #[serde(default)]
    pub spec: WorkshopSpec,
    /// Workshop status; absent until reconciled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkshopStatus>,
}

impl Workshop {
    /// Returns whether this workshop is itself owned by a resource claim and
    /// must not be listed as an independent service.
    #[must_use]
    pub fn is_claim_owned(&self) -> bool {
        self.metadata.label(LABEL_WORKSHOP).is_some()
    }
}

/// Workshop configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopSpec {
    /// Display name shown to attendees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Attendee access password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
    /// Whether attendees may self-register.
    #[serde(default)]
    pub open_registration: bool,
    /// Attendee-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Workshop status block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopStatus {
    /// Scheduled lifespan window for the aggregate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<Lifespan>,
}

/// Provisioning order attached to a workshop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkshopProvision {
    /// Identity, labels, and annotations.
    pub metadata: ObjectMeta,
    /// Provisioning configuration.
    #[serde(default)]
    pub spec: WorkshopProvisionSpec,
}

/// Configuration of a workshop provision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopProvisionSpec {
    /// Name of the owning workshop.
    pub workshop_name: String,
    /// Catalog item being provisioned for attendees.
    pub catalog_item_name: String,
    /// Namespace of the catalog item.
    pub catalog_item_namespace: String,
    /// Number of instances to provision.
    pub count: u32,
    /// Maximum concurrent provisioning operations.
    pub concurrency: u32,
    /// Delay in seconds before provisioning begins.
    pub start_delay: u32,
    /// Order-time parameter values applied to every instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Scheduled lifespan window for the provisioned instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<Lifespan>,
    /// Prefer pool-backed instances when available.
    #[serde(default)]
    pub use_pool_if_available: bool,
    /// Detach instances from the pool once claimed.
    #[serde(default)]
    pub use_auto_detach: bool,
}

// ============================================================================
// SECTION: Service Union
// ============================================================================

/// Tagged union over the two orderable service kinds.
///
/// # Invariants
/// - Generic operations match on the kind tag, never on structural shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Service {
    /// A single provisioned service instance.
    ResourceClaim(ResourceClaim),
    /// A multi-attendee workshop aggregate.
    Workshop(Workshop),
}

impl Service {
    /// Returns the shared metadata envelope.
    #[must_use]
    pub const fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::ResourceClaim(claim) => &claim.metadata,
            Self::Workshop(workshop) => &workshop.metadata,
        }
    }

    /// Returns the record uid.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.metadata().uid
    }

    /// Returns the creation timestamp, when reported.
    #[must_use]
    pub const fn creation_timestamp(&self) -> Option<Timestamp> {
        self.metadata().creation_timestamp
    }
}
