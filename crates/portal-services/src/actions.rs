// crates/portal-services/src/actions.rs
// ============================================================================
// Module: Bulk Action Orchestrator
// Description: Per-kind dispatch of one action across a mixed selection.
// Purpose: Apply lifecycle actions and produce uid-keyed cache deltas.
// Dependencies: portal-core, thiserror, crate::cache
// ============================================================================

//! ## Overview
//! One action applies to every selected entity in turn. Routing is by kind:
//! workshop-member claims are always skipped for start and stop (only their
//! owning workshop acts on them), pool-backed claims go through the
//! lightweight schedule endpoints while direct claims mutate all resources,
//! and workshops cascade server-side. A claim failing its start/stop gate is
//! left unchanged. Workshops are not gated here: a selection entry carries no
//! member claims, so the aggregate gates ([`crate::workshop_can_start`] and
//! [`crate::workshop_can_stop`]) belong to the caller holding the member
//! list, and the cascade leaves members already in the target state
//! untouched. Deletion treats an already-absent record as satisfied,
//! and a rating rides along only when the selection is exactly one resource
//! claim with rating content. Entity failures are collected, never
//! propagated, so siblings always get their attempt and completed entities
//! are still reconciled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::ResourceClaim;
use portal_core::Service;
use portal_core::Timestamp;
use portal_core::Workshop;
use portal_core::interfaces::LifecycleClient;
use portal_core::interfaces::LifecycleError;
use portal_core::interfaces::Rating;
use portal_core::interfaces::RatingClient;
use portal_core::interfaces::RatingError;
use thiserror::Error;

use crate::cache::CacheDelta;

// ============================================================================
// SECTION: Actions
// ============================================================================

/// One bulk action over the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Start the selected services now.
    Start,
    /// Stop the selected services now.
    Stop,
    /// Delete the selected services, optionally rating a sole claim.
    Delete {
        /// Rating submitted only for a single-claim selection with content.
        rating: Option<Rating>,
    },
    /// Move the end-of-life time.
    SetRetirement {
        /// New end-of-life time.
        end: Timestamp,
    },
    /// Move the scheduled stop time.
    ScheduleStop {
        /// New stop time.
        at: Timestamp,
    },
}

/// Failure of one entity's action.
#[derive(Debug, Error)]
pub enum BulkFailureKind {
    /// Lifecycle mutation failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Rating submission failed.
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// One collected per-entity failure.
#[derive(Debug)]
pub struct BulkFailure {
    /// Uid of the affected entity.
    pub uid: String,
    /// Name of the affected entity.
    pub name: String,
    /// Underlying failure.
    pub error: BulkFailureKind,
}

/// Result of one bulk action over a selection.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Cache deltas for entities whose action completed.
    pub deltas: Vec<CacheDelta>,
    /// Per-entity failures, surfaced after the batch completes.
    pub failures: Vec<BulkFailure>,
}

impl BulkOutcome {
    /// Records a completed mutation's updated record.
    fn updated(&mut self, service: Service) {
        self.deltas.push(CacheDelta::Update(Box::new(service)));
    }

    /// Records a completed removal.
    fn deleted(&mut self, uid: &str) {
        self.deltas.push(CacheDelta::Delete {
            uid: uid.to_string(),
        });
    }

    /// Records a per-entity failure.
    fn failed(&mut self, uid: &str, name: &str, error: impl Into<BulkFailureKind>) {
        self.failures.push(BulkFailure {
            uid: uid.to_string(),
            name: name.to_string(),
            error: error.into(),
        });
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Applies one action to every selected entity, sequentially.
pub async fn apply_bulk_action(
    selection: &[Service],
    action: &BulkAction,
    lifecycle: &dyn LifecycleClient,
    ratings: &dyn RatingClient,
    now: Timestamp,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for service in selection {
        match service {
            Service::ResourceClaim(claim) => {
                apply_to_claim(claim, selection, action, lifecycle, ratings, now, &mut outcome)
                    .await;
            }
            Service::Workshop(workshop) => {
                apply_to_workshop(workshop, action, lifecycle, now, &mut outcome).await;
            }
        }
    }
    outcome
}

/// Applies the action to one resource claim.
async fn apply_to_claim(
    claim: &ResourceClaim,
    selection: &[Service],
    action: &BulkAction,
    lifecycle: &dyn LifecycleClient,
    ratings: &dyn RatingClient,
    now: Timestamp,
    outcome: &mut BulkOutcome,
) {
    let uid = claim.metadata.uid.clone();
    let name = claim.metadata.name.clone();
    match action {
        BulkAction::Start => {
            // Workshop members move only through their owning workshop.
            if claim.is_workshop_member() || !claim.can_start() {
                return;
            }
            let result = if claim.is_pool_backed() {
                lifecycle.schedule_start(claim, now).await
            } else {
                lifecycle.start_all_resources(claim).await
            };
            match result {
                Ok(updated) => outcome.updated(Service::ResourceClaim(updated)),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
        BulkAction::Stop => {
            if claim.is_workshop_member() || !claim.can_stop() {
                return;
            }
            let result = if claim.is_pool_backed() {
                lifecycle.schedule_stop(claim, now).await
            } else {
                lifecycle.stop_all_resources(claim).await
            };
            match result {
                Ok(updated) => outcome.updated(Service::ResourceClaim(updated)),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
        BulkAction::Delete {
            rating,
        } => {
            if let Some(rating) = rating
                && selection.len() == 1
                && rating.has_content()
                && let Err(err) = ratings.set_rating(&uid, rating).await
            {
                outcome.failed(&uid, &name, err);
            }
            match lifecycle.delete_resource_claim(&claim.metadata.namespace, &name).await {
                // An absent record already satisfies the delete.
                Ok(()) | Err(LifecycleError::NotFound) => outcome.deleted(&uid),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
        BulkAction::SetRetirement {
            end,
        } => match lifecycle.set_lifespan_end(claim, *end).await {
            Ok(updated) => outcome.updated(Service::ResourceClaim(updated)),
            Err(err) => outcome.failed(&uid, &name, err),
        },
        BulkAction::ScheduleStop {
            at,
        } => {
            let result = if claim.is_pool_backed() {
                lifecycle.schedule_stop(claim, *at).await
            } else {
                lifecycle.set_stop_time_all_resources(claim, *at).await
            };
            match result {
                Ok(updated) => outcome.updated(Service::ResourceClaim(updated)),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
    }
}

/// Applies the action to one workshop; member claims cascade server-side.
/// Start and stop are ungated: the aggregate gates need the member list,
/// which the selection does not carry.
async fn apply_to_workshop(
    workshop: &Workshop,
    action: &BulkAction,
    lifecycle: &dyn LifecycleClient,
    _now: Timestamp,
    outcome: &mut BulkOutcome,
) {
    let uid = workshop.metadata.uid.clone();
    let name = workshop.metadata.name.clone();
    match action {
        BulkAction::Start => match lifecycle.start_workshop(workshop).await {
            Ok(updated) => outcome.updated(Service::Workshop(updated)),
            Err(err) => outcome.failed(&uid, &name, err),
        },
        BulkAction::Stop | BulkAction::ScheduleStop { .. } => {
            match lifecycle.stop_workshop(workshop).await {
                Ok(updated) => outcome.updated(Service::Workshop(updated)),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
        BulkAction::Delete { .. } => {
            match lifecycle.delete_workshop(&workshop.metadata.namespace, &name).await {
                Ok(()) | Err(LifecycleError::NotFound) => outcome.deleted(&uid),
                Err(err) => outcome.failed(&uid, &name, err),
            }
        }
        BulkAction::SetRetirement {
            end,
        } => match lifecycle.set_workshop_lifespan_end(workshop, *end).await {
            Ok(updated) => outcome.updated(Service::Workshop(updated)),
            Err(err) => outcome.failed(&uid, &name, err),
        },
    }
}
