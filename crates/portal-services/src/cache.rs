// crates/portal-services/src/cache.rs
// ============================================================================
// Module: Cache Reconciliation
// Description: Uid-keyed deltas applied to the locally cached service list.
// Purpose: Keep the cache consistent under concurrent background refreshes.
// Dependencies: portal-core, serde
// ============================================================================

//! ## Overview
//! Bulk actions emit deltas instead of positions: a background poll may have
//! reordered the cached list while the action ran, so reconciliation locates
//! records by uid. Updates replace in place; deletes splice out. A delta
//! whose uid is no longer cached is a no-op, which makes reconciliation safe
//! to apply after the next poll has already landed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::Service;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Deltas
// ============================================================================

/// One uid-keyed change to the cached service list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CacheDelta {
    /// Replace the cached record with the same uid.
    Update(Box<Service>),
    /// Remove the cached record with the given uid.
    Delete {
        /// Uid of the removed record.
        uid: String,
    },
}

/// Applies deltas to the cached list, matching records by uid.
pub fn reconcile_cache(cached: &mut Vec<Service>, deltas: &[CacheDelta]) {
    for delta in deltas {
        match delta {
            CacheDelta::Update(updated) => {
                if let Some(existing) =
                    cached.iter_mut().find(|service| service.uid() == updated.uid())
                {
                    *existing = (**updated).clone();
                }
            }
            CacheDelta::Delete {
                uid,
            } => {
                cached.retain(|service| service.uid() != uid);
            }
        }
    }
}
