// crates/portal-catalog/src/facets.rs
// ============================================================================
// Module: Catalog Facets
// Description: Category, label, and admin status facet matching.
// Purpose: Remove entries that do not satisfy the selected filter facets.
// Dependencies: portal-core, crate::enrich
// ============================================================================

//! ## Overview
//! Facet matching operates on the portal-domain labels of each item. Label
//! keys may carry a trailing numeric suffix (`Product-2`) so multi-valued
//! labels coexist in one map; the suffix is stripped before comparison and
//! both attribute and value compare case-insensitively. The `rating` facet
//! is a numeric floor rather than an exact match. The admin status facet
//! compares the operations status id, treating a missing operations record
//! as `operational`; an empty selection matches everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use portal_core::PORTAL_DOMAIN;
use portal_core::SessionContext;

use crate::enrich::CatalogEntry;

// ============================================================================
// SECTION: Category Facet
// ============================================================================

/// Category selection matching the user's bookmarks instead of a label.
pub const CATEGORY_FAVORITES: &str = "favorites";

/// Returns whether the entry belongs to the selected category. The
/// `favorites` category matches bookmark membership instead.
#[must_use]
pub fn matches_category(
    entry: &CatalogEntry,
    category: Option<&str>,
    session: &SessionContext,
) -> bool {
    let Some(category) = category else {
        return true;
    };
    if category.eq_ignore_ascii_case(CATEGORY_FAVORITES) {
        return session.favorites.iter().any(|favorite| *favorite == entry.item.metadata.name);
    }
    entry.item.category().is_some_and(|value| value.eq_ignore_ascii_case(category))
}

// ============================================================================
// SECTION: Label Facet
// ============================================================================

/// Attribute whose facet is a numeric floor.
const RATING_ATTRIBUTE: &str = "rating";

/// Returns whether the entry satisfies every requested label facet.
///
/// For each requested attribute at least one portal-domain label, after
/// stripping a trailing `-<digits>` suffix from its key, must match the
/// attribute case-insensitively with a value among the requested ones. The
/// `rating` attribute instead compares numerically against the first
/// requested value as a floor.
#[must_use]
pub fn matches_label_facets(
    entry: &CatalogEntry,
    requested: &BTreeMap<String, Vec<String>>,
) -> bool {
    requested.iter().all(|(attribute, values)| {
        entry.item.metadata.labels.iter().any(|(key, label_value)| {
            let Some(suffix) = key.strip_prefix(PORTAL_DOMAIN).and_then(|rest| {
                rest.strip_prefix('/')
            }) else {
                return false;
            };
            let base = strip_numeric_suffix(suffix);
            if !base.eq_ignore_ascii_case(attribute) {
                return false;
            }
            if attribute.eq_ignore_ascii_case(RATING_ATTRIBUTE) {
                return rating_meets_floor(label_value, values.first());
            }
            values.iter().any(|value| value.eq_ignore_ascii_case(label_value))
        })
    })
}

/// Strips a trailing `-<digits>` suffix from a label key.
fn strip_numeric_suffix(key: &str) -> &str {
    if let Some(dash) = key.rfind('-')
        && dash > 0
        && key[dash + 1 ..].chars().all(|ch| ch.is_ascii_digit())
        && !key[dash + 1 ..].is_empty()
    {
        return &key[.. dash];
    }
    key
}

/// Compares a rating label numerically against the requested floor.
fn rating_meets_floor(label_value: &str, floor: Option<&String>) -> bool {
    let (Ok(rating), Some(Ok(floor))) =
        (label_value.parse::<f64>(), floor.map(|value| value.parse::<f64>()))
    else {
        return false;
    };
    rating >= floor
}

// ============================================================================
// SECTION: Admin Status Facet
// ============================================================================

/// Returns whether the entry's operations status id is among the selected
/// statuses. An empty selection matches everything.
#[must_use]
pub fn matches_admin_statuses(entry: &CatalogEntry, statuses: &[String]) -> bool {
    if statuses.is_empty() {
        return true;
    }
    let status_id = entry.status_id();
    statuses.iter().any(|status| status.eq_ignore_ascii_case(&status_id))
}
