// crates/portal-catalog/src/sort.rs
// ============================================================================
// Module: Catalog Sort Comparator
// Description: Ordering of catalog entries when no text query is present.
// Purpose: Provide deterministic, transitive catalog ordering per sort mode.
// Dependencies: portal-core, serde, crate::enrich
// ============================================================================

//! ## Overview
//! Without a free-text query the catalog is ordered by this comparator.
//! The default mode compares display names; `AZ`/`ZA` are pure lexicographic
//! over the display name; `Featured` and `Rating` compare a numeric label
//! score with higher values first and any scored item ahead of an unscored
//! one. Remaining ties resolve by stage priority (prod, event, test, dev,
//! other), then namespace, then name, ascending at every level, which keeps
//! the order total and transitive.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::enrich::CatalogEntry;

// ============================================================================
// SECTION: Sort Modes
// ============================================================================

/// Catalog ordering selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Display name with stage/namespace/name tie-breaking.
    #[default]
    DisplayName,
    /// Pure lexicographic by display name, ascending.
    Az,
    /// Pure lexicographic by display name, descending.
    Za,
    /// Featured score, higher first.
    Featured,
    /// Rating score, higher first.
    Rating,
}

// ============================================================================
// SECTION: Comparator
// ============================================================================

/// Compares two entries under the given sort mode.
#[must_use]
pub fn compare_entries(left: &CatalogEntry, right: &CatalogEntry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Az => compare_display_names(left, right),
        SortMode::Za => compare_display_names(right, left),
        SortMode::DisplayName => compare_display_names(left, right).then_with(|| tiebreak(left, right)),
        SortMode::Featured => compare_scores(left.item.featured_score(), right.item.featured_score())
            .then_with(|| tiebreak(left, right)),
        SortMode::Rating => compare_scores(left.item.rating_score(), right.item.rating_score())
            .then_with(|| tiebreak(left, right)),
    }
}

/// Case-insensitive display name comparison.
fn compare_display_names(left: &CatalogEntry, right: &CatalogEntry) -> Ordering {
    left.item
        .display_name()
        .to_lowercase()
        .cmp(&right.item.display_name().to_lowercase())
}

/// Orders numeric label scores: higher first, a scored item always ahead of
/// an unscored one.
fn compare_scores(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stage priority, then namespace, then name, ascending at each level.
fn tiebreak(left: &CatalogEntry, right: &CatalogEntry) -> Ordering {
    left.item
        .stage()
        .priority()
        .cmp(&right.item.stage().priority())
        .then_with(|| left.item.metadata.namespace.cmp(&right.item.metadata.namespace))
        .then_with(|| left.item.metadata.name.cmp(&right.item.metadata.name))
}
