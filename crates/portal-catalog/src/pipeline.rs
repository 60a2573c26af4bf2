// crates/portal-catalog/src/pipeline.rs
// ============================================================================
// Module: Catalog Pipeline
// Description: Fixed-order filter, rank, and partition over catalog entries.
// Purpose: Produce the final display sequence from fetched items.
// Dependencies: portal-core, serde, crate
// ============================================================================

//! ## Overview
//! The pipeline order is fixed: access-control filtering drops items the
//! session may not see, enrichment has already attached descriptions and
//! incidents, the category, label, and admin status facets remove
//! non-matching entries, then either the search index ranks the survivors
//! (when a query of usable length is present) or the sort comparator orders
//! them. Regardless of ranking, disabled or under-maintenance entries move
//! after all operational ones with relative order preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use portal_core::SessionContext;
use serde::Deserialize;
use serde::Serialize;

use crate::enrich::CatalogEntry;
use crate::facets::matches_admin_statuses;
use crate::facets::matches_category;
use crate::facets::matches_label_facets;
use crate::search::MIN_TERM_LENGTH;
use crate::search::SearchIndex;
use crate::sort::SortMode;
use crate::sort::compare_entries;

// ============================================================================
// SECTION: Criteria
// ============================================================================

/// Filter criteria driven by the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Selected category, or `favorites` for bookmark membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Requested label facets: attribute to accepted values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, Vec<String>>,
    /// Admin-only operations status selection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_statuses: Vec<String>,
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Ordering used when no query is present.
    #[serde(default)]
    pub sort: SortMode,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Applies the full pipeline, returning the ordered display sequence.
#[must_use]
pub fn filter_catalog(
    entries: Vec<CatalogEntry>,
    session: &SessionContext,
    filter: &CatalogFilter,
) -> Vec<CatalogEntry> {
    let mut survivors: Vec<CatalogEntry> = entries
        .into_iter()
        .filter(|entry| entry.item.is_accessible_to(session))
        .filter(|entry| matches_category(entry, filter.category.as_deref(), session))
        .filter(|entry| matches_label_facets(entry, &filter.labels))
        .filter(|entry| {
            !session.is_admin || matches_admin_statuses(entry, &filter.admin_statuses)
        })
        .collect();

    // A query without any usable term falls back to the comparator.
    let query = filter.search.as_deref().map(str::trim).filter(|query| {
        query.split_whitespace().any(|term| term.chars().count() >= MIN_TERM_LENGTH)
    });
    if let Some(query) = query {
        let index = SearchIndex::build(&survivors);
        let ranked = index.search(query);
        let mut taken: Vec<Option<CatalogEntry>> = survivors.into_iter().map(Some).collect();
        survivors = ranked.into_iter().filter_map(|position| taken[position].take()).collect();
    } else {
        survivors.sort_by(|left, right| compare_entries(left, right, filter.sort));
    }

    partition_operational(survivors)
}

/// Moves disabled entries after operational ones, preserving relative order.
fn partition_operational(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let (disabled, mut operational): (Vec<CatalogEntry>, Vec<CatalogEntry>) =
        entries.into_iter().partition(|entry| entry.is_disabled());
    operational.extend(disabled);
    operational
}
