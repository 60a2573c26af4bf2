// crates/portal-catalog/src/search.rs
// ============================================================================
// Module: Catalog Search Index
// Description: Weighted exact-substring search over catalog entries.
// Purpose: Rank items by relevance when a free-text query is present.
// Dependencies: portal-core, crate::enrich
// ============================================================================

//! ## Overview
//! The index stores one weighted field list per entry: display name and
//! internal name weigh 10, keywords 5, the sales-play label and the safe
//! description 3, the provider label 2.5, the product label 1, and the
//! product-family label 0.5. Queries split on whitespace; every term of at
//! least three characters must match some field as a case-insensitive exact
//! substring (terms are effectively quoted), position within the field does
//! not matter, and field length carries no penalty. An entry's score is the
//! sum over terms of the best matching field weight; ranking is by score
//! descending with the incoming order preserved on ties.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::enrich::CatalogEntry;
use portal_core::LABEL_PRODUCT;
use portal_core::LABEL_PRODUCT_FAMILY;
use portal_core::LABEL_PROVIDER;
use portal_core::LABEL_SALES_PLAY;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Terms shorter than this never match.
pub const MIN_TERM_LENGTH: usize = 3;

/// Field weight for the display name.
const WEIGHT_DISPLAY_NAME: f64 = 10.0;
/// Field weight for the internal record name.
const WEIGHT_NAME: f64 = 10.0;
/// Field weight for each keyword.
const WEIGHT_KEYWORD: f64 = 5.0;
/// Field weight for the sales-play label.
const WEIGHT_SALES_PLAY: f64 = 3.0;
/// Field weight for the safe description.
const WEIGHT_DESCRIPTION: f64 = 3.0;
/// Field weight for the provider label.
const WEIGHT_PROVIDER: f64 = 2.5;
/// Field weight for the product label.
const WEIGHT_PRODUCT: f64 = 1.0;
/// Field weight for the product-family label.
const WEIGHT_PRODUCT_FAMILY: f64 = 0.5;

// ============================================================================
// SECTION: Index
// ============================================================================

/// Weighted lowercase field texts for one entry.
#[derive(Debug, Clone)]
struct IndexedEntry {
    /// Position of the entry in the indexed sequence.
    position: usize,
    /// Lowercased field text with its weight.
    fields: Vec<(String, f64)>,
}

/// Search index over a fixed sequence of catalog entries.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Indexed entries in incoming order.
    entries: Vec<IndexedEntry>,
}

impl SearchIndex {
    /// Builds the index over the given entries.
    #[must_use]
    pub fn build(entries: &[CatalogEntry]) -> Self {
        let entries = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| IndexedEntry {
                position,
                fields: index_fields(entry),
            })
            .collect();
        Self {
            entries,
        }
    }

    /// Runs a free-text query, returning matching entry positions ranked by
    /// score descending; incoming order breaks ties.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<usize> {
        let terms: Vec<String> = query
            .split_whitespace()
            .filter(|term| term.chars().count() >= MIN_TERM_LENGTH)
            .map(str::to_lowercase)
            .collect();
        if terms.is_empty() {
            return self.entries.iter().map(|entry| entry.position).collect();
        }

        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .filter_map(|entry| score_entry(entry, &terms).map(|score| (entry.position, score)))
            .collect();
        scored.sort_by(|(_, left), (_, right)| right.total_cmp(left));
        scored.into_iter().map(|(position, _)| position).collect()
    }
}

/// Scores one entry against the query terms; `None` when any term misses.
fn score_entry(entry: &IndexedEntry, terms: &[String]) -> Option<f64> {
    let mut score = 0.0;
    for term in terms {
        let best = entry
            .fields
            .iter()
            .filter(|(text, _)| text.contains(term.as_str()))
            .map(|(_, weight)| *weight)
            .reduce(f64::max)?;
        score += best;
    }
    Some(score)
}

/// Collects the weighted lowercase field texts for one entry.
fn index_fields(entry: &CatalogEntry) -> Vec<(String, f64)> {
    let item = &entry.item;
    let mut fields = vec![
        (item.display_name().to_lowercase(), WEIGHT_DISPLAY_NAME),
        (item.metadata.name.to_lowercase(), WEIGHT_NAME),
    ];
    for keyword in item.keywords() {
        fields.push((keyword.to_lowercase(), WEIGHT_KEYWORD));
    }
    let labeled = [
        (LABEL_SALES_PLAY, WEIGHT_SALES_PLAY),
        (LABEL_PROVIDER, WEIGHT_PROVIDER),
        (LABEL_PRODUCT, WEIGHT_PRODUCT),
        (LABEL_PRODUCT_FAMILY, WEIGHT_PRODUCT_FAMILY),
    ];
    for (label, weight) in labeled {
        if let Some(value) = item.metadata.label(label) {
            fields.push((value.to_lowercase(), weight));
        }
    }
    if let Some(description) = item.safe_description() {
        fields.push((description.to_lowercase(), WEIGHT_DESCRIPTION));
    }
    fields
}
