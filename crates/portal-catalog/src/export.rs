// crates/portal-catalog/src/export.rs
// ============================================================================
// Module: Catalog Export Model
// Description: Column/row model backing the admin CSV download.
// Purpose: Derive the exported attribute grid without owning text encoding.
// Dependencies: portal-core, serde, crate::enrich
// ============================================================================

//! ## Overview
//! The export model collects the union of portal-domain annotation and label
//! keys across the given entries, drops keys that never render, and produces
//! one row per entry with values aligned to the column list. Encoding the
//! grid as CSV text stays with the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use portal_core::ANNOTATION_OPS;
use portal_core::ANNOTATION_SAFE_DESCRIPTION;
use serde::Deserialize;
use serde::Serialize;

use crate::enrich::CatalogEntry;
use crate::enrich::is_portal_key;

// ============================================================================
// SECTION: Model
// ============================================================================

/// Keys excluded from the export.
const HIDDEN_KEYS: [&str; 2] = [ANNOTATION_OPS, ANNOTATION_SAFE_DESCRIPTION];

/// Column/row grid for the CSV download.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportModel {
    /// Ordered column keys: name, namespace, then the discovered attribute
    /// keys in lexicographic order.
    pub columns: Vec<String>,
    /// One row per entry, aligned to `columns`; missing attributes are empty.
    pub rows: Vec<Vec<String>>,
}

/// Builds the export model over the given entries.
#[must_use]
pub fn build_export_model(entries: &[CatalogEntry]) -> ExportModel {
    let mut attribute_keys: BTreeSet<String> = BTreeSet::new();
    for entry in entries {
        let metadata = &entry.item.metadata;
        for key in metadata.labels.keys().chain(metadata.annotations.keys()) {
            if is_portal_key(key) && !HIDDEN_KEYS.contains(&key.as_str()) {
                attribute_keys.insert(key.clone());
            }
        }
    }

    let mut columns = vec!["name".to_string(), "namespace".to_string()];
    columns.extend(attribute_keys.iter().cloned());

    let rows = entries
        .iter()
        .map(|entry| {
            let metadata = &entry.item.metadata;
            let mut row = vec![metadata.name.clone(), metadata.namespace.clone()];
            for key in &attribute_keys {
                let value = metadata
                    .labels
                    .get(key)
                    .or_else(|| metadata.annotations.get(key))
                    .cloned()
                    .unwrap_or_default();
                row.push(value);
            }
            row
        })
        .collect();

    ExportModel {
        columns,
        rows,
    }
}
