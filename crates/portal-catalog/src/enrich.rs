// crates/portal-catalog/src/enrich.rs
// ============================================================================
// Module: Catalog Enrichment
// Description: HTML stripping and active-incident attachment.
// Purpose: Normalize fetched items before filtering and indexing.
// Dependencies: portal-core, serde, crate
// ============================================================================

//! ## Overview
//! Enrichment runs once per fetch, before any filtering: it derives a
//! plain-text description from the HTML description annotation and attaches
//! the active incident matching the item's asset UUID and stage, when one
//! exists. The result is a [`CatalogEntry`] the rest of the pipeline
//! operates on; the fetched items themselves stay untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::ANNOTATION_SAFE_DESCRIPTION;
use portal_core::CatalogItem;
use portal_core::PORTAL_DOMAIN;
use portal_core::Stage;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Incidents
// ============================================================================

/// One active incident reported by the operations collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveIncident {
    /// Asset UUID the incident applies to.
    pub asset_uuid: String,
    /// Stage the incident applies to.
    pub stage: Stage,
    /// Stable status id (`degraded-performance`, `major-outage`, ...).
    pub status: String,
    /// Whether the incident removes the item from normal ordering.
    #[serde(default)]
    pub disabled: bool,
    /// Operator-facing message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// SECTION: Entries
// ============================================================================

/// Raw HTML description annotation consumed by enrichment.
const ANNOTATION_DESCRIPTION: &str = "catalog.portal.dev/description";

/// One catalog item carried through the pipeline with its derived context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The fetched item, with the safe-description annotation filled in.
    pub item: CatalogItem,
    /// Active incident matching the item's asset UUID and stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident: Option<ActiveIncident>,
}

impl CatalogEntry {
    /// Returns whether the item is disabled or under maintenance, either by
    /// its operations annotation or by an attached incident.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.item.ops_status().is_some_and(|ops| ops.is_disabled())
            || self.incident.as_ref().is_some_and(|incident| incident.disabled)
    }

    /// Returns the status id used by the admin status facet.
    #[must_use]
    pub fn status_id(&self) -> String {
        self.item
            .ops_status()
            .map_or_else(|| "operational".to_string(), |ops| ops.id().to_string())
    }
}

/// Enriches fetched items: strips the HTML description into the safe
/// annotation and attaches matching incidents.
#[must_use]
pub fn enrich_catalog_items(
    items: Vec<CatalogItem>,
    incidents: &[ActiveIncident],
) -> Vec<CatalogEntry> {
    items
        .into_iter()
        .map(|mut item| {
            if let Some(raw) = item.metadata.annotation(ANNOTATION_DESCRIPTION) {
                let safe = strip_tags(raw);
                item.metadata.annotations.insert(ANNOTATION_SAFE_DESCRIPTION.to_string(), safe);
            }
            let incident = item.asset_uuid().and_then(|asset_uuid| {
                incidents
                    .iter()
                    .find(|incident| {
                        incident.asset_uuid == asset_uuid && incident.stage == item.stage()
                    })
                    .cloned()
            });
            CatalogEntry {
                item,
                incident,
            }
        })
        .collect()
}

// ============================================================================
// SECTION: HTML Stripping
// ============================================================================

/// Strips HTML tags and collapses whitespace into a plain-text description.
///
/// The stripper is deliberately small: tags are dropped, the handful of
/// entities that appear in catalog descriptions are decoded, and runs of
/// whitespace collapse to single spaces.
#[must_use]
pub fn strip_tags(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns whether an annotation or label key belongs to the portal domain.
#[must_use]
pub fn is_portal_key(key: &str) -> bool {
    key.strip_prefix(PORTAL_DOMAIN).is_some_and(|rest| rest.starts_with('/'))
}
