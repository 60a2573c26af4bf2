// crates/portal-core/src/core/metadata.rs
// ============================================================================
// Module: Portal Object Metadata
// Description: Shared metadata envelope and label/annotation vocabulary.
// Purpose: Give every domain record one identity, labeling, and stage model.
// Dependencies: serde, crate::core::time
// ============================================================================

//! ## Overview
//! Every record the portal handles carries the same metadata envelope: name,
//! namespace, uid, creation timestamp, optional deletion timestamp, and two
//! string maps for labels and annotations. Portal-specific keys live under a
//! single domain prefix; the constants here are the only place those key
//! names are spelled out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Label and Annotation Vocabulary
// ============================================================================

/// Domain prefix for portal-owned labels and annotations.
pub const PORTAL_DOMAIN: &str = "catalog.portal.dev";

/// Annotation carrying the human-facing display name.
pub const ANNOTATION_DISPLAY_NAME: &str = "catalog.portal.dev/displayName";

/// Annotation carrying comma-separated search keywords.
pub const ANNOTATION_KEYWORDS: &str = "catalog.portal.dev/keywords";

/// Annotation carrying the operations record (JSON) for a catalog item.
pub const ANNOTATION_OPS: &str = "catalog.portal.dev/ops";

/// Annotation carrying the HTML-stripped description, written by enrichment.
pub const ANNOTATION_SAFE_DESCRIPTION: &str = "catalog.portal.dev/safeDescription";

/// Label carrying the asset UUID used for incident matching.
pub const LABEL_ASSET_UUID: &str = "catalog.portal.dev/asset-uuid";

/// Label carrying the catalog category.
pub const LABEL_CATEGORY: &str = "catalog.portal.dev/category";

/// Label carrying the numeric featured score.
pub const LABEL_FEATURED_SCORE: &str = "catalog.portal.dev/featured-score";

/// Label carrying the provider facet value.
pub const LABEL_PROVIDER: &str = "catalog.portal.dev/Provider";

/// Label carrying the product facet value.
pub const LABEL_PRODUCT: &str = "catalog.portal.dev/Product";

/// Label carrying the product-family facet value.
pub const LABEL_PRODUCT_FAMILY: &str = "catalog.portal.dev/Product_Family";

/// Label carrying the numeric rating score.
pub const LABEL_RATING: &str = "catalog.portal.dev/rating";

/// Label carrying the sales-play facet value.
pub const LABEL_SALES_PLAY: &str = "catalog.portal.dev/Sales_Play";

/// Label carrying the deployment stage tag.
pub const LABEL_STAGE: &str = "catalog.portal.dev/stage";

/// Label marking a resource claim as owned by a named workshop.
pub const LABEL_WORKSHOP: &str = "catalog.portal.dev/workshop";

/// Builds a portal-domain key from a bare suffix.
#[must_use]
pub fn domain_key(suffix: &str) -> String {
    format!("{PORTAL_DOMAIN}/{suffix}")
}

// ============================================================================
// SECTION: Object Metadata
// ============================================================================

/// Metadata envelope shared by every portal record.
///
/// # Invariants
/// - `uid` is globally unique and stable across refetches of the same record.
/// - A set `deletion_timestamp` marks the record as pending removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Record name, unique within its namespace.
    pub name: String,
    /// Namespace holding the record.
    #[serde(default)]
    pub namespace: String,
    /// Globally unique identifier assigned at creation.
    #[serde(default)]
    pub uid: String,
    /// Creation time reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<Timestamp>,
    /// Soft-delete marker; set once deletion has been requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<Timestamp>,
    /// Label map, ordered for deterministic serialization.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotation map, ordered for deterministic serialization.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Returns a label value by key.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns an annotation value by key.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Returns whether deletion has been requested for this record.
    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.deletion_timestamp.is_some()
    }
}

// ============================================================================
// SECTION: Stage
// ============================================================================

/// Deployment stage tag carried on catalog items.
///
/// # Invariants
/// - Ordering follows display priority: prod before event before test before
///   dev before anything unrecognized.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Production-grade offering.
    Prod,
    /// Event-scoped offering.
    Event,
    /// Test-tier offering.
    Test,
    /// Development-tier offering.
    Dev,
    /// Unrecognized or absent stage tag.
    #[default]
    #[serde(other)]
    Other,
}

impl Stage {
    /// Parses a stage label value; unknown values map to [`Stage::Other`].
    #[must_use]
    pub fn from_label(value: &str) -> Self {
        match value {
            "prod" => Self::Prod,
            "event" => Self::Event,
            "test" => Self::Test,
            "dev" => Self::Dev,
            _ => Self::Other,
        }
    }

    /// Returns the sort priority (lower sorts first).
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Prod => 0,
            Self::Event => 1,
            Self::Test => 2,
            Self::Dev => 3,
            Self::Other => 4,
        }
    }
}
