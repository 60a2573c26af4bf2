// crates/portal-core/src/core/catalog.rs
// ============================================================================
// Module: Portal Catalog Items
// Description: Catalog item records and their order-time parameter specs.
// Purpose: Describe provisionable offerings as fetched from the catalog API.
// Dependencies: serde, serde_json, url, crate::core::metadata
// ============================================================================

//! ## Overview
//! A catalog item is a template for a provisionable offering: metadata
//! encoding category, rating, stage, and asset identity through labels and
//! annotations, plus a spec listing order-time parameters, an access-control
//! rule, and ordering behavior (external link, multiuser, terms of service).
//! Catalog items are fetched and never mutated by the engines; accessor
//! methods here decode the label/annotation vocabulary in one place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::core::metadata::ANNOTATION_DISPLAY_NAME;
use crate::core::metadata::ANNOTATION_KEYWORDS;
use crate::core::metadata::ANNOTATION_OPS;
use crate::core::metadata::ANNOTATION_SAFE_DESCRIPTION;
use crate::core::metadata::LABEL_ASSET_UUID;
use crate::core::metadata::LABEL_CATEGORY;
use crate::core::metadata::LABEL_FEATURED_SCORE;
use crate::core::metadata::LABEL_RATING;
use crate::core::metadata::LABEL_STAGE;
use crate::core::metadata::ObjectMeta;
use crate::core::metadata::Stage;
use crate::core::session::SessionContext;

// ============================================================================
// SECTION: Catalog Item
// ============================================================================

/// One catalog entry, as served by the catalog API.
///
/// # Invariants
/// - Read-only after fetch; enrichment writes only the safe-description
///   annotation copy held by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identity, labels, and annotations.
    pub metadata: ObjectMeta,
    /// Offering specification.
    #[serde(default)]
    pub spec: CatalogItemSpec,
}

impl CatalogItem {
    /// Returns the human-facing display name, falling back to the record name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.metadata.annotation(ANNOTATION_DISPLAY_NAME).unwrap_or(&self.metadata.name)
    }

    /// Returns the deployment stage tag.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.metadata.label(LABEL_STAGE).map_or(Stage::Other, Stage::from_label)
    }

    /// Returns the catalog category label, when present.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.metadata.label(LABEL_CATEGORY)
    }

    /// Returns the asset UUID used for incident matching, when present.
    #[must_use]
    pub fn asset_uuid(&self) -> Option<&str> {
        self.metadata.label(LABEL_ASSET_UUID)
    }

    /// Returns the numeric rating score label, when present and numeric.
    #[must_use]
    pub fn rating_score(&self) -> Option<f64> {
        self.metadata.label(LABEL_RATING).and_then(|raw| raw.parse().ok())
    }

    /// Returns the numeric featured score label, when present and numeric.
    #[must_use]
    pub fn featured_score(&self) -> Option<f64> {
        self.metadata.label(LABEL_FEATURED_SCORE).and_then(|raw| raw.parse().ok())
    }

    /// Returns the comma-separated keyword annotation split into terms.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        self.metadata
            .annotation(ANNOTATION_KEYWORDS)
            .map(|raw| raw.split(',').map(str::trim).filter(|term| !term.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Returns the HTML-stripped description written by enrichment.
    #[must_use]
    pub fn safe_description(&self) -> Option<&str> {
        self.metadata.annotation(ANNOTATION_SAFE_DESCRIPTION)
    }

    /// Decodes the operations annotation, when present and well-formed.
    #[must_use]
    pub fn ops_status(&self) -> Option<OpsStatus> {
        let raw = self.metadata.annotation(ANNOTATION_OPS)?;
        serde_json::from_str(raw).ok()
    }

    /// Returns the external URL for link-only items, when present and valid.
    #[must_use]
    pub fn external_url(&self) -> Option<Url> {
        self.spec.external_url.as_deref().and_then(|raw| Url::parse(raw).ok())
    }

    /// Returns whether the session is allowed to see this item.
    #[must_use]
    pub fn is_accessible_to(&self, session: &SessionContext) -> bool {
        self.spec.access_control.as_ref().is_none_or(|rule| rule.allows(session))
    }
}

/// Catalog item specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemSpec {
    /// Order-time parameter definitions, in display order.
    #[serde(default)]
    pub parameters: Vec<CatalogItemSpecParameter>,
    /// Optional group-based access rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<AccessControl>,
    /// Marks the item as serving multiple attendees per instance.
    #[serde(default)]
    pub multiuser: bool,
    /// Marks the item as orderable as a workshop.
    #[serde(default)]
    pub workshop_ui_disabled: bool,
    /// External URL for link-only items; no local entity is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Terms-of-service text the user must agree to before ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// One order-time parameter definition.
///
/// # Invariants
/// - `name` is unique within the owning item's parameter list.
/// - Condition strings use the `cond-logic` expression grammar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemSpecParameter {
    /// Unique parameter key.
    pub name: String,
    /// Display label for the form field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_label: Option<String>,
    /// Grouping key; parameters sharing a key render in one group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_group: Option<String>,
    /// Static required flag; may be overridden by the require condition.
    #[serde(default)]
    pub required: bool,
    /// Type, default, and UI hints.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "openAPIV3Schema")]
    pub schema: Option<ParameterSchema>,
    /// Bare default applied when the schema carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Condition disabling the field when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_disable_condition: Option<String>,
    /// Condition hiding the field when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_hide_condition: Option<String>,
    /// Condition overriding the static required flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_require_condition: Option<String>,
    /// Validation expression over the current values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    /// Help text for the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogItemSpecParameter {
    /// Returns the effective default: the schema default wins over the bare
    /// `value` field.
    #[must_use]
    pub fn effective_default(&self) -> Option<&Value> {
        self.schema.as_ref().and_then(|schema| schema.default.as_ref()).or(self.value.as_ref())
    }
}

/// Type, default, and enumerated options for one parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// Declared value type (`string`, `integer`, `boolean`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub value_type: Option<String>,
    /// Default applied at form initialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Enumerated choices for select-style fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "enum")]
    pub options: Vec<Value>,
}

// ============================================================================
// SECTION: Access Control
// ============================================================================

/// Group-based access rule attached to a catalog item.
///
/// # Invariants
/// - Deny wins over allow; administrators bypass the rule entirely.
/// - An empty allow list admits every group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControl {
    /// Groups granted access; empty means unrestricted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_groups: Vec<String>,
    /// Groups refused access regardless of the allow list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_groups: Vec<String>,
}

impl AccessControl {
    /// Evaluates the rule for a session.
    #[must_use]
    pub fn allows(&self, session: &SessionContext) -> bool {
        if session.is_admin {
            return true;
        }
        if session.groups.iter().any(|group| self.deny_groups.contains(group)) {
            return false;
        }
        self.allow_groups.is_empty()
            || session.groups.iter().any(|group| self.allow_groups.contains(group))
    }
}

// ============================================================================
// SECTION: Operations Status
// ============================================================================

/// Operations record decoded from the ops annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsStatus {
    /// Status descriptor, when the operations team has set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OpsStatusId>,
}

/// Status identifier inside an operations record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsStatusId {
    /// Stable status id (`operational`, `degraded-performance`, ...).
    pub id: String,
}

impl OpsStatus {
    /// Returns the status id, defaulting to `operational` when unset.
    #[must_use]
    pub fn id(&self) -> &str {
        self.status.as_ref().map_or("operational", |status| status.id.as_str())
    }

    /// Returns whether the status removes the item from normal ordering.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self.id(), "major-outage" | "under-maintenance")
    }
}
