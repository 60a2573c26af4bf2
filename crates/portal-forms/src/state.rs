// crates/portal-forms/src/state.rs
// ============================================================================
// Module: Form State Model
// Description: Live order-form state built from a catalog item's parameters.
// Purpose: Hold every field the reducer transitions and the gate inspects.
// Dependencies: portal-core, rand, serde, serde_json
// ============================================================================

//! ## Overview
//! [`FormState`] is the single aggregate the order form operates on. It is
//! created by the `init` action from a catalog item and session context,
//! replaced wholesale on re-init, and otherwise only transformed by the
//! reducer. Derived per-parameter flags (disabled, hidden, required,
//! validation outcome) are written exclusively by a committed condition pass.
//!
//! The `generation` counter supersedes in-flight condition passes: every
//! edit that invalidates previously computed conditions bumps it, and a pass
//! may only commit when the generation it captured is still current. A stale
//! pass therefore leaves no trace at all, which is stricter than last-write
//! cooperative cancellation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use portal_core::CatalogItem;
use portal_core::CatalogItemSpecParameter;
use portal_core::SessionContext;
use portal_core::Timestamp;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Parameter State
// ============================================================================

/// Live state of one form parameter.
///
/// # Invariants
/// - `spec` is immutable after initialization.
/// - Derived flags are written only by a committed condition pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStateParameter {
    /// Parameter key, matching `spec.name`.
    pub name: String,
    /// Immutable definition from the catalog item.
    pub spec: CatalogItemSpecParameter,
    /// Effective default captured at initialization; the schema default wins
    /// over the bare spec value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Current value; starts at the effective default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Component-level validity reported by the field widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    /// Derived: field is disabled.
    #[serde(default)]
    pub is_disabled: bool,
    /// Derived: field is hidden.
    #[serde(default)]
    pub is_hidden: bool,
    /// Derived: field is required.
    #[serde(default)]
    pub is_required: bool,
    /// Derived: validation expression outcome; cleared when skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_result: Option<bool>,
    /// Derived: message accompanying a failed validation or condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
}

impl FormStateParameter {
    /// Builds the initial state for a parameter spec, applying the effective
    /// default (schema default wins over the bare value).
    #[must_use]
    pub fn from_spec(spec: &CatalogItemSpecParameter) -> Self {
        Self {
            name: spec.name.clone(),
            default: spec.effective_default().cloned(),
            value: spec.effective_default().cloned(),
            is_valid: None,
            is_disabled: false,
            is_hidden: false,
            is_required: spec.required,
            validation_result: None,
            validation_message: None,
            spec: spec.clone(),
        }
    }

    /// Returns whether the current value is an empty string.
    #[must_use]
    pub fn has_empty_string_value(&self) -> bool {
        self.value.as_ref().and_then(Value::as_str).is_some_and(str::is_empty)
    }
}

/// One display group of parameters sharing a `formGroup` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStateParameterGroup {
    /// Group key; the parameter name for ungrouped parameters.
    pub key: String,
    /// Display label for the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Member parameter names, in spec order.
    pub parameter_names: Vec<String>,
    /// Whether any member is statically required.
    pub is_required: bool,
}

// ============================================================================
// SECTION: Aggregate State
// ============================================================================

/// Tracks the asynchronous condition-evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionChecks {
    /// A pass has been launched and has not yet committed.
    pub running: bool,
    /// The latest pass committed for the current generation.
    pub complete: bool,
}

/// Classification of a supplied Salesforce identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesType {
    /// Marketing campaign identifier.
    Campaign,
    /// CDW ticket identifier.
    Cdw,
    /// Sales opportunity identifier.
    Opportunity,
    /// Internal project identifier.
    Project,
}

impl SalesType {
    /// Returns the stable wire form of the classification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Cdw => "cdw",
            Self::Opportunity => "opportunity",
            Self::Project => "project",
        }
    }
}

/// Salesforce identifier sub-state on the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesforceState {
    /// Supplied identifier; empty when none was entered.
    #[serde(default)]
    pub id: String,
    /// Identifier classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_type: Option<SalesType>,
    /// Skip verification entirely.
    #[serde(default)]
    pub skip: bool,
    /// Verification outcome from the latest committed pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    /// Message accompanying a failed verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Requested scheduling window for the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDates {
    /// Requested start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    /// Requested auto-stop time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Timestamp>,
    /// Requested end of life.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

/// Workshop sub-form carried when the order provisions a workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopForm {
    /// Display name shown to attendees.
    pub display_name: String,
    /// Attendee access password.
    pub access_password: String,
    /// Whether attendees may self-register.
    pub open_registration: bool,
    /// Attendee-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of instances to provision.
    pub provision_count: u32,
    /// Maximum concurrent provisioning operations.
    pub provision_concurrency: u32,
    /// Delay in seconds before provisioning begins.
    pub provision_start_delay: u32,
}

/// Length of generated attendee access passwords.
const ACCESS_PASSWORD_LENGTH: usize = 8;

/// Provisioning concurrency for single-user items.
const SINGLE_USER_CONCURRENCY: u32 = 10;

impl WorkshopForm {
    /// Builds the default sub-form for a catalog item: open registration, a
    /// random access password, one instance, and concurrency 1 for multiuser
    /// items (each instance serves every attendee) or 10 otherwise.
    #[must_use]
    pub fn defaults(item: &CatalogItem) -> Self {
        let access_password = OsRng
            .sample_iter(&Alphanumeric)
            .take(ACCESS_PASSWORD_LENGTH)
            .map(char::from)
            .collect();
        Self {
            display_name: item.display_name().to_string(),
            access_password,
            open_registration: true,
            description: None,
            provision_count: 1,
            provision_concurrency: if item.spec.multiuser {
                1
            } else {
                SINGLE_USER_CONCURRENCY
            },
            provision_start_delay: 30,
        }
    }
}

/// Aggregate order-form state.
///
/// # Invariants
/// - Parameter keys are unique and match each entry's `name`.
/// - At most one condition pass may commit per generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// Catalog item being ordered.
    pub catalog_item: CatalogItem,
    /// Live parameter states keyed by name.
    pub parameters: BTreeMap<String, FormStateParameter>,
    /// Display groups in spec order.
    pub groups: Vec<FormStateParameterGroup>,
    /// Condition pass tracking.
    pub condition_checks: ConditionChecks,
    /// Supersession counter for condition passes.
    pub generation: u64,
    /// Set once the first condition pass has committed.
    pub init_complete: bool,
    /// Namespace the order will be created in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_namespace: Option<String>,
    /// Purpose choices derived from the `purpose` parameter's options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purpose_options: Vec<String>,
    /// Selected ordering purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Selected purpose activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_activity: Option<String>,
    /// Free-text purpose explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_explanation: Option<String>,
    /// Salesforce identifier sub-state.
    #[serde(default)]
    pub salesforce: SalesforceState,
    /// Requested scheduling window.
    #[serde(default)]
    pub dates: OrderDates,
    /// Workshop sub-form; present only for workshop orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop: Option<WorkshopForm>,
    /// Whether the item requires agreement to terms of service.
    pub terms_of_service_required: bool,
    /// Whether the user has agreed to the terms of service.
    pub terms_of_service_agreed: bool,
    /// Marks the order for white-glove handling (admin only).
    pub white_gloved: bool,
    /// Prefer pool-backed instances when available (admin only).
    pub use_pool_if_available: bool,
    /// Detach instances from the pool once claimed (admin only).
    pub use_auto_detach: bool,
}

impl FormState {
    /// Builds the initial state for a catalog item and session.
    #[must_use]
    pub fn init(catalog_item: &CatalogItem, session: &SessionContext) -> Self {
        let parameters: BTreeMap<String, FormStateParameter> = catalog_item
            .spec
            .parameters
            .iter()
            .map(|spec| (spec.name.clone(), FormStateParameter::from_spec(spec)))
            .collect();
        let groups = build_groups(&catalog_item.spec.parameters);
        let purpose_options = purpose_options(catalog_item);
        let service_namespace =
            session.service_namespaces.first().map(|namespace| namespace.name.clone());
        Self {
            catalog_item: catalog_item.clone(),
            parameters,
            groups,
            condition_checks: ConditionChecks::default(),
            generation: 0,
            init_complete: false,
            service_namespace,
            purpose_options,
            purpose: None,
            purpose_activity: None,
            purpose_explanation: None,
            salesforce: SalesforceState::default(),
            dates: OrderDates::default(),
            workshop: None,
            terms_of_service_required: catalog_item.spec.terms_of_service.is_some(),
            terms_of_service_agreed: false,
            white_gloved: false,
            use_pool_if_available: true,
            use_auto_detach: true,
        }
    }

    /// Returns a snapshot of current parameter values keyed by name, used as
    /// the shared namespace for one condition pass.
    #[must_use]
    pub fn condition_values(&self) -> BTreeMap<String, Value> {
        self.parameters
            .values()
            .filter_map(|parameter| {
                parameter.value.clone().map(|value| (parameter.name.clone(), value))
            })
            .collect()
    }
}

/// Derives display groups from the parameter specs, in spec order.
fn build_groups(specs: &[CatalogItemSpecParameter]) -> Vec<FormStateParameterGroup> {
    let mut groups: Vec<FormStateParameterGroup> = Vec::new();
    for spec in specs {
        let key = spec.form_group.clone().unwrap_or_else(|| spec.name.clone());
        if let Some(group) = groups.iter_mut().find(|group| group.key == key) {
            group.parameter_names.push(spec.name.clone());
            group.is_required = group.is_required || spec.required;
        } else {
            groups.push(FormStateParameterGroup {
                key,
                label: spec.form_label.clone(),
                parameter_names: vec![spec.name.clone()],
                is_required: spec.required,
            });
        }
    }
    groups
}

/// Extracts purpose choices from the `purpose` parameter's schema options.
fn purpose_options(item: &CatalogItem) -> Vec<String> {
    item.spec
        .parameters
        .iter()
        .find(|spec| spec.name == "purpose")
        .and_then(|spec| spec.schema.as_ref())
        .map(|schema| {
            schema
                .options
                .iter()
                .filter_map(|option| option.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}
