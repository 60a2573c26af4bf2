// crates/portal-forms/src/reducer.rs
// ============================================================================
// Module: Form Reducer
// Description: Pure state-transition function for the order form.
// Purpose: Make every form mutation an atomic replacement of the whole state.
// Dependencies: portal-core, serde_json, crate::state, crate::conditions
// ============================================================================

//! ## Overview
//! All form mutation flows through [`reduce`]: given the current state and
//! one action, it returns the next state without touching the input. Actions
//! that invalidate previously computed conditions (`Init`,
//! `ParameterUpdate`, `SalesforceId`) bump the generation counter and reset
//! the condition tracking, which both forces a new pass and bars any
//! in-flight pass from committing. Auxiliary actions mutate their field and
//! leave the condition tracking alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use portal_core::CatalogItem;
use portal_core::SessionContext;
use portal_core::Timestamp;
use serde_json::Value;

use crate::conditions::ConditionPassResult;
use crate::state::ConditionChecks;
use crate::state::FormState;
use crate::state::SalesType;
use crate::state::WorkshopForm;

// ============================================================================
// SECTION: Actions
// ============================================================================

/// One dispatched form transition.
#[derive(Debug, Clone)]
pub enum FormAction {
    /// Replaces the state wholesale for a catalog item and session.
    Init {
        /// Catalog item being ordered.
        catalog_item: Box<CatalogItem>,
        /// Current user session.
        session: SessionContext,
    },
    /// Writes a field edit onto the named parameter.
    ParameterUpdate {
        /// Parameter name.
        name: String,
        /// New value; `None` clears the field.
        value: Option<Value>,
        /// Component-level validity reported by the widget.
        is_valid: Option<bool>,
    },
    /// Marks a condition pass as launched.
    BeginConditionPass,
    /// Commits a finished condition pass; ignored when superseded.
    ApplyConditionPass(ConditionPassResult),
    /// Sets the requested scheduling window.
    Dates {
        /// Requested start time.
        start: Option<Timestamp>,
        /// Requested auto-stop time.
        stop: Option<Timestamp>,
        /// Requested end of life.
        end: Option<Timestamp>,
    },
    /// Sets or clears the workshop sub-form.
    Workshop(Option<WorkshopForm>),
    /// Sets the ordering purpose selections.
    Purpose {
        /// Selected purpose.
        purpose: Option<String>,
        /// Selected activity.
        activity: Option<String>,
        /// Free-text explanation.
        explanation: Option<String>,
    },
    /// Sets the Salesforce identifier, forcing re-verification.
    SalesforceId {
        /// Supplied identifier; empty clears it.
        value: String,
        /// Identifier classification.
        sales_type: Option<SalesType>,
        /// Skip verification entirely.
        skip: bool,
    },
    /// Selects the namespace the order is created in.
    ServiceNamespace(String),
    /// Records agreement to the terms of service.
    TermsOfServiceAgreed(bool),
    /// Toggles white-glove handling.
    WhiteGloved(bool),
    /// Toggles pool preference.
    UsePoolIfAvailable(bool),
    /// Toggles pool auto-detach.
    UseAutoDetach(bool),
}

// ============================================================================
// SECTION: Reducer
// ============================================================================

/// Applies one action, returning the next state.
#[must_use]
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    match action {
        FormAction::Init {
            catalog_item,
            session,
        } => {
            let mut next = FormState::init(&catalog_item, &session);
            // Carry the generation forward so a pass started against the old
            // state can never commit into the new one.
            next.generation = state.generation.wrapping_add(1);
            next
        }
        FormAction::ParameterUpdate {
            name,
            value,
            is_valid,
        } => {
            let mut next = state.clone();
            if let Some(parameter) = next.parameters.get_mut(&name) {
                parameter.value = value;
                parameter.is_valid = is_valid;
            }
            invalidate_conditions(&mut next);
            next
        }
        FormAction::BeginConditionPass => {
            let mut next = state.clone();
            next.condition_checks.running = true;
            next
        }
        FormAction::ApplyConditionPass(result) => apply_condition_pass(state, result),
        FormAction::Dates {
            start,
            stop,
            end,
        } => {
            let mut next = state.clone();
            next.dates.start = start;
            next.dates.stop = stop;
            next.dates.end = end;
            next
        }
        FormAction::Workshop(workshop) => {
            let mut next = state.clone();
            next.workshop = workshop;
            next
        }
        FormAction::Purpose {
            purpose,
            activity,
            explanation,
        } => {
            let mut next = state.clone();
            next.purpose = purpose;
            next.purpose_activity = activity;
            next.purpose_explanation = explanation;
            next
        }
        FormAction::SalesforceId {
            value,
            sales_type,
            skip,
        } => {
            let mut next = state.clone();
            next.salesforce.id = value;
            next.salesforce.sales_type = sales_type;
            next.salesforce.skip = skip;
            next.salesforce.valid = None;
            next.salesforce.message = None;
            invalidate_conditions(&mut next);
            next
        }
        FormAction::ServiceNamespace(namespace) => {
            let mut next = state.clone();
            next.service_namespace = Some(namespace);
            next
        }
        FormAction::TermsOfServiceAgreed(agreed) => {
            let mut next = state.clone();
            next.terms_of_service_agreed = agreed;
            next
        }
        FormAction::WhiteGloved(white_gloved) => {
            let mut next = state.clone();
            next.white_gloved = white_gloved;
            next
        }
        FormAction::UsePoolIfAvailable(use_pool) => {
            let mut next = state.clone();
            next.use_pool_if_available = use_pool;
            next
        }
        FormAction::UseAutoDetach(use_auto_detach) => {
            let mut next = state.clone();
            next.use_auto_detach = use_auto_detach;
            next
        }
    }
}

/// Bumps the generation and resets condition tracking, superseding any pass
/// launched against the previous generation.
fn invalidate_conditions(state: &mut FormState) {
    state.generation = state.generation.wrapping_add(1);
    state.condition_checks = ConditionChecks::default();
}

/// Commits a condition pass when its captured generation is still current.
fn apply_condition_pass(state: &FormState, result: ConditionPassResult) -> FormState {
    if result.generation != state.generation {
        return state.clone();
    }
    let mut next = state.clone();
    for outcome in result.parameters {
        if let Some(parameter) = next.parameters.get_mut(&outcome.name) {
            parameter.is_disabled = outcome.is_disabled;
            parameter.is_hidden = outcome.is_hidden;
            parameter.is_required = outcome.is_required;
            parameter.validation_result = outcome.validation_result;
            parameter.validation_message = outcome.validation_message;
        }
    }
    next.salesforce.valid = result.salesforce.valid;
    next.salesforce.message = result.salesforce.message;
    next.condition_checks = ConditionChecks {
        running: false,
        complete: true,
    };
    next.init_complete = true;
    next
}
