// crates/portal-forms/src/conditions.rs
// ============================================================================
// Module: Condition Pass
// Description: Asynchronous evaluation of per-parameter form conditions.
// Purpose: Compute derived field flags against one value snapshot.
// Dependencies: cond-logic, portal-core, serde_json, thiserror, crate::state
// ============================================================================

//! ## Overview
//! A condition pass captures the state's generation and value snapshot, then
//! evaluates every parameter independently: disabled and hidden conditions
//! default to `false` when absent, the require condition defaults to the
//! static flag, and the validation expression runs only when the parameter
//! has a value or is required. External-id call-forms are resolved through
//! the [`ExternalIdVerifier`] before the pure evaluation; Salesforce
//! identifier verification joins the same pass.
//!
//! Evaluation failures never abort the pass: they surface as a per-parameter
//! validation message with the affected condition falling back to its
//! default. The caller commits the finished result through
//! `FormAction::ApplyConditionPass`, which discards it when superseded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use cond_logic::CondError;
use cond_logic::evaluate;
use cond_logic::find_external_id_checks;
use cond_logic::substitute_external_id_checks;
use portal_core::interfaces::ExternalIdVerifier;
use portal_core::interfaces::VerificationError;
use serde_json::Value;
use thiserror::Error;

use crate::state::FormState;

// ============================================================================
// SECTION: Results
// ============================================================================

/// Derived flags computed for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterConditionOutcome {
    /// Parameter name.
    pub name: String,
    /// Field is disabled.
    pub is_disabled: bool,
    /// Field is hidden.
    pub is_hidden: bool,
    /// Field is required.
    pub is_required: bool,
    /// Validation expression outcome; `None` when validation was skipped.
    pub validation_result: Option<bool>,
    /// Message for a failed validation or broken condition.
    pub validation_message: Option<String>,
}

/// Salesforce verification outcome for the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesforceOutcome {
    /// Verification result; `None` when no identifier was checked.
    pub valid: Option<bool>,
    /// Message accompanying a failed verification.
    pub message: Option<String>,
}

/// Finished condition pass, commit-gated by its captured generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPassResult {
    /// State generation captured when the pass started.
    pub generation: u64,
    /// Per-parameter outcomes.
    pub parameters: Vec<ParameterConditionOutcome>,
    /// Salesforce verification outcome.
    pub salesforce: SalesforceOutcome,
}

/// Failure of one condition evaluation.
#[derive(Debug, Error)]
enum ConditionEvalError {
    /// Expression parse or evaluation failure.
    #[error(transparent)]
    Condition(#[from] CondError),
    /// External lookup failure.
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

// ============================================================================
// SECTION: Pass
// ============================================================================

/// Evaluates every parameter's conditions against the current snapshot.
///
/// The returned result must be committed through the reducer; a result whose
/// generation no longer matches the state is dropped there.
pub async fn evaluate_conditions(
    state: &FormState,
    verifier: &dyn ExternalIdVerifier,
) -> ConditionPassResult {
    let values = state.condition_values();
    let sales_type = state.salesforce.sales_type.map(|sales_type| sales_type.as_str());
    let mut parameters = Vec::with_capacity(state.parameters.len());

    for parameter in state.parameters.values() {
        let spec = &parameter.spec;
        let mut message = None;

        let is_disabled = eval_or_default(
            spec.form_disable_condition.as_deref(),
            false,
            &values,
            sales_type,
            verifier,
            &mut message,
        )
        .await;
        let is_hidden = eval_or_default(
            spec.form_hide_condition.as_deref(),
            false,
            &values,
            sales_type,
            verifier,
            &mut message,
        )
        .await;
        let is_required = eval_or_default(
            spec.form_require_condition.as_deref(),
            spec.required,
            &values,
            sales_type,
            verifier,
            &mut message,
        )
        .await;

        let mut validation_result = None;
        if let Some(expr) = spec.validation.as_deref()
            && (parameter.value.is_some() || is_required)
        {
            match eval_condition(expr, &values, sales_type, verifier).await {
                Ok(outcome) => validation_result = Some(outcome),
                Err(err) => {
                    validation_result = Some(false);
                    message.get_or_insert_with(|| err.to_string());
                }
            }
        }

        parameters.push(ParameterConditionOutcome {
            name: parameter.name.clone(),
            is_disabled,
            is_hidden,
            is_required,
            validation_result,
            validation_message: message,
        });
    }

    let salesforce = verify_salesforce_id(state, verifier).await;
    ConditionPassResult {
        generation: state.generation,
        parameters,
        salesforce,
    }
}

/// Evaluates an optional condition, falling back to the default on absence
/// or failure. Failures record a message once per parameter.
async fn eval_or_default(
    expr: Option<&str>,
    default: bool,
    values: &BTreeMap<String, Value>,
    sales_type: Option<&str>,
    verifier: &dyn ExternalIdVerifier,
    message: &mut Option<String>,
) -> bool {
    let Some(expr) = expr else {
        return default;
    };
    match eval_condition(expr, values, sales_type, verifier).await {
        Ok(outcome) => outcome,
        Err(err) => {
            message.get_or_insert_with(|| err.to_string());
            default
        }
    }
}

/// Resolves external-id call-forms, then evaluates the pure expression.
async fn eval_condition(
    expr: &str,
    values: &BTreeMap<String, Value>,
    sales_type: Option<&str>,
    verifier: &dyn ExternalIdVerifier,
) -> Result<bool, ConditionEvalError> {
    let checks = find_external_id_checks(expr);
    let resolved = if checks.is_empty() {
        expr.to_string()
    } else {
        let mut results = Vec::with_capacity(checks.len());
        for check in &checks {
            let outcome = match values.get(&check.parameter) {
                Some(value) => verifier.check(&scalar_to_id(value), sales_type).await?,
                // A call referencing a valueless parameter cannot verify.
                None => false,
            };
            results.push(outcome);
        }
        substitute_external_id_checks(expr, &results)?
    };
    Ok(evaluate(&resolved, values)?)
}

/// Verifies the form's Salesforce identifier when one is present.
async fn verify_salesforce_id(
    state: &FormState,
    verifier: &dyn ExternalIdVerifier,
) -> SalesforceOutcome {
    let id = state.salesforce.id.trim();
    if state.salesforce.skip || id.is_empty() {
        return SalesforceOutcome::default();
    }
    let sales_type = state.salesforce.sales_type.map(|sales_type| sales_type.as_str());
    match verifier.check(id, sales_type).await {
        Ok(true) => SalesforceOutcome {
            valid: Some(true),
            message: None,
        },
        Ok(false) => SalesforceOutcome {
            valid: Some(false),
            message: Some("Salesforce ID is not valid or does not exist".to_string()),
        },
        Err(err) => SalesforceOutcome {
            valid: Some(false),
            message: Some(err.to_string()),
        },
    }
}

/// Renders a parameter value as the identifier string for the lookup.
fn scalar_to_id(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}
