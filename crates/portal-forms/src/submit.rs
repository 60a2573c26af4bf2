// crates/portal-forms/src/submit.rs
// ============================================================================
// Module: Submission Builder
// Description: Submit gate, payload assembly, and the three creation paths.
// Purpose: Turn a validated form state into a created order.
// Dependencies: portal-core, serde_json, thiserror, url, crate::state
// ============================================================================

//! ## Overview
//! Submission is gated by [`check_enable_submit`]: conditions must have
//! completed, terms of service must be agreed when required, and every
//! visible parameter must be present and valid, with the one exemption that
//! an empty optional field never blocks. The payload includes only
//! submit-eligible parameters plus the injected purpose and sales fields.
//! Three mutually exclusive paths follow: external-link items record an
//! audit entry and yield the URL, workshop orders create the workshop and
//! its provision sequentially (non-transactional; a provision failure leaves
//! the visible workshop for retry), and standard orders create one resource
//! claim. Non-external paths return the created record's coordinates for
//! navigation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use portal_core::SessionContext;
use portal_core::interfaces::ExternalItemRequest;
use portal_core::interfaces::OrderClient;
use portal_core::interfaces::OrderError;
use portal_core::interfaces::ServiceRequestOrder;
use portal_core::interfaces::WorkshopOrder;
use portal_core::interfaces::WorkshopProvisionOrder;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::state::FormState;
use crate::state::FormStateParameter;

// ============================================================================
// SECTION: Submit Gate
// ============================================================================

/// Returns whether the form may be submitted.
#[must_use]
pub fn check_enable_submit(state: &FormState) -> bool {
    if !state.condition_checks.complete {
        return false;
    }
    if state.terms_of_service_required && !state.terms_of_service_agreed {
        return false;
    }
    if !state.salesforce.skip
        && !state.salesforce.id.trim().is_empty()
        && state.salesforce.valid != Some(true)
    {
        return false;
    }
    state.parameters.values().all(parameter_passes_gate)
}

/// Gate check for one parameter; disabled and hidden fields are exempt.
fn parameter_passes_gate(parameter: &FormStateParameter) -> bool {
    if parameter.is_disabled || parameter.is_hidden {
        return true;
    }
    if parameter.value.is_none() {
        return !parameter.is_required;
    }
    if parameter.is_valid == Some(false) || parameter.validation_result == Some(false) {
        // Empty optional fields never block submission.
        return parameter.has_empty_string_value() && !parameter.is_required;
    }
    true
}

// ============================================================================
// SECTION: Payload Assembly
// ============================================================================

/// Builds the submitted parameter values: defined, not disabled, not hidden,
/// and not an empty optional, plus the injected purpose and sales fields.
#[must_use]
pub fn build_parameter_values(state: &FormState) -> BTreeMap<String, Value> {
    let mut values: BTreeMap<String, Value> = state
        .parameters
        .values()
        .filter(|parameter| {
            parameter.value.is_some()
                && !parameter.is_disabled
                && !parameter.is_hidden
                && !(parameter.has_empty_string_value() && !parameter.is_required)
        })
        .filter_map(|parameter| {
            parameter.value.clone().map(|value| (parameter.name.clone(), value))
        })
        .collect();

    values.insert(
        "purpose".to_string(),
        Value::String(state.purpose.clone().unwrap_or_default()),
    );
    values.insert(
        "purpose_activity".to_string(),
        Value::String(state.purpose_activity.clone().unwrap_or_default()),
    );
    values.insert(
        "purpose_explanation".to_string(),
        Value::String(state.purpose_explanation.clone().unwrap_or_default()),
    );
    let salesforce_id = state.salesforce.id.trim();
    if !salesforce_id.is_empty() {
        values.insert("salesforce_id".to_string(), Value::String(salesforce_id.to_string()));
        if let Some(sales_type) = state.salesforce.sales_type {
            values
                .insert("sales_type".to_string(), Value::String(sales_type.as_str().to_string()));
        }
    }
    values
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Where the caller should navigate after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Open the external URL; no local record was created.
    ExternalLink {
        /// Destination URL from the catalog item.
        url: Url,
    },
    /// Navigate to the created resource claim.
    Service {
        /// Namespace of the created claim.
        namespace: String,
        /// Name of the created claim.
        name: String,
    },
    /// Navigate to the created workshop.
    Workshop {
        /// Namespace of the created workshop.
        namespace: String,
        /// Name of the created workshop.
        name: String,
    },
}

/// Submission failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submit gate is not satisfied.
    #[error("form is not ready for submission")]
    NotReady,
    /// No service namespace is selected or available.
    #[error("no service namespace selected")]
    MissingNamespace,
    /// The catalog item declares an external URL that does not parse.
    #[error("catalog item external url is invalid")]
    InvalidExternalUrl,
    /// A creation call failed.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Submits the order, selecting the path by catalog item shape.
///
/// # Errors
///
/// Returns [`SubmissionError`] when the gate is unsatisfied, no namespace is
/// available, the external URL is invalid, or a creation call fails. In the
/// workshop path a failure after workshop creation leaves that workshop in
/// place; the user retries the provision from the visible record.
pub async fn submit_order(
    state: &FormState,
    session: &SessionContext,
    client: &dyn OrderClient,
) -> Result<SubmissionOutcome, SubmissionError> {
    if !check_enable_submit(state) {
        return Err(SubmissionError::NotReady);
    }

    let item = &state.catalog_item;
    if item.spec.external_url.is_some() {
        let url = item.external_url().ok_or(SubmissionError::InvalidExternalUrl)?;
        client.record_external_item_request(&external_item_request(state, session)).await?;
        return Ok(SubmissionOutcome::ExternalLink {
            url,
        });
    }

    let namespace =
        state.service_namespace.clone().ok_or(SubmissionError::MissingNamespace)?;
    let parameter_values = build_parameter_values(state);

    if let Some(workshop_form) = &state.workshop {
        let workshop = client
            .create_workshop(&WorkshopOrder {
                catalog_item_name: item.metadata.name.clone(),
                catalog_item_namespace: item.metadata.namespace.clone(),
                service_namespace: namespace,
                display_name: workshop_form.display_name.clone(),
                access_password: Some(workshop_form.access_password.clone()),
                open_registration: workshop_form.open_registration,
                description: workshop_form.description.clone(),
                start: state.dates.start,
                end: state.dates.end,
                white_gloved: state.white_gloved,
            })
            .await?;
        client
            .create_workshop_provision(&WorkshopProvisionOrder {
                workshop_name: workshop.metadata.name.clone(),
                workshop_namespace: workshop.metadata.namespace.clone(),
                catalog_item_name: item.metadata.name.clone(),
                catalog_item_namespace: item.metadata.namespace.clone(),
                count: workshop_form.provision_count,
                concurrency: workshop_form.provision_concurrency,
                start_delay: workshop_form.provision_start_delay,
                parameter_values,
                use_pool_if_available: state.use_pool_if_available,
                use_auto_detach: state.use_auto_detach,
            })
            .await?;
        return Ok(SubmissionOutcome::Workshop {
            namespace: workshop.metadata.namespace,
            name: workshop.metadata.name,
        });
    }

    let claim = client
        .create_service_request(&ServiceRequestOrder {
            catalog_item_name: item.metadata.name.clone(),
            catalog_item_namespace: item.metadata.namespace.clone(),
            service_namespace: namespace,
            parameter_values,
            start: state.dates.start,
            stop: state.dates.stop,
            end: state.dates.end,
            use_pool_if_available: state.use_pool_if_available,
            use_auto_detach: state.use_auto_detach,
            white_gloved: state.white_gloved,
        })
        .await?;
    Ok(SubmissionOutcome::Service {
        namespace: claim.metadata.namespace,
        name: claim.metadata.name,
    })
}

/// Builds the audit record for an external-link item.
fn external_item_request(state: &FormState, session: &SessionContext) -> ExternalItemRequest {
    let salesforce_id = state.salesforce.id.trim();
    ExternalItemRequest {
        asset_uuid: state.catalog_item.asset_uuid().map(ToString::to_string),
        requester: session.email.clone(),
        stage: state.catalog_item.stage(),
        purpose: state.purpose.clone(),
        purpose_activity: state.purpose_activity.clone(),
        purpose_explanation: state.purpose_explanation.clone(),
        salesforce_id: (!salesforce_id.is_empty()).then(|| salesforce_id.to_string()),
        sales_type: state
            .salesforce
            .sales_type
            .map(|sales_type| sales_type.as_str().to_string()),
    }
}
