// crates/portal-forms/tests/submit.rs
// ============================================================================
// Module: Submission Tests
// Description: Tests for the submit gate, payload assembly, and order paths.
// ============================================================================
//! ## Overview
//! Validates gate behavior for required and empty-optional fields and drives
//! the three submission paths against a recording order client.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::sync::Mutex;

use async_trait::async_trait;
use portal_core::CatalogItem;
use portal_core::CatalogItemSpec;
use portal_core::CatalogItemSpecParameter;
use portal_core::ObjectMeta;
use portal_core::ResourceClaim;
use portal_core::ServiceNamespace;
use portal_core::SessionContext;
use portal_core::Workshop;
use portal_core::WorkshopProvision;
use portal_core::interfaces::ExternalItemRequest;
use portal_core::interfaces::OrderClient;
use portal_core::interfaces::OrderError;
use portal_core::interfaces::ServiceRequestOrder;
use portal_core::interfaces::WorkshopOrder;
use portal_core::interfaces::WorkshopProvisionOrder;
use portal_forms::ConditionPassResult;
use portal_forms::FormAction;
use portal_forms::FormState;
use portal_forms::ParameterConditionOutcome;
use portal_forms::SalesforceOutcome;
use portal_forms::SubmissionError;
use portal_forms::SubmissionOutcome;
use portal_forms::WorkshopForm;
use portal_forms::build_parameter_values;
use portal_forms::check_enable_submit;
use portal_forms::reduce;
use portal_forms::submit_order;
use serde_json::json;

/// Order client recording every call.
#[derive(Default)]
struct RecordingOrderClient {
    /// Service orders received.
    service_orders: Mutex<Vec<ServiceRequestOrder>>,
    /// Workshop orders received.
    workshop_orders: Mutex<Vec<WorkshopOrder>>,
    /// Provision orders received.
    provision_orders: Mutex<Vec<WorkshopProvisionOrder>>,
    /// Audit writes received.
    external_requests: Mutex<Vec<ExternalItemRequest>>,
    /// Fail provision creation to exercise the orphaned-workshop path.
    fail_provision: bool,
}

#[async_trait]
impl OrderClient for RecordingOrderClient {
    async fn create_service_request(
        &self,
        order: &ServiceRequestOrder,
    ) -> Result<ResourceClaim, OrderError> {
        self.service_orders.lock().unwrap().push(order.clone());
        Ok(ResourceClaim {
            metadata: ObjectMeta {
                name: format!("{}-instance", order.catalog_item_name),
                namespace: order.service_namespace.clone(),
                uid: "claim-uid".to_string(),
                ..ObjectMeta::default()
            },
            status: None,
        })
    }

    async fn create_workshop(&self, order: &WorkshopOrder) -> Result<Workshop, OrderError> {
        self.workshop_orders.lock().unwrap().push(order.clone());
        Ok(Workshop {
            metadata: ObjectMeta {
                name: format!("{}-workshop", order.catalog_item_name),
                namespace: order.service_namespace.clone(),
                uid: "workshop-uid".to_string(),
                ..ObjectMeta::default()
            },
            ..Workshop::default()
        })
    }

    async fn create_workshop_provision(
        &self,
        order: &WorkshopProvisionOrder,
    ) -> Result<WorkshopProvision, OrderError> {
        if self.fail_provision {
            return Err(OrderError::Backend("provision rejected".to_string()));
        }
        self.provision_orders.lock().unwrap().push(order.clone());
        Ok(WorkshopProvision::default())
    }

    async fn record_external_item_request(
        &self,
        request: &ExternalItemRequest,
    ) -> Result<(), OrderError> {
        self.external_requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Builds a catalog item carrying the given parameters.
fn item_with_parameters(parameters: Vec<CatalogItemSpecParameter>) -> CatalogItem {
    CatalogItem {
        metadata: ObjectMeta {
            name: "sandbox".to_string(),
            namespace: "catalog-prod".to_string(),
            ..ObjectMeta::default()
        },
        spec: CatalogItemSpec {
            parameters,
            ..CatalogItemSpec::default()
        },
    }
}

/// Builds a plain text parameter.
fn text_parameter(name: &str, required: bool) -> CatalogItemSpecParameter {
    CatalogItemSpecParameter {
        name: name.to_string(),
        required,
        ..CatalogItemSpecParameter::default()
    }
}

/// Builds a session granting one service namespace.
fn session() -> SessionContext {
    SessionContext {
        email: "user@example.com".to_string(),
        service_namespaces: vec![ServiceNamespace {
            name: "user-sandbox".to_string(),
            display_name: None,
        }],
        ..SessionContext::default()
    }
}

/// Commits an empty condition pass so the gate sees completed conditions.
fn complete_conditions(state: &FormState) -> FormState {
    let outcomes = state
        .parameters
        .values()
        .map(|parameter| ParameterConditionOutcome {
            name: parameter.name.clone(),
            is_disabled: false,
            is_hidden: false,
            is_required: parameter.spec.required,
            validation_result: None,
            validation_message: None,
        })
        .collect();
    reduce(state, FormAction::ApplyConditionPass(ConditionPassResult {
        generation: state.generation,
        parameters: outcomes,
        salesforce: SalesforceOutcome::default(),
    }))
}

#[test]
fn required_parameter_without_value_blocks_submission() {
    let item = item_with_parameters(vec![text_parameter("cluster_name", true)]);
    let state = complete_conditions(&FormState::init(&item, &session()));
    assert!(!check_enable_submit(&state));

    let state = reduce(&state, FormAction::ParameterUpdate {
        name: "cluster_name".to_string(),
        value: Some(json!("foo")),
        is_valid: Some(true),
    });
    // The edit invalidates conditions; the gate stays closed until the next
    // pass commits.
    assert!(!check_enable_submit(&state));
    let state = complete_conditions(&state);
    assert!(check_enable_submit(&state));
}

#[test]
fn empty_optional_field_does_not_block_submission() {
    let mut optional = text_parameter("notes", false);
    optional.value = Some(json!(""));
    let item = item_with_parameters(vec![optional]);
    let mut state = complete_conditions(&FormState::init(&item, &session()));
    if let Some(parameter) = state.parameters.get_mut("notes") {
        parameter.validation_result = Some(false);
    }
    assert!(check_enable_submit(&state));
}

#[test]
fn terms_of_service_gate_requires_agreement() {
    let mut item = item_with_parameters(vec![]);
    item.spec.terms_of_service = Some("usage terms".to_string());
    let state = complete_conditions(&FormState::init(&item, &session()));
    assert!(!check_enable_submit(&state));
    let agreed = reduce(&state, FormAction::TermsOfServiceAgreed(true));
    assert!(check_enable_submit(&agreed));
}

#[test]
fn payload_excludes_hidden_disabled_and_empty_optional_values() {
    let mut visible = text_parameter("cluster_name", true);
    visible.value = Some(json!("foo"));
    let mut hidden = text_parameter("secret", false);
    hidden.value = Some(json!("x"));
    let mut empty_optional = text_parameter("notes", false);
    empty_optional.value = Some(json!(""));
    let item = item_with_parameters(vec![visible, hidden, empty_optional]);
    let mut state = complete_conditions(&FormState::init(&item, &session()));
    if let Some(parameter) = state.parameters.get_mut("secret") {
        parameter.is_hidden = true;
    }

    let values = build_parameter_values(&state);
    assert_eq!(values.get("cluster_name"), Some(&json!("foo")));
    assert!(!values.contains_key("secret"));
    assert!(!values.contains_key("notes"));
    assert!(values.contains_key("purpose"));
    assert!(values.contains_key("purpose_activity"));
    assert!(values.contains_key("purpose_explanation"));
    assert!(!values.contains_key("salesforce_id"));
}

#[tokio::test]
async fn standard_order_creates_claim_and_navigates() {
    let item = item_with_parameters(vec![text_parameter("cluster_name", true)]);
    let state = FormState::init(&item, &session());
    let state = reduce(&state, FormAction::ParameterUpdate {
        name: "cluster_name".to_string(),
        value: Some(json!("foo")),
        is_valid: Some(true),
    });
    let state = complete_conditions(&state);

    let client = RecordingOrderClient::default();
    let outcome = submit_order(&state, &session(), &client).await.unwrap();
    assert_eq!(outcome, SubmissionOutcome::Service {
        namespace: "user-sandbox".to_string(),
        name: "sandbox-instance".to_string(),
    });

    let orders = client.service_orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].parameter_values.get("cluster_name"), Some(&json!("foo")));
    assert!(orders[0].parameter_values.contains_key("purpose"));
    assert!(orders[0].use_pool_if_available);
}

#[tokio::test]
async fn workshop_order_creates_workshop_then_provision() {
    let item = item_with_parameters(vec![]);
    let state = FormState::init(&item, &session());
    let workshop = WorkshopForm::defaults(&state.catalog_item);
    let state = reduce(&state, FormAction::Workshop(Some(workshop)));
    let state = complete_conditions(&state);

    let client = RecordingOrderClient::default();
    let outcome = submit_order(&state, &session(), &client).await.unwrap();
    assert_eq!(outcome, SubmissionOutcome::Workshop {
        namespace: "user-sandbox".to_string(),
        name: "sandbox-workshop".to_string(),
    });

    let provisions = client.provision_orders.lock().unwrap();
    assert_eq!(provisions.len(), 1);
    assert_eq!(provisions[0].workshop_name, "sandbox-workshop");
    assert_eq!(provisions[0].count, 1);
}

#[tokio::test]
async fn provision_failure_leaves_workshop_created() {
    let item = item_with_parameters(vec![]);
    let state = FormState::init(&item, &session());
    let workshop = WorkshopForm::defaults(&state.catalog_item);
    let state = reduce(&state, FormAction::Workshop(Some(workshop)));
    let state = complete_conditions(&state);

    let client = RecordingOrderClient {
        fail_provision: true,
        ..RecordingOrderClient::default()
    };
    let result = submit_order(&state, &session(), &client).await;
    assert!(matches!(result, Err(SubmissionError::Order(_))));
    // The workshop creation already happened and is visible for retry.
    assert_eq!(client.workshop_orders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn external_link_item_records_audit_and_yields_url() {
    let mut item = item_with_parameters(vec![]);
    item.spec.external_url = Some("https://labs.example.com/start".to_string());
    let state = complete_conditions(&FormState::init(&item, &session()));

    let client = RecordingOrderClient::default();
    let outcome = submit_order(&state, &session(), &client).await.unwrap();
    let SubmissionOutcome::ExternalLink {
        url,
    } = outcome
    else {
        panic!("expected external link outcome");
    };
    assert_eq!(url.as_str(), "https://labs.example.com/start");
    assert_eq!(client.external_requests.lock().unwrap().len(), 1);
    assert!(client.service_orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unsatisfied_gate_refuses_submission() {
    let item = item_with_parameters(vec![text_parameter("cluster_name", true)]);
    let state = complete_conditions(&FormState::init(&item, &session()));
    let client = RecordingOrderClient::default();
    let result = submit_order(&state, &session(), &client).await;
    assert!(matches!(result, Err(SubmissionError::NotReady)));
}
