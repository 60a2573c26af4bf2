// crates/portal-forms/tests/reducer.rs
// ============================================================================
// Module: Form Reducer Tests
// Description: Tests for initialization, edits, and pass supersession.
// ============================================================================
//! ## Overview
//! Validates default application at init, condition invalidation on edits,
//! and that a superseded condition pass can never commit.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use portal_core::CatalogItem;
use portal_core::CatalogItemSpec;
use portal_core::CatalogItemSpecParameter;
use portal_core::ObjectMeta;
use portal_core::ParameterSchema;
use portal_core::SessionContext;
use portal_forms::ConditionPassResult;
use portal_forms::FormAction;
use portal_forms::FormState;
use portal_forms::SalesforceOutcome;
use portal_forms::WorkshopForm;
use portal_forms::reduce;
use serde_json::json;

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

/// Builds an empty pass result for the given generation.
fn pass_result(generation: u64) -> ConditionPassResult {
    ConditionPassResult {
        generation,
        parameters: Vec::new(),
        salesforce: SalesforceOutcome::default(),
    }
}

#[test]
fn init_applies_schema_default_over_bare_value() {
    let mut parameter = text_parameter("size", false);
    parameter.value = Some(json!("small"));
    parameter.schema = Some(ParameterSchema {
        default: Some(json!("large")),
        ..ParameterSchema::default()
    });
    let item = item_with_parameters(vec![parameter]);
    let session = SessionContext::default();

    let first = FormState::init(&item, &session);
    let second = FormState::init(&item, &session);
    assert_eq!(first.parameters["size"].value, Some(json!("large")));
    assert_eq!(first.parameters["size"].default, Some(json!("large")));
    assert_eq!(first.parameters["size"].value, second.parameters["size"].value);

    // Edits move the value; the captured default stays put.
    let edited = reduce(&first, FormAction::ParameterUpdate {
        name: "size".to_string(),
        value: Some(json!("medium")),
        is_valid: Some(true),
    });
    assert_eq!(edited.parameters["size"].value, Some(json!("medium")));
    assert_eq!(edited.parameters["size"].default, Some(json!("large")));
}

#[test]
fn init_captures_purpose_options_and_admin_defaults() {
    let mut purpose = text_parameter("purpose", true);
    purpose.schema = Some(ParameterSchema {
        options: vec![json!("Development"), json!("Customer Activity")],
        ..ParameterSchema::default()
    });
    let state = FormState::init(&item_with_parameters(vec![purpose]), &SessionContext::default());

    assert_eq!(state.purpose_options, vec!["Development", "Customer Activity"]);
    assert!(state.use_pool_if_available);
    assert!(state.use_auto_detach);
    assert!(!state.white_gloved);
    assert!(!state.condition_checks.complete);
}

#[test]
fn parameter_update_resets_conditions_and_bumps_generation() {
    let item = item_with_parameters(vec![text_parameter("size", true)]);
    let state = FormState::init(&item, &SessionContext::default());
    let completed = reduce(&state, FormAction::ApplyConditionPass(pass_result(state.generation)));
    assert!(completed.condition_checks.complete);

    let edited = reduce(&completed, FormAction::ParameterUpdate {
        name: "size".to_string(),
        value: Some(json!("medium")),
        is_valid: Some(true),
    });
    assert_eq!(edited.generation, completed.generation + 1);
    assert!(!edited.condition_checks.complete);
    assert_eq!(edited.parameters["size"].value, Some(json!("medium")));
}

#[test]
fn stale_pass_never_completes_the_form() {
    let item = item_with_parameters(vec![text_parameter("size", true)]);
    let state = FormState::init(&item, &SessionContext::default());
    let running = reduce(&state, FormAction::BeginConditionPass);
    let stale_generation = running.generation;

    // The edit supersedes the in-flight pass.
    let edited = reduce(&running, FormAction::ParameterUpdate {
        name: "size".to_string(),
        value: Some(json!("large")),
        is_valid: None,
    });
    let after_stale = reduce(&edited, FormAction::ApplyConditionPass(pass_result(stale_generation)));
    assert!(!after_stale.condition_checks.complete);
    assert!(!after_stale.init_complete);

    let after_current =
        reduce(&after_stale, FormAction::ApplyConditionPass(pass_result(after_stale.generation)));
    assert!(after_current.condition_checks.complete);
    assert!(after_current.init_complete);
}

#[test]
fn reinit_supersedes_passes_from_the_previous_form() {
    let item = item_with_parameters(vec![text_parameter("size", true)]);
    let state = FormState::init(&item, &SessionContext::default());
    let old_generation = state.generation;

    let reinitialized = reduce(&state, FormAction::Init {
        catalog_item: Box::new(item),
        session: SessionContext::default(),
    });
    assert_ne!(reinitialized.generation, old_generation);
    let applied =
        reduce(&reinitialized, FormAction::ApplyConditionPass(pass_result(old_generation)));
    assert!(!applied.condition_checks.complete);
}

#[test]
fn auxiliary_actions_leave_condition_tracking_alone() {
    let item = item_with_parameters(vec![text_parameter("size", true)]);
    let state = FormState::init(&item, &SessionContext::default());
    let completed = reduce(&state, FormAction::ApplyConditionPass(pass_result(state.generation)));

    let toggled = reduce(&completed, FormAction::TermsOfServiceAgreed(true));
    let toggled = reduce(&toggled, FormAction::WhiteGloved(true));
    let workshop = WorkshopForm::defaults(&toggled.catalog_item);
    let toggled = reduce(&toggled, FormAction::Workshop(Some(workshop)));
    assert!(toggled.condition_checks.complete);
    assert_eq!(toggled.generation, completed.generation);
    assert!(toggled.terms_of_service_agreed);
    assert!(toggled.white_gloved);
    assert!(toggled.workshop.is_some());
}

#[test]
fn salesforce_edit_forces_reverification() {
    let item = item_with_parameters(vec![]);
    let state = FormState::init(&item, &SessionContext::default());
    let completed = reduce(&state, FormAction::ApplyConditionPass(pass_result(state.generation)));

    let edited = reduce(&completed, FormAction::SalesforceId {
        value: "OPP-1234".to_string(),
        sales_type: Some(portal_forms::SalesType::Opportunity),
        skip: false,
    });
    assert!(!edited.condition_checks.complete);
    assert_eq!(edited.generation, completed.generation + 1);
    assert_eq!(edited.salesforce.valid, None);
}

#[test]
fn workshop_defaults_follow_multiuser_flag() {
    let mut item = item_with_parameters(vec![]);
    let single = WorkshopForm::defaults(&item);
    assert_eq!(single.provision_count, 1);
    assert_eq!(single.provision_concurrency, 10);
    assert_eq!(single.provision_start_delay, 30);
    assert_eq!(single.access_password.len(), 8);
    assert!(single.open_registration);

    item.spec.multiuser = true;
    assert_eq!(WorkshopForm::defaults(&item).provision_concurrency, 1);
}
