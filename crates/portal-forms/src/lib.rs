// crates/portal-forms/src/lib.rs
// ============================================================================
// Module: Portal Forms
// Description: Dynamic order-form state machine and submission builder.
// Purpose: Drive catalog item ordering from parameter specs to created orders.
// Dependencies: cond-logic, portal-core, rand, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Portal Forms turns a catalog item's parameter specification into a live
//! order form. State lives in one [`FormState`] value transformed by a pure
//! reducer; the asynchronous condition-evaluation pass computes per-field
//! visibility, requirement, and validity and commits its results through the
//! reducer under a generation check, so a superseded pass can never complete
//! the form. The submission builder filters the validated values into a
//! payload and drives one of the three creation paths (external link,
//! workshop, standard service order).

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod conditions;
pub mod reducer;
pub mod state;
pub mod submit;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use conditions::ConditionPassResult;
pub use conditions::ParameterConditionOutcome;
pub use conditions::SalesforceOutcome;
pub use conditions::evaluate_conditions;
pub use reducer::FormAction;
pub use reducer::reduce;
pub use state::ConditionChecks;
pub use state::FormState;
pub use state::FormStateParameter;
pub use state::FormStateParameterGroup;
pub use state::OrderDates;
pub use state::SalesType;
pub use state::SalesforceState;
pub use state::WorkshopForm;
pub use submit::SubmissionError;
pub use submit::SubmissionOutcome;
pub use submit::build_parameter_values;
pub use submit::check_enable_submit;
pub use submit::submit_order;
