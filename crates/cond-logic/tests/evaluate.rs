// crates/cond-logic/tests/evaluate.rs
// ============================================================================
// Module: Condition Evaluation Tests
// Description: Validate parsing and evaluation of condition expressions.
// Purpose: Ensure condition outcomes and failures are deterministic.
// Dependencies: cond-logic, serde_json
// ============================================================================

//! Behavior tests for the condition expression language.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use cond_logic::CondError;
use cond_logic::ConditionValues;
use cond_logic::evaluate;
use serde_json::json;

/// Builds a namespace from name/value pairs.
fn values(pairs: &[(&str, serde_json::Value)]) -> ConditionValues {
    pairs.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect()
}

#[test]
fn evaluates_boolean_composition() {
    let vars = values(&[("a", json!(true)), ("b", json!(false))]);
    assert_eq!(evaluate("a && !b", &vars), Ok(true));
    assert_eq!(evaluate("a && b", &vars), Ok(false));
    assert_eq!(evaluate("b || a", &vars), Ok(true));
    assert_eq!(evaluate("(a || b) && (b || a)", &vars), Ok(true));
}

#[test]
fn evaluates_equality_on_scalars() {
    let vars = values(&[("platform", json!("ocp")), ("count", json!(3))]);
    assert_eq!(evaluate("platform == \"ocp\"", &vars), Ok(true));
    assert_eq!(evaluate("platform != 'aws'", &vars), Ok(true));
    assert_eq!(evaluate("count == 3", &vars), Ok(true));
    assert_eq!(evaluate("count == 3.0", &vars), Ok(true));
    assert_eq!(evaluate("count != 4", &vars), Ok(true));
}

#[test]
fn evaluates_numeric_ordering() {
    let vars = values(&[("workers", json!(5))]);
    assert_eq!(evaluate("workers >= 3", &vars), Ok(true));
    assert_eq!(evaluate("workers < 5", &vars), Ok(false));
    assert_eq!(evaluate("workers <= 5 && workers > 4", &vars), Ok(true));
    assert_eq!(evaluate("workers > -1", &vars), Ok(true));
}

#[test]
fn evaluates_string_ordering_lexicographically() {
    let vars = values(&[("name", json!("beta"))]);
    assert_eq!(evaluate("name > \"alpha\"", &vars), Ok(true));
    assert_eq!(evaluate("name >= 'beta'", &vars), Ok(true));
    assert_eq!(evaluate("name < \"alpha\"", &vars), Ok(false));
}

#[test]
fn undefined_name_is_an_error() {
    let vars = values(&[]);
    assert_eq!(
        evaluate("missing == 1", &vars),
        Err(CondError::UndefinedName {
            name: "missing".to_string(),
        }),
    );
}

#[test]
fn short_circuit_skips_undefined_right_operand() {
    let vars = values(&[("enabled", json!(false))]);
    // `&&` must not evaluate the right side when the left is false.
    assert_eq!(evaluate("enabled && missing == 1", &vars), Ok(false));
    let vars = values(&[("enabled", json!(true))]);
    assert_eq!(evaluate("enabled || missing == 1", &vars), Ok(true));
}

#[test]
fn type_mismatch_is_an_error() {
    let vars = values(&[("platform", json!("ocp")), ("count", json!(3))]);
    assert!(matches!(
        evaluate("platform > count", &vars),
        Err(CondError::TypeMismatch { .. }),
    ));
}

#[test]
fn non_boolean_result_is_an_error() {
    let vars = values(&[("count", json!(3))]);
    assert_eq!(
        evaluate("count", &vars),
        Err(CondError::NotBoolean {
            actual: "number",
        }),
    );
}

#[test]
fn parse_failures_are_structured() {
    let vars = values(&[]);
    assert_eq!(evaluate("", &vars), Err(CondError::EmptyInput));
    assert_eq!(evaluate("   ", &vars), Err(CondError::EmptyInput));
    assert!(matches!(evaluate("a = 1", &vars), Err(CondError::UnexpectedToken { .. })));
    assert!(matches!(evaluate("a == ", &vars), Err(CondError::UnexpectedToken { .. })));
    assert!(matches!(evaluate("a == 'open", &vars), Err(CondError::UnterminatedString { .. })));
    assert!(matches!(evaluate("true true", &vars), Err(CondError::TrailingInput { .. })));
}

#[test]
fn nesting_limit_is_enforced() {
    let vars = values(&[]);
    let mut deep = String::new();
    for _ in 0 .. 40 {
        deep.push('(');
    }
    deep.push_str("true");
    for _ in 0 .. 40 {
        deep.push(')');
    }
    assert!(matches!(evaluate(&deep, &vars), Err(CondError::NestingTooDeep { .. })));
}

#[test]
fn comparison_binds_tighter_than_equality_and_boolean_ops() {
    let vars = values(&[("a", json!(2)), ("b", json!(3))]);
    // Parsed as (a < b) == true, not a < (b == true).
    assert_eq!(evaluate("a < b == true", &vars), Ok(true));
    // Parsed as (a < b) && (b < 10).
    assert_eq!(evaluate("a < b && b < 10", &vars), Ok(true));
}
