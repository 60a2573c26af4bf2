// crates/cond-logic/src/eval.rs
// ============================================================================
// Module: Condition Evaluation
// Description: Evaluate expression trees against a value namespace.
// Purpose: Produce boolean outcomes for form conditions.
// Dependencies: crate::error, crate::expr, serde_json
// ============================================================================

//! ## Overview
//! Evaluation resolves identifiers against a caller-supplied namespace of
//! current parameter values and folds the tree to a boolean. Undefined names
//! and incompatible comparisons are errors rather than silent `false`, so a
//! broken condition in a catalog item surfaces as a validation message
//! instead of quietly disabling a field.
//!
//! Numeric comparison is performed on `f64` after lossless widening of
//! integer values; parameter values in this domain are small counts and
//! scores, well inside exact `f64` range.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::CondError;
use crate::expr::BinaryOp;
use crate::expr::Expr;
use crate::parse::parse_condition;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Namespace of current parameter values, keyed by parameter name.
///
/// Parameters without a value are simply absent; a condition referencing an
/// absent parameter fails with [`CondError::UndefinedName`].
pub type ConditionValues = BTreeMap<String, Value>;

/// Parses and evaluates a condition against the value namespace.
///
/// # Errors
/// Returns [`CondError`] on parse failure, undefined names, type mismatches,
/// or a non-boolean result.
pub fn evaluate(input: &str, values: &ConditionValues) -> Result<bool, CondError> {
    let expr = parse_condition(input)?;
    evaluate_expr(&expr, values)
}

/// Evaluates a parsed expression against the value namespace.
///
/// # Errors
/// Returns [`CondError`] on undefined names, type mismatches, or a
/// non-boolean result.
pub fn evaluate_expr(expr: &Expr, values: &ConditionValues) -> Result<bool, CondError> {
    match evaluate_value(expr, values)? {
        Value::Bool(result) => Ok(result),
        other => Err(CondError::NotBoolean {
            actual: type_label(&other),
        }),
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates an expression to a JSON scalar.
fn evaluate_value(expr: &Expr, values: &ConditionValues) -> Result<Value, CondError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => {
            values.get(name).cloned().ok_or_else(|| CondError::UndefinedName {
                name: name.clone(),
            })
        }
        Expr::Not(inner) => {
            let result = evaluate_expr(inner, values)?;
            Ok(Value::Bool(!result))
        }
        Expr::Binary {
            op,
            left,
            right,
        } => evaluate_binary(*op, left, right, values),
    }
}

/// Evaluates a binary operation, short-circuiting boolean composition.
fn evaluate_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    values: &ConditionValues,
) -> Result<Value, CondError> {
    match op {
        BinaryOp::And => {
            if evaluate_expr(left, values)? {
                Ok(Value::Bool(evaluate_expr(right, values)?))
            } else {
                Ok(Value::Bool(false))
            }
        }
        BinaryOp::Or => {
            if evaluate_expr(left, values)? {
                Ok(Value::Bool(true))
            } else {
                Ok(Value::Bool(evaluate_expr(right, values)?))
            }
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let left = evaluate_value(left, values)?;
            let right = evaluate_value(right, values)?;
            let equal = scalar_equals(&left, &right);
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let left = evaluate_value(left, values)?;
            let right = evaluate_value(right, values)?;
            let ordering = scalar_ordering(op, &left, &right)?;
            let result = match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Le => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::Ge => ordering.is_ge(),
                BinaryOp::And | BinaryOp::Or | BinaryOp::Eq | BinaryOp::Ne => false,
            };
            Ok(Value::Bool(result))
        }
    }
}

/// Compares scalars for equality, with numeric widening.
fn scalar_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left_num), Value::Number(right_num)) => {
            numeric(left_num.as_f64(), right_num.as_f64())
                .is_some_and(|(l, r)| l.total_cmp(&r).is_eq())
        }
        _ => left == right,
    }
}

/// Orders scalars for comparison operators.
fn scalar_ordering(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, CondError> {
    match (left, right) {
        (Value::Number(left_num), Value::Number(right_num)) => {
            numeric(left_num.as_f64(), right_num.as_f64())
                .and_then(|(l, r)| l.partial_cmp(&r))
                .ok_or(CondError::TypeMismatch {
                    operator: op.symbol(),
                    left: "number",
                    right: "number",
                })
        }
        (Value::String(left_str), Value::String(right_str)) => Ok(left_str.cmp(right_str)),
        _ => Err(CondError::TypeMismatch {
            operator: op.symbol(),
            left: type_label(left),
            right: type_label(right),
        }),
    }
}

/// Pairs two optional numeric values.
const fn numeric(left: Option<f64>, right: Option<f64>) -> Option<(f64, f64)> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l, r)),
        _ => None,
    }
}

/// Returns a stable type label for diagnostics.
const fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
