// crates/cond-logic/src/external.rs
// ============================================================================
// Module: External Identifier Calls
// Description: Discovery and substitution of check_external_id call-forms.
// Purpose: Let callers resolve asynchronous lookups before pure evaluation.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! Conditions may embed `check_external_id(param)` calls whose results come
//! from an asynchronous external lookup. The evaluator itself stays pure, so
//! the caller drives a three-step protocol:
//!
//! 1. [`find_external_id_checks`] discovers calls left-to-right.
//! 2. The caller resolves each referenced parameter's current value through
//!    its verification client, producing one boolean per call.
//! 3. [`substitute_external_id_checks`] replaces each call, in original input
//!    order, with `true` or `false`, yielding a pure boolean expression.
//!
//! Discovery is textual but string-literal aware: a call-form inside a quoted
//! literal is not a call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::error::CondError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Identifier introducing an external-id call-form.
const CALL_IDENT: &str = "check_external_id";

// ============================================================================
// SECTION: Public Types
// ============================================================================

/// One discovered `check_external_id` call.
///
/// # Invariants
/// - `start .. end` is the byte span of the full call-form in the input.
/// - `parameter` is the identifier between the parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdCheck {
    /// Name of the parameter whose value should be looked up.
    pub parameter: String,
    /// Byte offset where the call-form begins.
    pub start: usize,
    /// Byte offset one past the closing parenthesis.
    pub end: usize,
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Discovers `check_external_id(param)` calls in left-to-right input order.
#[must_use]
pub fn find_external_id_checks(input: &str) -> Vec<ExternalIdCheck> {
    let bytes = input.as_bytes();
    let mut checks = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        match bytes[offset] {
            quote @ (b'"' | b'\'') => {
                offset += 1;
                while offset < bytes.len() && bytes[offset] != quote {
                    offset += 1;
                }
                offset += 1;
            }
            b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                let start = offset;
                while offset < bytes.len() && (bytes[offset].is_ascii_alphanumeric() || bytes[offset] == b'_') {
                    offset += 1;
                }
                if &input[start .. offset] == CALL_IDENT
                    && let Some((parameter, end)) = parse_call_args(input, offset)
                {
                    checks.push(ExternalIdCheck {
                        parameter,
                        start,
                        end,
                    });
                    offset = end;
                }
            }
            _ => {
                offset += 1;
            }
        }
    }
    checks
}

/// Parses `( ident )` starting at `offset`, returning the identifier and the
/// offset one past the closing parenthesis.
fn parse_call_args(input: &str, offset: usize) -> Option<(String, usize)> {
    let bytes = input.as_bytes();
    let mut pos = skip_spaces(bytes, offset);
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    pos = skip_spaces(bytes, pos + 1);
    let ident_start = pos;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
        pos += 1;
    }
    if pos == ident_start {
        return None;
    }
    let parameter = input[ident_start .. pos].to_string();
    pos = skip_spaces(bytes, pos);
    if bytes.get(pos) != Some(&b')') {
        return None;
    }
    Some((parameter, pos + 1))
}

/// Skips ASCII whitespace starting at `offset`.
fn skip_spaces(bytes: &[u8], mut offset: usize) -> usize {
    while offset < bytes.len() && bytes[offset].is_ascii_whitespace() {
        offset += 1;
    }
    offset
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

/// Replaces each discovered call, in original input order, with its boolean
/// result, yielding a pure condition expression.
///
/// # Errors
/// Returns [`CondError::SubstitutionMismatch`] when `results` does not have
/// one entry per discovered call.
pub fn substitute_external_id_checks(input: &str, results: &[bool]) -> Result<String, CondError> {
    let checks = find_external_id_checks(input);
    if checks.len() != results.len() {
        return Err(CondError::SubstitutionMismatch {
            calls: checks.len(),
            results: results.len(),
        });
    }

    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;
    for (check, result) in checks.iter().zip(results) {
        output.push_str(&input[cursor .. check.start]);
        output.push_str(if *result { "true" } else { "false" });
        cursor = check.end;
    }
    output.push_str(&input[cursor ..]);
    Ok(output)
}
