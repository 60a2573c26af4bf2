// crates/cond-logic/src/error.rs
// ============================================================================
// Module: Condition Errors
// Description: Structured parse and evaluation failures for conditions.
// Purpose: Surface condition problems as per-parameter validation messages.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Errors carry byte positions into the original condition text where they
//! are meaningful, so form tooling can point at the offending token. Variants
//! are stable; callers convert them to display strings for validation
//! messages and never match on message text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Errors raised while parsing or evaluating a condition expression.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CondError {
    /// Input was empty or contained only whitespace.
    #[error("condition is empty")]
    EmptyInput,
    /// Input exceeded the configured size limit.
    #[error("condition exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Input exceeded the configured nesting depth.
    #[error("condition nesting exceeds limit: depth {actual_depth} (max {max_depth}) at {position}")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Actual nesting depth when the error occurred.
        actual_depth: usize,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Unexpected token encountered during parsing.
    #[error("unexpected token `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// The token that was actually seen.
        found: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// String literal was not terminated before end of input.
    #[error("unterminated string literal at {position}")]
    UnterminatedString {
        /// Byte offset where the literal begins.
        position: usize,
    },
    /// Numeric literal failed to parse.
    #[error("invalid number `{raw}` at {position}")]
    InvalidNumber {
        /// The raw numeric text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Unexpected trailing input after a complete expression.
    #[error("unexpected trailing input at {position}")]
    TrailingInput {
        /// Byte offset where unexpected input begins.
        position: usize,
    },
    /// Expression referenced a name absent from the value namespace.
    #[error("undefined name `{name}`")]
    UndefinedName {
        /// The unresolved identifier.
        name: String,
    },
    /// Operands of an operator had incompatible types.
    #[error("type mismatch: cannot apply `{operator}` to {left} and {right}")]
    TypeMismatch {
        /// Operator symbol as written.
        operator: &'static str,
        /// Type label of the left operand.
        left: &'static str,
        /// Type label of the right operand.
        right: &'static str,
    },
    /// Expression evaluated to a non-boolean value.
    #[error("condition did not evaluate to a boolean (got {actual})")]
    NotBoolean {
        /// Type label of the final value.
        actual: &'static str,
    },
    /// External-id substitution received a result count that does not match
    /// the number of discovered calls.
    #[error("external id substitution mismatch: {calls} calls, {results} results")]
    SubstitutionMismatch {
        /// Number of `check_external_id` calls discovered.
        calls: usize,
        /// Number of results supplied.
        results: usize,
    },
}
