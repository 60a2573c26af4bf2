// crates/cond-logic/src/lib.rs
// ============================================================================
// Module: Cond Logic Crate Root
// Description: Boolean condition expressions over form parameter values.
// Purpose: Evaluate disable/hide/require/validate conditions for dynamic forms.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//!
//! Cond Logic is a small, self-contained expression language used by dynamic
//! order forms. A condition is a boolean expression over the current values of
//! the form's parameters:
//!
//! ```text
//! platform == "ocp" && worker_count >= 3
//! !open_environment || region != "emea"
//! ```
//!
//! Conditions support boolean, integer, and string literals, identifiers
//! resolved against a caller-supplied value namespace, comparison operators
//! (`==`, `!=`, `<`, `<=`, `>`, `>=`), and boolean composition (`&&`, `||`,
//! `!`, parentheses). Evaluation is synchronous and pure; referencing an
//! undefined name or comparing incompatible types is an error, surfaced to
//! the caller as a per-parameter validation message.
//!
//! One asynchronous primitive is supported indirectly: the call-form
//! `check_external_id(param)` embeds an external identifier lookup in the
//! condition text. Callers discover the calls with
//! [`find_external_id_checks`], perform the lookups themselves, and replace
//! each call with its boolean result via [`substitute_external_id_checks`]
//! before evaluating the now-pure expression with [`evaluate`].
//!
//! Security posture: condition text is untrusted catalog data; input size and
//! nesting limits are enforced during parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod eval;
pub mod expr;
pub mod external;
mod parse;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use error::CondError;
pub use eval::ConditionValues;
pub use eval::evaluate;
pub use eval::evaluate_expr;
pub use expr::BinaryOp;
pub use expr::Expr;
pub use external::ExternalIdCheck;
pub use external::find_external_id_checks;
pub use external::substitute_external_id_checks;
pub use parse::parse_condition;
