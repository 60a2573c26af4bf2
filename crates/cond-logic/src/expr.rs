// crates/cond-logic/src/expr.rs
// ============================================================================
// Module: Condition Expression Tree
// Description: Parsed representation of condition expressions.
// Purpose: Decouple parsing from evaluation for reuse and testing.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The expression tree is the output of [`crate::parse_condition`] and the
//! input to [`crate::evaluate_expr`]. Literals reuse [`serde_json::Value`]
//! because parameter values arrive from JSON documents and only the scalar
//! subset (booleans, numbers, strings) is ever produced by the parser.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Binary operators supported by condition expressions.
///
/// # Invariants
/// - Variants are stable; evaluation dispatches exhaustively on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Logical AND (`&&`), short-circuiting.
    And,
    /// Logical OR (`||`), short-circuiting.
    Or,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    Ne,
    /// Less-than (`<`).
    Lt,
    /// Less-than-or-equal (`<=`).
    Le,
    /// Greater-than (`>`).
    Gt,
    /// Greater-than-or-equal (`>=`).
    Ge,
}

impl BinaryOp {
    /// Returns the operator symbol as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

// ============================================================================
// SECTION: Expression Tree
// ============================================================================

/// A parsed condition expression.
///
/// # Invariants
/// - `Literal` values are scalars (boolean, number, or string).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Scalar literal.
    Literal(Value),
    /// Identifier resolved against the value namespace at evaluation time.
    Ident(String),
    /// Logical negation.
    Not(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
}
