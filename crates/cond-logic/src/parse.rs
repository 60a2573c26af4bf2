// crates/cond-logic/src/parse.rs
// ============================================================================
// Module: Condition Parser
// Description: Lexer and recursive-descent parser for condition text.
// Purpose: Turn untrusted condition strings into expression trees.
// Dependencies: crate::error, crate::expr, serde_json
// ============================================================================

//! ## Overview
//! The grammar, informally, with standard precedence (tightest last):
//!
//! - **Or**: `a || b`
//! - **And**: `a && b`
//! - **Equality**: `a == b`, `a != b`
//! - **Comparison**: `a < b`, `a <= b`, `a > b`, `a >= b`
//! - **Unary**: `!a`
//! - **Primary**: identifiers, `true`/`false`, numbers (optionally signed,
//!   optionally fractional), single- or double-quoted strings (no escape
//!   sequences), and parenthesized expressions.
//!
//! Condition text is untrusted catalog data; size and nesting limits are
//! enforced here so a hostile catalog item cannot exhaust the parser.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Number;
use serde_json::Value;

use crate::error::CondError;
use crate::expr::BinaryOp;
use crate::expr::Expr;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum allowed condition input size in bytes.
const MAX_INPUT_BYTES: usize = 64 * 1024;
/// Maximum supported nesting depth for parenthesized expressions.
const MAX_NESTING: usize = 32;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses condition text into an expression tree.
///
/// # Errors
/// Returns [`CondError`] for empty or oversized input, lexical errors,
/// malformed expressions, or trailing input.
pub fn parse_condition(input: &str) -> Result<Expr, CondError> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(CondError::InputTooLarge {
            max_bytes: MAX_INPUT_BYTES,
            actual_bytes: input.len(),
        });
    }
    let mut lexer = Lexer::new(input);
    let tokens = lexer.lex()?;

    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expr)
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Lexer token produced from condition input.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Identifier token.
    Ident(String),
    /// Numeric literal token (raw text).
    Number(String),
    /// String literal token (unquoted content).
    Str(String),
    /// Boolean literal `true`.
    True,
    /// Boolean literal `false`.
    False,
    /// Logical AND operator.
    And,
    /// Logical OR operator.
    Or,
    /// Logical NOT operator.
    Not,
    /// Equality operator.
    EqEq,
    /// Inequality operator.
    NotEq,
    /// Less-than operator.
    Lt,
    /// Less-than-or-equal operator.
    Le,
    /// Greater-than operator.
    Gt,
    /// Greater-than-or-equal operator.
    Ge,
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// End-of-input marker.
    Eof,
}

/// Token paired with its byte offset.
#[derive(Debug, Clone)]
struct SpannedToken {
    /// Token value.
    token: Token,
    /// Byte offset into the input.
    position: usize,
}

/// Lexer for condition text.
struct Lexer<'a> {
    /// Source input being tokenized.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
        }
    }

    /// Lexes the input into a sequence of tokens.
    fn lex(&mut self) -> Result<Vec<SpannedToken>, CondError> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();

        while self.offset < bytes.len() {
            let start = self.offset;
            let ch = bytes[self.offset];
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                }
                b'(' => {
                    tokens.push(Self::spanned(Token::LParen, start));
                    self.offset += 1;
                }
                b')' => {
                    tokens.push(Self::spanned(Token::RParen, start));
                    self.offset += 1;
                }
                b'!' => {
                    if self.peek(bytes) == Some(b'=') {
                        tokens.push(Self::spanned(Token::NotEq, start));
                        self.offset += 2;
                    } else {
                        tokens.push(Self::spanned(Token::Not, start));
                        self.offset += 1;
                    }
                }
                b'=' => {
                    if self.peek(bytes) == Some(b'=') {
                        tokens.push(Self::spanned(Token::EqEq, start));
                        self.offset += 2;
                    } else {
                        return Err(CondError::UnexpectedToken {
                            expected: "==",
                            found: "=".to_string(),
                            position: start,
                        });
                    }
                }
                b'<' => {
                    if self.peek(bytes) == Some(b'=') {
                        tokens.push(Self::spanned(Token::Le, start));
                        self.offset += 2;
                    } else {
                        tokens.push(Self::spanned(Token::Lt, start));
                        self.offset += 1;
                    }
                }
                b'>' => {
                    if self.peek(bytes) == Some(b'=') {
                        tokens.push(Self::spanned(Token::Ge, start));
                        self.offset += 2;
                    } else {
                        tokens.push(Self::spanned(Token::Gt, start));
                        self.offset += 1;
                    }
                }
                b'&' => {
                    if self.peek(bytes) == Some(b'&') {
                        tokens.push(Self::spanned(Token::And, start));
                        self.offset += 2;
                    } else {
                        return Err(CondError::UnexpectedToken {
                            expected: "&&",
                            found: "&".to_string(),
                            position: start,
                        });
                    }
                }
                b'|' => {
                    if self.peek(bytes) == Some(b'|') {
                        tokens.push(Self::spanned(Token::Or, start));
                        self.offset += 2;
                    } else {
                        return Err(CondError::UnexpectedToken {
                            expected: "||",
                            found: "|".to_string(),
                            position: start,
                        });
                    }
                }
                b'"' | b'\'' => {
                    tokens.push(self.lex_string(bytes, ch)?);
                }
                b'0' ..= b'9' => {
                    tokens.push(self.lex_number(bytes, start));
                }
                b'-' => {
                    if self.peek(bytes).is_some_and(|b| b.is_ascii_digit()) {
                        self.offset += 1;
                        tokens.push(self.lex_number(bytes, start));
                    } else {
                        return Err(CondError::UnexpectedToken {
                            expected: "numeric literal after `-`",
                            found: "-".to_string(),
                            position: start,
                        });
                    }
                }
                b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                    self.consume_while(bytes, |b| b.is_ascii_alphanumeric() || b == b'_');
                    let slice = &self.input[start .. self.offset];
                    tokens.push(Self::spanned(Self::keyword_or_ident(slice), start));
                }
                _ => {
                    return Err(CondError::UnexpectedToken {
                        expected: "identifier, literal, or operator",
                        found: char::from(ch).to_string(),
                        position: start,
                    });
                }
            }
        }

        if tokens.is_empty() {
            return Err(CondError::EmptyInput);
        }

        tokens.push(Self::spanned(Token::Eof, self.offset));
        Ok(tokens)
    }

    /// Lexes a quoted string literal.
    fn lex_string(&mut self, bytes: &[u8], quote: u8) -> Result<SpannedToken, CondError> {
        let start = self.offset;
        self.offset += 1;
        let content_start = self.offset;
        while let Some(&b) = bytes.get(self.offset) {
            if b == quote {
                let content = self.input[content_start .. self.offset].to_string();
                self.offset += 1;
                return Ok(Self::spanned(Token::Str(content), start));
            }
            self.offset += 1;
        }
        Err(CondError::UnterminatedString {
            position: start,
        })
    }

    /// Lexes a numeric literal starting at the current offset.
    fn lex_number(&mut self, bytes: &[u8], start: usize) -> SpannedToken {
        self.consume_while(bytes, |b| b.is_ascii_digit());
        if bytes.get(self.offset) == Some(&b'.')
            && bytes.get(self.offset + 1).is_some_and(u8::is_ascii_digit)
        {
            self.offset += 1;
            self.consume_while(bytes, |b| b.is_ascii_digit());
        }
        SpannedToken {
            token: Token::Number(self.input[start .. self.offset].to_string()),
            position: start,
        }
    }

    /// Builds a token at the given offset.
    const fn spanned(token: Token, position: usize) -> SpannedToken {
        SpannedToken {
            token,
            position,
        }
    }

    /// Returns the next byte without advancing.
    fn peek(&self, bytes: &[u8]) -> Option<u8> {
        bytes.get(self.offset + 1).copied()
    }

    /// Advances while the condition matches the current byte.
    fn consume_while<F>(&mut self, bytes: &[u8], condition: F)
    where
        F: Fn(u8) -> bool,
    {
        while let Some(&b) = bytes.get(self.offset) {
            if condition(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }

    /// Maps a slice to a keyword token or identifier token.
    fn keyword_or_ident(slice: &str) -> Token {
        match slice {
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Ident(slice.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser for condition tokens.
struct Parser {
    /// Token stream with source positions.
    tokens: Vec<SpannedToken>,
    /// Current token index.
    index: usize,
    /// Current nesting depth for parenthesized expressions.
    nesting: usize,
}

impl Parser {
    /// Creates a parser over the token stream.
    const fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            index: 0,
            nesting: 0,
        }
    }

    /// Parses a full expression.
    fn parse_expression(&mut self) -> Result<Expr, CondError> {
        self.parse_or()
    }

    /// Parses OR expressions.
    fn parse_or(&mut self) -> Result<Expr, CondError> {
        let mut left = self.parse_and()?;
        while self.matches(&Token::Or) {
            let right = self.parse_and()?;
            left = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parses AND expressions.
    fn parse_and(&mut self) -> Result<Expr, CondError> {
        let mut left = self.parse_equality()?;
        while self.matches(&Token::And) {
            let right = self.parse_equality()?;
            left = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parses equality expressions.
    fn parse_equality(&mut self) -> Result<Expr, CondError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = if self.matches(&Token::EqEq) {
                BinaryOp::Eq
            } else if self.matches(&Token::NotEq) {
                BinaryOp::Ne
            } else {
                break;
            };
            let right = self.parse_comparison()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parses ordering comparison expressions.
    fn parse_comparison(&mut self) -> Result<Expr, CondError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.matches(&Token::Le) {
                BinaryOp::Le
            } else if self.matches(&Token::Lt) {
                BinaryOp::Lt
            } else if self.matches(&Token::Ge) {
                BinaryOp::Ge
            } else if self.matches(&Token::Gt) {
                BinaryOp::Gt
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parses unary expressions, including NOT.
    fn parse_unary(&mut self) -> Result<Expr, CondError> {
        if self.matches(&Token::Not) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, CondError> {
        let SpannedToken {
            token,
            position,
        } = self.current().clone();
        match token {
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(name))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(false)))
            }
            Token::Str(content) => {
                self.advance();
                Ok(Expr::Literal(Value::String(content)))
            }
            Token::Number(raw) => {
                self.advance();
                let number = parse_number(&raw).ok_or_else(|| CondError::InvalidNumber {
                    raw: raw.clone(),
                    position,
                })?;
                Ok(Expr::Literal(Value::Number(number)))
            }
            Token::LParen => {
                self.advance();
                self.with_nesting(position, |parser| {
                    let expr = parser.parse_expression()?;
                    parser.expect_rparen()?;
                    Ok(expr)
                })
            }
            Token::RParen
            | Token::And
            | Token::Or
            | Token::Not
            | Token::EqEq
            | Token::NotEq
            | Token::Lt
            | Token::Le
            | Token::Gt
            | Token::Ge
            | Token::Eof => Err(CondError::UnexpectedToken {
                expected: "identifier, literal, or `(`",
                found: describe(&token),
                position,
            }),
        }
    }

    /// Runs a parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, CondError>,
    ) -> Result<T, CondError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_NESTING {
            return Err(CondError::NestingTooDeep {
                max_depth: MAX_NESTING,
                actual_depth: next_depth,
                position,
            });
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Consumes a closing parenthesis or returns an error.
    fn expect_rparen(&mut self) -> Result<(), CondError> {
        if self.matches(&Token::RParen) {
            Ok(())
        } else {
            Err(CondError::UnexpectedToken {
                expected: "`)`",
                found: describe(&self.current().token),
                position: self.current().position,
            })
        }
    }

    /// Ensures the parser is at end-of-input.
    fn expect_eof(&self) -> Result<(), CondError> {
        if matches!(self.current().token, Token::Eof) {
            Ok(())
        } else {
            Err(CondError::TrailingInput {
                position: self.current().position,
            })
        }
    }

    /// Consumes the token if it matches the expected kind.
    fn matches(&mut self, kind: &Token) -> bool {
        if std::mem::discriminant(&self.current().token) == std::mem::discriminant(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the current token.
    fn current(&self) -> &SpannedToken {
        debug_assert!(self.index < self.tokens.len(), "parser index out of bounds");
        &self.tokens[self.index]
    }

    /// Advances to the next token.
    const fn advance(&mut self) {
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
    }
}

/// Parses raw numeric text into a JSON number.
fn parse_number(raw: &str) -> Option<Number> {
    if raw.contains('.') {
        raw.parse::<f64>().ok().and_then(Number::from_f64)
    } else {
        raw.parse::<i64>().ok().map(Number::from)
    }
}

/// Formats a token for diagnostics.
fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => name.clone(),
        Token::Number(raw) => raw.clone(),
        Token::Str(content) => format!("\"{content}\""),
        Token::True => "true".to_string(),
        Token::False => "false".to_string(),
        Token::And => "&&".to_string(),
        Token::Or => "||".to_string(),
        Token::Not => "!".to_string(),
        Token::EqEq => "==".to_string(),
        Token::NotEq => "!=".to_string(),
        Token::Lt => "<".to_string(),
        Token::Le => "<=".to_string(),
        Token::Gt => ">".to_string(),
        Token::Ge => ">=".to_string(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Eof => "end of input".to_string(),
    }
}
