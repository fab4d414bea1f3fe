//! Parser for Glint.
//!
//! The parser transforms a stream of tokens into an Abstract Syntax Tree (AST).
//! It uses recursive descent for statements and precedence climbing for
//! expressions.
//!
//! # Example
//!
//! ```
//! use glint::lexer::lex;
//! use glint::parser::Parser;
//!
//! let source = r#"
//!     # greeting = "Hello, World!"
//!     Print(greeting)
//! "#;
//!
//! let tokens = lex(source);
//! let mut parser = Parser::new(&tokens);
//! let program = parser.parse();
//!
//! assert!(parser.errors().is_empty());
//! assert_eq!(program.statements.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! The parser is split into focused modules:
//! - [`tokens`] - Token navigation utilities (peek, advance, match, expect)
//! - [`expressions`] - Precedence climbing for expressions
//! - [`literals`] - Number, char, string and escape decoding
//! - [`statements`] - Statement dispatcher, declarations and blocks
//! - [`control_flow`] - `if`/`while`/`for` and jump statements
//! - [`functions`] - Function declarations, literals and parameter lists
//! - [`types`] - Type clauses such as `List<Integer>`
//! - [`error`] - Parse error types
//!
//! # Error Recovery
//!
//! Parsing never fails. A missing token is reported and synthesized, a
//! malformed expression becomes [`ExprKind::Unknown`](crate::ast::ExprKind),
//! and a statement that consumes nothing forces the parser one token ahead.
//! At most one error is reported per token position.

mod control_flow;
mod error;
mod expressions;
mod functions;
mod literals;
mod statements;
mod tokens;
mod types;

pub use error::ParseError;
pub use types::is_type_name;

use crate::ast::{Program, Span, Statement};
use crate::lexer::{Token, TokenKind};

/// Parser for Glint source code.
///
/// The parser consumes a slice of tokens and produces an AST.
/// Errors are collected and returned at the end rather than failing immediately.
pub struct Parser {
    /// The significant tokens to parse, always ending with `Eof`.
    tokens: Vec<Token>,
    /// Current position in the token stream.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Token index of the last reported error.
    last_error_at: Option<usize>,
    /// Whether `a:b` may be parsed as a range at this point.
    range_enabled: bool,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    ///
    /// Ignorable tokens are dropped; an `Eof` token is appended if missing.
    pub fn new(tokens: &[Token]) -> Self {
        let mut significant: Vec<Token> = tokens
            .iter()
            .filter(|t| !t.kind.is_ignorable())
            .cloned()
            .collect();
        if significant.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            significant.push(Token::new(TokenKind::Eof, Span::empty(end), ""));
        }
        Self {
            tokens: significant,
            current: 0,
            errors: Vec::new(),
            last_error_at: None,
            range_enabled: true,
        }
    }

    /// Parses the token stream into a program AST.
    ///
    /// Always returns a program; problems are available from [`Parser::errors`].
    pub fn parse(&mut self) -> Program {
        let mut statements: Vec<Statement> = Vec::new();

        loop {
            while self.match_token(TokenKind::Semicolon) {}
            if self.is_at_end() {
                break;
            }
            if let Some(statement) = self.parse_statement_with_progress() {
                statements.push(statement);
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span.merge(&last.span),
            _ => Span::empty(self.peek().span.start),
        };
        log::debug!(
            "parsed {} statements with {} errors",
            statements.len(),
            self.errors.len()
        );
        Program::new(statements, span)
    }

    /// Parses one statement, force-advancing when nothing was consumed.
    ///
    /// Returns `None` when the statement made no progress.
    fn parse_statement_with_progress(&mut self) -> Option<Statement> {
        let before = self.current;
        let statement = self.parse_statement();
        if self.current == before {
            self.advance();
            None
        } else {
            Some(statement)
        }
    }

    /// Errors collected so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

/// Convenience function: parse `tokens` and return the program with its errors.
pub fn parse(tokens: &[Token]) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    (program, parser.into_errors())
}

/// Binary operator precedence levels for precedence climbing.
///
/// Higher values mean higher precedence (bind tighter). Assignment and the
/// ternary sit below `Lowest` and are handled by their own productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Precedence {
    Lowest = 0,
    NullCoalesce = 1,   // ??
    Or = 2,             // ||
    And = 3,            // &&
    BitOr = 4,          // |
    BitXor = 5,         // ^
    BitAnd = 6,         // &
    Comparison = 7,     // == != < <= > >=
    Shift = 8,          // << >>
    Additive = 9,       // + -
    Multiplicative = 10, // * / %
    Power = 11,         // **
}
