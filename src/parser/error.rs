//! Parser error types.
//!
//! Parse errors capture what went wrong and where, enabling good error messages.
//! The parser collects multiple errors rather than stopping at the first one,
//! which provides better feedback to users.

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// A parse error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Expected a specific token but found something else.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What we expected to find.
        expected: String,
        /// What we actually found.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// A token that cannot start an expression.
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String, span: Span },

    /// `# name` with neither a type nor a value.
    #[error("declaration of '{name}' needs a type or a value")]
    IncompleteDeclaration { name: String, span: Span },

    /// `++`/`--` applied to something other than a name.
    #[error("'{operator}' can only be applied to a name")]
    InvalidCountingTarget { operator: &'static str, span: Span },

    /// Invalid number literal.
    #[error("invalid number: {message}")]
    InvalidNumber { message: String, span: Span },

    /// Unknown or malformed escape sequence in a string or char literal.
    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String, span: Span },

    /// A char literal that does not hold exactly one character.
    #[error("character literal must contain exactly one character, found {count}")]
    InvalidCharLiteral { count: usize, span: Span },
}

impl ParseError {
    /// Returns the span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::IncompleteDeclaration { span, .. }
            | ParseError::InvalidCountingTarget { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::InvalidEscape { span, .. }
            | ParseError::InvalidCharLiteral { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ParseError::InvalidNumber { .. } => DiagnosticKind::ParsingException,
            ParseError::InvalidEscape { .. } | ParseError::InvalidCharLiteral { .. } => {
                DiagnosticKind::StringParseError
            }
            _ => DiagnosticKind::SyntaxError,
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic::new(error.kind(), error.to_string(), error.span())
    }
}
