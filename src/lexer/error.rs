//! Lexer error types.
//!
//! The lexer never stops on bad input. Each problem is recorded here and the
//! offending text is still emitted as a token so the parser can recover.

use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::source::Span;

/// A problem found while scanning source text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    /// A character no token pattern accepts.
    #[error("unexpected character '{character}'")]
    UnexpectedCharacter { character: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated character literal")]
    UnterminatedChar { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    /// A format string without its closing quote.
    #[error("unterminated format string")]
    UnterminatedFormatString { span: Span },

    /// A `{` inside a format string without its `}`.
    #[error("unterminated interpolation in format string")]
    UnterminatedInterpolation { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedChar { span }
            | LexError::UnterminatedComment { span }
            | LexError::UnterminatedFormatString { span }
            | LexError::UnterminatedInterpolation { span } => *span,
        }
    }

    /// Every lexical problem is a syntax error.
    pub fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::SyntaxError
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic::new(error.kind(), error.to_string(), error.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_diagnostic() {
        let error = LexError::UnexpectedCharacter {
            character: '@',
            span: Span::new(3, 4),
        };
        let diagnostic: Diagnostic = error.into();
        assert_eq!(diagnostic.kind, DiagnosticKind::SyntaxError);
        assert_eq!(diagnostic.message, "unexpected character '@'");
        assert_eq!(diagnostic.span, Span::new(3, 4));
    }
}
