//! Runtime error types.
//!
//! Runtime faults are reported as diagnostics and the offending expression
//! evaluates to `Unknown`; evaluation itself never panics on user input.

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// A fault raised while evaluating a program.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    // === Math Errors ===
    #[error("division by zero")]
    DivisionByZero { span: Span },

    /// Char arithmetic or conversion outside the valid code points.
    #[error("{code} is not a valid character code")]
    InvalidCharCode { code: f64, span: Span },

    #[error("range step cannot be zero")]
    ZeroStep { span: Span },

    /// String or list repeated a negative or non-finite number of times.
    #[error("cannot repeat {count} times")]
    InvalidRepetition { count: f64, span: Span },

    /// A range that would never end where a finite sequence is needed.
    #[error("range is not finite")]
    InfiniteRange { span: Span },

    // === Overflow Errors ===
    /// Bitwise operand or result outside the 64-bit integer range.
    #[error("{value} does not fit in a 64-bit integer")]
    IntegerOverflow { value: f64, span: Span },

    /// String or list repetition whose result cannot be allocated.
    #[error("repeating {count} times is too large")]
    RepetitionTooLarge { count: f64, span: Span },

    #[error("cannot shift by {amount} bits")]
    InvalidShift { amount: f64, span: Span },

    #[error("maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize, span: Span },

    // === Index Errors ===
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: f64, length: usize, span: Span },

    /// `List -> Range` on a list without 2 or 3 elements.
    #[error("a range needs 2 or 3 integers, found {found}")]
    InvalidRangeList { found: usize, span: Span },

    // === Other ===
    /// A name with no runtime binding, only possible when evaluating
    /// despite analysis errors.
    #[error("'{name}' is no longer available")]
    StaleName { name: String, span: Span },

    /// A value whose runtime shape does not fit the operation.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    /// State the analyzer should have ruled out.
    #[error("internal error: {message}")]
    Internal { message: String, span: Span },
}

impl RuntimeError {
    /// Returns the span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::DivisionByZero { span }
            | RuntimeError::InvalidCharCode { span, .. }
            | RuntimeError::ZeroStep { span }
            | RuntimeError::InvalidRepetition { span, .. }
            | RuntimeError::InfiniteRange { span }
            | RuntimeError::IntegerOverflow { span, .. }
            | RuntimeError::RepetitionTooLarge { span, .. }
            | RuntimeError::InvalidShift { span, .. }
            | RuntimeError::CallDepthExceeded { span, .. }
            | RuntimeError::IndexOutOfRange { span, .. }
            | RuntimeError::InvalidRangeList { span, .. }
            | RuntimeError::StaleName { span, .. }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::Internal { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RuntimeError::DivisionByZero { .. }
            | RuntimeError::InvalidCharCode { .. }
            | RuntimeError::ZeroStep { .. }
            | RuntimeError::InvalidRepetition { .. }
            | RuntimeError::InfiniteRange { .. } => DiagnosticKind::MathError,
            RuntimeError::IntegerOverflow { .. }
            | RuntimeError::RepetitionTooLarge { .. }
            | RuntimeError::InvalidShift { .. }
            | RuntimeError::CallDepthExceeded { .. } => DiagnosticKind::OverflowError,
            RuntimeError::IndexOutOfRange { .. } | RuntimeError::InvalidRangeList { .. } => {
                DiagnosticKind::IndexError
            }
            RuntimeError::StaleName { .. } => DiagnosticKind::SymbolError,
            RuntimeError::TypeMismatch { .. } => DiagnosticKind::TypeError,
            RuntimeError::Internal { .. } => DiagnosticKind::InternalError,
        }
    }

    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        RuntimeError::Internal {
            message: message.into(),
            span,
        }
    }

    pub fn mismatch(expected: impl ToString, found: impl ToString, span: Span) -> Self {
        RuntimeError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        Diagnostic::new(error.kind(), error.to_string(), error.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let span = Span::new(0, 3);
        assert_eq!(RuntimeError::DivisionByZero { span }.kind(), DiagnosticKind::MathError);
        assert_eq!(
            RuntimeError::IntegerOverflow { value: 1e30, span }.kind(),
            DiagnosticKind::OverflowError
        );
        assert_eq!(
            RuntimeError::IndexOutOfRange {
                index: 5.0,
                length: 2,
                span
            }
            .to_string(),
            "index 5 out of range for length 2"
        );
        assert_eq!(RuntimeError::internal("bad", span).kind(), DiagnosticKind::InternalError);
    }
}
