//! Semantic analysis error types.
//!
//! These errors represent problems found during binding and type checking
//! that aren't syntax errors. Each error carries the span of the offending
//! construct so it can be rendered against the source.

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// A semantic analysis error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    // === Symbol Errors ===
    /// Reference to a name that hasn't been declared.
    #[error("'{name}' is not defined")]
    UndefinedName { name: String, span: Span },

    /// Name declared twice in the same scope.
    #[error("'{name}' is already declared in this scope")]
    AlreadyDeclared { name: String, span: Span },

    /// Assignment to a constant.
    #[error("cannot assign to constant '{name}'")]
    ConstantAssignment { name: String, span: Span },

    /// A type clause naming no known type.
    #[error("unknown type '{name}'")]
    UnknownType { name: String, span: Span },

    // === Type Errors ===
    /// A generic type written with the wrong number of parameters.
    #[error("type '{name}' expects {expected}, found {found} type arguments")]
    TypeArgumentCount {
        name: String,
        expected: &'static str,
        found: usize,
        span: Span,
    },

    /// Expected one type but found another.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    /// Binary operator applied to incompatible types.
    #[error("operator '{op}' cannot be applied to {left} and {right}")]
    UndefinedBinaryOperator {
        op: &'static str,
        left: String,
        right: String,
        span: Span,
    },

    /// Unary operator applied to an incompatible type.
    #[error("operator '{op}' cannot be applied to {operand}")]
    UndefinedUnaryOperator {
        op: &'static str,
        operand: String,
        span: Span,
    },

    /// `value -> Type` with no conversion between the two.
    #[error("cannot convert {from} to {to}")]
    InvalidConversion { from: String, to: String, span: Span },

    /// List literal whose elements do not share a type.
    #[error("heterogeneous list: element of type {found} does not fit {expected}")]
    HeterogeneousList {
        expected: String,
        found: String,
        span: Span,
    },

    /// `c ? a : b` with incompatible branches.
    #[error("ternary branches have different types: {then_type} and {else_type}")]
    TernaryMismatch {
        then_type: String,
        else_type: String,
        span: Span,
    },

    /// Call on something that is not a function.
    #[error("value of type {found} is not callable")]
    NotCallable { found: String, span: Span },

    /// Call with the wrong number of arguments.
    #[error("expected {expected} arguments, found {found}")]
    ArgumentCount {
        expected: usize,
        found: usize,
        span: Span,
    },

    /// Index into something that has no elements.
    #[error("value of type {found} cannot be indexed")]
    NotIndexable { found: String, span: Span },

    /// Indexed assignment into a container that cannot be mutated in place.
    #[error("elements of {found} cannot be assigned")]
    ImmutableContainer { found: String, span: Span },

    /// `for` over something that has no elements.
    #[error("value of type {found} is not iterable")]
    NotIterable { found: String, span: Span },

    /// Type-only declaration of a type that has no default value.
    #[error("type {type_name} has no default value")]
    NoDefaultValue { type_name: String, span: Span },

    /// `++`/`--` on a non-numeric, non-char name.
    #[error("cannot count a value of type {found}")]
    InvalidCountingTarget { found: String, span: Span },

    /// Declaration initialized from an expression without a value.
    #[error("cannot declare '{name}' from an expression without a value")]
    VoidDeclaration { name: String, span: Span },

    /// Block body with a return hint that can finish without returning.
    #[error("function must return a value of type {expected}")]
    MissingReturn { expected: String, span: Span },

    // === Structural Errors ===
    /// Assignment to something that is not a name or an element.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: Span },

    /// `return` at top level.
    #[error("'return' outside of a function")]
    ReturnOutsideFunction { span: Span },

    /// `break`/`continue` outside of a loop.
    #[error("'{keyword}' outside of a loop")]
    JumpOutsideLoop { keyword: &'static str, span: Span },
}

impl SemanticError {
    /// Returns the span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndefinedName { span, .. }
            | SemanticError::AlreadyDeclared { span, .. }
            | SemanticError::ConstantAssignment { span, .. }
            | SemanticError::UnknownType { span, .. }
            | SemanticError::TypeArgumentCount { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::UndefinedBinaryOperator { span, .. }
            | SemanticError::UndefinedUnaryOperator { span, .. }
            | SemanticError::InvalidConversion { span, .. }
            | SemanticError::HeterogeneousList { span, .. }
            | SemanticError::TernaryMismatch { span, .. }
            | SemanticError::NotCallable { span, .. }
            | SemanticError::ArgumentCount { span, .. }
            | SemanticError::NotIndexable { span, .. }
            | SemanticError::ImmutableContainer { span, .. }
            | SemanticError::NotIterable { span, .. }
            | SemanticError::NoDefaultValue { span, .. }
            | SemanticError::InvalidCountingTarget { span, .. }
            | SemanticError::VoidDeclaration { span, .. }
            | SemanticError::MissingReturn { span, .. }
            | SemanticError::InvalidAssignmentTarget { span }
            | SemanticError::ReturnOutsideFunction { span }
            | SemanticError::JumpOutsideLoop { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            SemanticError::UndefinedName { .. }
            | SemanticError::AlreadyDeclared { .. }
            | SemanticError::ConstantAssignment { .. }
            | SemanticError::UnknownType { .. } => DiagnosticKind::SymbolError,
            SemanticError::InvalidAssignmentTarget { .. }
            | SemanticError::ReturnOutsideFunction { .. }
            | SemanticError::JumpOutsideLoop { .. } => DiagnosticKind::SyntaxError,
            _ => DiagnosticKind::TypeError,
        }
    }

    /// Creates a type mismatch error.
    pub fn mismatch(expected: impl ToString, found: impl ToString, span: Span) -> Self {
        SemanticError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(error: SemanticError) -> Self {
        Diagnostic::new(error.kind(), error.to_string(), error.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let undefined = SemanticError::UndefinedName {
            name: "x".to_string(),
            span: Span::new(0, 1),
        };
        assert_eq!(undefined.kind(), DiagnosticKind::SymbolError);
        assert_eq!(undefined.to_string(), "'x' is not defined");

        let jump = SemanticError::JumpOutsideLoop {
            keyword: "break",
            span: Span::new(3, 8),
        };
        assert_eq!(jump.kind(), DiagnosticKind::SyntaxError);
        assert_eq!(jump.span(), Span::new(3, 8));
    }

    #[test]
    fn test_mismatch_into_diagnostic() {
        let diagnostic: Diagnostic = SemanticError::mismatch("Integer", "String", Span::new(2, 5)).into();
        assert_eq!(diagnostic.kind, DiagnosticKind::TypeError);
        assert_eq!(diagnostic.message, "type mismatch: expected Integer, found String");
        assert_eq!(diagnostic.span, Span::new(2, 5));
    }
}
