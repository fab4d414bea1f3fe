//! Diagnostics collected across the pipeline.
//!
//! Each stage has its own error enum (see [`crate::lexer::LexError`],
//! [`crate::parser::ParseError`], [`crate::semantic::SemanticError`] and
//! [`crate::evaluator::RuntimeError`]). All of them flatten into a
//! [`Diagnostic`] record and land in a [`Diagnostics`] sink, which only
//! accumulates: reporting never interrupts the stage that reported.

use std::fmt;

use crate::source::{Source, Span};

/// The flat diagnostic taxonomy shared by all stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    SyntaxError,
    TypeError,
    MathError,
    StringParseError,
    OverflowError,
    InternalError,
    SymbolError,
    IndexError,
    ParsingException,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::SyntaxError => "SyntaxError",
            DiagnosticKind::TypeError => "TypeError",
            DiagnosticKind::MathError => "MathError",
            DiagnosticKind::StringParseError => "StringParseError",
            DiagnosticKind::OverflowError => "OverflowError",
            DiagnosticKind::InternalError => "InternalError",
            DiagnosticKind::SymbolError => "SymbolError",
            DiagnosticKind::IndexError => "IndexError",
            DiagnosticKind::ParsingException => "ParsingException",
        };
        f.write_str(name)
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    /// One-line summary with a resolved position, e.g.
    /// `SymbolError at 2:1: 'x' is not defined`.
    pub fn render(&self, source: &Source) -> String {
        let position = source.position(self.span.start);
        format!("{} at {}: {}", self.kind, position, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// An append-only diagnostics sink.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) {
        self.items.push(Diagnostic::new(kind, message, span));
    }

    /// Records any stage error that converts into a diagnostic.
    pub fn push(&mut self, error: impl Into<Diagnostic>) {
        self.items.push(error.into());
    }

    /// Records every error of a stage, in order.
    pub fn extend<E: Into<Diagnostic>>(&mut self, errors: impl IntoIterator<Item = E>) {
        self.items.extend(errors.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics of a given kind.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.count_of(kind) > 0
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
