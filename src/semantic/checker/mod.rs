//! Analyzer for Glint semantic analysis.
//!
//! The analyzer binds the AST in one recursive pass, producing the
//! [`SemanticProgram`](crate::semantic::SemanticProgram). It handles:
//!
//! - **Expression typing**: the type of every expression, through the
//!   operator and conversion tables
//! - **Declarations**: inference, explicit type checks, constant promotion
//! - **Assignments**: name and element targets, constants, mutability
//! - **Functions**: parameters, return hints, return checks
//! - **Control flow**: conditions, loop variables, jump placement
//!
//! # Module Structure
//!
//! - [`expressions`] - Expression binding (operators, calls, indexing, lists)
//! - [`statements`] - Statement dispatcher and blocks
//! - [`assignments`] - Assignment targets
//! - [`control_flow`] - `if`, `while`, `for` and jumps
//! - [`definitions`] - Declarations and functions
//!
//! # Error Recovery
//!
//! Anything that fails to bind becomes a `Failed` node typed `Unknown`.
//! `Unknown` matches every type, so a single fault is reported once and does
//! not cascade through the expressions that consume it.

mod assignments;
mod control_flow;
mod definitions;
mod expressions;
mod statements;

use crate::ast::TypeClause;
use crate::semantic::{
    error::SemanticError,
    operators::ConversionKind,
    symbols::SemanticScope,
    typed_ir::{SemanticExpr, SemanticExprKind},
    types::{GenericKind, GenericTypeSymbol, TypeSymbol},
};

/// The function whose body is being bound.
#[derive(Debug, Clone)]
pub(crate) struct FunctionContext {
    /// Declared return type; `None` while an unhinted expression body is
    /// being inferred.
    pub return_type: Option<TypeSymbol>,
    /// Loop depth outside the function, restored on exit.
    pub outer_loop_depth: usize,
}

/// Binds an AST against a [`SemanticScope`].
pub struct Analyzer<'a> {
    /// Scope for lookups and declarations.
    pub(crate) scope: &'a mut SemanticScope,
    /// Accumulated errors.
    pub errors: Vec<SemanticError>,
    /// Enclosing functions, innermost last.
    pub(crate) functions: Vec<FunctionContext>,
    /// Number of enclosing loops in the current function.
    pub(crate) loop_depth: usize,
}

impl<'a> Analyzer<'a> {
    /// Creates a new analyzer.
    pub fn new(scope: &'a mut SemanticScope) -> Self {
        Self {
            scope,
            errors: Vec::new(),
            functions: Vec::new(),
            loop_depth: 0,
        }
    }

    pub(crate) fn report(&mut self, error: SemanticError) {
        log::trace!("semantic error: {error}");
        self.errors.push(error);
    }

    /// Runs `f` inside a child scope.
    pub(crate) fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scope.push();
        let result = f(self);
        self.scope.pop();
        result
    }

    // ==================== Type Clauses ====================

    /// Resolves a written type.
    ///
    /// Unknown names and wrong generic arity are reported and resolve to
    /// `Unknown`.
    pub(crate) fn resolve_type_clause(&mut self, clause: &TypeClause) -> TypeSymbol {
        if let Some(kind) = TypeSymbol::generic_from_name(&clause.name) {
            let (valid, expected) = match kind {
                GenericKind::List => (clause.parameters.len() == 1, "exactly 1"),
                GenericKind::Function => (!clause.parameters.is_empty(), "at least 1"),
            };
            if !valid {
                self.report(SemanticError::TypeArgumentCount {
                    name: clause.name.clone(),
                    expected,
                    found: clause.parameters.len(),
                    span: clause.span,
                });
                return TypeSymbol::Unknown;
            }
            let parameters: Vec<TypeSymbol> = clause
                .parameters
                .iter()
                .map(|p| self.resolve_type_clause(p))
                .collect();
            return TypeSymbol::Generic(GenericTypeSymbol { kind, parameters });
        }

        match TypeSymbol::from_name(&clause.name) {
            Some(_) if !clause.parameters.is_empty() => {
                self.report(SemanticError::TypeArgumentCount {
                    name: clause.name.clone(),
                    expected: "no",
                    found: clause.parameters.len(),
                    span: clause.span,
                });
                TypeSymbol::Unknown
            }
            Some(type_symbol) => type_symbol,
            None => {
                // Synthesized by the parser after a reported syntax error.
                if !clause.name.is_empty() {
                    self.report(SemanticError::UnknownType {
                        name: clause.name.clone(),
                        span: clause.span,
                    });
                }
                TypeSymbol::Unknown
            }
        }
    }

    // ==================== Type Expectations ====================

    /// Checks that `expr` fits a slot of type `expected`.
    ///
    /// A mismatch is reported; the expression is returned either way. An
    /// `Integer` flowing into a `Float` slot is wrapped in a conversion.
    pub(crate) fn expect_type(&mut self, expr: SemanticExpr, expected: &TypeSymbol) -> SemanticExpr {
        if expr.type_symbol.is_unknown() || expected.is_unknown() {
            return expr;
        }
        if !expected.matches(&expr.type_symbol) {
            self.report(SemanticError::mismatch(expected, &expr.type_symbol, expr.span));
            return expr;
        }
        widen(expr, expected)
    }
}

/// Inserts the implicit `Integer -> Float` conversion.
pub(crate) fn widen(expr: SemanticExpr, expected: &TypeSymbol) -> SemanticExpr {
    if *expected == TypeSymbol::Float && expr.type_symbol == TypeSymbol::Integer {
        let span = expr.span;
        return SemanticExpr::new(
            SemanticExprKind::Conversion {
                value: Box::new(expr),
                kind: ConversionKind::IntegerToFloat,
            },
            TypeSymbol::Float,
            span,
        );
    }
    expr
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::diagnostics::DiagnosticKind;
    use crate::semantic::typed_ir::{SemanticProgram, SemanticStatementKind};
    use crate::{lexer, parser, semantic};

    /// Lexes, parses (asserting no syntax errors) and analyzes `source`.
    pub(crate) fn analyze_source(source: &str) -> (SemanticProgram, Vec<SemanticError>, SemanticScope) {
        let (program, parse_errors) = parser::parse(&lexer::lex(source));
        assert!(parse_errors.is_empty(), "parse errors: {parse_errors:?}");
        let mut scope = SemanticScope::new();
        let (tree, errors) = semantic::analyze(&program, &mut scope);
        (tree, errors, scope)
    }

    pub(crate) fn errors_of(source: &str) -> Vec<SemanticError> {
        analyze_source(source).1
    }

    /// Type of the last expression statement in `source`.
    pub(crate) fn type_of(source: &str) -> TypeSymbol {
        let (tree, errors, _) = analyze_source(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        match tree.statements.last().map(|s| &s.kind) {
            Some(SemanticStatementKind::Expression(expr)) => expr.type_symbol.clone(),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_type_clauses() {
        let mut scope = SemanticScope::new();
        let mut analyzer = Analyzer::new(&mut scope);
        let clause = TypeClause::new(
            "Function",
            vec![
                TypeClause::new("Integer", vec![], Span::new(9, 16)),
                TypeClause::new("List", vec![TypeClause::new("Char", vec![], Span::new(23, 27))], Span::new(18, 28)),
            ],
            Span::new(0, 29),
        );
        assert_eq!(
            analyzer.resolve_type_clause(&clause),
            TypeSymbol::function(TypeSymbol::Integer, vec![TypeSymbol::list(TypeSymbol::Char)])
        );
        assert!(analyzer.errors.is_empty());
    }

    #[test]
    fn test_bad_type_clauses() {
        let errors = errors_of("# a: Number = 1\n# b: List = [1]\n# c: Integer<Char> = 1");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind(), DiagnosticKind::SymbolError);
        assert!(matches!(errors[1], SemanticError::TypeArgumentCount { found: 0, .. }));
        assert!(matches!(errors[2], SemanticError::TypeArgumentCount { expected: "no", .. }));
    }

    #[test]
    fn test_integer_widens_into_float_slot() {
        let (tree, errors, _) = analyze_source("# f: Float = 1");
        assert!(errors.is_empty());
        let SemanticStatementKind::Declaration { value: Some(value), .. } = &tree.statements[0].kind else {
            panic!("expected declaration");
        };
        assert!(matches!(
            value.kind,
            SemanticExprKind::Conversion {
                kind: ConversionKind::IntegerToFloat,
                ..
            }
        ));
    }
}
