//! Control flow binding.
//!
//! - `if`/`while` conditions must be `Boolean`
//! - each branch and loop body gets its own scope
//! - `for` declares its variable in a scope around the body, typed by the
//!   element type of the iterable
//! - `break`/`continue` only inside loops, `return` only inside functions

use crate::ast::{Expr, Span, Statement};
use crate::semantic::{
    error::SemanticError,
    symbols::{NameSymbol, SymbolKind},
    typed_ir::{SemanticExpr, SemanticStatement, SemanticStatementKind},
    types::TypeSymbol,
};

use super::Analyzer;

impl<'a> Analyzer<'a> {
    fn check_condition(&mut self, condition: &Expr) -> SemanticExpr {
        let condition = self.check_expr(condition);
        self.expect_type(condition, &TypeSymbol::Boolean)
    }

    /// Binds a branch or loop body in its own scope.
    fn check_body(&mut self, body: &Statement) -> Box<SemanticStatement> {
        Box::new(self.scoped(|a| a.check_statement(body)))
    }

    pub(super) fn check_if(
        &mut self,
        condition: &Expr,
        then_branch: &Statement,
        else_branch: Option<&Statement>,
        span: Span,
    ) -> SemanticStatement {
        let condition = self.check_condition(condition);
        let then_branch = self.check_body(then_branch);
        let else_branch = else_branch.map(|e| self.check_body(e));
        SemanticStatement::new(
            SemanticStatementKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        )
    }

    pub(super) fn check_while(&mut self, condition: &Expr, body: &Statement, span: Span) -> SemanticStatement {
        let condition = self.check_condition(condition);
        self.loop_depth += 1;
        let body = self.check_body(body);
        self.loop_depth -= 1;
        SemanticStatement::new(SemanticStatementKind::While { condition, body }, span)
    }

    pub(super) fn check_for(
        &mut self,
        variable: &str,
        variable_span: Span,
        iterable: &Expr,
        body: &Statement,
        span: Span,
    ) -> SemanticStatement {
        let iterable = self.check_expr(iterable);
        let element = match iterable.type_symbol.element_type() {
            Some(element) => element,
            None => {
                self.report(SemanticError::NotIterable {
                    found: iterable.type_symbol.to_string(),
                    span: iterable.span,
                });
                TypeSymbol::Unknown
            }
        };

        self.loop_depth += 1;
        let body = self.scoped(|a| {
            if !variable.is_empty() {
                a.declare(
                    NameSymbol::new(variable, element, false, SymbolKind::Variable),
                    variable_span,
                );
            }
            a.check_body(body)
        });
        self.loop_depth -= 1;

        SemanticStatement::new(
            SemanticStatementKind::For {
                variable: variable.to_string(),
                iterable,
                body,
            },
            span,
        )
    }

    /// `break` / `continue`.
    pub(super) fn check_jump(&mut self, kind: SemanticStatementKind, keyword: &'static str, span: Span) -> SemanticStatement {
        if self.loop_depth == 0 {
            self.report(SemanticError::JumpOutsideLoop { keyword, span });
            return SemanticStatement::new(SemanticStatementKind::Failed, span);
        }
        SemanticStatement::new(kind, span)
    }

    /// `return [value]`, checked against the enclosing function's return type.
    pub(super) fn check_return(&mut self, value: Option<&Expr>, span: Span) -> SemanticStatement {
        let value = value.map(|v| self.check_expr(v));
        let Some(context) = self.functions.last() else {
            self.report(SemanticError::ReturnOutsideFunction { span });
            return SemanticStatement::new(SemanticStatementKind::Failed, span);
        };
        let Some(expected) = context.return_type.clone() else {
            return SemanticStatement::new(SemanticStatementKind::Return(value), span);
        };

        let value = match value {
            Some(value) => Some(self.expect_type(value, &expected)),
            None => {
                if expected != TypeSymbol::Void && !expected.is_unknown() {
                    self.report(SemanticError::mismatch(&expected, TypeSymbol::Void, span));
                }
                None
            }
        };
        SemanticStatement::new(SemanticStatementKind::Return(value), span)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze_source, errors_of};
    use crate::diagnostics::DiagnosticKind;
    use crate::semantic::error::SemanticError;
    use crate::semantic::types::TypeSymbol;

    #[test]
    fn test_condition_must_be_boolean() {
        let errors = errors_of("if 1 Print(1)\nwhile \"x\" { }");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, SemanticError::TypeMismatch { expected, .. } if expected == "Boolean")));
    }

    #[test]
    fn test_for_variable_types_and_scope() {
        assert!(errors_of("for i in 0:10 { # j: Integer = i }").is_empty());
        assert!(errors_of("for c in \"abc\" { # d: Char = c }").is_empty());
        assert!(errors_of("for x in [1.5, 2.5] { # y: Float = x }").is_empty());

        let errors = errors_of("for i in 0:3 { }\ni");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), DiagnosticKind::SymbolError);

        let errors = errors_of("for i in 5 { }");
        assert!(matches!(errors[0], SemanticError::NotIterable { .. }));
    }

    #[test]
    fn test_loop_variable_may_shadow() {
        let (_, errors, scope) = analyze_source("# i = \"outer\"\nfor i in 0:2 { i + 1 }");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(scope.lookup("i").unwrap().type_symbol, TypeSymbol::String);
    }

    #[test]
    fn test_jumps() {
        assert!(errors_of("while true { break }").is_empty());
        assert!(errors_of("for i in 0:1 { if i == 0 continue }").is_empty());
        let errors = errors_of("continue");
        assert!(matches!(errors[0], SemanticError::JumpOutsideLoop { keyword: "continue", .. }));
        // Loops do not reach into function bodies.
        let errors = errors_of("while true { fn f(): { break } }");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_returns() {
        let errors = errors_of("return 1");
        assert!(matches!(errors[0], SemanticError::ReturnOutsideFunction { .. }));
        assert_eq!(errors[0].kind(), DiagnosticKind::SyntaxError);

        assert!(errors_of("fn f(): { return }").is_empty());
        let errors = errors_of("fn f() -> Integer: { return \"x\" }");
        assert!(matches!(&errors[0], SemanticError::TypeMismatch { expected, .. } if expected == "Integer"));
    }

    #[test]
    fn test_branches_are_scoped() {
        let errors = errors_of("if true # a = 1 else # a = 2\na");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], SemanticError::UndefinedName { name, .. } if name == "a"));
    }
}
