//! Expression binding.
//!
//! This module handles type checking for every expression kind:
//! - Literals and names
//! - Unary, binary and ternary operators
//! - Calls, indexing and slicing
//! - Ranges, lists and format strings
//! - Conversions and counting

use crate::ast::{BinaryOp, Expr, ExprKind, FormatPart, Literal, Span, TypeClause, UnaryOp};
use crate::semantic::{
    builtins::Builtin,
    error::SemanticError,
    operators::{conversion_kind, resolve_binary, resolve_unary},
    symbols::SymbolKind,
    typed_ir::{SemanticExpr, SemanticExprKind, SemanticFormatPart},
    types::TypeSymbol,
};

use super::{Analyzer, widen};

impl<'a> Analyzer<'a> {
    // ==================== Expression Binding ====================

    /// Binds an expression.
    ///
    /// On error, records the error and returns a `Failed` placeholder.
    pub fn check_expr(&mut self, expr: &Expr) -> SemanticExpr {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(literal) => {
                SemanticExpr::new(SemanticExprKind::Literal(literal.clone()), literal_type(literal), span)
            }

            ExprKind::Name(name) => self.check_name(name, span),

            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, span),

            ExprKind::Binary { left, op, right } => self.check_binary(left, *op, right, span),

            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => self.check_ternary(condition, then_branch, else_branch, span),

            ExprKind::Assignment {
                target,
                operator,
                value,
            } => self.check_assignment(target, operator.is_some(), value, span),

            ExprKind::Call { callee, arguments } => self.check_call(callee, arguments, span),

            ExprKind::Index { target, index } => self.check_index(target, index, span),

            ExprKind::Range { start, end, step } => self.check_range(start, end, step.as_deref(), span),

            ExprKind::List(elements) => self.check_list(elements, span),

            ExprKind::FormatString(parts) => {
                let parts = parts
                    .iter()
                    .map(|part| match part {
                        FormatPart::Text { text, .. } => SemanticFormatPart::Text(text.clone()),
                        FormatPart::Expression(inner) => SemanticFormatPart::Expression(self.check_expr(inner)),
                    })
                    .collect();
                SemanticExpr::new(SemanticExprKind::FormatString(parts), TypeSymbol::String, span)
            }

            ExprKind::FunctionLiteral(function) => {
                let function = self.check_function(function);
                let type_symbol = function.type_symbol();
                SemanticExpr::new(SemanticExprKind::Function(function), type_symbol, span)
            }

            ExprKind::Parenthesized(inner) => {
                let mut bound = self.check_expr(inner);
                bound.span = span;
                bound
            }

            ExprKind::Conversion { value, target } => self.check_conversion(value, target, span),

            ExprKind::Counting {
                target,
                increment,
                prefix,
            } => self.check_counting(target, *increment, *prefix, span),

            ExprKind::Unknown => SemanticExpr::failed(span),
        }
    }

    fn check_name(&mut self, name: &str, span: Span) -> SemanticExpr {
        match self.scope.lookup(name) {
            Some(symbol) => SemanticExpr::new(
                SemanticExprKind::Name(name.to_string()),
                symbol.type_symbol.clone(),
                span,
            ),
            None => {
                self.report(SemanticError::UndefinedName {
                    name: name.to_string(),
                    span,
                });
                SemanticExpr::failed(span)
            }
        }
    }

    // ==================== Operators ====================

    fn check_unary(&mut self, op: UnaryOp, operand: &Expr, span: Span) -> SemanticExpr {
        let operand = self.check_expr(operand);
        if operand.type_symbol.is_unknown() {
            return SemanticExpr::failed(span);
        }
        match resolve_unary(op, &operand.type_symbol) {
            Some((kind, result)) => SemanticExpr::new(
                SemanticExprKind::Unary {
                    kind,
                    operand: Box::new(operand),
                },
                result,
                span,
            ),
            None => {
                self.report(SemanticError::UndefinedUnaryOperator {
                    op: op.as_str(),
                    operand: operand.type_symbol.to_string(),
                    span,
                });
                SemanticExpr::failed(span)
            }
        }
    }

    pub(crate) fn check_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr, span: Span) -> SemanticExpr {
        let left = self.check_expr(left);
        let right = self.check_expr(right);
        if left.type_symbol.is_unknown() || right.type_symbol.is_unknown() {
            return SemanticExpr::failed(span);
        }
        match resolve_binary(op, &left.type_symbol, &right.type_symbol) {
            Some(operation) => SemanticExpr::new(
                SemanticExprKind::Binary {
                    left: Box::new(left),
                    kind: operation.kind,
                    right: Box::new(right),
                },
                operation.result,
                span,
            ),
            None => {
                self.report(SemanticError::UndefinedBinaryOperator {
                    op: op.as_str(),
                    left: left.type_symbol.to_string(),
                    right: right.type_symbol.to_string(),
                    span,
                });
                SemanticExpr::failed(span)
            }
        }
    }

    /// `c ? a : b`. Mismatched branches are reported but the node is kept,
    /// typed `Unknown`.
    fn check_ternary(&mut self, condition: &Expr, then_branch: &Expr, else_branch: &Expr, span: Span) -> SemanticExpr {
        let condition = self.check_expr(condition);
        let condition = self.expect_type(condition, &TypeSymbol::Boolean);
        let then_branch = self.check_expr(then_branch);
        let else_branch = self.check_expr(else_branch);

        let (then_type, else_type) = (&then_branch.type_symbol, &else_branch.type_symbol);
        let type_symbol = if then_type.is_unknown() || else_type.is_unknown() {
            TypeSymbol::Unknown
        } else if then_type.matches(else_type) {
            then_type.clone()
        } else if else_type.matches(then_type) {
            else_type.clone()
        } else {
            self.report(SemanticError::TernaryMismatch {
                then_type: then_type.to_string(),
                else_type: else_type.to_string(),
                span,
            });
            TypeSymbol::Unknown
        };

        let then_branch = widen(then_branch, &type_symbol);
        let else_branch = widen(else_branch, &type_symbol);
        SemanticExpr::new(
            SemanticExprKind::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            type_symbol,
            span,
        )
    }

    // ==================== Calls and Indexing ====================

    fn check_call(&mut self, callee: &Expr, arguments: &[Expr], span: Span) -> SemanticExpr {
        let builtin = match &callee.kind {
            ExprKind::Name(name) => self.scope.lookup(name).and_then(|symbol| match symbol.kind {
                SymbolKind::Builtin(builtin) => Some(builtin),
                _ => None,
            }),
            _ => None,
        };
        let callee = self.check_expr(callee);
        let arguments: Vec<SemanticExpr> = arguments.iter().map(|a| self.check_expr(a)).collect();

        if callee.type_symbol.is_unknown() {
            return SemanticExpr::failed(span);
        }
        let Some((return_type, parameters)) = callee.type_symbol.function_signature() else {
            self.report(SemanticError::NotCallable {
                found: callee.type_symbol.to_string(),
                span: callee.span,
            });
            return SemanticExpr::failed(span);
        };
        let return_type = return_type.clone();
        let parameters = parameters.to_vec();

        if parameters.len() != arguments.len() {
            self.report(SemanticError::ArgumentCount {
                expected: parameters.len(),
                found: arguments.len(),
                span,
            });
            return SemanticExpr::failed(span);
        }

        // `Absolute` keeps the numeric type of its argument.
        if builtin == Some(Builtin::Absolute) && arguments[0].type_symbol == TypeSymbol::Integer {
            return SemanticExpr::new(
                SemanticExprKind::Call {
                    callee: Box::new(callee),
                    arguments,
                },
                TypeSymbol::Integer,
                span,
            );
        }

        let arguments = arguments
            .into_iter()
            .zip(&parameters)
            .map(|(argument, parameter)| self.expect_type(argument, parameter))
            .collect();

        SemanticExpr::new(
            SemanticExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            return_type,
            span,
        )
    }

    /// `target[index]`, or a slice when the index is a range.
    fn check_index(&mut self, target: &Expr, index: &Expr, span: Span) -> SemanticExpr {
        let target = self.check_expr(target);
        let index = self.check_expr(index);
        if target.type_symbol.is_unknown() || index.type_symbol.is_unknown() {
            return SemanticExpr::failed(span);
        }

        if index.type_symbol == TypeSymbol::Range {
            let sliceable = target.type_symbol.list_element().is_some()
                || matches!(target.type_symbol, TypeSymbol::String | TypeSymbol::Any);
            if !sliceable {
                self.report(SemanticError::NotIndexable {
                    found: target.type_symbol.to_string(),
                    span: target.span,
                });
                return SemanticExpr::failed(span);
            }
            let type_symbol = target.type_symbol.clone();
            return SemanticExpr::new(
                SemanticExprKind::Slice {
                    target: Box::new(target),
                    range: Box::new(index),
                },
                type_symbol,
                span,
            );
        }

        let Some(element) = target.type_symbol.element_type() else {
            self.report(SemanticError::NotIndexable {
                found: target.type_symbol.to_string(),
                span: target.span,
            });
            return SemanticExpr::failed(span);
        };
        let index = self.expect_type(index, &TypeSymbol::Integer);
        SemanticExpr::new(
            SemanticExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            element,
            span,
        )
    }

    // ==================== Collections ====================

    fn check_range(&mut self, start: &Expr, end: &Expr, step: Option<&Expr>, span: Span) -> SemanticExpr {
        let start = self.check_expr(start);
        let start = self.expect_type(start, &TypeSymbol::Integer);
        let end = self.check_expr(end);
        let end = self.expect_type(end, &TypeSymbol::Integer);
        let step = step.map(|step| {
            let step = self.check_expr(step);
            Box::new(self.expect_type(step, &TypeSymbol::Integer))
        });
        SemanticExpr::new(
            SemanticExprKind::Range {
                start: Box::new(start),
                end: Box::new(end),
                step,
            },
            TypeSymbol::Range,
            span,
        )
    }

    /// `[a, b, c]`: all elements must share a type, up to widening.
    ///
    /// An empty list is `List<Any>`. A heterogeneous list is reported once
    /// and fails.
    fn check_list(&mut self, elements: &[Expr], span: Span) -> SemanticExpr {
        let elements: Vec<SemanticExpr> = elements.iter().map(|e| self.check_expr(e)).collect();

        let mut element_type: Option<TypeSymbol> = None;
        for element in &elements {
            let found = &element.type_symbol;
            if found.is_unknown() {
                continue;
            }
            match &element_type {
                None => element_type = Some(found.clone()),
                Some(current) if current.matches(found) => {}
                Some(current) if found.matches(current) => element_type = Some(found.clone()),
                Some(current) => {
                    self.report(SemanticError::HeterogeneousList {
                        expected: current.to_string(),
                        found: found.to_string(),
                        span: element.span,
                    });
                    return SemanticExpr::failed(span);
                }
            }
        }

        let element_type = match element_type {
            Some(t) => t,
            None if elements.is_empty() => TypeSymbol::Any,
            None => TypeSymbol::Unknown,
        };
        let elements = elements.into_iter().map(|e| widen(e, &element_type)).collect();
        SemanticExpr::new(SemanticExprKind::List(elements), TypeSymbol::list(element_type), span)
    }

    // ==================== Conversions and Counting ====================

    fn check_conversion(&mut self, value: &Expr, target: &TypeClause, span: Span) -> SemanticExpr {
        let value = self.check_expr(value);
        let to = self.resolve_type_clause(target);
        if value.type_symbol.is_unknown() || to.is_unknown() {
            return SemanticExpr::failed(span);
        }
        match conversion_kind(&value.type_symbol, &to) {
            Some(kind) => SemanticExpr::new(
                SemanticExprKind::Conversion {
                    value: Box::new(value),
                    kind,
                },
                to,
                span,
            ),
            None => {
                self.report(SemanticError::InvalidConversion {
                    from: value.type_symbol.to_string(),
                    to: to.to_string(),
                    span,
                });
                SemanticExpr::failed(span)
            }
        }
    }

    /// `++x`, `x--`: the name must be a mutable `Integer`, `Float` or `Char`.
    fn check_counting(&mut self, target: &Expr, increment: bool, prefix: bool, span: Span) -> SemanticExpr {
        let ExprKind::Name(name) = &target.unparenthesized().kind else {
            return SemanticExpr::failed(span);
        };
        let Some(symbol) = self.scope.lookup(name) else {
            self.report(SemanticError::UndefinedName {
                name: name.clone(),
                span: target.span,
            });
            return SemanticExpr::failed(span);
        };
        let (type_symbol, is_constant) = (symbol.type_symbol.clone(), symbol.is_constant);

        if is_constant {
            self.report(SemanticError::ConstantAssignment {
                name: name.clone(),
                span,
            });
            return SemanticExpr::failed(span);
        }
        if type_symbol.is_unknown() {
            return SemanticExpr::failed(span);
        }
        if !matches!(type_symbol, TypeSymbol::Integer | TypeSymbol::Float | TypeSymbol::Char) {
            self.report(SemanticError::InvalidCountingTarget {
                found: type_symbol.to_string(),
                span,
            });
            return SemanticExpr::failed(span);
        }

        SemanticExpr::new(
            SemanticExprKind::Counting {
                name: name.clone(),
                increment,
                prefix,
            },
            type_symbol,
            span,
        )
    }
}

fn literal_type(literal: &Literal) -> TypeSymbol {
    match literal {
        Literal::Integer(_) => TypeSymbol::Integer,
        Literal::Float(_) => TypeSymbol::Float,
        Literal::Char(_) => TypeSymbol::Char,
        Literal::String(_) => TypeSymbol::String,
        Literal::Boolean(_) => TypeSymbol::Boolean,
        Literal::Null => TypeSymbol::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze_source, errors_of, type_of};
    use crate::diagnostics::DiagnosticKind;
    use crate::semantic::error::SemanticError;
    use crate::semantic::operators::BinaryOperationKind;
    use crate::semantic::typed_ir::{SemanticExprKind, SemanticStatementKind};
    use crate::semantic::types::TypeSymbol;

    #[test]
    fn test_literal_and_operator_types() {
        assert_eq!(type_of("1 + 2"), TypeSymbol::Integer);
        assert_eq!(type_of("1 / 2"), TypeSymbol::Float);
        assert_eq!(type_of("2 ** 3"), TypeSymbol::Float);
        assert_eq!(type_of("7 % 2"), TypeSymbol::Integer);
        assert_eq!(type_of("'a' + 1"), TypeSymbol::Char);
        assert_eq!(type_of("\"ab\" * 3"), TypeSymbol::String);
        assert_eq!(type_of("1 < 2.5 && !false"), TypeSymbol::Boolean);
    }

    #[test]
    fn test_resolved_operation_kind() {
        let (tree, _, _) = analyze_source("\"a\" + 'b'");
        let SemanticStatementKind::Expression(expr) = &tree.statements[0].kind else {
            panic!("expected expression");
        };
        assert!(matches!(
            expr.kind,
            SemanticExprKind::Binary {
                kind: BinaryOperationKind::Concatenation,
                ..
            }
        ));
    }

    #[test]
    fn test_undefined_operator() {
        let errors = errors_of("true + 1");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], SemanticError::UndefinedBinaryOperator { op: "+", .. }));
        assert_eq!(errors[0].kind(), DiagnosticKind::TypeError);
    }

    #[test]
    fn test_error_containment() {
        // One undefined name, consumed by three operators.
        let errors = errors_of("-(missing + 1) * 2 < 3");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], SemanticError::UndefinedName { name, .. } if name == "missing"));
    }

    #[test]
    fn test_ternary_types() {
        assert_eq!(type_of("true ? 1 : 2"), TypeSymbol::Integer);
        assert_eq!(type_of("true ? 1 : 2.5"), TypeSymbol::Float);
        let errors = errors_of("true ? 1 : \"a\"");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SemanticError::TernaryMismatch { .. }));
        let errors = errors_of("1 ? 1 : 2");
        assert!(matches!(&errors[0], SemanticError::TypeMismatch { expected, .. } if expected == "Boolean"));
    }

    #[test]
    fn test_list_homogeneity() {
        assert_eq!(type_of("[1, 2, 3]"), TypeSymbol::list(TypeSymbol::Integer));
        assert_eq!(type_of("[1, 2.5]"), TypeSymbol::list(TypeSymbol::Float));
        assert_eq!(type_of("[]"), TypeSymbol::list(TypeSymbol::Any));

        let (tree, errors, _) = analyze_source("[1, 2, \"x\", 'c']");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SemanticError::HeterogeneousList { .. }));
        let SemanticStatementKind::Expression(expr) = &tree.statements[0].kind else {
            panic!("expected expression");
        };
        assert!(expr.is_failed());
        assert!(expr.type_symbol.is_unknown());
    }

    #[test]
    fn test_calls() {
        assert_eq!(type_of("Floor(2.5)"), TypeSymbol::Integer);
        assert_eq!(type_of("Floor(2)"), TypeSymbol::Integer);
        assert_eq!(type_of("Print(\"x\")"), TypeSymbol::Void);
        assert_eq!(type_of("Absolute(-3)"), TypeSymbol::Integer);
        assert_eq!(type_of("Absolute(-3.5)"), TypeSymbol::Float);
        assert!(errors_of("# y: Integer = Absolute(-3)").is_empty());
        assert!(!errors_of("# y: Integer = Absolute(-3.5)").is_empty());

        let errors = errors_of("Floor(1, 2)");
        assert!(matches!(errors[0], SemanticError::ArgumentCount { expected: 1, found: 2, .. }));
        let errors = errors_of("Read(1)");
        assert!(matches!(errors[0], SemanticError::TypeMismatch { .. }));
        let errors = errors_of("# x = 1\nx(2)");
        assert!(matches!(errors[0], SemanticError::NotCallable { .. }));
    }

    #[test]
    fn test_indexing_and_slicing() {
        assert_eq!(type_of("[1, 2][0]"), TypeSymbol::Integer);
        assert_eq!(type_of("\"abc\"[1]"), TypeSymbol::Char);
        assert_eq!(type_of("(0:10)[3]"), TypeSymbol::Integer);
        assert_eq!(type_of("\"abcdef\"[1:3]"), TypeSymbol::String);
        assert_eq!(type_of("[1, 2, 3][0:2]"), TypeSymbol::list(TypeSymbol::Integer));

        let errors = errors_of("5[0]");
        assert!(matches!(errors[0], SemanticError::NotIndexable { .. }));
        let errors = errors_of("[1][1.5]");
        assert!(matches!(errors[0], SemanticError::TypeMismatch { .. }));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(type_of("3.7 -> Integer"), TypeSymbol::Integer);
        assert_eq!(type_of("\"abc\" -> List<Char>"), TypeSymbol::list(TypeSymbol::Char));
        assert_eq!(type_of("[1, 2] -> String"), TypeSymbol::String);
        let errors = errors_of("\"12\" -> Integer");
        assert!(matches!(errors[0], SemanticError::InvalidConversion { .. }));
    }

    #[test]
    fn test_counting() {
        assert_eq!(type_of("# i = 0\ni++"), TypeSymbol::Integer);
        assert_eq!(type_of("# c = 'a'; ++c"), TypeSymbol::Char);
        let errors = errors_of("# s = \"a\"\ns++");
        assert!(matches!(errors[0], SemanticError::InvalidCountingTarget { .. }));
        let errors = errors_of("#* k = 1\nk++");
        assert!(matches!(errors[0], SemanticError::ConstantAssignment { .. }));
    }

    #[test]
    fn test_format_string_is_string() {
        assert_eq!(type_of("# n = 3\n$\"n = {n + 1}\""), TypeSymbol::String);
    }

    #[test]
    fn test_null_coalescing() {
        assert_eq!(type_of("null ?? 3"), TypeSymbol::Integer);
        assert_eq!(type_of("\"a\" ?? \"b\""), TypeSymbol::String);
    }
}
