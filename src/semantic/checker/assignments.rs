//! Assignment binding.
//!
//! A target is a name, optionally followed by element indices:
//! `x = v`, `xs[i] = v`, `grid[i][j] = v`. Parentheses around the target are
//! ignored. Every container along the chain must be a `List`; strings and
//! ranges cannot be modified in place.

use crate::ast::{Expr, ExprKind, Span};
use crate::semantic::{
    error::SemanticError,
    typed_ir::{AssignmentTarget, SemanticExpr, SemanticExprKind},
    types::TypeSymbol,
};

use super::Analyzer;

impl<'a> Analyzer<'a> {
    /// Binds `target = value`.
    ///
    /// For compound assignments the target name already appears in `value`,
    /// so an undefined target is only reported there.
    pub(crate) fn check_assignment(&mut self, target: &Expr, compound: bool, value: &Expr, span: Span) -> SemanticExpr {
        let value = self.check_expr(value);

        // Peel `a[i][j]` down to `a`, collecting indices outermost first.
        let mut index_exprs = Vec::new();
        let mut root = target.unparenthesized();
        while let ExprKind::Index { target, index } = &root.kind {
            index_exprs.push(&**index);
            root = target.unparenthesized();
        }
        index_exprs.reverse();

        let ExprKind::Name(name) = &root.kind else {
            if !root.is_unknown() {
                self.report(SemanticError::InvalidAssignmentTarget { span: target.span });
            }
            return SemanticExpr::failed(span);
        };

        let Some(symbol) = self.scope.lookup(name) else {
            if !compound {
                self.report(SemanticError::UndefinedName {
                    name: name.clone(),
                    span: root.span,
                });
            }
            return SemanticExpr::failed(span);
        };
        let (mut slot, is_constant) = (symbol.type_symbol.clone(), symbol.is_constant);

        if is_constant {
            self.report(SemanticError::ConstantAssignment {
                name: name.clone(),
                span,
            });
            return SemanticExpr::failed(span);
        }

        let mut indices = Vec::with_capacity(index_exprs.len());
        for index in index_exprs {
            let bound = self.check_expr(index);
            if bound.type_symbol == TypeSymbol::Range {
                self.report(SemanticError::InvalidAssignmentTarget { span: target.span });
                return SemanticExpr::failed(span);
            }
            indices.push(self.expect_type(bound, &TypeSymbol::Integer));

            if let Some(element) = slot.list_element() {
                slot = element.clone();
                continue;
            }
            match &slot {
                TypeSymbol::Unknown | TypeSymbol::Any => {}
                TypeSymbol::String | TypeSymbol::Range => {
                    self.report(SemanticError::ImmutableContainer {
                        found: slot.to_string(),
                        span: target.span,
                    });
                    return SemanticExpr::failed(span);
                }
                other => {
                    self.report(SemanticError::NotIndexable {
                        found: other.to_string(),
                        span: target.span,
                    });
                    return SemanticExpr::failed(span);
                }
            }
        }

        let value = self.expect_type(value, &slot);
        let type_symbol = if slot.is_unknown() { value.type_symbol.clone() } else { slot };
        SemanticExpr::new(
            SemanticExprKind::Assignment {
                target: AssignmentTarget {
                    name: name.clone(),
                    indices,
                },
                value: Box::new(value),
            },
            type_symbol,
            span,
        )
    }
}
