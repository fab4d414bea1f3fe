//! Declaration and function binding.
//!
//! This module handles:
//! - `# name = value` / `# name: Type [= value]` variable declarations
//! - `#* name ...` constant declarations and `#* name` promotion
//! - `fn name(...)` function declarations
//! - function literals

use std::rc::Rc;

use crate::ast::{Expr, Function, FunctionBody, Span, StatementKind, TypeClause};
use crate::semantic::{
    error::SemanticError,
    symbols::{NameSymbol, SymbolKind},
    typed_ir::{SemanticFunction, SemanticFunctionBody, SemanticStatement, SemanticStatementKind},
    types::TypeSymbol,
};

use super::{Analyzer, FunctionContext};

/// Resolved parameter list and return hint of a function.
struct Signature {
    parameters: Vec<(String, TypeSymbol, Span)>,
    hint: Option<TypeSymbol>,
}

impl Signature {
    fn parameter_types(&self) -> Vec<TypeSymbol> {
        self.parameters.iter().map(|(_, t, _)| t.clone()).collect()
    }
}

impl<'a> Analyzer<'a> {
    // ==================== Variable Declarations ====================

    /// Binds `# [*] name [: Type] [= value]`.
    ///
    /// The initializer is bound before the name is declared, so it sees any
    /// outer binding of the same name.
    pub(super) fn check_declaration(
        &mut self,
        name: &str,
        name_span: Span,
        is_constant: bool,
        type_clause: Option<&TypeClause>,
        value: Option<&Expr>,
        span: Span,
    ) -> SemanticStatement {
        // `#* name` promotes an existing name.
        if is_constant && type_clause.is_none() && value.is_none() {
            if name.is_empty() {
                return SemanticStatement::new(SemanticStatementKind::Failed, span);
            }
            if !self.scope.make_constant(name) {
                self.report(SemanticError::UndefinedName {
                    name: name.to_string(),
                    span: name_span,
                });
                return SemanticStatement::new(SemanticStatementKind::Failed, span);
            }
            return SemanticStatement::new(SemanticStatementKind::Empty, span);
        }

        let value = value.map(|v| self.check_expr(v));
        let declared = type_clause.map(|c| self.resolve_type_clause(c));

        let (type_symbol, value) = match (declared, value) {
            (Some(declared), Some(value)) => {
                let value = self.expect_type(value, &declared);
                (declared, Some(value))
            }
            (Some(declared), None) => {
                if !declared.has_default_value() {
                    self.report(SemanticError::NoDefaultValue {
                        type_name: declared.to_string(),
                        span,
                    });
                }
                (declared, None)
            }
            (None, Some(value)) => {
                let inferred = match &value.type_symbol {
                    TypeSymbol::Null => TypeSymbol::Any,
                    TypeSymbol::Void => {
                        self.report(SemanticError::VoidDeclaration {
                            name: name.to_string(),
                            span: value.span,
                        });
                        TypeSymbol::Unknown
                    }
                    other => other.clone(),
                };
                (inferred, Some(value))
            }
            // Rejected by the parser.
            (None, None) => (TypeSymbol::Unknown, None),
        };

        let symbol = NameSymbol::new(name, type_symbol.clone(), is_constant, SymbolKind::Variable);
        if !self.declare(symbol, name_span) {
            return SemanticStatement::new(SemanticStatementKind::Failed, span);
        }

        SemanticStatement::new(
            SemanticStatementKind::Declaration {
                name: name.to_string(),
                type_symbol,
                value,
            },
            span,
        )
    }

    /// Declares `symbol` in the current scope, reporting a duplicate.
    pub(super) fn declare(&mut self, symbol: NameSymbol, span: Span) -> bool {
        let name = symbol.name.clone();
        if self.scope.declare(symbol).is_err() {
            self.report(SemanticError::AlreadyDeclared { name, span });
            return false;
        }
        true
    }

    // ==================== Functions ====================

    /// Binds `fn name(params) [-> Type]: body`.
    ///
    /// With a return hint the name is declared before the body is bound, so
    /// the function can call itself. Without one the return type is only
    /// known afterwards.
    pub(super) fn check_function_declaration(
        &mut self,
        name: &str,
        name_span: Span,
        function: &Function,
        span: Span,
    ) -> SemanticStatement {
        let signature = self.resolve_signature(function);
        let mut declared = false;
        if let Some(hint) = &signature.hint {
            let type_symbol = TypeSymbol::function(hint.clone(), signature.parameter_types());
            declared = self.declare(NameSymbol::new(name, type_symbol, true, SymbolKind::Function), name_span);
            if !declared {
                // Bind the body anyway so its errors are found.
                self.check_function_body(function, signature);
                return SemanticStatement::new(SemanticStatementKind::Failed, span);
            }
        }

        let bound = self.check_function_body(function, signature);
        if !declared {
            let symbol = NameSymbol::new(name, bound.type_symbol(), true, SymbolKind::Function);
            if !self.declare(symbol, name_span) {
                return SemanticStatement::new(SemanticStatementKind::Failed, span);
            }
        }

        SemanticStatement::new(
            SemanticStatementKind::Function {
                name: name.to_string(),
                function: bound,
            },
            span,
        )
    }

    /// Binds a function literal or the function part of a declaration.
    pub(crate) fn check_function(&mut self, function: &Function) -> Rc<SemanticFunction> {
        let signature = self.resolve_signature(function);
        self.check_function_body(function, signature)
    }

    fn resolve_signature(&mut self, function: &Function) -> Signature {
        let parameters = function
            .parameters
            .iter()
            .map(|p| (p.name.clone(), self.resolve_type_clause(&p.type_clause), p.span))
            .collect();
        let hint = function.return_type.as_ref().map(|c| self.resolve_type_clause(c));
        Signature { parameters, hint }
    }

    /// Binds parameters and body in a child scope.
    ///
    /// A block body without a hint returns `Void`; an expression body
    /// without a hint returns the type of its expression.
    fn check_function_body(&mut self, function: &Function, signature: Signature) -> Rc<SemanticFunction> {
        let return_hint = match (&signature.hint, &function.body) {
            (Some(hint), _) => Some(hint.clone()),
            (None, FunctionBody::Block(_)) => Some(TypeSymbol::Void),
            (None, FunctionBody::Expression(_)) => None,
        };

        self.functions.push(FunctionContext {
            return_type: return_hint.clone(),
            outer_loop_depth: self.loop_depth,
        });
        self.loop_depth = 0;

        let (body, return_type) = self.scoped(|a| {
            for (name, type_symbol, span) in &signature.parameters {
                if !name.is_empty() {
                    a.declare(
                        NameSymbol::new(name.clone(), type_symbol.clone(), false, SymbolKind::Parameter),
                        *span,
                    );
                }
            }

            match &function.body {
                FunctionBody::Expression(expr) => {
                    let bound = a.check_expr(expr);
                    match return_hint {
                        Some(hint) => (SemanticFunctionBody::Expression(a.expect_type(bound, &hint)), hint),
                        None => {
                            let inferred = bound.type_symbol.clone();
                            (SemanticFunctionBody::Expression(bound), inferred)
                        }
                    }
                }
                FunctionBody::Block(block) => {
                    let statements = match &block.kind {
                        StatementKind::Block(statements) => a.check_statements(statements),
                        _ => vec![a.check_statement(block)],
                    };
                    let hint = return_hint.unwrap_or(TypeSymbol::Void);
                    if hint != TypeSymbol::Void && !hint.is_unknown() && !definitely_returns(&statements) {
                        a.report(SemanticError::MissingReturn {
                            expected: hint.to_string(),
                            span: block.span,
                        });
                    }
                    (SemanticFunctionBody::Block(statements), hint)
                }
            }
        });

        if let Some(context) = self.functions.pop() {
            self.loop_depth = context.outer_loop_depth;
        }

        Rc::new(SemanticFunction {
            parameters: signature
                .parameters
                .into_iter()
                .map(|(name, type_symbol, _)| (name, type_symbol))
                .collect(),
            return_type,
            body,
        })
    }
}

/// Whether every path through `statements` ends in a `return`.
pub(super) fn definitely_returns(statements: &[SemanticStatement]) -> bool {
    statements.iter().any(|statement| match &statement.kind {
        SemanticStatementKind::Return(_) => true,
        SemanticStatementKind::Block(inner) => definitely_returns(inner),
        SemanticStatementKind::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => {
            definitely_returns(std::slice::from_ref(then_branch))
                && definitely_returns(std::slice::from_ref(else_branch))
        }
        _ => false,
    })
}
