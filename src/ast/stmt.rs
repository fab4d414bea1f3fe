//! Statement AST nodes.
//!
//! # Statement Categories
//!
//! - **Declarations**: `# name = value`, `#* name: Type = value`,
//!   `fn name(a: Integer): body`
//! - **Control flow**: `if`/`else`, `while`, `for ... in`
//! - **Jumps**: `break`, `continue`, `return`
//! - **Blocks**: `{ ... }`
//! - **Expression statements**

use super::{Expr, Function, Span, TypeClause};

/// A statement with its source location.
#[derive(Debug, Clone)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// Source location of this statement.
    pub span: Span,
}

impl Statement {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The different kinds of statements.
#[derive(Debug, Clone)]
pub enum StatementKind {
    /// `# [*] name [: Type] [= value]`
    ///
    /// `#* name` with neither type nor value promotes an existing name to a
    /// constant.
    Declaration {
        name: String,
        name_span: Span,
        is_constant: bool,
        type_clause: Option<TypeClause>,
        value: Option<Expr>,
    },

    /// `fn name(p: Type, ...) [-> Type]: body`
    FunctionDeclaration {
        name: String,
        name_span: Span,
        function: Box<Function>,
    },

    /// `{ statements }`
    Block(Vec<Statement>),

    /// `if condition then_branch [else else_branch]`
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },

    /// `while condition body`
    While { condition: Expr, body: Box<Statement> },

    /// `for variable in iterable body`
    For {
        variable: String,
        variable_span: Span,
        iterable: Expr,
        body: Box<Statement>,
    },

    Break,

    Continue,

    /// `return [value]`
    Return(Option<Expr>),

    /// An expression evaluated for its value or side effects.
    Expression(Expr),

    /// Fabricated by the parser for malformed input.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, Literal};

    #[test]
    fn test_create_declaration() {
        let stmt = Statement::new(
            StatementKind::Declaration {
                name: "x".to_string(),
                name_span: Span::new(2, 3),
                is_constant: false,
                type_clause: None,
                value: Some(Expr::new(
                    ExprKind::Literal(Literal::Integer(42.0)),
                    Span::new(6, 8),
                )),
            },
            Span::new(0, 8),
        );
        assert!(matches!(
            stmt.kind,
            StatementKind::Declaration { ref name, is_constant: false, .. } if name == "x"
        ));
    }
}
