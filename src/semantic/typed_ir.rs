//! Semantic tree: the AST after binding.
//!
//! This module defines the output of semantic analysis and the input of the
//! evaluator. It mirrors the AST shape, but:
//!
//! - **Every expression knows its type**
//! - **Operators are resolved**: nodes carry the [`BinaryOperationKind`] /
//!   [`UnaryOperationKind`] chosen from the operator tables, not the raw token
//! - **Conversions are explicit**: implicit widening becomes a `Conversion` node
//! - **Failures are contained**: anything that could not be bound is a
//!   `Failed` node typed `Unknown`

use std::rc::Rc;

use crate::ast::{Literal, Span};

use super::operators::{BinaryOperationKind, ConversionKind, UnaryOperationKind};
use super::types::TypeSymbol;

/// A bound program.
#[derive(Debug, Clone)]
pub struct SemanticProgram {
    pub statements: Vec<SemanticStatement>,
    pub span: Span,
}

/// A type-annotated expression.
#[derive(Debug, Clone)]
pub struct SemanticExpr {
    pub kind: SemanticExprKind,
    /// The type of this expression's value.
    pub type_symbol: TypeSymbol,
    pub span: Span,
}

impl SemanticExpr {
    pub fn new(kind: SemanticExprKind, type_symbol: TypeSymbol, span: Span) -> Self {
        Self {
            kind,
            type_symbol,
            span,
        }
    }

    /// A node that could not be bound.
    pub fn failed(span: Span) -> Self {
        Self::new(SemanticExprKind::Failed, TypeSymbol::Unknown, span)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.kind, SemanticExprKind::Failed)
    }
}

/// The left-hand side of an assignment: a name, optionally indexed.
#[derive(Debug, Clone)]
pub struct AssignmentTarget {
    pub name: String,
    /// Element indices from the outermost container inward.
    pub indices: Vec<SemanticExpr>,
}

/// A piece of an interpolated string.
#[derive(Debug, Clone)]
pub enum SemanticFormatPart {
    Text(String),
    Expression(SemanticExpr),
}

/// The different kinds of bound expressions.
#[derive(Debug, Clone)]
pub enum SemanticExprKind {
    Literal(Literal),

    /// Reference to a declared name.
    Name(String),

    Unary {
        kind: UnaryOperationKind,
        operand: Box<SemanticExpr>,
    },

    Binary {
        left: Box<SemanticExpr>,
        kind: BinaryOperationKind,
        right: Box<SemanticExpr>,
    },

    /// `condition ? then_branch : else_branch`
    Ternary {
        condition: Box<SemanticExpr>,
        then_branch: Box<SemanticExpr>,
        else_branch: Box<SemanticExpr>,
    },

    /// Assignment; compound forms already carry the binary operation in `value`.
    Assignment {
        target: AssignmentTarget,
        value: Box<SemanticExpr>,
    },

    Call {
        callee: Box<SemanticExpr>,
        arguments: Vec<SemanticExpr>,
    },

    /// Single element access.
    Index {
        target: Box<SemanticExpr>,
        index: Box<SemanticExpr>,
    },

    /// `target[start:end]` on a list or string.
    Slice {
        target: Box<SemanticExpr>,
        range: Box<SemanticExpr>,
    },

    Range {
        start: Box<SemanticExpr>,
        end: Box<SemanticExpr>,
        step: Option<Box<SemanticExpr>>,
    },

    List(Vec<SemanticExpr>),

    FormatString(Vec<SemanticFormatPart>),

    /// Function literal. The body is shared with the runtime values created
    /// from it.
    Function(Rc<SemanticFunction>),

    Conversion {
        value: Box<SemanticExpr>,
        kind: ConversionKind,
    },

    /// `++x`, `x--`
    Counting {
        name: String,
        increment: bool,
        prefix: bool,
    },

    /// Placeholder for an expression that failed to bind.
    Failed,
}

/// A bound function.
#[derive(Debug)]
pub struct SemanticFunction {
    pub parameters: Vec<(String, TypeSymbol)>,
    pub return_type: TypeSymbol,
    pub body: SemanticFunctionBody,
}

impl SemanticFunction {
    /// The `Function<...>` type of this function.
    pub fn type_symbol(&self) -> TypeSymbol {
        TypeSymbol::function(
            self.return_type.clone(),
            self.parameters.iter().map(|(_, t)| t.clone()).collect(),
        )
    }
}

#[derive(Debug)]
pub enum SemanticFunctionBody {
    /// `: expression`, whose value is returned.
    Expression(SemanticExpr),
    /// `: { ... }`, left through `return` or by falling off the end.
    Block(Vec<SemanticStatement>),
}

/// A bound statement.
#[derive(Debug, Clone)]
pub struct SemanticStatement {
    pub kind: SemanticStatementKind,
    pub span: Span,
}

impl SemanticStatement {
    pub fn new(kind: SemanticStatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum SemanticStatementKind {
    /// `# name = value` or `# name: Type`. Without a value the variable
    /// starts at the default for `type_symbol`.
    Declaration {
        name: String,
        type_symbol: TypeSymbol,
        value: Option<SemanticExpr>,
    },

    /// `fn name(...)`
    Function {
        name: String,
        function: Rc<SemanticFunction>,
    },

    Block(Vec<SemanticStatement>),

    If {
        condition: SemanticExpr,
        then_branch: Box<SemanticStatement>,
        else_branch: Option<Box<SemanticStatement>>,
    },

    While {
        condition: SemanticExpr,
        body: Box<SemanticStatement>,
    },

    For {
        variable: String,
        iterable: SemanticExpr,
        body: Box<SemanticStatement>,
    },

    Break,
    Continue,
    Return(Option<SemanticExpr>),
    Expression(SemanticExpr),

    /// A statement with no runtime effect, such as `#* name`.
    Empty,

    /// Placeholder for a statement that failed to bind.
    Failed,
}
