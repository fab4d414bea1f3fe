//! Expression AST nodes.
//!
//! Expressions are constructs that evaluate to a value: literals, names,
//! operators, calls, indexing, ranges, lists, format strings and function
//! literals.
//!
//! # Expression Precedence
//!
//! From lowest to highest (as implemented in the parser):
//!
//! 1. Assignment: `=` and compound forms (right-associative)
//! 2. Ternary: `c ? a : b` (right-associative) and ranges `a:b[:s]`
//! 3. `??`, then `||`, then `&&`
//! 4. `|`, then `^`, then `&`
//! 5. Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! 6. Shifts: `<<`, `>>`
//! 7. Additive: `+`, `-`
//! 8. Multiplicative: `*`, `/`, `%`
//! 9. Power: `**`
//! 10. Unary prefix: `+x`, `-x`, `~x`, `!x`, `++x`, `--x`
//! 11. Postfix: `x++`, `f(a)`, `x[i]`, `x -> Type`

use super::{Span, Statement, TypeClause};

/// An expression with its source location.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// Source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A placeholder for a missing or malformed expression.
    pub fn unknown(span: Span) -> Self {
        Self::new(ExprKind::Unknown, span)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, ExprKind::Unknown)
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        match &self.kind {
            ExprKind::Parenthesized(inner) => inner.unparenthesized(),
            _ => self,
        }
    }

    /// Direct child expressions, in source order.
    ///
    /// Function literal bodies are statements and are not included.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Name(_) | ExprKind::Unknown => Vec::new(),
            ExprKind::Unary { operand, .. } => vec![&**operand],
            ExprKind::Binary { left, right, .. } => vec![&**left, &**right],
            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => vec![&**condition, &**then_branch, &**else_branch],
            ExprKind::Assignment { target, value, .. } => vec![&**target, &**value],
            ExprKind::Call { callee, arguments } => {
                std::iter::once(&**callee).chain(arguments).collect()
            }
            ExprKind::Index { target, index } => vec![&**target, &**index],
            ExprKind::Range { start, end, step } => {
                let mut children = vec![&**start, &**end];
                children.extend(step.as_deref());
                children
            }
            ExprKind::List(elements) => elements.iter().collect(),
            ExprKind::FormatString(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    FormatPart::Expression(expr) => Some(expr),
                    FormatPart::Text { .. } => None,
                })
                .collect(),
            ExprKind::FunctionLiteral(function) => match &function.body {
                FunctionBody::Expression(body) => vec![body],
                FunctionBody::Block(_) => Vec::new(),
            },
            ExprKind::Parenthesized(inner) => vec![&**inner],
            ExprKind::Conversion { value, .. } => vec![&**value],
            ExprKind::Counting { target, .. } => vec![&**target],
        }
    }
}

/// A decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal (and `∞`). Stored as f64 like every runtime number.
    Integer(f64),
    Float(f64),
    Char(char),
    String(String),
    Boolean(bool),
    Null,
}

/// The different kinds of expressions.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// `42`, `2.5`, `'c'`, `"text"`, `true`, `null`
    Literal(Literal),

    /// Variable or function reference: `x`, `Print`
    Name(String),

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `condition ? then_branch : else_branch`
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `target = value`
    ///
    /// Compound assignments are desugared: `x += 1` becomes
    /// `x = x + 1` with `operator` set to `Add`.
    Assignment {
        target: Box<Expr>,
        operator: Option<BinaryOp>,
        value: Box<Expr>,
    },

    /// Function call: `callee(arg1, arg2, ...)`
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },

    /// `target[index]`, where `index` may be a range (`xs[1:3]`)
    Index { target: Box<Expr>, index: Box<Expr> },

    /// `start:end[:step]`
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
    },

    /// `[a, b, c]`
    List(Vec<Expr>),

    /// `$"text {expr} text"`
    FormatString(Vec<FormatPart>),

    /// `(a: Integer) -> Integer: a * 2`
    FunctionLiteral(Box<Function>),

    /// Parenthesized expression: `(expr)`
    ///
    /// Preserves the parentheses in the AST for accurate spans.
    Parenthesized(Box<Expr>),

    /// `value -> Type`
    Conversion { value: Box<Expr>, target: TypeClause },

    /// `++x`, `x++`, `--x`, `x--`
    Counting {
        target: Box<Expr>,
        increment: bool,
        prefix: bool,
    },

    /// Fabricated by the parser for missing or malformed input.
    Unknown,
}

/// One piece of a format string.
#[derive(Debug, Clone)]
pub enum FormatPart {
    /// Literal text with escapes already decoded.
    Text { text: String, span: Span },
    Expression(Expr),
}

/// A function parameter: `name: Type`.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_clause: TypeClause,
    pub span: Span,
}

/// Parameters, optional return hint and body shared by function literals and
/// function declarations.
#[derive(Debug, Clone)]
pub struct Function {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeClause>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone)]
pub enum FunctionBody {
    /// `: a + b`
    Expression(Expr),
    /// `: { ... }`
    Block(Box<Statement>),
}

impl FunctionBody {
    pub fn span(&self) -> Span {
        match self {
            FunctionBody::Expression(expr) => expr.span,
            FunctionBody::Block(block) => block.span,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    And,
    Or,
    /// `??`
    NullCoalesce,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    /// Returns a string representation of the operator for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::NullCoalesce => "??",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
        }
    }
}

/// Unary prefix operators (`++`/`--` are [`ExprKind::Counting`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+x`
    Identity,
    /// `-x`
    Negate,
    /// `~x`
    BitNot,
    /// `!x`
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Identity => "+",
            UnaryOp::Negate => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str, start: usize) -> Expr {
        Expr::new(ExprKind::Name(n.to_string()), Span::new(start, start + n.len()))
    }

    #[test]
    fn test_unparenthesized() {
        let inner = name("x", 2);
        let wrapped = Expr::new(
            ExprKind::Parenthesized(Box::new(Expr::new(
                ExprKind::Parenthesized(Box::new(inner)),
                Span::new(1, 4),
            ))),
            Span::new(0, 5),
        );
        assert!(matches!(
            &wrapped.unparenthesized().kind,
            ExprKind::Name(n) if n == "x"
        ));
    }

    #[test]
    fn test_children_in_source_order() {
        let call = Expr::new(
            ExprKind::Call {
                callee: Box::new(name("f", 0)),
                arguments: vec![name("a", 2), name("b", 5)],
            },
            Span::new(0, 7),
        );
        let starts: Vec<_> = call.children().iter().map(|c| c.span.start).collect();
        assert_eq!(starts, vec![0, 2, 5]);
    }

    #[test]
    fn test_binary_op_as_str() {
        assert_eq!(BinaryOp::NullCoalesce.as_str(), "??");
        assert_eq!(BinaryOp::Power.as_str(), "**");
        assert_eq!(UnaryOp::BitNot.as_str(), "~");
    }
}
