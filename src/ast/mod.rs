//! Abstract Syntax Tree (AST) definitions for Glint.
//!
//! The AST represents the hierarchical structure of a program after parsing.
//! Each node in the tree corresponds to a syntactic construct in the source code.
//!
//! # Structure
//!
//! ```text
//! Program
//! └── Vec<Statement>
//!     ├── Declaration { name, type_clause, value: Option<Expr> }
//!     ├── FunctionDeclaration { name, function: Function }
//!     ├── If { condition: Expr, then_branch, else_branch }
//!     └── Expression(Expr)
//! ```
//!
//! # Design Decisions
//!
//! - **Owned nodes**: AST nodes own their children (no lifetimes, no parent
//!   links). The AST can outlive the token stream.
//! - **Span on every node**: a node's span covers its own tokens and all of
//!   its children.
//! - **Tagged variants**: one `kind` enum per node category, matched
//!   exhaustively by later stages.
//! - **Placeholders**: the parser inserts `Unknown` nodes where input was
//!   missing or malformed instead of aborting.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

pub use crate::source::Span;

/// A complete Glint program.
///
/// A program is simply a sequence of statements executed in order.
#[derive(Debug, Clone)]
pub struct Program {
    /// The statements that make up the program.
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Program {
    /// Creates a new program with the given statements.
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }
}

/// A written type: `Integer`, `List<Char>`, `Function<Integer, Integer>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeClause {
    pub name: String,
    /// Generic arguments, empty for plain types.
    pub parameters: Vec<TypeClause>,
    pub span: Span,
}

impl TypeClause {
    pub fn new(name: impl Into<String>, parameters: Vec<TypeClause>, span: Span) -> Self {
        Self {
            name: name.into(),
            parameters,
            span,
        }
    }
}

impl std::fmt::Display for TypeClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            f.write_str("<")?;
            for (i, parameter) in self.parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{parameter}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
