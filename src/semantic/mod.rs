//! Semantic analysis for Glint.
//!
//! This phase runs after parsing and before evaluation. It handles:
//!
//! - **Symbol resolution**: linking names to their declarations
//! - **Type checking**: ensuring operations have compatible types
//! - **Type inference**: deriving the type of declarations from initializers
//! - **Validation**: enforcing rules beyond syntax (constants, jumps, returns)
//!
//! # Architecture
//!
//! Analysis is a single recursive pass. Names are declared into the
//! [`SemanticScope`] as they are encountered, so a name must be declared
//! before it is used. The scope is passed in by the caller and survives the
//! pass, which lets a REPL accumulate declarations across inputs.
//!
//! # Output
//!
//! The output is a [`SemanticProgram`]: the AST annotated with types and
//! resolved operations, ready for the evaluator. Analysis never fails as a
//! whole; problems are returned next to the tree as [`SemanticError`]s and
//! the affected nodes are `Failed`.
//!
//! # Usage
//!
//! ```
//! use glint::{lexer, parser, semantic};
//!
//! let (program, _) = parser::parse(&lexer::lex("# x = 1 + 2"));
//! let mut scope = semantic::SemanticScope::new();
//! let (tree, errors) = semantic::analyze(&program, &mut scope);
//! assert!(errors.is_empty());
//! assert_eq!(tree.statements.len(), 1);
//! assert_eq!(scope.lookup("x").unwrap().type_symbol, semantic::TypeSymbol::Integer);
//! ```

pub mod builtins;
pub mod checker;
pub mod error;
pub mod operators;
pub mod symbols;
pub mod typed_ir;
pub mod types;

pub use builtins::Builtin;
pub use checker::Analyzer;
pub use error::SemanticError;
pub use operators::{BinaryOperationKind, ConversionKind, UnaryOperationKind};
pub use symbols::{NameSymbol, SemanticScope, SymbolKind};
pub use typed_ir::{SemanticExpr, SemanticExprKind, SemanticProgram, SemanticStatement, SemanticStatementKind};
pub use types::{GenericKind, GenericTypeSymbol, TypeSymbol};

use crate::ast::Program;

/// Binds `program` against `scope`.
///
/// Declarations made at the top level stay in `scope` afterwards.
pub fn analyze(program: &Program, scope: &mut SemanticScope) -> (SemanticProgram, Vec<SemanticError>) {
    let mut analyzer = Analyzer::new(scope);
    let statements = analyzer.check_statements(&program.statements);
    log::debug!(
        "analyzed {} statements with {} errors",
        statements.len(),
        analyzer.errors.len()
    );
    (
        SemanticProgram {
            statements,
            span: program.span,
        },
        analyzer.errors,
    )
}
