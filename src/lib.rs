//! # Glint
//!
//! An interpreter for Glint, a small expression-oriented scripting language
//! with static types, ranges, lists, format strings and first-class
//! functions.
//!
//! ## Architecture
//!
//! The interpreter follows a traditional pipeline:
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Analysis → Semantic Tree → Evaluator → Value
//! ```
//!
//! Each phase is implemented as a separate module:
//!
//! - [`source`] - Source text, spans and line/column positions
//! - [`lexer`] - Tokenizes source code into a stream of tokens
//! - [`parser`] - Builds an Abstract Syntax Tree from tokens
//! - [`ast`] - AST type definitions
//! - [`semantic`] - Symbol resolution, type checking and operator resolution
//! - [`evaluator`] - Tree-walking evaluation of the semantic tree
//! - [`diagnostics`] - The diagnostic records every phase reports into
//! - [`interpreter`] - A session that runs the whole pipeline
//!
//! No phase stops at the first problem: each one reports diagnostics and
//! keeps going with placeholder nodes, so a single run finds every
//! independent error.
//!
//! ## Example
//!
//! ```
//! use glint::evaluator::{BufferedHost, Value};
//! use glint::interpreter::Interpreter;
//! use glint::source::Source;
//!
//! let source = Source::new("example", r#"
//!     # greeting = "Hello"
//!     fn shout(text: String): text + "!"
//!     Print(shout(greeting))
//!     1 + 2
//! "#);
//!
//! let mut host = BufferedHost::new();
//! let outcome = Interpreter::default().run(&source, &mut host);
//!
//! assert!(outcome.is_ok());
//! assert_eq!(host.output, vec!["Hello!"]);
//! assert_eq!(outcome.value, Value::Integer(3.0));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod source;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ast::{Expr, ExprKind, Program, Span, Statement, StatementKind};
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
    pub use crate::evaluator::{BufferedHost, Host, StdHost, Value};
    pub use crate::interpreter::{Interpreter, InterpreterOptions, Outcome};
    pub use crate::lexer::{Lexer, Token, TokenKind};
    pub use crate::parser::{ParseError, Parser};
    pub use crate::semantic::{SemanticError, SemanticProgram, SemanticScope, TypeSymbol};
    pub use crate::source::Source;
}
