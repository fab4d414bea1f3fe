//! The interpreter pipeline: lex, parse, analyze, evaluate.
//!
//! An [`Interpreter`] is a session. It keeps the semantic scope and the
//! runtime scope between [`Interpreter::run`] calls, so a REPL can declare a
//! variable on one line and use it on the next.
//!
//! A program with lexical, syntax or semantic diagnostics is not evaluated,
//! and any declarations the analyzer made for it are rolled back, unless
//! [`InterpreterOptions::evaluate_on_error`] is set.

use crate::diagnostics::Diagnostics;
use crate::evaluator::{self, Host, Random, Scope, Value};
use crate::lexer::Lexer;
use crate::parser;
use crate::semantic::{self, SemanticScope};
use crate::source::Source;

/// Session settings.
#[derive(Debug, Clone, Default)]
pub struct InterpreterOptions {
    /// Evaluate programs even when earlier stages reported diagnostics.
    /// Failed nodes then evaluate to `Unknown`.
    pub evaluate_on_error: bool,
    /// Seed for `RandomInt`/`RandomFloat`; the clock is used if unset.
    pub seed: Option<u64>,
}

/// The result of one run.
#[derive(Debug)]
pub struct Outcome {
    /// Value of the last top-level expression, `Void` if there is none and
    /// `Unknown` if the program was not evaluated.
    pub value: Value,
    pub diagnostics: Diagnostics,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A persistent interpreter session.
pub struct Interpreter {
    options: InterpreterOptions,
    names: SemanticScope,
    scope: Scope,
    random: Random,
}

impl Interpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        let random = Random::new(options.seed);
        Self {
            options,
            names: SemanticScope::new(),
            scope: Scope::new(),
            random,
        }
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// Forgets every declaration made so far.
    pub fn reset(&mut self) {
        log::debug!("resetting interpreter session");
        self.names = SemanticScope::new();
        self.scope = Scope::new();
    }

    /// Runs `source` through the whole pipeline.
    pub fn run(&mut self, source: &Source, host: &mut dyn Host) -> Outcome {
        let mut diagnostics = Diagnostics::new();

        let (tokens, lex_errors) = Lexer::new(source.text()).tokenize();
        log::debug!("{}: {} tokens", source.name(), tokens.len());
        diagnostics.extend(lex_errors);

        let (program, parse_errors) = parser::parse(&tokens);
        log::debug!("{}: {} statements parsed", source.name(), program.statements.len());
        diagnostics.extend(parse_errors);

        let snapshot = self.names.clone();
        let (tree, semantic_errors) = semantic::analyze(&program, &mut self.names);
        diagnostics.extend(semantic_errors);

        if !diagnostics.is_empty() && !self.options.evaluate_on_error {
            log::debug!(
                "{}: not evaluating, {} diagnostics",
                source.name(),
                diagnostics.len()
            );
            self.names = snapshot;
            return Outcome {
                value: Value::Unknown,
                diagnostics,
            };
        }

        let (value, runtime_errors) = evaluator::evaluate(&tree, &mut self.scope, host, &mut self.random);
        diagnostics.extend(runtime_errors);
        Outcome { value, diagnostics }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterOptions::default())
    }
}
