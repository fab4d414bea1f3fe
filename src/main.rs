//! Glint - an expression-oriented scripting language
//!
//! This is the command-line interface: run a script, dump a pipeline stage,
//! or start the REPL when no file is given.

mod repl;

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use glint::evaluator::{StdHost, Value};
use glint::interpreter::{Interpreter, InterpreterOptions};
use glint::lexer::{Lexer, TokenKind};
use glint::semantic::{self, SemanticScope};
use glint::source::Source;

/// Glint - an expression-oriented scripting language
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script to run; starts the REPL if omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Only run the lexer and print tokens
    #[arg(long)]
    tokens: bool,

    /// Only parse and print the syntax tree
    #[arg(long)]
    ast: bool,

    /// Only analyze and print the semantic tree
    #[arg(long)]
    tree: bool,

    /// Evaluate even if the program has errors
    #[arg(long)]
    force: bool,

    /// Seed for the random number built-ins
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut interpreter = Interpreter::new(InterpreterOptions {
        evaluate_on_error: args.force,
        seed: args.seed,
    });

    let Some(path) = &args.input else {
        repl::start(&mut interpreter);
        return ExitCode::SUCCESS;
    };

    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let source = Source::new(path.display().to_string(), text);

    if args.verbose {
        println!("Running: {}", path.display());
        println!("Source length: {} bytes", source.text().len());
    }

    if args.tokens {
        print_tokens(&source, args.verbose);
        return ExitCode::SUCCESS;
    }
    if args.ast || args.tree {
        let (program, errors) = glint::parser::parse(&Lexer::new(source.text()).tokenize().0);
        for error in errors {
            eprintln!("{}", glint::diagnostics::Diagnostic::from(error).render(&source));
        }
        if args.ast {
            println!("{program:#?}");
        } else {
            let (tree, errors) = semantic::analyze(&program, &mut SemanticScope::new());
            for error in errors {
                eprintln!("{}", glint::diagnostics::Diagnostic::from(error).render(&source));
            }
            println!("{tree:#?}");
        }
        return ExitCode::SUCCESS;
    }

    let outcome = interpreter.run(&source, &mut StdHost);
    for diagnostic in &outcome.diagnostics {
        eprintln!("{}", diagnostic.render(&source));
    }
    if args.verbose && !matches!(outcome.value, Value::Void) {
        println!("=> {}", outcome.value);
    }

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints one token per line with its span.
fn print_tokens(source: &Source, verbose: bool) {
    println!("Tokens for {}:", source.name());
    println!("{:-<60}", "");

    let (tokens, errors) = Lexer::new(source.text()).tokenize();
    for token in tokens {
        // Skip whitespace and comments unless verbose
        if token.kind.is_ignorable() && !verbose {
            continue;
        }
        if token.kind == TokenKind::Eof {
            break;
        }

        println!(
            "{:4}..{:<4} {:20} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.text
        );
    }
    for error in errors {
        eprintln!("{}", glint::diagnostics::Diagnostic::from(error).render(source));
    }
}
