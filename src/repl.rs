//! Interactive prompt.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use rustyline::history::History;

use glint::evaluator::{StdHost, Value};
use glint::interpreter::Interpreter;
use glint::lexer::{lex, needs_more_input};
use glint::source::Source;

pub fn start(interpreter: &mut Interpreter) {
    let mut editor = match DefaultEditor::new() {
        Ok(ed) => ed,
        Err(e) => {
            eprintln!("failed to initialize REPL: {}", e);
            std::process::exit(1);
        }
    };
    let mut host = StdHost;

    println!("Glint v{} (.exit to quit, .reset to forget everything)", env!("CARGO_PKG_VERSION"));

    loop {
        let input = match read_input(&mut editor) {
            Some(line) => line,
            None => break,
        };

        match input.trim() {
            "" => continue,
            ".reset" => {
                interpreter.reset();
                continue;
            }
            _ => {}
        }

        let source = Source::new("<repl>", input);
        let outcome = interpreter.run(&source, &mut host);
        for diagnostic in &outcome.diagnostics {
            eprintln!("{}", diagnostic.render(&source));
        }
        if !matches!(outcome.value, Value::Void | Value::Unknown) {
            println!("{}", outcome.value);
        }
    }
}

fn read_input(editor: &mut DefaultEditor) -> Option<String> {
    let first_line = match editor.readline(">> ") {
        Ok(line) => line,
        Err(ReadlineError::Eof | ReadlineError::Interrupted) => return None,
        Err(e) => {
            eprintln!("readline error: {}", e);
            return None;
        }
    };

    if first_line.trim() == ".exit" {
        return None;
    }

    let mut buffer = first_line;

    while needs_more_input(&lex(&buffer)) {
        match editor.readline(".. ") {
            Ok(line) => {
                buffer.push('\n');
                buffer.push_str(&line);
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => {
                eprintln!("readline error: {}", e);
                break;
            }
        }
    }

    remember(editor.history_mut(), &buffer);
    Some(buffer)
}

/// Adds `entry` to the history, logging failures. Returns whether it was added.
fn remember(history: &mut impl History, entry: &str) -> bool {
    match history.add(entry) {
        Ok(added) => added,
        Err(e) => {
            log::debug!("could not add history entry: {}", e);
            false
        }
    }
}
