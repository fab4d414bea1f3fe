//! Host I/O used by the built-ins.
//!
//! The evaluator never touches stdin/stdout directly. `Print`, `Read` and
//! `Clear` go through a [`Host`], so the same program can run in a terminal
//! ([`StdHost`]) or against in-memory buffers ([`BufferedHost`]).

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// The environment a program talks to.
pub trait Host {
    /// Writes one line of output.
    fn print(&mut self, text: &str);

    /// Shows `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Clears the output.
    fn clear(&mut self);
}

/// Terminal host backed by stdin and stdout.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        if let Err(e) = io::stdout().flush() {
            log::warn!("failed to flush stdout: {e}");
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("failed to read stdin: {e}");
                None
            }
        }
    }

    fn clear(&mut self) {
        // Clear screen and move the cursor home.
        print!("\x1b[2J\x1b[H");
        if let Err(e) = io::stdout().flush() {
            log::warn!("failed to flush stdout: {e}");
        }
    }
}

/// In-memory host: collects output and serves queued input lines.
#[derive(Debug, Default, Clone)]
pub struct BufferedHost {
    pub output: Vec<String>,
    pub input: VecDeque<String>,
    /// Prompts passed to `read_line`, in order.
    pub prompts: Vec<String>,
    /// Number of `clear` calls.
    pub clears: usize,
}

impl BufferedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose `read_line` returns `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Host for BufferedHost {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front()
    }

    fn clear(&mut self) {
        self.output.clear();
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_host() {
        let mut host = BufferedHost::with_input(["first"]);
        host.print("a");
        assert_eq!(host.read_line("> ").as_deref(), Some("first"));
        assert_eq!(host.read_line("> "), None);
        assert_eq!(host.prompts, vec!["> ", "> "]);
        host.clear();
        assert!(host.output.is_empty());
        assert_eq!(host.clears, 1);
    }
}
