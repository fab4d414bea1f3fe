//! Lexical analysis for Glint.
//!
//! This module converts source code into a stream of [`Token`]s.
//! It handles:
//!
//! - Number literals, including the `f` float suffix and the `∞` literal
//! - Keywords and identifiers
//! - Char and string literals with several quote glyphs
//! - Format strings (`$"a {b} c"`), whose interpolations are lexed recursively
//! - Comments and whitespace, emitted as ignorable tokens so a REPL can
//!   decide whether more input is needed
//!
//! ## Example
//!
//! ```
//! use glint::lexer::{lex, TokenKind};
//!
//! let tokens = lex("# x = 42");
//! assert_eq!(tokens[0].kind, TokenKind::Hash);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```
//!
//! ## Design Notes
//!
//! The lexer is built on the [`logos`](https://docs.rs/logos) crate, which
//! generates a DFA-based lexer from our token definitions. We wrap logos in
//! our own [`Lexer`] struct to provide:
//!
//! - Unknown-character tokens plus a diagnostic instead of silent skipping
//! - Format-string expansion into opener / fragments / sub-tokens / closer
//! - A guaranteed trailing [`TokenKind::Eof`]

mod error;
mod token;

pub use error::LexError;
pub use token::{Token, TokenKind};

use std::collections::VecDeque;

use logos::Logos;

use crate::source::Span;
use token::format_string_closer;

/// The lexer for Glint source code.
///
/// Wraps a `logos` lexer and provides an iterator interface that yields
/// [`Token`]s with their source positions. Never fails: problems are
/// recorded in [`Lexer::errors`] and lexing continues.
pub struct Lexer<'source> {
    /// The underlying logos lexer
    inner: logos::Lexer<'source, TokenKind>,
    /// The text being lexed
    source: &'source str,
    /// Offset of `source` within the outermost source (non-zero for
    /// format-string interpolations)
    base: usize,
    /// Tokens produced ahead of time by format-string expansion
    pending: VecDeque<Token>,
    /// Whether to finish with an `Eof` token
    emit_eof: bool,
    finished: bool,
    errors: Vec<LexError>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self::with_base(source, 0, true)
    }

    /// Lexer for an embedded segment whose spans are rebased by `base`.
    fn with_base(source: &'source str, base: usize, emit_eof: bool) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            base,
            pending: VecDeque::new(),
            emit_eof,
            finished: false,
            errors: Vec::new(),
        }
    }

    /// Get the original source code.
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Problems found so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Get the next token, if any.
    ///
    /// Returns `None` after the `Eof` token has been produced.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let Some(result) = self.inner.next() else {
            if self.finished || !self.emit_eof {
                return None;
            }
            self.finished = true;
            let end = self.base + self.source.len();
            return Some(Token::new(TokenKind::Eof, Span::empty(end), ""));
        };

        let local = self.inner.span();
        let span = Span::from(local.clone()).offset_by(self.base);

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => return Some(self.unknown_character(local)),
        };

        let text = self.inner.slice();
        match kind {
            TokenKind::FormatString => {
                let text = text.to_string();
                self.expand_format_string(&text, span.start);
                self.pending.pop_front()
            }
            TokenKind::UnterminatedString => {
                self.errors.push(LexError::UnterminatedString { span });
                Some(Token::new(kind, span, text))
            }
            TokenKind::UnterminatedChar => {
                self.errors.push(LexError::UnterminatedChar { span });
                Some(Token::new(kind, span, text))
            }
            TokenKind::BlockComment if !text.ends_with("*/") || text.len() < 4 => {
                self.errors.push(LexError::UnterminatedComment { span });
                Some(Token::new(kind, span, text))
            }
            _ => Some(Token::new(kind, span, text)),
        }
    }

    /// Builds an `Unknown` token for a character no pattern accepts.
    ///
    /// The error range reported by logos is widened to the next character
    /// boundary so multi-byte characters become a single token.
    fn unknown_character(&mut self, local: std::ops::Range<usize>) -> Token {
        let start = local.start;
        let character = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        let end = start + character.len_utf8().max(1);
        if end > local.end {
            self.inner.bump(end - local.end);
        }
        let span = Span::new(start, end).offset_by(self.base);
        self.errors
            .push(LexError::UnexpectedCharacter { character, span });
        Token::new(TokenKind::Unknown, span, character.to_string())
    }

    /// Splits a raw `$"..."` run into format-string tokens.
    ///
    /// `start` is the absolute offset of the `$`.
    fn expand_format_string(&mut self, text: &str, start: usize) {
        let opener_len = '$'.len_utf8()
            + text[1..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
        let closer = format_string_closer(&text[..opener_len]);
        self.pending.push_back(Token::new(
            TokenKind::FormatStringStart,
            Span::new(start, start + opener_len),
            &text[..opener_len],
        ));

        let body = &text[opener_len..];
        let body_base = start + opener_len;
        let mut fragment_start = 0;
        let mut expression_start = None;
        let mut depth = 0usize;
        let mut closed = false;
        let mut chars = body.char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '{' if depth == 0 => {
                    self.push_fragment(body, fragment_start, i, body_base);
                    self.pending.push_back(Token::new(
                        TokenKind::FormatExpressionStart,
                        Span::new(body_base + i, body_base + i + 1),
                        "{",
                    ));
                    expression_start = Some(i + 1);
                    depth = 1;
                }
                '{' => depth += 1,
                '}' if depth > 1 => depth -= 1,
                '}' if depth == 1 => {
                    let from = expression_start.take().unwrap_or(i);
                    self.lex_interpolation(&body[from..i], body_base + from);
                    self.pending.push_back(Token::new(
                        TokenKind::FormatExpressionEnd,
                        Span::new(body_base + i, body_base + i + 1),
                        "}",
                    ));
                    depth = 0;
                    fragment_start = i + 1;
                }
                '"' if depth > 0 => {
                    while let Some((_, inner)) = chars.next() {
                        match inner {
                            '\\' => {
                                chars.next();
                            }
                            '"' | '\n' => break,
                            _ => {}
                        }
                    }
                }
                c if c == closer && depth == 0 => {
                    self.push_fragment(body, fragment_start, i, body_base);
                    self.pending.push_back(Token::new(
                        TokenKind::FormatStringEnd,
                        Span::new(body_base + i, body_base + i + c.len_utf8()),
                        c.to_string(),
                    ));
                    closed = true;
                    break;
                }
                _ => {}
            }
        }

        let end = body_base + body.len();
        if let Some(from) = expression_start {
            self.lex_interpolation(&body[from..], body_base + from);
            self.errors.push(LexError::UnterminatedInterpolation {
                span: Span::new(body_base + from - 1, end),
            });
            self.pending.push_back(Token::synthesized(
                TokenKind::FormatExpressionEnd,
                Span::empty(end),
            ));
            fragment_start = body.len();
        }
        if !closed {
            self.push_fragment(body, fragment_start, body.len(), body_base);
            self.errors.push(LexError::UnterminatedFormatString {
                span: Span::new(start, end),
            });
            self.pending
                .push_back(Token::synthesized(TokenKind::FormatStringEnd, Span::empty(end)));
        }
    }

    fn push_fragment(&mut self, body: &str, from: usize, to: usize, body_base: usize) {
        if from < to {
            self.pending.push_back(Token::new(
                TokenKind::FormatStringFragment,
                Span::new(body_base + from, body_base + to),
                &body[from..to],
            ));
        }
    }

    /// Re-invokes the lexer on an interpolated segment.
    fn lex_interpolation(&mut self, segment: &str, base: usize) {
        let mut sub = Lexer::with_base(segment, base, false);
        while let Some(token) = sub.next_token() {
            self.pending.push_back(token);
        }
        self.errors.append(&mut sub.errors);
    }

    /// Collects all remaining tokens and the errors found while lexing them.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        (tokens, self.errors)
    }
}

/// Implement Iterator so the lexer can be used with for loops and iterator adapters.
impl<'source> Iterator for Lexer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Convenience function to lex source code directly, discarding errors.
///
/// # Example
///
/// ```
/// use glint::lexer::{lex, TokenKind};
///
/// let tokens = lex("Print(1)");
/// assert_eq!(tokens[0].kind, TokenKind::Identifier);
/// ```
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().0
}

/// REPL heuristic: does this input look incomplete?
///
/// True when brackets are unbalanced, a format string or block comment is
/// unterminated, or the last significant token expects an operand.
pub fn needs_more_input(tokens: &[Token]) -> bool {
    let mut depth: i32 = 0;
    let mut last_significant = None;

    for token in tokens {
        match token.kind {
            TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => depth += 1,
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                depth -= 1
            }
            TokenKind::FormatExpressionEnd | TokenKind::FormatStringEnd
                if token.is_synthesized() =>
            {
                return true;
            }
            TokenKind::BlockComment if !token.text.ends_with("*/") || token.text.len() < 4 => {
                return true;
            }
            _ => {}
        }
        if !token.kind.is_ignorable() && token.kind != TokenKind::Eof {
            last_significant = Some(token.kind);
        }
    }

    let dangling = last_significant.is_some_and(|kind| {
        (kind.is_operator()
            && !matches!(
                kind,
                TokenKind::PlusPlus | TokenKind::MinusMinus | TokenKind::Semicolon
            ))
            || kind.is_assignment()
            || kind.is_comparison()
            || matches!(kind, TokenKind::Else | TokenKind::In | TokenKind::Return)
    });

    depth > 0 || dangling
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_ignorable())
            .collect()
    }

    #[test]
    fn test_always_ends_with_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        let tokens = lex("# x = 1");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::empty(7));
    }

    #[test]
    fn test_token_spans() {
        let tokens = lex("# x = 42");
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[2].text, "x");
        assert_eq!(tokens[6].span, Span::new(6, 8));
        assert_eq!(tokens[6].text, "42");
    }

    #[test]
    fn test_whitespace_and_comments_are_emitted() {
        let all: Vec<_> = lex("a /* c */\nb").into_iter().map(|t| t.kind).collect();
        assert_eq!(
            all,
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::BlockComment,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_character_reports_and_continues() {
        let (tokens, errors) = Lexer::new("a @ b").tokenize();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            LexError::UnexpectedCharacter { character: '@', .. }
        ));
        let unknown = tokens.iter().find(|t| t.kind == TokenKind::Unknown).unwrap();
        assert_eq!(unknown.span, Span::new(2, 3));
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Identifier).count(),
            2
        );
    }

    #[test]
    fn test_unknown_multibyte_character() {
        let (tokens, errors) = Lexer::new("é").tokenize();
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[0].span, Span::new(0, 2));
    }

    #[test]
    fn test_format_string_expansion() {
        assert_eq!(
            kinds(r#"$"a {x + 1} b""#),
            vec![
                TokenKind::FormatStringStart,
                TokenKind::FormatStringFragment,
                TokenKind::FormatExpressionStart,
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::IntegerLiteral,
                TokenKind::FormatExpressionEnd,
                TokenKind::FormatStringFragment,
                TokenKind::FormatStringEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_format_string_sub_tokens_are_rebased() {
        let source = r#"# s = $"v={value}""#;
        let tokens = lex(source);
        let ident = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Identifier && t.text == "value")
            .unwrap();
        assert_eq!(&source[ident.span.start..ident.span.end], "value");
    }

    #[test]
    fn test_nested_format_string() {
        let (tokens, errors) = Lexer::new(r#"$"out {$"in {x}"} done""#).tokenize();
        assert!(errors.is_empty());
        let starts = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::FormatStringStart)
            .count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn test_unterminated_format_string_synthesizes_closer() {
        let (tokens, errors) = Lexer::new(r#"$"abc"#).tokenize();
        assert!(matches!(
            errors[0],
            LexError::UnterminatedFormatString { .. }
        ));
        let closer = tokens
            .iter()
            .find(|t| t.kind == TokenKind::FormatStringEnd)
            .unwrap();
        assert!(closer.is_synthesized());
    }

    #[test]
    fn test_round_trip_token_text() {
        let source = "fn add(a: Integer, b: Integer) -> Integer: a + b // sum\n\
                      # s = $\"{add(1, 2)} ∞ “q”\"\n\
                      #*c = 'x' ?? 2.5f";
        for token in lex(source) {
            if token.is_synthesized() || token.kind == TokenKind::Eof {
                continue;
            }
            assert_eq!(&source[token.span.start..token.span.end], token.text);
        }
    }

    #[test]
    fn test_unterminated_string_reports() {
        let (tokens, errors) = Lexer::new("\"abc").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::UnterminatedString);
        assert!(matches!(errors[0], LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_needs_more_input() {
        assert!(needs_more_input(&lex("fn f(): {")));
        assert!(needs_more_input(&lex("# x = 1 +")));
        assert!(needs_more_input(&lex("/* open")));
        assert!(!needs_more_input(&lex("# x = 1 + 2")));
        assert!(!needs_more_input(&lex("x++")));
    }
}
