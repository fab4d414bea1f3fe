//! Token navigation utilities for the parser.
//!
//! This module provides the low-level token stream operations that form
//! the foundation of the recursive descent parser:
//! - Peeking at tokens without consuming them
//! - Advancing through the token stream
//! - Matching and expecting specific tokens
//! - Error reporting with one error per token position

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};

use super::{ParseError, Parser};

impl Parser {
    // ==================== Token Navigation ====================

    /// Returns the current token without consuming it.
    ///
    /// Past the end this keeps returning the trailing `Eof` token.
    pub(super) fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Looks ahead n tokens (0 = current token).
    pub(super) fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + n).min(last)]
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Returns true if we've reached the end of the token stream.
    pub(super) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Checks if the current token matches the expected kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes the current token if it matches, returns true if consumed.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it matches any of the kinds.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        let kind = self.peek_kind();
        if kinds.contains(&kind) {
            self.advance();
            return Some(kind);
        }
        None
    }

    /// Expects the current token to match, or records an error.
    ///
    /// On mismatch nothing is consumed and a synthesized token of the
    /// expected kind is returned, with empty text and a zero-width span at the
    /// current token, so callers can keep building their node.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Token {
        if self.check(kind) {
            return self.advance();
        }
        let found = self.peek().kind.describe();
        let span = self.peek().span;
        self.report(ParseError::unexpected(kind.describe(), found, span));
        Token::synthesized(kind, Span::empty(span.start))
    }

    /// Records an error unless one was already reported at this token.
    pub(super) fn report(&mut self, error: ParseError) {
        if self.last_error_at == Some(self.current) {
            return;
        }
        self.last_error_at = Some(self.current);
        self.errors.push(error);
    }

    /// End offset of the last consumed token.
    pub(super) fn previous_end(&self) -> Option<usize> {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
    }

    /// Creates a span from start to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = self.previous_end().unwrap_or(start).max(start);
        Span::new(start, end)
    }

    /// Runs `parse` with range literals enabled or disabled, restoring the
    /// previous setting afterwards.
    pub(super) fn with_ranges<T>(&mut self, enabled: bool, parse: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.range_enabled, enabled);
        let result = parse(self);
        self.range_enabled = saved;
        result
    }

    /// Splits a `>>` token into two `>` tokens so nested type clauses such as
    /// `List<List<Integer>>` can close one level at a time.
    pub(super) fn split_shift_right(&mut self) {
        if !self.check(TokenKind::ShiftRight) {
            return;
        }
        let span = self.peek().span;
        let first = Token::new(TokenKind::Greater, Span::new(span.start, span.start + 1), ">");
        let second = Token::new(TokenKind::Greater, Span::new(span.start + 1, span.end), ">");
        self.tokens[self.current] = first;
        self.tokens.insert(self.current + 1, second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_peek_past_end_returns_eof() {
        let tokens = lex("x");
        let mut parser = Parser::new(&tokens);
        parser.advance();
        parser.advance();
        assert_eq!(parser.peek_kind(), TokenKind::Eof);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_expect_synthesizes_on_mismatch() {
        let tokens = lex("x");
        let mut parser = Parser::new(&tokens);
        let token = parser.expect(TokenKind::LeftParen);
        assert!(token.is_synthesized());
        assert_eq!(token.span, Span::empty(0));
        assert_eq!(parser.errors().len(), 1);
        // A second failure at the same token is not reported again.
        parser.expect(TokenKind::RightParen);
        assert_eq!(parser.errors().len(), 1);
    }

    #[test]
    fn test_ignorable_tokens_are_filtered() {
        let tokens = lex("a /* c */ // d\n b");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.tokens.len(), 3);
    }

    #[test]
    fn test_split_shift_right() {
        let tokens = lex(">>");
        let mut parser = Parser::new(&tokens);
        parser.split_shift_right();
        assert_eq!(parser.advance().span, Span::new(0, 1));
        assert_eq!(parser.advance().span, Span::new(1, 2));
        assert!(parser.is_at_end());
    }
}
