//! Literal decoding: numbers, chars, strings and escape sequences.
//!
//! The lexer keeps escapes raw; they are decoded here so a bad escape can be
//! reported with the span of the literal that contains it.

use crate::ast::{Expr, ExprKind, Literal, Span};
use crate::lexer::{Token, TokenKind};

use super::{ParseError, Parser};

/// Characters that may follow a backslash and stand for themselves.
const SELF_ESCAPES: &[char] = &['\\', '"', '\'', '{', '}', '“', '”', '«', '»', '‘', '’'];

/// Decodes the escape sequences in `raw`.
///
/// On failure returns the offending sequence and its byte offset in `raw`.
pub(crate) fn unescape(raw: &str) -> Result<String, (String, usize)> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, escaped)) = chars.next() else {
            return Err(("\\".to_string(), i));
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'u' => {
                let mut sequence = String::from("\\u");
                if chars.next_if(|&(_, c)| c == '{').is_none() {
                    return Err((sequence, i));
                }
                sequence.push('{');
                let mut digits = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    sequence.push(c);
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(c);
                }
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| closed && !digits.is_empty() && digits.len() <= 6)
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => out.push(c),
                    None => return Err((sequence, i)),
                }
            }
            c if SELF_ESCAPES.contains(&c) => out.push(c),
            other => return Err((format!("\\{other}"), i)),
        }
    }
    Ok(out)
}

/// The text between a literal's quotes.
///
/// Unterminated literals only lose their opening quote.
fn literal_body(token: &Token) -> &str {
    let text = token.text.as_str();
    let Some(opener) = text.chars().next() else {
        return "";
    };
    let body = &text[opener.len_utf8()..];
    let terminated = matches!(
        token.kind,
        TokenKind::StringLiteral | TokenKind::CharLiteral
    );
    match body.chars().last() {
        Some(closer) if terminated => &body[..body.len() - closer.len_utf8()],
        _ => body,
    }
}

impl Parser {
    /// Decodes escapes, reporting a StringParseError on failure.
    ///
    /// `body_start` is the absolute offset of `raw` in the source.
    pub(super) fn decode_text(&mut self, raw: &str, body_start: usize) -> Option<String> {
        match unescape(raw) {
            Ok(text) => Some(text),
            Err((sequence, offset)) => {
                let start = body_start + offset;
                let span = Span::new(start, start + sequence.len());
                self.report(ParseError::InvalidEscape { sequence, span });
                None
            }
        }
    }

    pub(super) fn parse_number_literal(&mut self) -> Expr {
        let token = self.advance();
        let span = token.span;

        if token.kind == TokenKind::InfinityLiteral {
            return Expr::new(ExprKind::Literal(Literal::Integer(f64::INFINITY)), span);
        }

        let is_float = token.kind == TokenKind::FloatLiteral;
        let text = token.text.trim_end_matches(['f', 'F']);
        match text.parse::<f64>() {
            Ok(value) if is_float => Expr::new(ExprKind::Literal(Literal::Float(value)), span),
            Ok(value) => Expr::new(ExprKind::Literal(Literal::Integer(value)), span),
            Err(e) => {
                self.report(ParseError::InvalidNumber {
                    message: format!("'{}': {e}", token.text),
                    span,
                });
                Expr::unknown(span)
            }
        }
    }

    pub(super) fn parse_string_literal(&mut self) -> Expr {
        let token = self.advance();
        let body_start = token.span.start + token.text.chars().next().map_or(0, char::len_utf8);
        let body = literal_body(&token);
        match self.decode_text(body, body_start) {
            Some(text) => Expr::new(ExprKind::Literal(Literal::String(text)), token.span),
            None => Expr::unknown(token.span),
        }
    }

    pub(super) fn parse_char_literal(&mut self) -> Expr {
        let token = self.advance();
        let body_start = token.span.start + token.text.chars().next().map_or(0, char::len_utf8);
        let body = literal_body(&token);
        let Some(text) = self.decode_text(body, body_start) else {
            return Expr::unknown(token.span);
        };

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Expr::new(ExprKind::Literal(Literal::Char(c)), token.span),
            _ => {
                // The lexer already reported unterminated literals.
                if token.kind == TokenKind::CharLiteral {
                    self.report(ParseError::InvalidCharLiteral {
                        count: text.chars().count(),
                        span: token.span,
                    });
                }
                Expr::unknown(token.span)
            }
        }
    }
}
