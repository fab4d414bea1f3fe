//! Token definitions for the Glint lexer.
//!
//! This module defines all tokens recognized by the lexer, including:
//! - Literals (numbers, `∞`, chars, strings, `true`/`false`/`null`)
//! - Keywords (`if`, `while`, `fn`, ...)
//! - Operators, assignment operators and comparisons
//! - Brackets
//! - Format-string parts (`$"...{expr}..."`)
//! - Ignorable tokens (whitespace, newlines, comments, bad characters)
//!
//! ## Design Notes
//!
//! We use the `logos` crate for lexical analysis. Logos generates a fast,
//! table-driven lexer from token definitions using procedural macros.
//!
//! Variants are declared in contiguous groups. The category predicates
//! (`is_literal`, `is_operator`, ...) are ordinal range checks over those
//! groups, so a new variant must be added inside the group it belongs to.

use logos::Logos;
use std::fmt;

use crate::source::Span;

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Byte range of the token in the source
    pub span: Span,
    /// The original text of the token; empty for synthesized tokens
    pub text: String,
}

impl Token {
    /// Create a new token with the given kind, span, and text.
    pub fn new(kind: TokenKind, span: impl Into<Span>, text: impl Into<String>) -> Self {
        Self {
            kind,
            span: span.into(),
            text: text.into(),
        }
    }

    /// Creates a token that does not appear in the source text.
    ///
    /// Used by the lexer for missing format-string closers and by the parser
    /// when it recovers from a missing token.
    pub fn synthesized(kind: TokenKind, span: Span) -> Self {
        Self::new(kind, span, String::new())
    }

    /// True for tokens fabricated during error recovery.
    pub fn is_synthesized(&self) -> bool {
        self.text.is_empty() && self.kind != TokenKind::Eof
    }
}

/// All possible token kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ==================== Literals ====================
    /// Integer literal: `42`
    #[regex(r"[0-9]+")]
    IntegerLiteral,

    /// Float literal: `3.14`, `2.`, `2f`, `1.5F`
    #[regex(r"[0-9]+\.[0-9]*[fF]?")]
    #[regex(r"[0-9]+[fF]")]
    FloatLiteral,

    /// The infinity literal `∞`
    #[token("∞")]
    InfinityLiteral,

    /// Char literal: `'a'`, `‘\n’`
    #[regex(r"'([^'\\\n]|\\.)*'")]
    #[regex(r"‘([^’\\\n]|\\.)*’")]
    CharLiteral,

    /// Char literal missing its closing quote
    #[regex(r"'([^'\\\n]|\\.)*")]
    #[regex(r"‘([^’\\\n]|\\.)*")]
    UnterminatedChar,

    /// String literal: `"text"`, `“text”`, `«text»`
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"“([^”\\\n]|\\.)*”")]
    #[regex(r"«([^»\\\n]|\\.)*»")]
    StringLiteral,

    /// String literal missing its closing quote
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    #[regex(r"“([^”\\\n]|\\.)*")]
    #[regex(r"«([^»\\\n]|\\.)*")]
    UnterminatedString,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // ==================== Identifiers ====================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // ==================== Keywords ====================
    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("while")]
    While,

    #[token("for")]
    For,

    #[token("in")]
    In,

    #[token("break")]
    Break,

    #[token("continue")]
    Continue,

    #[token("return")]
    Return,

    /// The function symbol, `fn` or `ƒ`
    #[token("fn")]
    #[token("ƒ")]
    Function,

    // ==================== Operators ====================
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("**")]
    StarStar,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("!")]
    Bang,

    #[token("<<")]
    ShiftLeft,

    #[token(">>")]
    ShiftRight,

    #[token("&&")]
    AmpersandAmpersand,

    #[token("||")]
    PipePipe,

    #[token("??")]
    QuestionQuestion,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    /// `->`: return type hint and conversion arrow
    #[token("->")]
    Arrow,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    /// `#`: starts a declaration
    #[token("#")]
    Hash,

    // ==================== Assignment ====================
    #[token("=")]
    Equals,

    #[token("+=")]
    PlusEquals,

    #[token("-=")]
    MinusEquals,

    #[token("*=")]
    StarEquals,

    #[token("/=")]
    SlashEquals,

    #[token("%=")]
    PercentEquals,

    #[token("**=")]
    StarStarEquals,

    #[token("&=")]
    AmpersandEquals,

    #[token("|=")]
    PipeEquals,

    #[token("^=")]
    CaretEquals,

    #[token("<<=")]
    ShiftLeftEquals,

    #[token(">>=")]
    ShiftRightEquals,

    #[token("??=")]
    QuestionQuestionEquals,

    // ==================== Comparison ====================
    #[token("==")]
    EqualsEquals,

    #[token("!=")]
    BangEquals,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEquals,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEquals,

    // ==================== Brackets ====================
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    // ==================== Format strings ====================
    /// A whole `$"..."` run as matched by logos. The [`Lexer`](super::Lexer)
    /// expands it into the parts below and never emits it.
    #[token("$\"", scan_format_string)]
    #[token("$“", scan_format_string)]
    FormatString,

    /// `$"` opener
    FormatStringStart,

    /// Literal text between interpolations
    FormatStringFragment,

    /// `{` opening an interpolated expression
    FormatExpressionStart,

    /// `}` closing an interpolated expression
    FormatExpressionEnd,

    /// Closing quote
    FormatStringEnd,

    // ==================== Ignorable ====================
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", scan_block_comment)]
    BlockComment,

    /// Unrecognized character (already reported by the lexer)
    Unknown,

    // ==================== End ====================
    Eof,
}

/// Consumes a block comment body up to and including `*/`, or to the end of
/// input when unterminated.
fn scan_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let consumed = rest.find("*/").map_or(rest.len(), |i| i + 2);
    lex.bump(consumed);
    true
}

/// Consumes a format string body up to its closing quote.
///
/// Braces nest, quotes inside an interpolation belong to nested literals and
/// a newline outside any interpolation ends an unterminated format string.
fn scan_format_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let closer = format_string_closer(lex.slice());
    let rest = lex.remainder();
    let mut depth = 0usize;
    let mut end = rest.len();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
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
            '\n' if depth == 0 => {
                end = i;
                break;
            }
            c if c == closer && depth == 0 => {
                end = i + c.len_utf8();
                break;
            }
            _ => {}
        }
    }

    lex.bump(end);
    true
}

/// The closing quote matching a format string opener (`$"` or `$“`).
pub(crate) fn format_string_closer(opener: &str) -> char {
    if opener.ends_with('“') { '”' } else { '"' }
}

impl TokenKind {
    fn in_group(self, first: TokenKind, last: TokenKind) -> bool {
        (first as u8..=last as u8).contains(&(self as u8))
    }

    /// Literal tokens, including `true`, `false` and `null`.
    pub fn is_literal(self) -> bool {
        self.in_group(TokenKind::IntegerLiteral, TokenKind::Null)
    }

    pub fn is_keyword(self) -> bool {
        self.in_group(TokenKind::If, TokenKind::Function)
    }

    pub fn is_operator(self) -> bool {
        self.in_group(TokenKind::Plus, TokenKind::Hash)
    }

    /// `=` and every compound assignment operator.
    pub fn is_assignment(self) -> bool {
        self.in_group(TokenKind::Equals, TokenKind::QuestionQuestionEquals)
    }

    pub fn is_comparison(self) -> bool {
        self.in_group(TokenKind::EqualsEquals, TokenKind::GreaterEquals)
    }

    pub fn is_bracket(self) -> bool {
        self.in_group(TokenKind::LeftParen, TokenKind::RightBrace)
    }

    pub fn is_format_string(self) -> bool {
        self.in_group(TokenKind::FormatString, TokenKind::FormatStringEnd)
    }

    /// Tokens dropped before parsing: whitespace, newlines, comments and
    /// characters the lexer could not recognize.
    pub fn is_ignorable(self) -> bool {
        self.in_group(TokenKind::Whitespace, TokenKind::Unknown)
    }

    /// For compound assignments, the binary operator token they apply.
    pub fn compound_operator(self) -> Option<TokenKind> {
        match self {
            TokenKind::PlusEquals => Some(TokenKind::Plus),
            TokenKind::MinusEquals => Some(TokenKind::Minus),
            TokenKind::StarEquals => Some(TokenKind::Star),
            TokenKind::SlashEquals => Some(TokenKind::Slash),
            TokenKind::PercentEquals => Some(TokenKind::Percent),
            TokenKind::StarStarEquals => Some(TokenKind::StarStar),
            TokenKind::AmpersandEquals => Some(TokenKind::Ampersand),
            TokenKind::PipeEquals => Some(TokenKind::Pipe),
            TokenKind::CaretEquals => Some(TokenKind::Caret),
            TokenKind::ShiftLeftEquals => Some(TokenKind::ShiftLeft),
            TokenKind::ShiftRightEquals => Some(TokenKind::ShiftRight),
            TokenKind::QuestionQuestionEquals => Some(TokenKind::QuestionQuestion),
            _ => None,
        }
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::InfinityLiteral => "'∞'",
            TokenKind::CharLiteral | TokenKind::UnterminatedChar => "character literal",
            TokenKind::StringLiteral | TokenKind::UnterminatedString => "string literal",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Identifier => "identifier",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::In => "'in'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Return => "'return'",
            TokenKind::Function => "'fn'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::StarStar => "'**'",
            TokenKind::Ampersand => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::Bang => "'!'",
            TokenKind::ShiftLeft => "'<<'",
            TokenKind::ShiftRight => "'>>'",
            TokenKind::AmpersandAmpersand => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::QuestionQuestion => "'??'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Question => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::Arrow => "'->'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Hash => "'#'",
            TokenKind::Equals => "'='",
            TokenKind::PlusEquals => "'+='",
            TokenKind::MinusEquals => "'-='",
            TokenKind::StarEquals => "'*='",
            TokenKind::SlashEquals => "'/='",
            TokenKind::PercentEquals => "'%='",
            TokenKind::StarStarEquals => "'**='",
            TokenKind::AmpersandEquals => "'&='",
            TokenKind::PipeEquals => "'|='",
            TokenKind::CaretEquals => "'^='",
            TokenKind::ShiftLeftEquals => "'<<='",
            TokenKind::ShiftRightEquals => "'>>='",
            TokenKind::QuestionQuestionEquals => "'??='",
            TokenKind::EqualsEquals => "'=='",
            TokenKind::BangEquals => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEquals => "'>='",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::FormatString | TokenKind::FormatStringStart => "format string",
            TokenKind::FormatStringFragment => "format string text",
            TokenKind::FormatExpressionStart => "'{' in format string",
            TokenKind::FormatExpressionEnd => "'}' in format string",
            TokenKind::FormatStringEnd => "end of format string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Unknown => "unknown character",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source)
            .filter_map(Result::ok)
            .filter(|k| !k.is_ignorable())
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            lex_all("if iffy fn ƒ return"),
            vec![
                TokenKind::If,
                TokenKind::Identifier,
                TokenKind::Function,
                TokenKind::Function,
                TokenKind::Return,
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            lex_all("42 3.14 2. 7f 1.5F ∞"),
            vec![
                TokenKind::IntegerLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
                TokenKind::InfinityLiteral,
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            lex_all("a **= b -> c ?? d <<= e"),
            vec![
                TokenKind::Identifier,
                TokenKind::StarStarEquals,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::QuestionQuestion,
                TokenKind::Identifier,
                TokenKind::ShiftLeftEquals,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_quote_glyphs() {
        assert_eq!(
            lex_all(r#""a" “b” «c» 'd' ‘e’"#),
            vec![
                TokenKind::StringLiteral,
                TokenKind::StringLiteral,
                TokenKind::StringLiteral,
                TokenKind::CharLiteral,
                TokenKind::CharLiteral,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(lex_all("\"abc\n"), vec![TokenKind::UnterminatedString]);
    }

    #[test]
    fn test_comments_are_ignorable() {
        let kinds: Vec<_> = TokenKind::lexer("a // note\n/* block */ b")
            .filter_map(Result::ok)
            .collect();
        assert!(kinds.contains(&TokenKind::LineComment));
        assert!(kinds.contains(&TokenKind::BlockComment));
        assert_eq!(lex_all("a // note\n/* block */ b").len(), 2);
    }

    #[test]
    fn test_category_ranges() {
        assert!(TokenKind::Null.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::Function.is_keyword());
        assert!(TokenKind::PlusEquals.is_assignment());
        assert!(!TokenKind::EqualsEquals.is_assignment());
        assert!(TokenKind::GreaterEquals.is_comparison());
        assert!(TokenKind::RightBrace.is_bracket());
        assert!(TokenKind::Unknown.is_ignorable());
        assert!(!TokenKind::Eof.is_ignorable());
        assert!(TokenKind::Hash.is_operator());
    }

    #[test]
    fn test_compound_operator_mapping() {
        assert_eq!(
            TokenKind::PlusEquals.compound_operator(),
            Some(TokenKind::Plus)
        );
        assert_eq!(TokenKind::Equals.compound_operator(), None);
    }
}
