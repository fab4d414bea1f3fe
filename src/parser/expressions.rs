//! Expression parsing using precedence climbing.
//!
//! Layers, from the loosest binding inwards:
//! - Assignment (`=`, compound operators), right-associative by recursion
//! - Ternary `c ? a : b` and ranges `a:b[:s]`
//! - Binary operators, looping while the next operator binds tighter than
//!   the current floor (left-associative)
//! - Unary prefix operators
//! - Postfix: counting, calls, indexing and conversions
//! - Primary expressions
//!
//! # Ranges and the ternary
//!
//! `a ? b : c` and `a:b` both use `:`. Inside the true branch of a ternary
//! ranges are disabled; parentheses, brackets, call arguments and format
//! string interpolations enable them again.

use crate::ast::{BinaryOp, Expr, ExprKind, FormatPart, UnaryOp};
use crate::lexer::TokenKind;

use super::{ParseError, Parser, Precedence};

impl Parser {
    // ==================== Expression Parsing ====================

    /// Parses a full expression, including assignments.
    pub fn parse_expression(&mut self) -> Expr {
        self.parse_assignment()
    }

    /// `target = value` and compound assignments.
    ///
    /// `x += 1` is rewritten to `x = x + 1`, keeping `+` as the operator.
    fn parse_assignment(&mut self) -> Expr {
        let start = self.peek().span.start;
        let target = self.parse_ternary();

        let kind = self.peek_kind();
        if !kind.is_assignment() {
            return target;
        }
        self.advance();

        let value = self.parse_assignment();
        let operator = kind.compound_operator().and_then(Self::binary_operator);
        let value = match operator {
            Some(op) => {
                let span = target.span.merge(&value.span);
                Expr::new(
                    ExprKind::Binary {
                        left: Box::new(target.clone()),
                        op,
                        right: Box::new(value),
                    },
                    span,
                )
            }
            None => value,
        };

        Expr::new(
            ExprKind::Assignment {
                target: Box::new(target),
                operator,
                value: Box::new(value),
            },
            self.span_from(start),
        )
    }

    /// Ternaries and ranges, above the binary operators.
    fn parse_ternary(&mut self) -> Expr {
        let start = self.peek().span.start;
        let mut expr = self.parse_binary(Precedence::Lowest);

        if self.range_enabled && self.match_token(TokenKind::Colon) {
            let end = self.parse_binary(Precedence::Lowest);
            let step = if self.match_token(TokenKind::Colon) {
                Some(Box::new(self.parse_binary(Precedence::Lowest)))
            } else {
                None
            };
            expr = Expr::new(
                ExprKind::Range {
                    start: Box::new(expr),
                    end: Box::new(end),
                    step,
                },
                self.span_from(start),
            );
        }

        if !self.match_token(TokenKind::Question) {
            return expr;
        }

        let then_branch = self.with_ranges(false, Self::parse_ternary);
        self.expect(TokenKind::Colon);
        let else_branch = self.parse_ternary();

        Expr::new(
            ExprKind::Ternary {
                condition: Box::new(expr),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            self.span_from(start),
        )
    }

    /// Parses binary operators that bind tighter than `floor`.
    pub(super) fn parse_binary(&mut self, floor: Precedence) -> Expr {
        let start = self.peek().span.start;
        let mut left = self.parse_unary();

        loop {
            let kind = self.peek_kind();
            let Some(precedence) = Self::binary_precedence(kind) else {
                break;
            };
            if precedence <= floor {
                break;
            }
            let Some(op) = Self::binary_operator(kind) else {
                break;
            };
            self.advance();

            let right = self.parse_binary(precedence);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                self.span_from(start),
            );
        }

        left
    }

    /// Prefix operators: `+ - ~ !` and prefix `++`/`--`.
    fn parse_unary(&mut self) -> Expr {
        let start = self.peek().span.start;
        let kind = self.peek_kind();

        let op = match kind {
            TokenKind::Plus => UnaryOp::Identity,
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.advance();
                let target = self.parse_unary();
                return self.counting(target, kind == TokenKind::PlusPlus, true, start);
            }
            _ => return self.parse_postfix(),
        };
        self.advance();

        let operand = self.parse_unary();
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        )
    }

    /// Builds a counting expression, which only applies to names.
    fn counting(&mut self, target: Expr, increment: bool, prefix: bool, start: usize) -> Expr {
        let span = self.span_from(start);
        if !matches!(target.unparenthesized().kind, ExprKind::Name(_)) {
            if !target.is_unknown() {
                self.report(ParseError::InvalidCountingTarget {
                    operator: if increment { "++" } else { "--" },
                    span,
                });
            }
            return Expr::unknown(span);
        }
        Expr::new(
            ExprKind::Counting {
                target: Box::new(target),
                increment,
                prefix,
            },
            span,
        )
    }

    /// Postfix operators: `x++`, `f(a)`, `x[i]`, `x -> Type`.
    fn parse_postfix(&mut self) -> Expr {
        let start = self.peek().span.start;
        let mut expr = self.parse_primary();

        loop {
            match self.peek_kind() {
                kind @ (TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    self.advance();
                    expr = self.counting(expr, kind == TokenKind::PlusPlus, false, start);
                    break;
                }
                TokenKind::LeftParen => {
                    self.advance();
                    let arguments = self.with_ranges(true, |p| {
                        p.parse_comma_separated(TokenKind::RightParen)
                    });
                    self.expect(TokenKind::RightParen);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            arguments,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.with_ranges(true, Self::parse_expression);
                    self.expect(TokenKind::RightBracket);
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::Arrow => {
                    self.advance();
                    let target = self.parse_type_clause();
                    expr = Expr::new(
                        ExprKind::Conversion {
                            value: Box::new(expr),
                            target,
                        },
                        self.span_from(start),
                    );
                }
                _ => break,
            }
        }

        expr
    }

    /// Literals, names, groups, lists, format strings and function literals.
    ///
    /// An unexpected token is reported and left unconsumed; the result is an
    /// `Unknown` placeholder.
    fn parse_primary(&mut self) -> Expr {
        let span = self.peek().span;

        match self.peek_kind() {
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral | TokenKind::InfinityLiteral => {
                self.parse_number_literal()
            }
            TokenKind::StringLiteral | TokenKind::UnterminatedString => {
                self.parse_string_literal()
            }
            TokenKind::CharLiteral | TokenKind::UnterminatedChar => self.parse_char_literal(),
            TokenKind::True | TokenKind::False | TokenKind::Null => {
                let token = self.advance();
                let literal = match token.kind {
                    TokenKind::True => crate::ast::Literal::Boolean(true),
                    TokenKind::False => crate::ast::Literal::Boolean(false),
                    _ => crate::ast::Literal::Null,
                };
                Expr::new(ExprKind::Literal(literal), span)
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Expr::new(ExprKind::Name(token.text), span)
            }
            TokenKind::LeftParen if self.at_function_literal() => self.parse_function_literal(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.with_ranges(true, Self::parse_expression);
                self.expect(TokenKind::RightParen);
                Expr::new(
                    ExprKind::Parenthesized(Box::new(inner)),
                    self.span_from(span.start),
                )
            }
            TokenKind::LeftBracket => {
                self.advance();
                let elements = self.with_ranges(true, |p| {
                    p.parse_comma_separated(TokenKind::RightBracket)
                });
                self.expect(TokenKind::RightBracket);
                Expr::new(ExprKind::List(elements), self.span_from(span.start))
            }
            TokenKind::FormatStringStart => self.parse_format_string(),
            kind => {
                self.report(ParseError::ExpectedExpression {
                    found: kind.describe().to_string(),
                    span,
                });
                Expr::unknown(crate::ast::Span::empty(span.start))
            }
        }
    }

    /// Comma-separated expressions up to (not including) `closer`.
    fn parse_comma_separated(&mut self, closer: TokenKind) -> Vec<Expr> {
        let mut items = Vec::new();
        if self.check(closer) {
            return items;
        }
        loop {
            let before = self.current;
            items.push(self.parse_expression());
            if self.current == before || !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        items
    }

    /// `$"text {expr} text"`, from the lexer's expanded token sequence.
    fn parse_format_string(&mut self) -> Expr {
        let start = self.advance().span.start;
        let mut parts = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::FormatStringFragment => {
                    let token = self.advance();
                    if let Some(text) = self.decode_text(&token.text, token.span.start) {
                        parts.push(FormatPart::Text {
                            text,
                            span: token.span,
                        });
                    }
                }
                TokenKind::FormatExpressionStart => {
                    self.advance();
                    let expr = self.with_ranges(true, Self::parse_expression);
                    parts.push(FormatPart::Expression(expr));
                    if !self.match_token(TokenKind::FormatExpressionEnd) {
                        self.expect(TokenKind::FormatExpressionEnd);
                        self.skip_interpolation();
                    }
                }
                TokenKind::FormatStringEnd => {
                    self.advance();
                    break;
                }
                _ => {
                    self.expect(TokenKind::FormatStringEnd);
                    break;
                }
            }
        }

        Expr::new(ExprKind::FormatString(parts), self.span_from(start))
    }

    /// Skips the rest of a malformed interpolation, including its `}`.
    fn skip_interpolation(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.advance().kind {
                TokenKind::FormatStringStart => depth += 1,
                TokenKind::FormatStringEnd if depth > 0 => depth -= 1,
                TokenKind::FormatExpressionEnd if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// Maps a token to its binary operator precedence.
    fn binary_precedence(kind: TokenKind) -> Option<Precedence> {
        let precedence = match kind {
            TokenKind::QuestionQuestion => Precedence::NullCoalesce,
            TokenKind::PipePipe => Precedence::Or,
            TokenKind::AmpersandAmpersand => Precedence::And,
            TokenKind::Pipe => Precedence::BitOr,
            TokenKind::Caret => Precedence::BitXor,
            TokenKind::Ampersand => Precedence::BitAnd,
            kind if kind.is_comparison() => Precedence::Comparison,
            TokenKind::ShiftLeft | TokenKind::ShiftRight => Precedence::Shift,
            TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Multiplicative,
            TokenKind::StarStar => Precedence::Power,
            _ => return None,
        };
        Some(precedence)
    }

    /// Converts a token kind to a binary operator.
    pub(super) fn binary_operator(kind: TokenKind) -> Option<BinaryOp> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Subtract,
            TokenKind::Star => BinaryOp::Multiply,
            TokenKind::Slash => BinaryOp::Divide,
            TokenKind::Percent => BinaryOp::Modulo,
            TokenKind::StarStar => BinaryOp::Power,
            TokenKind::Ampersand => BinaryOp::BitAnd,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
            TokenKind::ShiftRight => BinaryOp::ShiftRight,
            TokenKind::AmpersandAmpersand => BinaryOp::And,
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::QuestionQuestion => BinaryOp::NullCoalesce,
            TokenKind::EqualsEquals => BinaryOp::Equal,
            TokenKind::BangEquals => BinaryOp::NotEqual,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::LessEquals => BinaryOp::LessEqual,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::GreaterEquals => BinaryOp::GreaterEqual,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, Span, StatementKind};
    use crate::parser::tests::{parse_expr, parse_source};

    #[test]
    fn test_compound_assignment_desugars() {
        let expr = parse_expr("x **= 2");
        let ExprKind::Assignment {
            target,
            operator,
            value,
        } = &expr.kind
        else {
            panic!("expected assignment, got {:?}", expr.kind);
        };
        assert!(matches!(&target.kind, ExprKind::Name(n) if n == "x"));
        assert_eq!(*operator, Some(BinaryOp::Power));
        let ExprKind::Binary { left, op, .. } = &value.kind else {
            panic!("expected desugared binary");
        };
        assert_eq!(*op, BinaryOp::Power);
        assert!(matches!(&left.kind, ExprKind::Name(n) if n == "x"));
        assert_eq!(value.span, Span::new(0, 7));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse_expr("a = b = 3");
        let ExprKind::Assignment { value, .. } = &expr.kind else {
            panic!("expected assignment");
        };
        assert!(matches!(value.kind, ExprKind::Assignment { .. }));
    }

    #[test]
    fn test_ternary_nests_to_the_right() {
        let expr = parse_expr("a ? 1 : b ? 2 : 3");
        let ExprKind::Ternary { else_branch, .. } = &expr.kind else {
            panic!("expected ternary");
        };
        assert!(matches!(else_branch.kind, ExprKind::Ternary { .. }));
    }

    #[test]
    fn test_range_with_step() {
        let expr = parse_expr("10:0:-2");
        let ExprKind::Range { start, end, step } = &expr.kind else {
            panic!("expected range, got {:?}", expr.kind);
        };
        assert!(matches!(start.kind, ExprKind::Literal(Literal::Integer(v)) if v == 10.0));
        assert!(matches!(end.kind, ExprKind::Literal(Literal::Integer(v)) if v == 0.0));
        assert!(matches!(
            step.as_deref().map(|s| &s.kind),
            Some(ExprKind::Unary {
                op: UnaryOp::Negate,
                ..
            })
        ));
        assert_eq!(expr.span, Span::new(0, 7));
    }

    #[test]
    fn test_ranges_in_ternary_branch_need_parens() {
        let expr = parse_expr("c ? (1:3) : 4:6");
        let ExprKind::Ternary {
            then_branch,
            else_branch,
            ..
        } = &expr.kind
        else {
            panic!("expected ternary");
        };
        assert!(matches!(
            then_branch.unparenthesized().kind,
            ExprKind::Range { .. }
        ));
        assert!(matches!(else_branch.kind, ExprKind::Range { .. }));
    }

    #[test]
    fn test_index_with_range() {
        let expr = parse_expr("xs[1:3]");
        let ExprKind::Index { index, .. } = &expr.kind else {
            panic!("expected index");
        };
        assert!(matches!(index.kind, ExprKind::Range { .. }));
    }

    #[test]
    fn test_postfix_chain() {
        let expr = parse_expr("fs[0](1, 2) -> String");
        let ExprKind::Conversion { value, target } = &expr.kind else {
            panic!("expected conversion");
        };
        assert_eq!(target.name, "String");
        let ExprKind::Call { callee, arguments } = &value.kind else {
            panic!("expected call");
        };
        assert_eq!(arguments.len(), 2);
        assert!(matches!(callee.kind, ExprKind::Index { .. }));
    }

    #[test]
    fn test_counting() {
        assert!(matches!(
            parse_expr("++x").kind,
            ExprKind::Counting {
                increment: true,
                prefix: true,
                ..
            }
        ));
        assert!(matches!(
            parse_expr("x--").kind,
            ExprKind::Counting {
                increment: false,
                prefix: false,
                ..
            }
        ));
        let (_, errors) = parse_source("++3");
        assert!(matches!(
            errors[0],
            ParseError::InvalidCountingTarget { operator: "++", .. }
        ));
    }

    #[test]
    fn test_unary_binds_tighter_than_power() {
        let expr = parse_expr("-2 ** 2");
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::Power,
                ..
            }
        ));
    }

    #[test]
    fn test_list_literal() {
        let expr = parse_expr("[1, 2, 3]");
        assert!(matches!(&expr.kind, ExprKind::List(items) if items.len() == 3));
        assert!(matches!(&parse_expr("[]").kind, ExprKind::List(items) if items.is_empty()));
    }

    #[test]
    fn test_format_string_parts() {
        let expr = parse_expr(r#"$"a\t{x + 1}b""#);
        let ExprKind::FormatString(parts) = &expr.kind else {
            panic!("expected format string");
        };
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], FormatPart::Text { text, .. } if text == "a\t"));
        assert!(matches!(
            &parts[1],
            FormatPart::Expression(Expr {
                kind: ExprKind::Binary { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_interpolation_recovers() {
        let (program, errors) = parse_source("$\"{a b}\"\n# y = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            program.statements[1].kind,
            StatementKind::Declaration { .. }
        ));
    }

    #[test]
    fn test_null_coalesce_is_loosest_binary() {
        let expr = parse_expr("a ?? b || c");
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::NullCoalesce,
                ..
            }
        ));
    }
}
