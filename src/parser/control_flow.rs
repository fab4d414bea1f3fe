//! Control flow statement parsing.
//!
//! ```text
//! if cond statement [else statement]
//! while cond statement
//! for name in iterable statement
//! break | continue | return [value]
//! ```
//!
//! Bodies are single statements, usually blocks.

use crate::ast::{Statement, StatementKind};
use crate::lexer::TokenKind;

use super::Parser;

impl Parser {
    /// `if condition statement [else statement]`
    pub(super) fn parse_if(&mut self) -> Statement {
        let start = self.advance().span.start;
        let condition = self.parse_expression();
        let then_branch = Box::new(self.parse_body());
        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_body()))
        } else {
            None
        };

        Statement::new(
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            },
            self.span_from(start),
        )
    }

    /// `while condition statement`
    pub(super) fn parse_while(&mut self) -> Statement {
        let start = self.advance().span.start;
        let condition = self.parse_expression();
        let body = Box::new(self.parse_body());
        Statement::new(StatementKind::While { condition, body }, self.span_from(start))
    }

    /// `for name in iterable statement`
    pub(super) fn parse_for(&mut self) -> Statement {
        let start = self.advance().span.start;
        let variable = self.expect(TokenKind::Identifier);
        self.expect(TokenKind::In);
        let iterable = self.parse_expression();
        let body = Box::new(self.parse_body());

        Statement::new(
            StatementKind::For {
                variable: variable.text,
                variable_span: variable.span,
                iterable,
                body,
            },
            self.span_from(start),
        )
    }

    /// `break`, `continue`, `return [value]`
    ///
    /// `return` takes a value unless the next token ends the statement or
    /// starts another one.
    pub(super) fn parse_jump(&mut self) -> Statement {
        let token = self.advance();
        let kind = match token.kind {
            TokenKind::Break => StatementKind::Break,
            TokenKind::Continue => StatementKind::Continue,
            _ if self.at_statement_boundary() => StatementKind::Return(None),
            _ => StatementKind::Return(Some(self.parse_expression())),
        };
        Statement::new(kind, self.span_from(token.span.start))
    }

    /// Parses a statement body, or reports a missing one without looping.
    fn parse_body(&mut self) -> Statement {
        let start = self.peek().span.start;
        let before = self.current;
        let body = self.parse_statement();
        if self.current == before {
            return Statement::new(StatementKind::Unknown, crate::ast::Span::empty(start));
        }
        body
    }

    fn at_statement_boundary(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Semicolon
                | TokenKind::RightBrace
                | TokenKind::Eof
                | TokenKind::Hash
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, FunctionBody};
    use crate::parser::tests::{parse_ok, parse_source};

    #[test]
    fn test_if_else() {
        let program = parse_ok("if x > 1 Print(x) else { Print(0) }");
        let StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } = &program.statements[0].kind
        else {
            panic!("expected if");
        };
        assert!(matches!(condition.kind, ExprKind::Binary { .. }));
        assert!(matches!(then_branch.kind, StatementKind::Expression(_)));
        assert!(matches!(
            else_branch.as_deref().map(|s| &s.kind),
            Some(StatementKind::Block(_))
        ));
    }

    #[test]
    fn test_for_range() {
        let program = parse_ok("for i in 0:10 { Print(i) }");
        let StatementKind::For {
            variable, iterable, ..
        } = &program.statements[0].kind
        else {
            panic!("expected for");
        };
        assert_eq!(variable, "i");
        assert!(matches!(iterable.kind, ExprKind::Range { .. }));
    }

    #[test]
    fn test_while_with_jumps() {
        let program = parse_ok("while true { if x break; continue }");
        let StatementKind::While { body, .. } = &program.statements[0].kind else {
            panic!("expected while");
        };
        let StatementKind::Block(statements) = &body.kind else {
            panic!("expected block body");
        };
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1].kind, StatementKind::Continue));
    }

    #[test]
    fn test_return_with_and_without_value() {
        let program = parse_ok("fn f(): { return }\nfn g(): { return 1 }");
        let values: Vec<bool> = program
            .statements
            .iter()
            .map(|s| {
                let StatementKind::FunctionDeclaration { function, .. } = &s.kind else {
                    panic!("expected function");
                };
                let FunctionBody::Block(block) = &function.body else {
                    panic!("expected block body");
                };
                let StatementKind::Block(body) = &block.kind else {
                    panic!("expected block");
                };
                matches!(body[0].kind, StatementKind::Return(Some(_)))
            })
            .collect();
        assert_eq!(values, vec![false, true]);
    }

    #[test]
    fn test_missing_body_reports_once() {
        let (program, errors) = parse_source("while true");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
    }
}
