//! Statement parsing.
//!
//! Dispatches on the leading token:
//! - `#` declarations: `# x = 1`, `#* PI: Float = 3.14`, `#* x`
//! - `{` blocks
//! - `fn`/`ƒ` function declarations (see [`functions`](super::functions))
//! - `if`/`while`/`for` and jumps (see [`control_flow`](super::control_flow))
//! - anything else is an expression statement

use crate::ast::{Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{ParseError, Parser};

impl Parser {
    /// Parses a single statement.
    ///
    /// Range literals are always allowed at the start of a statement.
    pub fn parse_statement(&mut self) -> Statement {
        self.with_ranges(true, |p| match p.peek_kind() {
            TokenKind::Hash => p.parse_declaration(),
            TokenKind::LeftBrace => p.parse_block(),
            TokenKind::Function => p.parse_function_declaration(),
            TokenKind::If => p.parse_if(),
            TokenKind::While => p.parse_while(),
            TokenKind::For => p.parse_for(),
            TokenKind::Break | TokenKind::Continue | TokenKind::Return => p.parse_jump(),
            _ => {
                let expr = p.parse_expression();
                let span = expr.span;
                Statement::new(StatementKind::Expression(expr), span)
            }
        })
    }

    /// `# [*] name [: Type] [= value]`
    fn parse_declaration(&mut self) -> Statement {
        let start = self.advance().span.start;
        let is_constant = self.match_token(TokenKind::Star);
        let name = self.expect(TokenKind::Identifier);

        let type_clause = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type_clause())
        } else {
            None
        };
        let value = if self.match_token(TokenKind::Equals) {
            Some(self.parse_expression())
        } else {
            None
        };

        let span = self.span_from(start);
        if !is_constant && type_clause.is_none() && value.is_none() {
            if !name.is_synthesized() {
                self.report(ParseError::IncompleteDeclaration {
                    name: name.text,
                    span,
                });
            }
            return Statement::new(StatementKind::Unknown, span);
        }

        Statement::new(
            StatementKind::Declaration {
                name: name.text,
                name_span: name.span,
                is_constant,
                type_clause,
                value,
            },
            span,
        )
    }

    /// `{ statement* }`
    pub(super) fn parse_block(&mut self) -> Statement {
        let start = self.expect(TokenKind::LeftBrace).span.start;
        let mut statements = Vec::new();

        loop {
            while self.match_token(TokenKind::Semicolon) {}
            if self.check(TokenKind::RightBrace) || self.is_at_end() {
                break;
            }
            if let Some(statement) = self.parse_statement_with_progress() {
                statements.push(statement);
            }
        }

        self.expect(TokenKind::RightBrace);
        Statement::new(StatementKind::Block(statements), self.span_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, Literal, Span};
    use crate::parser::tests::{parse_ok, parse_source};

    #[test]
    fn test_declaration_forms() {
        let program = parse_ok("# a = 1\n#* b: Float = 2\n# c: String\n#* a");
        let kinds: Vec<_> = program
            .statements
            .iter()
            .map(|s| match &s.kind {
                StatementKind::Declaration {
                    name,
                    is_constant,
                    type_clause,
                    value,
                    ..
                } => (
                    name.as_str(),
                    *is_constant,
                    type_clause.is_some(),
                    value.is_some(),
                ),
                other => panic!("expected declaration, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("a", false, false, true),
                ("b", true, true, true),
                ("c", false, true, false),
                ("a", true, false, false),
            ]
        );
    }

    #[test]
    fn test_declaration_span() {
        let program = parse_ok("# x: Integer = 42");
        let statement = &program.statements[0];
        assert_eq!(statement.span, Span::new(0, 17));
        let StatementKind::Declaration {
            name_span, value, ..
        } = &statement.kind
        else {
            panic!("expected declaration");
        };
        assert_eq!(*name_span, Span::new(2, 3));
        assert!(matches!(
            value.as_ref().map(|v| &v.kind),
            Some(ExprKind::Literal(Literal::Integer(v))) if *v == 42.0
        ));
    }

    #[test]
    fn test_bare_declaration_is_an_error() {
        let (program, errors) = parse_source("# x");
        assert!(matches!(
            &errors[0],
            ParseError::IncompleteDeclaration { name, .. } if name == "x"
        ));
        assert!(matches!(program.statements[0].kind, StatementKind::Unknown));
    }

    #[test]
    fn test_nested_blocks() {
        let program = parse_ok("{ # a = 1; { a } }");
        let StatementKind::Block(outer) = &program.statements[0].kind else {
            panic!("expected block");
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(outer[1].kind, StatementKind::Block(_)));
    }

    #[test]
    fn test_unclosed_block_reports_once() {
        let (program, errors) = parse_source("{ # a = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
    }
}
