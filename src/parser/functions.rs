//! Function declarations, function literals and parameter lists.
//!
//! ```text
//! fn add(a: Integer, b: Integer) -> Integer: a + b
//! # twice = (f: Function<Integer, Integer>, x: Integer): f(f(x))
//! ƒ greet(): { Print("hi") }
//! ```

use crate::ast::{Expr, ExprKind, Function, FunctionBody, Parameter, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{Parser, is_type_name};

impl Parser {
    /// Whether the `(` at the cursor opens a function literal.
    ///
    /// True for `(name: TypeName ...` and for `()` followed by `:` or `->`.
    pub(super) fn at_function_literal(&self) -> bool {
        let first = self.peek_ahead(1);
        let second = self.peek_ahead(2);
        let third = self.peek_ahead(3);
        match first.kind {
            TokenKind::Identifier => {
                second.kind == TokenKind::Colon
                    && third.kind == TokenKind::Identifier
                    && is_type_name(&third.text)
            }
            TokenKind::RightParen => matches!(second.kind, TokenKind::Colon | TokenKind::Arrow),
            _ => false,
        }
    }

    /// `(params) [-> Type]: body` in expression position.
    pub(super) fn parse_function_literal(&mut self) -> Expr {
        let start = self.peek().span.start;
        let function = self.parse_function();
        Expr::new(
            ExprKind::FunctionLiteral(Box::new(function)),
            self.span_from(start),
        )
    }

    /// `fn name(params) [-> Type]: body`
    pub(super) fn parse_function_declaration(&mut self) -> Statement {
        let start = self.advance().span.start;
        let name = self.expect(TokenKind::Identifier);
        let function = self.parse_function();
        Statement::new(
            StatementKind::FunctionDeclaration {
                name: name.text,
                name_span: name.span,
                function: Box::new(function),
            },
            self.span_from(start),
        )
    }

    /// Parameter list, optional return hint, `:` and body.
    fn parse_function(&mut self) -> Function {
        let parameters = self.parse_parameter_list();
        let return_type = if self.match_token(TokenKind::Arrow) {
            Some(self.parse_type_clause())
        } else {
            None
        };
        self.expect(TokenKind::Colon);

        let body = if self.check(TokenKind::LeftBrace) {
            FunctionBody::Block(Box::new(self.parse_block()))
        } else {
            FunctionBody::Expression(self.with_ranges(true, Self::parse_expression))
        };

        Function {
            parameters,
            return_type,
            body,
        }
    }

    /// `(name: Type, ...)`
    fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        self.expect(TokenKind::LeftParen);

        if !self.check(TokenKind::RightParen) {
            loop {
                let start = self.peek().span.start;
                let name = self.expect(TokenKind::Identifier);
                self.expect(TokenKind::Colon);
                let type_clause = self.parse_type_clause();
                parameters.push(Parameter {
                    name: name.text,
                    type_clause,
                    span: self.span_from(start),
                });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen);
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::{parse_expr, parse_ok, parse_source};

    #[test]
    fn test_function_declaration() {
        let program = parse_ok("fn add(a: Integer, b: Integer) -> Integer: a + b");
        let StatementKind::FunctionDeclaration { name, function, .. } = &program.statements[0].kind
        else {
            panic!("expected function declaration");
        };
        assert_eq!(name, "add");
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(function.parameters[1].name, "b");
        assert_eq!(
            function.return_type.as_ref().map(|t| t.name.as_str()),
            Some("Integer")
        );
        assert!(matches!(function.body, FunctionBody::Expression(_)));
    }

    #[test]
    fn test_function_symbol_alias_and_block_body() {
        let program = parse_ok("ƒ greet(): { Print(\"hi\") }");
        let StatementKind::FunctionDeclaration { function, .. } = &program.statements[0].kind
        else {
            panic!("expected function declaration");
        };
        assert!(function.parameters.is_empty());
        assert!(matches!(function.body, FunctionBody::Block(_)));
    }

    #[test]
    fn test_function_literal() {
        let expr = parse_expr("(x: Integer, y: List<Float>) -> Float: x * y[0]");
        let ExprKind::FunctionLiteral(function) = &expr.kind else {
            panic!("expected function literal, got {:?}", expr.kind);
        };
        assert_eq!(function.parameters.len(), 2);
        assert_eq!(function.parameters[1].type_clause.to_string(), "List<Float>");
    }

    #[test]
    fn test_empty_parameter_literal() {
        assert!(matches!(
            parse_expr("(): 42").kind,
            ExprKind::FunctionLiteral(_)
        ));
        assert!(matches!(
            parse_expr("() -> Integer: 42").kind,
            ExprKind::FunctionLiteral(_)
        ));
    }

    #[test]
    fn test_parenthesized_range_is_not_a_literal() {
        assert!(matches!(
            parse_expr("(a:b)").kind,
            ExprKind::Parenthesized(_)
        ));
    }

    #[test]
    fn test_missing_colon_reports() {
        let (_, errors) = parse_source("fn f(a: Integer) a");
        assert_eq!(errors.len(), 1);
    }
}
