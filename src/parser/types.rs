//! Type clause parsing: `Integer`, `List<Char>`, `Function<Integer, Float>`.

use crate::ast::TypeClause;
use crate::lexer::TokenKind;

use super::Parser;

/// Names that can start a type clause.
///
/// Used to tell a parameter list `(a: Integer)` from a parenthesized range
/// `(a:b)`.
const TYPE_NAMES: &[&str] = &[
    "Any", "Boolean", "Char", "Float", "Function", "Integer", "List", "Null", "Range", "String",
    "Void",
];

/// Whether `name` is a built-in type name.
pub fn is_type_name(name: &str) -> bool {
    TYPE_NAMES.contains(&name)
}

impl Parser {
    /// Parses a type clause, splitting `>>` when generic arguments nest.
    pub(super) fn parse_type_clause(&mut self) -> TypeClause {
        let start = self.peek().span.start;
        let name = self.expect(TokenKind::Identifier);
        let mut parameters = Vec::new();

        if self.match_token(TokenKind::Less) {
            loop {
                parameters.push(self.parse_type_clause());
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.split_shift_right();
            self.expect(TokenKind::Greater);
        }

        TypeClause::new(name.text, parameters, self.span_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::lexer::lex;

    fn clause(source: &str) -> (TypeClause, usize) {
        let tokens = lex(source);
        let mut parser = Parser::new(&tokens);
        let clause = parser.parse_type_clause();
        (clause, parser.errors().len())
    }

    #[test]
    fn test_plain_type() {
        let (clause, errors) = clause("Integer");
        assert_eq!(errors, 0);
        assert_eq!(clause.name, "Integer");
        assert!(clause.parameters.is_empty());
        assert_eq!(clause.span, Span::new(0, 7));
    }

    #[test]
    fn test_nested_generics_split_shift() {
        let (clause, errors) = clause("List<List<Integer>>");
        assert_eq!(errors, 0);
        assert_eq!(clause.to_string(), "List<List<Integer>>");
        assert_eq!(clause.span, Span::new(0, 19));
        assert_eq!(clause.parameters[0].span, Span::new(5, 18));
    }

    #[test]
    fn test_function_type() {
        let (clause, errors) = clause("Function<Integer, Float, Char>");
        assert_eq!(errors, 0);
        assert_eq!(clause.parameters.len(), 3);
    }

    #[test]
    fn test_missing_closer_reports() {
        let (clause, errors) = clause("List<Integer");
        assert_eq!(errors, 1);
        assert_eq!(clause.parameters.len(), 1);
    }

    #[test]
    fn test_type_names() {
        assert!(is_type_name("Integer"));
        assert!(!is_type_name("integer"));
    }
}
