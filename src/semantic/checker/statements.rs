//! Statement binding dispatcher.
//!
//! This module contains the main `check_statement` method that dispatches
//! to the appropriate handler based on statement kind. Blocks and expression
//! statements are handled here; everything else lives in the specialized
//! modules.

use crate::ast::{Statement, StatementKind};
use crate::semantic::typed_ir::{SemanticStatement, SemanticStatementKind};

use super::Analyzer;

impl<'a> Analyzer<'a> {
    /// Binds a sequence of statements in the current scope.
    pub fn check_statements(&mut self, statements: &[Statement]) -> Vec<SemanticStatement> {
        statements.iter().map(|s| self.check_statement(s)).collect()
    }

    /// Binds a single statement.
    pub fn check_statement(&mut self, statement: &Statement) -> SemanticStatement {
        let span = statement.span;
        match &statement.kind {
            StatementKind::Declaration {
                name,
                name_span,
                is_constant,
                type_clause,
                value,
            } => self.check_declaration(
                name,
                *name_span,
                *is_constant,
                type_clause.as_ref(),
                value.as_ref(),
                span,
            ),

            StatementKind::FunctionDeclaration {
                name,
                name_span,
                function,
            } => self.check_function_declaration(name, *name_span, function, span),

            StatementKind::Block(statements) => {
                let statements = self.scoped(|a| a.check_statements(statements));
                SemanticStatement::new(SemanticStatementKind::Block(statements), span)
            }

            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.check_if(condition, then_branch, else_branch.as_deref(), span),

            StatementKind::While { condition, body } => self.check_while(condition, body, span),

            StatementKind::For {
                variable,
                variable_span,
                iterable,
                body,
            } => self.check_for(variable, *variable_span, iterable, body, span),

            StatementKind::Break => self.check_jump(SemanticStatementKind::Break, "break", span),

            StatementKind::Continue => self.check_jump(SemanticStatementKind::Continue, "continue", span),

            StatementKind::Return(value) => self.check_return(value.as_ref(), span),

            StatementKind::Expression(expr) => {
                let expr = self.check_expr(expr);
                SemanticStatement::new(SemanticStatementKind::Expression(expr), span)
            }

            StatementKind::Unknown => SemanticStatement::new(SemanticStatementKind::Failed, span),
        }
    }
}
