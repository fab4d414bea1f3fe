//! Tree-walking evaluator for Glint.
//!
//! Runs a [`SemanticProgram`] against a runtime [`Scope`]. The analyzer has
//! already resolved every name, operator and conversion, so evaluation is a
//! straightforward recursive walk.
//!
//! # Errors
//!
//! Runtime faults (division by zero, bad indices, overflow) do not abort the
//! program. Each one is recorded as a [`RuntimeError`] and the faulting
//! expression evaluates to [`Value::Unknown`]. Any expression with an
//! `Unknown` operand is itself `Unknown` without a further report, so a single
//! fault produces a single diagnostic.
//!
//! # Control flow
//!
//! `break`, `continue` and `return` travel up the statement walk as [`Flow`]
//! values until the enclosing loop or call consumes them.

pub mod builtins;
pub mod error;
pub mod host;
pub mod operations;
pub mod random;
pub mod scope;
pub mod value;

pub use error::RuntimeError;
pub use host::{BufferedHost, Host, StdHost};
pub use random::Random;
pub use scope::{FrameRef, Scope};
pub use value::{FunctionValue, Value};

use std::rc::Rc;

use crate::ast::{Literal, Span};
use crate::semantic::typed_ir::{
    AssignmentTarget, SemanticExpr, SemanticExprKind, SemanticFormatPart, SemanticFunction,
    SemanticFunctionBody, SemanticProgram, SemanticStatement, SemanticStatementKind,
};
use crate::semantic::{BinaryOperationKind, TypeSymbol};

use builtins::BuiltinContext;

/// Deepest allowed nesting of user function calls.
pub const MAX_CALL_DEPTH: usize = 128;

type Result<T> = std::result::Result<T, RuntimeError>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Evaluates `program` and returns the value of its last top-level
/// expression statement (`Void` if there is none) with any runtime errors.
pub fn evaluate(
    program: &SemanticProgram,
    scope: &mut Scope,
    host: &mut dyn Host,
    random: &mut Random,
) -> (Value, Vec<RuntimeError>) {
    let mut evaluator = Evaluator::new(scope, host, random);
    let value = evaluator.run(&program.statements);
    log::debug!("evaluated program with {} runtime errors", evaluator.errors.len());
    (value, evaluator.errors)
}

/// Evaluation state for one program run.
pub struct Evaluator<'a> {
    scope: &'a mut Scope,
    context: BuiltinContext<'a>,
    /// Runtime errors, in the order they occurred.
    pub errors: Vec<RuntimeError>,
    call_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(scope: &'a mut Scope, host: &'a mut dyn Host, random: &'a mut Random) -> Self {
        Self {
            scope,
            context: BuiltinContext { host, random },
            errors: Vec::new(),
            call_depth: 0,
        }
    }

    /// Executes top-level statements.
    pub fn run(&mut self, statements: &[SemanticStatement]) -> Value {
        let mut last = Value::Void;
        for statement in statements {
            if let SemanticStatementKind::Expression(expr) = &statement.kind {
                last = self.eval(expr);
                continue;
            }
            match self.execute(statement) {
                Flow::Normal => {}
                // Only reachable when evaluating despite analysis errors.
                flow => {
                    log::debug!("ignoring {flow:?} at top level");
                    break;
                }
            }
        }
        last
    }

    fn report(&mut self, error: RuntimeError) {
        log::trace!("runtime error: {error}");
        self.errors.push(error);
    }

    /// Runs `f` in a fresh child frame.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scope.push();
        let result = f(self);
        self.scope.pop();
        result
    }

    // ==================== Statements ====================

    fn execute_all(&mut self, statements: &[SemanticStatement]) -> Flow {
        for statement in statements {
            let flow = self.execute(statement);
            if flow != Flow::Normal {
                return flow;
            }
        }
        Flow::Normal
    }

    pub fn execute(&mut self, statement: &SemanticStatement) -> Flow {
        match &statement.kind {
            SemanticStatementKind::Declaration {
                name,
                type_symbol,
                value,
            } => {
                let value = match value {
                    Some(expr) => retag(self.eval(expr), type_symbol),
                    None => Value::default_for(type_symbol),
                };
                self.scope.declare(name.as_str(), value);
                Flow::Normal
            }

            SemanticStatementKind::Function { name, function } => {
                // Declared in the frame it captures, so it can call itself.
                let value = self.function_value(function);
                self.scope.declare(name.as_str(), value);
                Flow::Normal
            }

            SemanticStatementKind::Block(statements) => self.scoped(|e| e.execute_all(statements)),

            SemanticStatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => match self.eval(condition) {
                Value::Boolean(true) => self.scoped(|e| e.execute(then_branch)),
                Value::Boolean(false) => match else_branch {
                    Some(branch) => self.scoped(|e| e.execute(branch)),
                    None => Flow::Normal,
                },
                _ => Flow::Normal,
            },

            SemanticStatementKind::While { condition, body } => {
                while let Value::Boolean(true) = self.eval(condition) {
                    match self.scoped(|e| e.execute(body)) {
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return flow,
                        Flow::Normal | Flow::Continue => {}
                    }
                }
                Flow::Normal
            }

            SemanticStatementKind::For {
                variable,
                iterable,
                body,
            } => self.execute_for(variable, iterable, body),

            SemanticStatementKind::Break => Flow::Break,
            SemanticStatementKind::Continue => Flow::Continue,
            SemanticStatementKind::Return(value) => {
                Flow::Return(value.as_ref().map_or(Value::Void, |v| self.eval(v)))
            }

            SemanticStatementKind::Expression(expr) => {
                self.eval(expr);
                Flow::Normal
            }

            SemanticStatementKind::Empty | SemanticStatementKind::Failed => Flow::Normal,
        }
    }

    fn execute_for(&mut self, variable: &str, iterable: &SemanticExpr, body: &SemanticStatement) -> Flow {
        let items: Box<dyn Iterator<Item = Value>> = match self.eval(iterable) {
            range @ Value::Range { .. } => match operations::range_iter(&range, iterable.span) {
                Ok(range) => Box::new(range.map(Value::Integer)),
                Err(error) => {
                    self.report(error);
                    return Flow::Normal;
                }
            },
            Value::String(s) => Box::new(s.chars().collect::<Vec<_>>().into_iter().map(Value::Char)),
            Value::List { items, .. } => Box::new(items.into_iter()),
            Value::Unknown | Value::Null => return Flow::Normal,
            other => {
                self.report(RuntimeError::mismatch("an iterable value", other.type_symbol(), iterable.span));
                return Flow::Normal;
            }
        };

        for item in items {
            let flow = self.scoped(|e| {
                e.scope.declare(variable, item);
                e.execute(body)
            });
            match flow {
                Flow::Break => break,
                Flow::Return(_) => return flow,
                Flow::Normal | Flow::Continue => {}
            }
        }
        Flow::Normal
    }

    // ==================== Expressions ====================

    /// Evaluates an expression, turning a runtime fault into `Unknown`.
    pub fn eval(&mut self, expr: &SemanticExpr) -> Value {
        match self.try_eval(expr) {
            Ok(value) => value,
            Err(error) => {
                self.report(error);
                Value::Unknown
            }
        }
    }

    fn try_eval(&mut self, expr: &SemanticExpr) -> Result<Value> {
        let span = expr.span;
        match &expr.kind {
            SemanticExprKind::Literal(literal) => Ok(literal_value(literal)),

            SemanticExprKind::Name(name) => self
                .scope
                .get(name)
                .ok_or_else(|| RuntimeError::StaleName {
                    name: name.clone(),
                    span,
                }),

            SemanticExprKind::Unary { kind, operand } => match self.eval(operand) {
                Value::Unknown => Ok(Value::Unknown),
                value => operations::unary(*kind, value, span),
            },

            SemanticExprKind::Binary { left, kind, right } => self.eval_binary(left, *kind, right, &expr.type_symbol, span),

            SemanticExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => Ok(match self.eval(condition) {
                Value::Boolean(true) => self.eval(then_branch),
                Value::Boolean(false) => self.eval(else_branch),
                _ => Value::Unknown,
            }),

            SemanticExprKind::Assignment { target, value } => {
                let value = match self.eval(value) {
                    Value::Unknown => return Ok(Value::Unknown),
                    value => value,
                };
                self.assign(target, value, span)
            }

            SemanticExprKind::Call { callee, arguments } => {
                let callee = self.eval(callee);
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    match self.eval(argument) {
                        Value::Unknown => return Ok(Value::Unknown),
                        value => values.push(value),
                    }
                }
                self.call(callee, values, span)
            }

            SemanticExprKind::Index { target, index } => match (self.eval(target), self.eval(index)) {
                (Value::Unknown, _) | (_, Value::Unknown) => Ok(Value::Unknown),
                (target, index) => operations::index(&target, &index, span),
            },

            SemanticExprKind::Slice { target, range } => match (self.eval(target), self.eval(range)) {
                (Value::Unknown, _) | (_, Value::Unknown) => Ok(Value::Unknown),
                (target, range) => operations::slice(&target, &range, span),
            },

            SemanticExprKind::Range { start, end, step } => {
                let start = self.eval(start);
                let end = self.eval(end);
                let step = step.as_ref().map(|s| self.eval(s));
                let (Some(start), Some(end)) = (start.as_number(), end.as_number()) else {
                    return Ok(Value::Unknown);
                };
                let step = match step {
                    None => None,
                    Some(step) => match step.as_number() {
                        Some(step) if step == 0.0 => return Err(RuntimeError::ZeroStep { span }),
                        Some(step) => Some(step),
                        None => return Ok(Value::Unknown),
                    },
                };
                Ok(Value::Range { start, end, step })
            }

            SemanticExprKind::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    match self.eval(element) {
                        Value::Unknown => return Ok(Value::Unknown),
                        value => items.push(value),
                    }
                }
                let element_type = expr.type_symbol.list_element().cloned().unwrap_or(TypeSymbol::Any);
                Ok(Value::list(element_type, items))
            }

            SemanticExprKind::FormatString(parts) => {
                let mut text = String::new();
                for part in parts {
                    match part {
                        SemanticFormatPart::Text(fragment) => text.push_str(fragment),
                        SemanticFormatPart::Expression(expr) => match self.eval(expr) {
                            Value::Unknown => return Ok(Value::Unknown),
                            value => text.push_str(&value.to_string()),
                        },
                    }
                }
                Ok(Value::String(text))
            }

            SemanticExprKind::Function(function) => Ok(self.function_value(function)),

            SemanticExprKind::Conversion { value, kind } => match self.eval(value) {
                Value::Unknown => Ok(Value::Unknown),
                value => operations::convert(value, *kind, &expr.type_symbol, span),
            },

            SemanticExprKind::Counting {
                name,
                increment,
                prefix,
            } => self.eval_counting(name, *increment, *prefix, span),

            SemanticExprKind::Failed => Ok(Value::Unknown),
        }
    }

    fn eval_binary(
        &mut self,
        left: &SemanticExpr,
        kind: BinaryOperationKind,
        right: &SemanticExpr,
        result_type: &TypeSymbol,
        span: Span,
    ) -> Result<Value> {
        let left = self.eval(left);
        let short_circuit = match (kind, &left) {
            (_, Value::Unknown) => Some(Value::Unknown),
            (BinaryOperationKind::LogicalAnd, Value::Boolean(false)) => Some(Value::Boolean(false)),
            (BinaryOperationKind::LogicalOr, Value::Boolean(true)) => Some(Value::Boolean(true)),
            (BinaryOperationKind::NullCoalescing, value) if !matches!(value, Value::Null) => Some(left.clone()),
            _ => None,
        };
        if let Some(value) = short_circuit {
            return Ok(value);
        }
        match self.eval(right) {
            Value::Unknown => Ok(Value::Unknown),
            right => operations::binary(kind, left, right, result_type, span),
        }
    }

    fn eval_counting(&mut self, name: &str, increment: bool, prefix: bool, span: Span) -> Result<Value> {
        let old = self.scope.get(name).ok_or_else(|| RuntimeError::StaleName {
            name: name.to_string(),
            span,
        })?;
        let delta = if increment { 1.0 } else { -1.0 };
        let new = match &old {
            Value::Integer(v) => Value::number(v + delta),
            Value::Float(v) => Value::Float(v + delta),
            Value::Char(c) => operations::char_from_code(*c as u32 as f64 + delta, span)?,
            Value::Unknown => return Ok(Value::Unknown),
            other => return Err(RuntimeError::mismatch("a number or char", other.type_symbol(), span)),
        };
        self.scope.assign(name, new.clone());
        Ok(if prefix { new } else { old })
    }

    /// Stores `value` into a name or a list element and returns it.
    fn assign(&mut self, target: &AssignmentTarget, value: Value, span: Span) -> Result<Value> {
        let mut indices = Vec::with_capacity(target.indices.len());
        for index in &target.indices {
            match self.eval(index).as_number() {
                Some(i) => indices.push(i),
                None => return Ok(Value::Unknown),
            }
        }

        let stored = value.clone();
        let result = self.scope.update(&target.name, move |mut slot: &mut Value| -> Result<()> {
            for index in indices {
                match slot {
                    Value::List { items, .. } => {
                        let i = operations::checked_index(index, items.len(), span)?;
                        slot = &mut items[i];
                    }
                    other => return Err(RuntimeError::mismatch("a list", other.type_symbol(), span)),
                }
            }
            *slot = stored;
            Ok(())
        });
        match result {
            Some(outcome) => outcome.map(|()| value),
            None => Err(RuntimeError::StaleName {
                name: target.name.clone(),
                span,
            }),
        }
    }

    // ==================== Calls ====================

    fn function_value(&self, function: &Rc<SemanticFunction>) -> Value {
        Value::Function(FunctionValue::User {
            function: Rc::clone(function),
            frame: self.scope.current(),
        })
    }

    fn call(&mut self, callee: Value, arguments: Vec<Value>, span: Span) -> Result<Value> {
        match callee {
            Value::Function(FunctionValue::Builtin(builtin)) => {
                builtins::call(builtin, &arguments, &mut self.context, span)
            }
            Value::Function(FunctionValue::User { function, frame }) => {
                self.call_user(&function, frame, arguments, span)
            }
            Value::Unknown => Ok(Value::Unknown),
            other => Err(RuntimeError::internal(format!("{} is not callable", other.type_symbol()), span)),
        }
    }

    fn call_user(
        &mut self,
        function: &SemanticFunction,
        frame: FrameRef,
        arguments: Vec<Value>,
        span: Span,
    ) -> Result<Value> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded {
                limit: MAX_CALL_DEPTH,
                span,
            });
        }
        if arguments.len() != function.parameters.len() {
            return Err(RuntimeError::internal(
                format!("expected {} arguments, found {}", function.parameters.len(), arguments.len()),
                span,
            ));
        }

        self.call_depth += 1;
        self.scope.push_call(frame);
        for ((name, type_symbol), value) in function.parameters.iter().zip(arguments) {
            self.scope.declare(name.as_str(), retag(value, type_symbol));
        }
        let result = match &function.body {
            SemanticFunctionBody::Expression(body) => self.eval(body),
            SemanticFunctionBody::Block(statements) => match self.execute_all(statements) {
                Flow::Return(value) => value,
                _ => Value::Void,
            },
        };
        self.scope.pop();
        self.call_depth -= 1;
        Ok(result)
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Integer(v) => Value::Integer(*v),
        Literal::Float(v) => Value::Float(*v),
        Literal::Char(c) => Value::Char(*c),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
    }
}

/// Gives a list stored into a slot of type `List<T>` the slot's element
/// type, widening integers when `T` is `Float`.
fn retag(value: Value, slot: &TypeSymbol) -> Value {
    let Some(element) = slot.list_element() else {
        return value;
    };
    match value {
        Value::List { items, .. } if !element.contains_any() => {
            let items = items
                .into_iter()
                .map(|item| match (element, item) {
                    (TypeSymbol::Float, Value::Integer(v)) => Value::Float(v),
                    (element, item) => retag(item, element),
                })
                .collect();
            Value::list(element.clone(), items)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{self, SemanticScope};
    use crate::{lexer, parser};

    /// Runs `source` through the whole pipeline and returns the program
    /// value, the runtime errors and the printed lines.
    fn run_with_input(source: &str, input: &[&str]) -> (Value, Vec<RuntimeError>, Vec<String>) {
        let (program, parse_errors) = parser::parse(&lexer::lex(source));
        assert!(parse_errors.is_empty(), "parse errors: {parse_errors:?}");
        let mut names = SemanticScope::new();
        let (tree, errors) = semantic::analyze(&program, &mut names);
        assert!(errors.is_empty(), "semantic errors: {errors:?}");

        let mut scope = Scope::new();
        let mut host = BufferedHost::with_input(input.iter().copied());
        let mut random = Random::with_seed(99);
        let (value, errors) = evaluate(&tree, &mut scope, &mut host, &mut random);
        (value, errors, host.output)
    }

    fn run(source: &str) -> (Value, Vec<RuntimeError>, Vec<String>) {
        run_with_input(source, &[])
    }

    fn value_of(source: &str) -> Value {
        let (value, errors, _) = run(source);
        assert!(errors.is_empty(), "runtime errors: {errors:?}");
        value
    }

    fn output_of(source: &str) -> Vec<String> {
        let (_, errors, output) = run(source);
        assert!(errors.is_empty(), "runtime errors: {errors:?}");
        output
    }

    #[test]
    fn test_arithmetic_results() {
        assert!(matches!(value_of("1 + 2"), Value::Integer(v) if v == 3.0));
        assert!(matches!(value_of("1 / 2"), Value::Float(v) if v == 0.5));
        assert!(matches!(value_of("2 ** 3"), Value::Float(v) if v == 8.0));
        assert!(matches!(value_of("7 % 2"), Value::Integer(v) if v == 1.0));
        assert!(matches!(value_of("1.5 + 1.5"), Value::Integer(v) if v == 3.0));
    }

    #[test]
    fn test_program_value_is_last_expression() {
        assert_eq!(value_of("1\n# x = 5"), Value::Integer(1.0));
        assert_eq!(value_of("# x = 5"), Value::Void);
        assert_eq!(value_of("# x = 5\nx * 2"), Value::Integer(10.0));
    }

    #[test]
    fn test_short_circuit() {
        // The right side would divide by zero.
        assert_eq!(value_of("false && 1 / 0 == 1"), Value::Boolean(false));
        assert_eq!(value_of("true || 1 / 0 == 1"), Value::Boolean(true));
        assert_eq!(value_of("# s: String = \"x\"\ns ?? \"y\""), Value::String("x".into()));
    }

    #[test]
    fn test_runtime_fault_is_contained() {
        let (value, errors, output) = run("# x = 1 / 0\nPrint(x + 1)\nPrint(2)\n3");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], RuntimeError::DivisionByZero { .. }));
        // The call with an unknown argument is skipped.
        assert_eq!(output, vec!["2"]);
        assert_eq!(value, Value::Integer(3.0));
    }

    #[test]
    fn test_loops() {
        let output = output_of("# i = 0\nwhile i < 3 { Print(i); i += 1 }");
        assert_eq!(output, vec!["0", "1", "2"]);

        let output = output_of("for i in 0:10 { if i == 4 break\nif i % 2 == 0 continue\nPrint(i) }");
        assert_eq!(output, vec!["1", "3"]);

        let output = output_of("for c in \"ab\" Print(c)\nfor x in [1.5, 2.5] Print(x)");
        assert_eq!(output, vec!["a", "b", "1.5", "2.5"]);
    }

    #[test]
    fn test_unbounded_range_with_break() {
        let output = output_of("for i in 0:∞ { if i > 2 break\nPrint(i) }");
        assert_eq!(output, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_functions_and_recursion() {
        assert_eq!(value_of("fn add(a: Integer, b: Integer): a + b\nadd(2, 3)"), Value::Integer(5.0));
        let source = "fn fact(n: Integer) -> Integer: { if n <= 1 return 1\nreturn n * fact(n - 1) }\nfact(5)";
        assert_eq!(value_of(source), Value::Integer(120.0));
        assert_eq!(value_of("fn f(): { Print(1) }\nf()"), Value::Void);
    }

    #[test]
    fn test_closures_see_their_defining_scope() {
        let source = "# x = 1\nfn get(): x\n{ # x = 2\nget() }";
        let (value, errors, _) = run(&format!("{source}\nget()"));
        assert!(errors.is_empty());
        assert_eq!(value, Value::Integer(1.0));

        let output = output_of("# n = 0\nfn bump(): { n += 1 }\nbump()\nbump()\nPrint(n)");
        assert_eq!(output, vec!["2"]);
    }

    #[test]
    fn test_returned_closures_keep_captures() {
        let make = "fn mk(n: Integer) -> Function<Integer, Integer>: (x: Integer): x + n\n";
        assert_eq!(value_of(&format!("{make}mk(2)(3)")), Value::Integer(5.0));

        let source = format!("{make}# add2 = mk(2)\n# add5 = mk(5)\nPrint(add2(1))\nadd5(1)");
        let (value, errors, output) = run(&source);
        assert!(errors.is_empty(), "runtime errors: {errors:?}");
        assert_eq!(output, vec!["3"]);
        assert_eq!(value, Value::Integer(6.0));
    }

    #[test]
    fn test_oversized_repetition_is_contained() {
        let (value, errors, output) = run("Print(\"ab\" * 9000000000000000000)\nPrint(\"after\")\n[1, 2] * 9223372036854775807");
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, RuntimeError::RepetitionTooLarge { .. }))
        );
        assert_eq!(output, vec!["after"]);
        assert_eq!(value, Value::Unknown);
    }

    #[test]
    fn test_lists_have_value_semantics() {
        let output = output_of("# a = [1, 2]\n# b = a\nb[0] = 9\nPrint(a)\nPrint(b)");
        assert_eq!(output, vec!["[1, 2]", "[9, 2]"]);
    }

    #[test]
    fn test_nested_element_assignment() {
        let output = output_of("# m = [[1, 2], [3, 4]]\nm[1][0] = 7\nm[0][1] += 10\nPrint(m)");
        assert_eq!(output, vec!["[[1, 12], [7, 4]]"]);
    }

    #[test]
    fn test_index_errors() {
        let (value, errors, _) = run("# a = [1, 2]\na[2]");
        assert_eq!(value, Value::Unknown);
        assert!(matches!(errors[0], RuntimeError::IndexOutOfRange { length: 2, .. }));
    }

    #[test]
    fn test_counting() {
        let output = output_of("# i = 1\nPrint(i++)\nPrint(i)\nPrint(--i)\n# c = 'a'; ++c; Print(c)");
        assert_eq!(output, vec!["1", "2", "1", "b"]);
    }

    #[test]
    fn test_format_strings_and_conversions() {
        assert_eq!(value_of("# n = 3\n$\"n = {n}, half = {n / 2}\""), Value::String("n = 3, half = 1.5".into()));
        assert_eq!(value_of("3.9 -> Integer"), Value::Integer(3.0));
        assert_eq!(value_of("65 -> Char"), Value::Char('A'));
        assert_eq!(value_of("LengthOf((0:10) -> List<Integer>)"), Value::Integer(10.0));
        assert_eq!(value_of("\"hello\"[1:3]"), Value::String("el".into()));
    }

    #[test]
    fn test_widened_lists() {
        let output = output_of("# xs: List<Float> = [1, 2]\nPrint(xs)");
        assert_eq!(output, vec!["[1.0, 2.0]"]);
    }

    #[test]
    fn test_read_and_print() {
        let (_, errors, output) = run_with_input("# name = Read(\"? \")\nPrint(\"hi \" + name)", &["Ada"]);
        assert!(errors.is_empty());
        assert_eq!(output, vec!["hi Ada"]);
    }

    #[test]
    fn test_scope_shadowing() {
        let output = output_of("# x = 1\n{ # x = \"inner\"; Print(x) }\nPrint(x)");
        assert_eq!(output, vec!["inner", "1"]);
    }
}
