//! Runtime behaviour of the built-in functions.

use crate::ast::Span;
use crate::semantic::{Builtin, TypeSymbol};

use super::error::RuntimeError;
use super::host::Host;
use super::operations;
use super::random::Random;
use super::value::Value;

/// What a built-in may touch while running.
pub struct BuiltinContext<'a> {
    pub host: &'a mut dyn Host,
    pub random: &'a mut Random,
}

fn float_argument(arguments: &[Value], span: Span) -> Result<f64, RuntimeError> {
    match arguments.first() {
        Some(value) => value
            .as_number()
            .ok_or_else(|| RuntimeError::mismatch(TypeSymbol::Float, value.type_symbol(), span)),
        None => Err(RuntimeError::internal("missing argument", span)),
    }
}

/// Calls `builtin` with already evaluated arguments.
pub fn call(
    builtin: Builtin,
    arguments: &[Value],
    context: &mut BuiltinContext<'_>,
    span: Span,
) -> Result<Value, RuntimeError> {
    log::trace!("calling built-in {}", builtin.name());
    match builtin {
        Builtin::Clear => {
            context.host.clear();
            Ok(Value::Void)
        }
        Builtin::Print => {
            let text = arguments.first().map(Value::to_string).unwrap_or_default();
            context.host.print(&text);
            Ok(Value::Void)
        }
        Builtin::Read => {
            let prompt = match arguments.first() {
                Some(Value::String(prompt)) => prompt.as_str(),
                Some(other) => return Err(RuntimeError::mismatch(TypeSymbol::String, other.type_symbol(), span)),
                None => "",
            };
            Ok(Value::String(context.host.read_line(prompt).unwrap_or_default()))
        }
        Builtin::Floor => Ok(Value::Integer(float_argument(arguments, span)?.floor())),
        Builtin::Round => Ok(Value::Integer(float_argument(arguments, span)?.round())),
        Builtin::Ceiling => Ok(Value::Integer(float_argument(arguments, span)?.ceil())),
        Builtin::Absolute => match arguments.first() {
            Some(Value::Integer(v)) => Ok(Value::Integer(v.abs())),
            _ => Ok(Value::Float(float_argument(arguments, span)?.abs())),
        },
        Builtin::RandomInt => Ok(Value::Integer(context.random.next_int())),
        Builtin::RandomFloat => Ok(Value::Float(context.random.next_float())),
        Builtin::LengthOf => match arguments.first() {
            Some(value) => operations::length_of(value, span),
            None => Err(RuntimeError::internal("missing argument", span)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::host::BufferedHost;

    fn run(builtin: Builtin, arguments: &[Value], host: &mut BufferedHost) -> Result<Value, RuntimeError> {
        let mut random = Random::with_seed(1);
        let mut context = BuiltinContext {
            host,
            random: &mut random,
        };
        call(builtin, arguments, &mut context, Span::new(0, 1))
    }

    #[test]
    fn test_io_builtins() {
        let mut host = BufferedHost::with_input(["Ada"]);
        assert_eq!(run(Builtin::Print, &[Value::Float(1.5)], &mut host), Ok(Value::Void));
        assert_eq!(host.output, vec!["1.5"]);
        assert_eq!(
            run(Builtin::Read, &[Value::String("name? ".into())], &mut host),
            Ok(Value::String("Ada".into()))
        );
        assert_eq!(host.prompts, vec!["name? "]);
        // End of input reads as an empty string.
        assert_eq!(
            run(Builtin::Read, &[Value::String(String::new())], &mut host),
            Ok(Value::String(String::new()))
        );
        run(Builtin::Clear, &[], &mut host).unwrap();
        assert!(host.output.is_empty());
    }

    #[test]
    fn test_rounding_builtins() {
        let mut host = BufferedHost::new();
        let x = [Value::Float(-2.5)];
        assert_eq!(run(Builtin::Floor, &x, &mut host), Ok(Value::Integer(-3.0)));
        assert_eq!(run(Builtin::Ceiling, &x, &mut host), Ok(Value::Integer(-2.0)));
        assert_eq!(run(Builtin::Round, &x, &mut host), Ok(Value::Integer(-3.0)));
        assert!(matches!(run(Builtin::Absolute, &x, &mut host), Ok(Value::Float(v)) if v == 2.5));
        assert!(matches!(run(Builtin::Absolute, &[Value::Integer(-3.0)], &mut host), Ok(Value::Integer(v)) if v == 3.0));
    }

    #[test]
    fn test_length_of() {
        let mut host = BufferedHost::new();
        let list = Value::list(TypeSymbol::Integer, vec![Value::Integer(1.0); 4]);
        assert_eq!(run(Builtin::LengthOf, &[list], &mut host), Ok(Value::Integer(4.0)));
        assert_eq!(
            run(Builtin::LengthOf, &[Value::String("héllo".into())], &mut host),
            Ok(Value::Integer(5.0))
        );
        assert!(matches!(
            run(Builtin::LengthOf, &[Value::Boolean(true)], &mut host),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_random_builtins() {
        let mut host = BufferedHost::new();
        assert!(matches!(run(Builtin::RandomInt, &[], &mut host), Ok(Value::Integer(v)) if v >= 0.0));
        assert!(matches!(run(Builtin::RandomFloat, &[], &mut host), Ok(Value::Float(v)) if (0.0..1.0).contains(&v)));
    }
}
