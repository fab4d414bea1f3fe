//! Runtime values.
//!
//! Integers and floats are both backed by `f64`. [`Value::number`] decides
//! which of the two an arithmetic result becomes: anything integral, and
//! also `±∞` and `NaN`, is an `Integer`.

use std::fmt;
use std::rc::Rc;

use crate::semantic::typed_ir::SemanticFunction;
use crate::semantic::{Builtin, TypeSymbol};

use super::scope::FrameRef;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    /// Result of statements and `Void` functions.
    Void,
    /// Result of anything that failed.
    Unknown,
    Boolean(bool),
    Integer(f64),
    Float(f64),
    Char(char),
    String(String),
    /// `start:end[:step]`, end exclusive.
    Range {
        start: f64,
        end: f64,
        step: Option<f64>,
    },
    List {
        element_type: TypeSymbol,
        items: Vec<Value>,
    },
    Function(FunctionValue),
}

/// A callable value.
#[derive(Debug, Clone)]
pub enum FunctionValue {
    Builtin(Builtin),
    /// A user function with the frame it was defined in.
    User {
        function: Rc<SemanticFunction>,
        frame: FrameRef,
    },
}

impl FunctionValue {
    pub fn type_symbol(&self) -> TypeSymbol {
        match self {
            FunctionValue::Builtin(builtin) => builtin.signature(),
            FunctionValue::User { function, .. } => function.type_symbol(),
        }
    }
}

impl Value {
    /// Classifies an arithmetic result.
    ///
    /// ```
    /// use glint::evaluator::Value;
    ///
    /// assert!(matches!(Value::number(4.0), Value::Integer(_)));
    /// assert!(matches!(Value::number(0.5), Value::Float(_)));
    /// assert!(matches!(Value::number(f64::INFINITY), Value::Integer(_)));
    /// ```
    pub fn number(value: f64) -> Value {
        if !value.is_finite() || value.fract() == 0.0 {
            Value::Integer(value)
        } else {
            Value::Float(value)
        }
    }

    pub fn list(element_type: TypeSymbol, items: Vec<Value>) -> Value {
        Value::List { element_type, items }
    }

    /// The numeric payload of an `Integer` or `Float`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(v) | Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// The runtime type of this value.
    pub fn type_symbol(&self) -> TypeSymbol {
        match self {
            Value::Null => TypeSymbol::Null,
            Value::Void => TypeSymbol::Void,
            Value::Unknown => TypeSymbol::Unknown,
            Value::Boolean(_) => TypeSymbol::Boolean,
            Value::Integer(_) => TypeSymbol::Integer,
            Value::Float(_) => TypeSymbol::Float,
            Value::Char(_) => TypeSymbol::Char,
            Value::String(_) => TypeSymbol::String,
            Value::Range { .. } => TypeSymbol::Range,
            Value::List { element_type, .. } => TypeSymbol::list(element_type.clone()),
            Value::Function(function) => function.type_symbol(),
        }
    }

    /// The default value of a variable declared with only a type.
    pub fn default_for(type_symbol: &TypeSymbol) -> Value {
        match type_symbol {
            TypeSymbol::Boolean => Value::Boolean(false),
            TypeSymbol::Integer => Value::Integer(0.0),
            TypeSymbol::Float => Value::Float(0.0),
            TypeSymbol::Char => Value::Char('\0'),
            TypeSymbol::String => Value::String(String::new()),
            TypeSymbol::Range => Value::Range {
                start: 0.0,
                end: 0.0,
                step: None,
            },
            TypeSymbol::Any | TypeSymbol::Null => Value::Null,
            other => match other.list_element() {
                Some(element) => Value::list(element.clone(), Vec::new()),
                None => Value::Unknown,
            },
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Formats an `Integer` payload without a fractional part.
fn fmt_integer(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value == f64::INFINITY {
        f.write_str("∞")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-∞")
    } else if value == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{value:.0}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Void => Ok(()),
            Value::Unknown => f.write_str("unknown"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(v) => fmt_integer(*v, f),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Range { start, end, step } => {
                fmt_integer(*start, f)?;
                f.write_str(":")?;
                fmt_integer(*end, f)?;
                if let Some(step) = step {
                    f.write_str(":")?;
                    fmt_integer(*step, f)?;
                }
                Ok(())
            }
            Value::List { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Function(function) => write!(f, "{}", function.type_symbol()),
        }
    }
}

/// Equality as seen by `==`: numbers compare by value regardless of
/// `Integer`/`Float`, functions by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Void, Value::Void) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (
                Value::Range { start, end, step },
                Value::Range {
                    start: s2,
                    end: e2,
                    step: st2,
                },
            ) => start == s2 && end == e2 && step == st2,
            (Value::List { items: a, .. }, Value::List { items: b, .. }) => a == b,
            (Value::Function(a), Value::Function(b)) => match (a, b) {
                (FunctionValue::Builtin(a), FunctionValue::Builtin(b)) => a == b,
                (FunctionValue::User { function: a, .. }, FunctionValue::User { function: b, .. }) => {
                    Rc::ptr_eq(a, b)
                }
                _ => false,
            },
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}
