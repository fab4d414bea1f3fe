//! Runtime semantics of resolved operations.
//!
//! The analyzer has already picked an operation kind for every operator and
//! conversion, so these functions only dispatch on that kind and the operand
//! values. A value shape the kind does not expect is an internal error.

use crate::ast::Span;
use crate::semantic::{BinaryOperationKind, ConversionKind, TypeSymbol, UnaryOperationKind};

use super::error::RuntimeError;
use super::value::Value;

type Result<T> = std::result::Result<T, RuntimeError>;

// ==================== Numbers ====================

fn number(value: &Value, span: Span) -> Result<f64> {
    value
        .as_number()
        .ok_or_else(|| RuntimeError::mismatch("a number", value.type_symbol(), span))
}

/// Converts to `i64` for the bitwise operators.
fn to_i64(value: f64, span: Span) -> Result<i64> {
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(RuntimeError::IntegerOverflow { value, span })
    }
}

fn from_i128(value: i128, span: Span) -> Result<Value> {
    i64::try_from(value)
        .map(|v| Value::Integer(v as f64))
        .map_err(|_| RuntimeError::IntegerOverflow {
            value: value as f64,
            span,
        })
}

fn bitwise(kind: BinaryOperationKind, left: f64, right: f64, span: Span) -> Result<Value> {
    let a = to_i64(left, span)? as i128;
    let b = to_i64(right, span)?;
    let shift = || {
        if (0..64).contains(&b) {
            Ok(b as u32)
        } else {
            Err(RuntimeError::InvalidShift {
                amount: right,
                span,
            })
        }
    };
    let result = match kind {
        BinaryOperationKind::BitwiseAnd => a & b as i128,
        BinaryOperationKind::BitwiseOr => a | b as i128,
        BinaryOperationKind::BitwiseXor => a ^ b as i128,
        BinaryOperationKind::ShiftLeft => a << shift()?,
        BinaryOperationKind::ShiftRight => a >> shift()?,
        other => return Err(RuntimeError::internal(format!("{other:?} is not bitwise"), span)),
    };
    from_i128(result, span)
}

fn arithmetic(kind: BinaryOperationKind, a: f64, b: f64, span: Span) -> Result<Value> {
    use BinaryOperationKind as K;
    Ok(match kind {
        K::Addition => Value::number(a + b),
        K::Subtraction => Value::number(a - b),
        K::Multiplication => Value::number(a * b),
        K::Division | K::Modulo if b == 0.0 => return Err(RuntimeError::DivisionByZero { span }),
        K::Division => Value::number(a / b),
        K::Modulo => Value::number(a % b),
        K::Power => Value::Float(a.powf(b)),
        other => return Err(RuntimeError::internal(format!("{other:?} is not arithmetic"), span)),
    })
}

// ==================== Chars ====================

/// The char with code point `code`.
pub fn char_from_code(code: f64, span: Span) -> Result<Value> {
    let valid = code.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&code);
    valid
        .then(|| char::from_u32(code as u32))
        .flatten()
        .map(Value::Char)
        .ok_or(RuntimeError::InvalidCharCode { code, span })
}

fn char_code(c: char) -> f64 {
    c as u32 as f64
}

// ==================== Repetition ====================

/// Splits `x * n` / `n * x` into the repeated value and a checked count.
fn repetition(left: Value, right: Value, span: Span) -> Result<(Value, usize)> {
    let (value, count) = match left.as_number() {
        Some(count) => (right, count),
        None => (left, number(&right, span)?),
    };
    if !count.is_finite() || count < 0.0 || count.fract() != 0.0 {
        return Err(RuntimeError::InvalidRepetition { count, span });
    }
    Ok((value, count as usize))
}

/// Reserves room for `len * count` units, failing when that exceeds
/// `isize::MAX` or cannot be allocated. Returns the reserved length.
fn reserve_repeated<E>(
    len: usize,
    count: usize,
    span: Span,
    reserve: impl FnOnce(usize) -> std::result::Result<(), E>,
) -> Result<usize> {
    let too_large = RuntimeError::RepetitionTooLarge {
        count: count as f64,
        span,
    };
    let capacity = match len.checked_mul(count) {
        Some(n) if n <= isize::MAX as usize => n,
        _ => return Err(too_large),
    };
    reserve(capacity).map_err(|_| too_large)?;
    Ok(capacity)
}

fn compare(kind: BinaryOperationKind, left: &Value, right: &Value, span: Span) -> Result<Value> {
    use std::cmp::Ordering;
    let ordering = match (left, right) {
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (a, b) => a.as_number().zip(b.as_number()).and_then(|(x, y)| x.partial_cmp(&y)),
    };
    let Some(ordering) = ordering else {
        // NaN compares false with everything.
        if left.as_number().is_some() && right.as_number().is_some() {
            return Ok(Value::Boolean(false));
        }
        return Err(RuntimeError::mismatch(left.type_symbol(), right.type_symbol(), span));
    };
    let result = match kind {
        BinaryOperationKind::Less => ordering == Ordering::Less,
        BinaryOperationKind::LessOrEqual => ordering != Ordering::Greater,
        BinaryOperationKind::Greater => ordering == Ordering::Greater,
        BinaryOperationKind::GreaterOrEqual => ordering != Ordering::Less,
        other => return Err(RuntimeError::internal(format!("{other:?} is not a comparison"), span)),
    };
    Ok(Value::Boolean(result))
}

/// Applies a binary operation to two evaluated operands.
///
/// `result_type` is the type the analyzer gave the expression; list
/// operations use it for the element type of the new list.
pub fn binary(
    kind: BinaryOperationKind,
    left: Value,
    right: Value,
    result_type: &TypeSymbol,
    span: Span,
) -> Result<Value> {
    use BinaryOperationKind as K;
    match kind {
        K::Addition | K::Subtraction | K::Multiplication | K::Division | K::Modulo | K::Power => {
            arithmetic(kind, number(&left, span)?, number(&right, span)?, span)
        }
        K::BitwiseAnd | K::BitwiseOr | K::BitwiseXor | K::ShiftLeft | K::ShiftRight => {
            bitwise(kind, number(&left, span)?, number(&right, span)?, span)
        }
        K::LogicalAnd | K::LogicalOr => match (left, right) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(if kind == K::LogicalAnd {
                a && b
            } else {
                a || b
            })),
            (l, _) => Err(RuntimeError::mismatch(TypeSymbol::Boolean, l.type_symbol(), span)),
        },
        K::NullCoalescing => Ok(if matches!(left, Value::Null) { right } else { left }),
        K::Equality => Ok(Value::Boolean(left == right)),
        K::Inequality => Ok(Value::Boolean(left != right)),
        K::Less | K::LessOrEqual | K::Greater | K::GreaterOrEqual => compare(kind, &left, &right, span),
        K::Concatenation => {
            let mut text = match left {
                Value::String(s) => s,
                Value::Char(c) => c.to_string(),
                other => return Err(RuntimeError::mismatch(TypeSymbol::String, other.type_symbol(), span)),
            };
            match right {
                Value::String(s) => text.push_str(&s),
                Value::Char(c) => text.push(c),
                other => return Err(RuntimeError::mismatch(TypeSymbol::String, other.type_symbol(), span)),
            }
            Ok(Value::String(text))
        }
        K::Repetition => match repetition(left, right, span)? {
            (Value::String(s), count) => {
                let mut text = String::new();
                let capacity = reserve_repeated(s.len(), count, span, |n| text.try_reserve_exact(n))?;
                if capacity > 0 {
                    for _ in 0..count {
                        text.push_str(&s);
                    }
                }
                Ok(Value::String(text))
            }
            (other, _) => Err(RuntimeError::mismatch(TypeSymbol::String, other.type_symbol(), span)),
        },
        K::CharAddition => match (left, right) {
            (Value::Char(c), n) | (n, Value::Char(c)) => char_from_code(char_code(c) + number(&n, span)?, span),
            (l, _) => Err(RuntimeError::mismatch(TypeSymbol::Char, l.type_symbol(), span)),
        },
        K::CharSubtraction => match left {
            Value::Char(c) => char_from_code(char_code(c) - number(&right, span)?, span),
            other => Err(RuntimeError::mismatch(TypeSymbol::Char, other.type_symbol(), span)),
        },
        K::CharDifference => match (left, right) {
            (Value::Char(a), Value::Char(b)) => Ok(Value::Integer(char_code(a) - char_code(b))),
            (l, _) => Err(RuntimeError::mismatch(TypeSymbol::Char, l.type_symbol(), span)),
        },
        K::ListConcatenation => match (left, right) {
            (Value::List { element_type, mut items }, Value::List { items: more, .. }) => {
                items.extend(more);
                let element_type = result_type.list_element().cloned().unwrap_or(element_type);
                Ok(Value::list(element_type, items))
            }
            (l, _) => Err(RuntimeError::mismatch(result_type, l.type_symbol(), span)),
        },
        K::ListRepetition => match repetition(left, right, span)? {
            (Value::List { element_type, items }, count) => {
                let mut repeated = Vec::new();
                let capacity = reserve_repeated(items.len(), count, span, |n| repeated.try_reserve_exact(n))?;
                if capacity > 0 {
                    for _ in 0..count {
                        repeated.extend(items.iter().cloned());
                    }
                }
                Ok(Value::list(element_type, repeated))
            }
            (other, _) => Err(RuntimeError::mismatch(result_type, other.type_symbol(), span)),
        },
    }
}

/// Applies a unary operation.
pub fn unary(kind: UnaryOperationKind, operand: Value, span: Span) -> Result<Value> {
    match kind {
        UnaryOperationKind::Identity => Ok(operand),
        UnaryOperationKind::Negation => match operand {
            Value::Float(v) => Ok(Value::Float(-v)),
            other => Ok(Value::number(-number(&other, span)?)),
        },
        UnaryOperationKind::BitwiseNot => {
            let v = to_i64(number(&operand, span)?, span)?;
            Ok(Value::Integer(!v as f64))
        }
        UnaryOperationKind::LogicalNot => match operand {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(RuntimeError::mismatch(TypeSymbol::Boolean, other.type_symbol(), span)),
        },
    }
}

// ==================== Ranges ====================

/// The values of a range, produced lazily.
#[derive(Debug, Clone)]
pub struct RangeIter {
    next: f64,
    end: f64,
    step: f64,
}

impl RangeIter {
    /// Iterates `start:end[:step]`. Without a step the range counts toward
    /// `end` by one.
    pub fn new(start: f64, end: f64, step: Option<f64>, span: Span) -> Result<Self> {
        let step = match step {
            Some(step) if step == 0.0 => return Err(RuntimeError::ZeroStep { span }),
            Some(step) => step,
            None if end < start => -1.0,
            None => 1.0,
        };
        Ok(Self {
            next: start,
            end,
            step,
        })
    }

    /// Whether iteration terminates.
    pub fn is_finite(&self) -> bool {
        self.next.is_finite() && self.end.is_finite() && self.step.is_finite()
    }

    /// Number of remaining values, `∞` for unbounded ranges.
    pub fn count_values(&self) -> f64 {
        if self.next.is_nan() || self.end.is_nan() {
            return 0.0;
        }
        let steps = ((self.end - self.next) / self.step).ceil();
        if steps.is_nan() { 0.0 } else { steps.max(0.0) }
    }

    /// The value at `index` without iterating.
    pub fn nth_value(&self, index: f64) -> Option<f64> {
        (index >= 0.0 && index < self.count_values()).then(|| self.next + index * self.step)
    }
}

impl Iterator for RangeIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let more = if self.step > 0.0 {
            self.next < self.end
        } else {
            self.next > self.end
        };
        if !more {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current)
    }
}

/// Iterates a `Range` value.
pub fn range_iter(value: &Value, span: Span) -> Result<RangeIter> {
    match value {
        Value::Range { start, end, step } => RangeIter::new(*start, *end, *step, span),
        other => Err(RuntimeError::mismatch(TypeSymbol::Range, other.type_symbol(), span)),
    }
}

// ==================== Indexing ====================

/// Checks `index` against a container of `length` elements.
pub fn checked_index(index: f64, length: usize, span: Span) -> Result<usize> {
    if index.fract() == 0.0 && index >= 0.0 && index < length as f64 {
        Ok(index as usize)
    } else {
        Err(RuntimeError::IndexOutOfRange { index, length, span })
    }
}

/// `target[index]` on a list, string or range.
pub fn index(target: &Value, index: &Value, span: Span) -> Result<Value> {
    let i = number(index, span)?;
    match target {
        Value::List { items, .. } => Ok(items[checked_index(i, items.len(), span)?].clone()),
        Value::String(s) => {
            let length = s.chars().count();
            let position = checked_index(i, length, span)?;
            s.chars()
                .nth(position)
                .map(Value::Char)
                .ok_or(RuntimeError::IndexOutOfRange { index: i, length, span })
        }
        Value::Range { .. } => {
            let range = range_iter(target, span)?;
            range.nth_value(i).map(Value::Integer).ok_or(RuntimeError::IndexOutOfRange {
                index: i,
                length: range.count_values().min(usize::MAX as f64) as usize,
                span,
            })
        }
        other => Err(RuntimeError::mismatch("an indexable value", other.type_symbol(), span)),
    }
}

/// `target[start:end[:step]]`: the elements at each index of the range.
pub fn slice(target: &Value, range: &Value, span: Span) -> Result<Value> {
    let indices = range_iter(range, span)?;
    if !indices.is_finite() {
        return Err(RuntimeError::InfiniteRange { span });
    }
    match target {
        Value::List { element_type, items } => {
            let selected = indices
                .map(|i| checked_index(i, items.len(), span).map(|i| items[i].clone()))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::list(element_type.clone(), selected))
        }
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let selected = indices
                .map(|i| checked_index(i, chars.len(), span).map(|i| chars[i]))
                .collect::<Result<String>>()?;
            Ok(Value::String(selected))
        }
        other => Err(RuntimeError::mismatch("a list or string", other.type_symbol(), span)),
    }
}

/// Number of elements for `LengthOf`.
pub fn length_of(value: &Value, span: Span) -> Result<Value> {
    let length = match value {
        Value::String(s) => s.chars().count() as f64,
        Value::List { items, .. } => items.len() as f64,
        Value::Range { .. } => range_iter(value, span)?.count_values(),
        Value::Null => 0.0,
        other => return Err(RuntimeError::mismatch("a string, list or range", other.type_symbol(), span)),
    };
    Ok(Value::Integer(length))
}

// ==================== Conversions ====================

/// Converts `value` as selected by the analyzer. `target` is the type being
/// converted to.
pub fn convert(value: Value, kind: ConversionKind, target: &TypeSymbol, span: Span) -> Result<Value> {
    use ConversionKind as C;
    match (kind, value) {
        (C::Identity, value) => Ok(value),
        (C::AnyToString, value) => Ok(Value::String(value.to_string())),
        (C::BooleanToNumber, Value::Boolean(b)) => {
            let n = if b { 1.0 } else { 0.0 };
            Ok(if *target == TypeSymbol::Float {
                Value::Float(n)
            } else {
                Value::Integer(n)
            })
        }
        (C::NumberToBoolean, value) => Ok(Value::Boolean(number(&value, span)? != 0.0)),
        (C::IntegerToFloat, value) => Ok(Value::Float(number(&value, span)?)),
        (C::FloatToInteger, value) => Ok(Value::Integer(number(&value, span)?.trunc())),
        (C::IntegerToChar, value) => char_from_code(number(&value, span)?, span),
        (C::CharToInteger, Value::Char(c)) => Ok(Value::Integer(char_code(c))),
        (C::RangeToList, value) => {
            let range = range_iter(&value, span)?;
            if !range.is_finite() {
                return Err(RuntimeError::InfiniteRange { span });
            }
            Ok(Value::list(TypeSymbol::Integer, range.map(Value::Integer).collect()))
        }
        (C::ListToRange, Value::List { items, .. }) => {
            let bounds = items
                .iter()
                .map(|item| number(item, span))
                .collect::<Result<Vec<_>>>()?;
            match *bounds.as_slice() {
                [start, end] => Ok(Value::Range { start, end, step: None }),
                [start, end, step] => Ok(Value::Range {
                    start,
                    end,
                    step: Some(step),
                }),
                _ => Err(RuntimeError::InvalidRangeList {
                    found: bounds.len(),
                    span,
                }),
            }
        }
        (C::StringToCharList, Value::String(s)) => {
            Ok(Value::list(TypeSymbol::Char, s.chars().map(Value::Char).collect()))
        }
        (C::CharListToString, Value::List { items, .. }) => items
            .iter()
            .map(|item| match item {
                Value::Char(c) => Ok(*c),
                other => Err(RuntimeError::mismatch(TypeSymbol::Char, other.type_symbol(), span)),
            })
            .collect::<Result<String>>()
            .map(Value::String),
        (kind, value) => Err(RuntimeError::internal(
            format!("cannot apply {kind:?} to {}", value.type_symbol()),
            span,
        )),
    }
}
