//! Operator and conversion resolution.
//!
//! Binary and unary operators are resolved through ordered tables of
//! `(left type, operator, right type) -> (operation kind, result type)`
//! entries. The first entry whose slot types accept the operand types wins,
//! so **entry order is significant**: the `Integer op Integer` rows must
//! come before the `Float op Float` rows, otherwise `1 + 2` would resolve to
//! float addition through `Float`'s acceptance of `Integer`.
//!
//! A `None` from any lookup means "no legal operation"; the analyzer turns
//! it into a diagnostic and an `Unknown`-typed node.

use std::sync::LazyLock;

use crate::ast::{BinaryOp, UnaryOp};

use super::types::TypeSymbol;

/// The concrete semantics selected for a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Power,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    LogicalAnd,
    LogicalOr,
    NullCoalescing,
    Equality,
    Inequality,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    /// `String + String`, `String + Char`, `Char + String`
    Concatenation,
    /// `String * Integer`, `Integer * String`
    Repetition,
    /// `Char + Integer`, `Integer + Char`
    CharAddition,
    /// `Char - Integer`
    CharSubtraction,
    /// `Char - Char`
    CharDifference,
    ListConcatenation,
    /// `List * Integer`, `Integer * List`
    ListRepetition,
}

/// The concrete semantics selected for a unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperationKind {
    Identity,
    Negation,
    BitwiseNot,
    LogicalNot,
}

/// How a value is turned into another type by `value -> Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    Identity,
    AnyToString,
    BooleanToNumber,
    NumberToBoolean,
    IntegerToFloat,
    FloatToInteger,
    IntegerToChar,
    CharToInteger,
    RangeToList,
    ListToRange,
    StringToCharList,
    CharListToString,
}

/// A resolved binary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub kind: BinaryOperationKind,
    pub result: TypeSymbol,
}

/// One row of the binary operator table.
struct BinaryEntry {
    left: TypeSymbol,
    op: BinaryOp,
    right: TypeSymbol,
    kind: BinaryOperationKind,
    result: TypeSymbol,
    /// Also accept the operands in swapped order.
    interchangeable: bool,
}

impl BinaryEntry {
    fn accepts(&self, left: &TypeSymbol, right: &TypeSymbol) -> bool {
        (self.left.matches(left) && self.right.matches(right))
            || (self.interchangeable && self.left.matches(right) && self.right.matches(left))
    }
}

fn entry(
    left: TypeSymbol,
    op: BinaryOp,
    right: TypeSymbol,
    kind: BinaryOperationKind,
    result: TypeSymbol,
) -> BinaryEntry {
    BinaryEntry {
        left,
        op,
        right,
        kind,
        result,
        interchangeable: false,
    }
}

fn interchangeable(
    left: TypeSymbol,
    op: BinaryOp,
    right: TypeSymbol,
    kind: BinaryOperationKind,
    result: TypeSymbol,
) -> BinaryEntry {
    BinaryEntry {
        interchangeable: true,
        ..entry(left, op, right, kind, result)
    }
}

static BINARY_TABLE: LazyLock<Vec<BinaryEntry>> = LazyLock::new(|| {
    use BinaryOperationKind as K;
    use TypeSymbol::{Any, Boolean, Char, Float, Integer, String};
    let any_list = || TypeSymbol::list(Any);

    let mut table = vec![
        // Integer arithmetic before float arithmetic.
        entry(Integer, BinaryOp::Add, Integer, K::Addition, Integer),
        entry(Integer, BinaryOp::Subtract, Integer, K::Subtraction, Integer),
        entry(Integer, BinaryOp::Multiply, Integer, K::Multiplication, Integer),
        entry(Integer, BinaryOp::Divide, Integer, K::Division, Float),
        entry(Integer, BinaryOp::Modulo, Integer, K::Modulo, Integer),
        entry(Integer, BinaryOp::Power, Integer, K::Power, Float),
        entry(Float, BinaryOp::Add, Float, K::Addition, Float),
        entry(Float, BinaryOp::Subtract, Float, K::Subtraction, Float),
        entry(Float, BinaryOp::Multiply, Float, K::Multiplication, Float),
        entry(Float, BinaryOp::Divide, Float, K::Division, Float),
        entry(Float, BinaryOp::Modulo, Float, K::Modulo, Float),
        entry(Float, BinaryOp::Power, Float, K::Power, Float),
        // Chars offset by integers.
        interchangeable(Char, BinaryOp::Add, Integer, K::CharAddition, Char),
        entry(Char, BinaryOp::Subtract, Char, K::CharDifference, Integer),
        entry(Char, BinaryOp::Subtract, Integer, K::CharSubtraction, Char),
        // Strings.
        entry(String, BinaryOp::Add, String, K::Concatenation, String),
        interchangeable(String, BinaryOp::Add, Char, K::Concatenation, String),
        interchangeable(String, BinaryOp::Multiply, Integer, K::Repetition, String),
        // Lists; the concrete result is computed from the operands.
        entry(any_list(), BinaryOp::Add, any_list(), K::ListConcatenation, any_list()),
        interchangeable(any_list(), BinaryOp::Multiply, Integer, K::ListRepetition, any_list()),
        // Bitwise operators work on integers only.
        entry(Integer, BinaryOp::BitAnd, Integer, K::BitwiseAnd, Integer),
        entry(Integer, BinaryOp::BitOr, Integer, K::BitwiseOr, Integer),
        entry(Integer, BinaryOp::BitXor, Integer, K::BitwiseXor, Integer),
        entry(Integer, BinaryOp::ShiftLeft, Integer, K::ShiftLeft, Integer),
        entry(Integer, BinaryOp::ShiftRight, Integer, K::ShiftRight, Integer),
        // Logic.
        entry(Boolean, BinaryOp::And, Boolean, K::LogicalAnd, Boolean),
        entry(Boolean, BinaryOp::Or, Boolean, K::LogicalOr, Boolean),
        entry(Any, BinaryOp::Equal, Any, K::Equality, Boolean),
        entry(Any, BinaryOp::NotEqual, Any, K::Inequality, Boolean),
        // `??` result depends on the operands.
        entry(Any, BinaryOp::NullCoalesce, Any, K::NullCoalescing, Any),
    ];

    // Ordering comparisons on numbers, chars and strings.
    for operand in [Float, Char, String] {
        for (op, kind) in [
            (BinaryOp::Less, K::Less),
            (BinaryOp::LessEqual, K::LessOrEqual),
            (BinaryOp::Greater, K::Greater),
            (BinaryOp::GreaterEqual, K::GreaterOrEqual),
        ] {
            table.push(entry(operand.clone(), op, operand.clone(), kind, Boolean));
        }
    }

    table
});

/// Resolves `left op right` against the binary table.
///
/// ```
/// use glint::ast::BinaryOp;
/// use glint::semantic::TypeSymbol;
/// use glint::semantic::operators::{resolve_binary, BinaryOperationKind};
///
/// let op = resolve_binary(BinaryOp::Divide, &TypeSymbol::Integer, &TypeSymbol::Integer).unwrap();
/// assert_eq!(op.kind, BinaryOperationKind::Division);
/// assert_eq!(op.result, TypeSymbol::Float);
/// ```
pub fn resolve_binary(op: BinaryOp, left: &TypeSymbol, right: &TypeSymbol) -> Option<BinaryOperation> {
    let entry = BINARY_TABLE
        .iter()
        .find(|e| e.op == op && e.accepts(left, right))?;

    let result = match entry.kind {
        BinaryOperationKind::ListConcatenation => concatenated_list(left, right)?,
        BinaryOperationKind::ListRepetition => {
            if left.list_element().is_some() {
                left.clone()
            } else {
                right.clone()
            }
        }
        BinaryOperationKind::NullCoalescing => {
            if *left == TypeSymbol::Null {
                right.clone()
            } else {
                left.clone()
            }
        }
        _ => entry.result.clone(),
    };

    Some(BinaryOperation {
        kind: entry.kind,
        result,
    })
}

/// Result type of `List<A> + List<B>`: the more specific of the two, or
/// `None` when the element types are incompatible.
fn concatenated_list(left: &TypeSymbol, right: &TypeSymbol) -> Option<TypeSymbol> {
    let (Some(a), Some(b)) = (left.element_type(), right.element_type()) else {
        // One side is `Any`; keep the list side.
        return Some(if left.list_element().is_some() {
            left.clone()
        } else {
            right.clone()
        });
    };
    if a.contains_any() && !b.contains_any() {
        Some(right.clone())
    } else if a.matches(&b) {
        Some(left.clone())
    } else if b.matches(&a) {
        Some(right.clone())
    } else {
        None
    }
}

struct UnaryEntry {
    op: UnaryOp,
    operand: TypeSymbol,
    kind: UnaryOperationKind,
    result: TypeSymbol,
}

static UNARY_TABLE: LazyLock<Vec<UnaryEntry>> = LazyLock::new(|| {
    use TypeSymbol::{Boolean, Float, Integer};
    use UnaryOperationKind as K;
    let unary = |op, operand, kind, result| UnaryEntry {
        op,
        operand,
        kind,
        result,
    };
    vec![
        unary(UnaryOp::Identity, Integer, K::Identity, Integer),
        unary(UnaryOp::Identity, Float, K::Identity, Float),
        unary(UnaryOp::Negate, Integer, K::Negation, Integer),
        unary(UnaryOp::Negate, Float, K::Negation, Float),
        unary(UnaryOp::BitNot, Integer, K::BitwiseNot, Integer),
        unary(UnaryOp::Not, Boolean, K::LogicalNot, Boolean),
    ]
});

/// Resolves `op operand` against the unary table.
pub fn resolve_unary(op: UnaryOp, operand: &TypeSymbol) -> Option<(UnaryOperationKind, TypeSymbol)> {
    UNARY_TABLE
        .iter()
        .find(|e| e.op == op && e.operand.matches(operand))
        .map(|e| (e.kind, e.result.clone()))
}

/// Chooses how `from` converts to `to`.
///
/// Checked in order: identity, anything to `String` (except char lists,
/// which are joined), then the fixed set of numeric, char, range and list
/// conversions.
pub fn conversion_kind(from: &TypeSymbol, to: &TypeSymbol) -> Option<ConversionKind> {
    use TypeSymbol as T;

    let char_list = T::list(T::Char);
    let integer_list = T::list(T::Integer);

    let identity = from == to
        || *to == T::Any
        || (matches!(from, T::Generic(_)) && to.matches(from));
    if identity {
        return Some(ConversionKind::Identity);
    }
    if *to == T::String && *from != char_list {
        return Some(ConversionKind::AnyToString);
    }

    let kind = match (from, to) {
        (T::Boolean, T::Integer | T::Float) => ConversionKind::BooleanToNumber,
        (T::Integer | T::Float, T::Boolean) => ConversionKind::NumberToBoolean,
        (T::Integer, T::Float) => ConversionKind::IntegerToFloat,
        (T::Float, T::Integer) => ConversionKind::FloatToInteger,
        (T::Integer, T::Char) => ConversionKind::IntegerToChar,
        (T::Char, T::Integer) => ConversionKind::CharToInteger,
        (T::Range, list) if *list == integer_list => ConversionKind::RangeToList,
        (list, T::Range) if *list == integer_list => ConversionKind::ListToRange,
        (T::String, list) if *list == char_list => ConversionKind::StringToCharList,
        (list, T::String) if *list == char_list => ConversionKind::CharListToString,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TypeSymbol as T;

    fn binary(op: BinaryOp, left: T, right: T) -> Option<(BinaryOperationKind, T)> {
        resolve_binary(op, &left, &right).map(|o| (o.kind, o.result))
    }

    #[test]
    fn test_arithmetic_promotion() {
        use BinaryOperationKind as K;
        assert_eq!(binary(BinaryOp::Add, T::Integer, T::Integer), Some((K::Addition, T::Integer)));
        assert_eq!(binary(BinaryOp::Add, T::Integer, T::Float), Some((K::Addition, T::Float)));
        assert_eq!(binary(BinaryOp::Divide, T::Integer, T::Integer), Some((K::Division, T::Float)));
        assert_eq!(binary(BinaryOp::Power, T::Integer, T::Integer), Some((K::Power, T::Float)));
        assert_eq!(binary(BinaryOp::Modulo, T::Integer, T::Integer), Some((K::Modulo, T::Integer)));
    }

    #[test]
    fn test_interchangeable_entries() {
        use BinaryOperationKind as K;
        assert_eq!(binary(BinaryOp::Add, T::Char, T::Integer), Some((K::CharAddition, T::Char)));
        assert_eq!(binary(BinaryOp::Add, T::Integer, T::Char), Some((K::CharAddition, T::Char)));
        assert_eq!(binary(BinaryOp::Multiply, T::Integer, T::String), Some((K::Repetition, T::String)));
        assert_eq!(binary(BinaryOp::Subtract, T::Integer, T::Char), None);
        assert_eq!(binary(BinaryOp::Subtract, T::Char, T::Char), Some((K::CharDifference, T::Integer)));
    }

    #[test]
    fn test_strings_and_comparisons() {
        use BinaryOperationKind as K;
        assert_eq!(binary(BinaryOp::Add, T::Char, T::String), Some((K::Concatenation, T::String)));
        assert_eq!(binary(BinaryOp::Less, T::String, T::String), Some((K::Less, T::Boolean)));
        assert_eq!(binary(BinaryOp::Less, T::Integer, T::Float), Some((K::Less, T::Boolean)));
        assert_eq!(binary(BinaryOp::Less, T::Boolean, T::Boolean), None);
        assert_eq!(binary(BinaryOp::Equal, T::String, T::Integer), Some((K::Equality, T::Boolean)));
    }

    #[test]
    fn test_bitwise_is_integer_only() {
        assert!(binary(BinaryOp::BitAnd, T::Integer, T::Integer).is_some());
        assert!(binary(BinaryOp::BitAnd, T::Float, T::Integer).is_none());
        assert!(binary(BinaryOp::ShiftLeft, T::Boolean, T::Integer).is_none());
    }

    #[test]
    fn test_list_results_are_computed_from_operands() {
        let ints = T::list(T::Integer);
        let floats = T::list(T::Float);
        let anys = T::list(T::Any);
        assert_eq!(binary(BinaryOp::Add, ints.clone(), anys.clone()).map(|r| r.1), Some(ints.clone()));
        assert_eq!(binary(BinaryOp::Add, anys, ints.clone()).map(|r| r.1), Some(ints.clone()));
        assert_eq!(binary(BinaryOp::Add, floats.clone(), ints.clone()).map(|r| r.1), Some(floats));
        assert_eq!(binary(BinaryOp::Add, ints.clone(), T::list(T::String)), None);
        assert_eq!(binary(BinaryOp::Multiply, T::Integer, ints.clone()).map(|r| r.1), Some(ints));
    }

    #[test]
    fn test_null_coalescing_result() {
        assert_eq!(binary(BinaryOp::NullCoalesce, T::Null, T::Integer).map(|r| r.1), Some(T::Integer));
        assert_eq!(binary(BinaryOp::NullCoalesce, T::String, T::String).map(|r| r.1), Some(T::String));
    }

    #[test]
    fn test_unary_table() {
        assert_eq!(resolve_unary(UnaryOp::Negate, &T::Integer), Some((UnaryOperationKind::Negation, T::Integer)));
        assert_eq!(resolve_unary(UnaryOp::Negate, &T::Float), Some((UnaryOperationKind::Negation, T::Float)));
        assert_eq!(resolve_unary(UnaryOp::Not, &T::Integer), None);
        assert_eq!(resolve_unary(UnaryOp::BitNot, &T::Float), None);
    }

    #[test]
    fn test_conversion_order() {
        use ConversionKind as C;
        assert_eq!(conversion_kind(&T::Integer, &T::Integer), Some(C::Identity));
        assert_eq!(conversion_kind(&T::Integer, &T::Float), Some(C::IntegerToFloat));
        assert_eq!(conversion_kind(&T::Float, &T::String), Some(C::AnyToString));
        assert_eq!(conversion_kind(&T::list(T::Char), &T::String), Some(C::CharListToString));
        assert_eq!(conversion_kind(&T::String, &T::list(T::Char)), Some(C::StringToCharList));
        assert_eq!(conversion_kind(&T::Range, &T::list(T::Integer)), Some(C::RangeToList));
        assert_eq!(conversion_kind(&T::Boolean, &T::Float), Some(C::BooleanToNumber));
        assert_eq!(conversion_kind(&T::Char, &T::Integer), Some(C::CharToInteger));
        assert_eq!(conversion_kind(&T::String, &T::Integer), None);
    }
}
