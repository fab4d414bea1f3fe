//! Type system for Glint semantic analysis.
//!
//! A [`TypeSymbol`] is an immutable type value. Besides the concrete types
//! (`Boolean`, `Integer`, `Float`, `Char`, `String`, `Range`) there are four
//! special ones:
//!
//! - `Unknown`: the type of anything that failed to bind. It matches every
//!   type so one fault does not cascade into more diagnostics.
//! - `Void`: the result of functions that return nothing.
//! - `Any`: accepts and is accepted by everything.
//! - `Null`: the type of `null`.
//!
//! Generic types carry an ordered parameter list: `List<T>` has one
//! parameter, `Function<R, P1, ..., Pn>` stores the return type first and the
//! parameter types after it.
//!
//! # Compatibility
//!
//! Compatibility is the directed [`TypeSymbol::matches`] relation, not
//! equality: `slot.matches(value)` asks whether a slot of type `slot` accepts
//! a value of type `value`. `Float` accepts `Integer` (widening).

use std::fmt;

/// The two generic type constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericKind {
    /// `List<T>`
    List,
    /// `Function<Return, Params...>`
    Function,
}

impl GenericKind {
    pub fn name(self) -> &'static str {
        match self {
            GenericKind::List => "List",
            GenericKind::Function => "Function",
        }
    }
}

/// A parameterized type such as `List<Integer>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericTypeSymbol {
    pub kind: GenericKind,
    pub parameters: Vec<TypeSymbol>,
}

/// Internal type representation for semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Unknown,
    Void,
    Any,
    Null,
    Boolean,
    Integer,
    Float,
    Char,
    String,
    Range,
    Generic(GenericTypeSymbol),
}

impl TypeSymbol {
    /// `List<element>`
    pub fn list(element: TypeSymbol) -> Self {
        TypeSymbol::Generic(GenericTypeSymbol {
            kind: GenericKind::List,
            parameters: vec![element],
        })
    }

    /// `Function<return_type, parameters...>`
    pub fn function(return_type: TypeSymbol, parameters: Vec<TypeSymbol>) -> Self {
        let mut all = Vec::with_capacity(parameters.len() + 1);
        all.push(return_type);
        all.extend(parameters);
        TypeSymbol::Generic(GenericTypeSymbol {
            kind: GenericKind::Function,
            parameters: all,
        })
    }

    /// Looks up a non-generic type by name.
    pub fn from_name(name: &str) -> Option<TypeSymbol> {
        Some(match name {
            "Any" => TypeSymbol::Any,
            "Void" => TypeSymbol::Void,
            "Null" => TypeSymbol::Null,
            "Boolean" => TypeSymbol::Boolean,
            "Integer" => TypeSymbol::Integer,
            "Float" => TypeSymbol::Float,
            "Char" => TypeSymbol::Char,
            "String" => TypeSymbol::String,
            "Range" => TypeSymbol::Range,
            _ => return None,
        })
    }

    /// Looks up a generic type constructor by name.
    pub fn generic_from_name(name: &str) -> Option<GenericKind> {
        match name {
            "List" => Some(GenericKind::List),
            "Function" => Some(GenericKind::Function),
            _ => None,
        }
    }

    /// Whether a slot of type `self` accepts a value of type `other`.
    ///
    /// ```
    /// use glint::semantic::TypeSymbol;
    ///
    /// assert!(TypeSymbol::Float.matches(&TypeSymbol::Integer));
    /// assert!(!TypeSymbol::Integer.matches(&TypeSymbol::Float));
    /// assert!(TypeSymbol::Any.matches(&TypeSymbol::list(TypeSymbol::Char)));
    /// ```
    pub fn matches(&self, other: &TypeSymbol) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (TypeSymbol::Unknown, _) | (_, TypeSymbol::Unknown) => true,
            (TypeSymbol::Any, _) | (_, TypeSymbol::Any) => true,
            (TypeSymbol::Float, TypeSymbol::Integer) => true,
            (TypeSymbol::Generic(a), TypeSymbol::Generic(b)) => {
                a.kind == b.kind
                    && a.parameters.len() == b.parameters.len()
                    && a.parameters
                        .iter()
                        .zip(&b.parameters)
                        .all(|(x, y)| x.matches(y))
            }
            _ => false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeSymbol::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeSymbol::Integer | TypeSymbol::Float)
    }

    /// The element type of a `List`, if this is one.
    pub fn list_element(&self) -> Option<&TypeSymbol> {
        match self {
            TypeSymbol::Generic(GenericTypeSymbol {
                kind: GenericKind::List,
                parameters,
            }) => parameters.first(),
            _ => None,
        }
    }

    /// Return type and parameter types of a `Function`, if this is one.
    pub fn function_signature(&self) -> Option<(&TypeSymbol, &[TypeSymbol])> {
        match self {
            TypeSymbol::Generic(GenericTypeSymbol {
                kind: GenericKind::Function,
                parameters,
            }) => parameters.split_first(),
            _ => None,
        }
    }

    /// The type produced by iterating over or indexing into this type.
    pub fn element_type(&self) -> Option<TypeSymbol> {
        match self {
            TypeSymbol::Range => Some(TypeSymbol::Integer),
            TypeSymbol::String => Some(TypeSymbol::Char),
            TypeSymbol::Any => Some(TypeSymbol::Any),
            TypeSymbol::Unknown => Some(TypeSymbol::Unknown),
            other => other.list_element().cloned(),
        }
    }

    /// Whether a variable of this type can be declared without a value.
    ///
    /// Functions and `Void` have no default.
    pub fn has_default_value(&self) -> bool {
        !matches!(self, TypeSymbol::Void) && self.function_signature().is_none()
    }

    /// True when `Any` appears anywhere in this type.
    pub fn contains_any(&self) -> bool {
        match self {
            TypeSymbol::Any => true,
            TypeSymbol::Generic(generic) => generic.parameters.iter().any(TypeSymbol::contains_any),
            _ => false,
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeSymbol::Unknown => "Unknown",
            TypeSymbol::Void => "Void",
            TypeSymbol::Any => "Any",
            TypeSymbol::Null => "Null",
            TypeSymbol::Boolean => "Boolean",
            TypeSymbol::Integer => "Integer",
            TypeSymbol::Float => "Float",
            TypeSymbol::Char => "Char",
            TypeSymbol::String => "String",
            TypeSymbol::Range => "Range",
            TypeSymbol::Generic(generic) => {
                write!(f, "{}<", generic.kind.name())?;
                for (i, parameter) in generic.parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                return f.write_str(">");
            }
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONCRETE: [TypeSymbol; 6] = [
        TypeSymbol::Boolean,
        TypeSymbol::Integer,
        TypeSymbol::Float,
        TypeSymbol::Char,
        TypeSymbol::String,
        TypeSymbol::Range,
    ];

    #[test]
    fn test_matches_is_reflexive() {
        for t in CONCRETE {
            assert!(t.matches(&t), "{t} should match itself");
        }
        let generic = TypeSymbol::function(TypeSymbol::Integer, vec![TypeSymbol::list(TypeSymbol::Char)]);
        assert!(generic.matches(&generic.clone()));
    }

    #[test]
    fn test_any_absorbs_everything() {
        for t in CONCRETE {
            assert!(TypeSymbol::Any.matches(&t));
            assert!(t.matches(&TypeSymbol::Any));
        }
        assert!(TypeSymbol::Any.matches(&TypeSymbol::Null));
        assert!(TypeSymbol::list(TypeSymbol::Any).matches(&TypeSymbol::list(TypeSymbol::Float)));
    }

    #[test]
    fn test_widening_is_directed() {
        assert!(TypeSymbol::Float.matches(&TypeSymbol::Integer));
        assert!(!TypeSymbol::Integer.matches(&TypeSymbol::Float));
        assert!(!TypeSymbol::String.matches(&TypeSymbol::Char));
    }

    #[test]
    fn test_null_only_fits_null_and_any() {
        assert!(TypeSymbol::Null.matches(&TypeSymbol::Null));
        for t in CONCRETE {
            assert!(!t.matches(&TypeSymbol::Null));
        }
    }

    #[test]
    fn test_generic_arity_and_kind() {
        let one = TypeSymbol::function(TypeSymbol::Integer, vec![TypeSymbol::Integer]);
        let two = TypeSymbol::function(TypeSymbol::Integer, vec![TypeSymbol::Integer, TypeSymbol::Integer]);
        assert!(!one.matches(&two));
        assert!(!TypeSymbol::list(TypeSymbol::Integer).matches(&TypeSymbol::list(TypeSymbol::String)));
        assert!(!TypeSymbol::list(TypeSymbol::Integer).matches(&one));
    }

    #[test]
    fn test_element_types() {
        assert_eq!(TypeSymbol::Range.element_type(), Some(TypeSymbol::Integer));
        assert_eq!(TypeSymbol::String.element_type(), Some(TypeSymbol::Char));
        assert_eq!(
            TypeSymbol::list(TypeSymbol::Float).element_type(),
            Some(TypeSymbol::Float)
        );
        assert_eq!(TypeSymbol::Integer.element_type(), None);
    }

    #[test]
    fn test_function_signature_and_display() {
        let f = TypeSymbol::function(TypeSymbol::Void, vec![TypeSymbol::Any]);
        let (ret, params) = f.function_signature().unwrap();
        assert_eq!(*ret, TypeSymbol::Void);
        assert_eq!(params, &[TypeSymbol::Any]);
        assert_eq!(f.to_string(), "Function<Void, Any>");
        assert_eq!(TypeSymbol::list(TypeSymbol::list(TypeSymbol::Char)).to_string(), "List<List<Char>>");
    }
}
