//! The fixed registry of built-in functions.
//!
//! Built-ins are pre-declared as constants in the root scope, both at
//! analysis time (with their signatures) and at run time (as function values
//! dispatched by identity).

use super::types::TypeSymbol;

/// A host-provided function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Clear,
    Print,
    Read,
    Floor,
    Round,
    Ceiling,
    Absolute,
    RandomInt,
    RandomFloat,
    LengthOf,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Clear,
        Builtin::Print,
        Builtin::Read,
        Builtin::Floor,
        Builtin::Round,
        Builtin::Ceiling,
        Builtin::Absolute,
        Builtin::RandomInt,
        Builtin::RandomFloat,
        Builtin::LengthOf,
    ];

    /// The name the built-in is declared under.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Clear => "Clear",
            Builtin::Print => "Print",
            Builtin::Read => "Read",
            Builtin::Floor => "Floor",
            Builtin::Round => "Round",
            Builtin::Ceiling => "Ceiling",
            Builtin::Absolute => "Absolute",
            Builtin::RandomInt => "RandomInt",
            Builtin::RandomFloat => "RandomFloat",
            Builtin::LengthOf => "LengthOf",
        }
    }

    /// The `Function<...>` type of the built-in.
    pub fn signature(self) -> TypeSymbol {
        use TypeSymbol::{Any, Float, Integer, String, Void};
        match self {
            Builtin::Clear => TypeSymbol::function(Void, vec![]),
            Builtin::Print => TypeSymbol::function(Void, vec![Any]),
            Builtin::Read => TypeSymbol::function(String, vec![String]),
            Builtin::Floor | Builtin::Round | Builtin::Ceiling => {
                TypeSymbol::function(Integer, vec![Float])
            }
            // Called by name with an Integer, the checker types it Integer -> Integer.
            Builtin::Absolute => TypeSymbol::function(Float, vec![Float]),
            Builtin::RandomInt => TypeSymbol::function(Integer, vec![]),
            Builtin::RandomFloat => TypeSymbol::function(Float, vec![]),
            Builtin::LengthOf => TypeSymbol::function(Integer, vec![Any]),
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("print"), None);
    }

    #[test]
    fn test_signatures() {
        let (ret, params) = Builtin::Round.signature().function_signature().map(|(r, p)| (r.clone(), p.to_vec())).unwrap();
        assert_eq!(ret, TypeSymbol::Integer);
        assert_eq!(params, vec![TypeSymbol::Float]);
        assert_eq!(Builtin::Clear.signature().to_string(), "Function<Void>");
    }
}
