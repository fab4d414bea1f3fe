//! Compile-time scopes for Glint semantic analysis.
//!
//! A [`SemanticScope`] is a stack of frames stored in an arena. Each frame
//! maps names to [`NameSymbol`]s and records the index of its parent, so a
//! lookup walks outward by index rather than through live references.
//! Frame 0 is the root and holds the built-in functions.
//!
//! # Scope Rules
//!
//! - Every block, function body and loop body gets its own frame
//! - Inner declarations shadow outer ones
//! - Redeclaring a name in the same frame is an error
//! - Popping a frame discards everything declared in it

use std::collections::HashMap;

use super::builtins::Builtin;
use super::types::TypeSymbol;

/// What kind of entity a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    Builtin(Builtin),
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSymbol {
    pub name: String,
    pub type_symbol: TypeSymbol,
    /// Constants cannot be assigned after declaration.
    pub is_constant: bool,
    pub kind: SymbolKind,
}

impl NameSymbol {
    pub fn new(name: impl Into<String>, type_symbol: TypeSymbol, is_constant: bool, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            type_symbol,
            is_constant,
            kind,
        }
    }
}

#[derive(Debug, Clone)]
struct Frame {
    symbols: HashMap<String, NameSymbol>,
    parent: Option<usize>,
}

/// Compile-time symbol scopes.
#[derive(Debug, Clone)]
pub struct SemanticScope {
    frames: Vec<Frame>,
}

impl SemanticScope {
    /// Creates a scope with only the root frame, holding the built-ins.
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        for builtin in Builtin::ALL {
            symbols.insert(
                builtin.name().to_string(),
                NameSymbol::new(builtin.name(), builtin.signature(), true, SymbolKind::Builtin(builtin)),
            );
        }
        Self {
            frames: vec![Frame {
                symbols,
                parent: None,
            }],
        }
    }

    /// Number of open frames, the root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Opens a child frame of the current one.
    pub fn push(&mut self) {
        let parent = self.frames.len() - 1;
        self.frames.push(Frame {
            symbols: HashMap::new(),
            parent: Some(parent),
        });
        log::trace!("semantic scope push -> depth {}", self.frames.len());
    }

    /// Discards the current frame. The root is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            log::trace!("semantic scope pop -> depth {}", self.frames.len());
        }
    }

    /// Declares a name in the current frame.
    ///
    /// Returns the existing symbol if the name is already declared there.
    pub fn declare(&mut self, symbol: NameSymbol) -> Result<(), NameSymbol> {
        let frame = self.current_mut();
        if let Some(existing) = frame.symbols.get(&symbol.name) {
            return Err(existing.clone());
        }
        frame.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks up a name, searching outward from the current frame.
    pub fn lookup(&self, name: &str) -> Option<&NameSymbol> {
        let mut index = Some(self.frames.len() - 1);
        while let Some(i) = index {
            let frame = &self.frames[i];
            if let Some(symbol) = frame.symbols.get(name) {
                return Some(symbol);
            }
            index = frame.parent;
        }
        None
    }

    /// Checks if a name exists in the current frame only.
    pub fn declared_in_current(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.symbols.contains_key(name))
    }

    /// Marks the nearest visible symbol with this name as constant.
    ///
    /// Returns false if no such name is visible.
    pub fn make_constant(&mut self, name: &str) -> bool {
        let mut index = Some(self.frames.len() - 1);
        while let Some(i) = index {
            if let Some(symbol) = self.frames[i].symbols.get_mut(name) {
                symbol.is_constant = true;
                return true;
            }
            index = self.frames[i].parent;
        }
        false
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Default for SemanticScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str, type_symbol: TypeSymbol) -> NameSymbol {
        NameSymbol::new(name, type_symbol, false, SymbolKind::Variable)
    }

    #[test]
    fn test_root_holds_builtins() {
        let scope = SemanticScope::new();
        let print = scope.lookup("Print").unwrap();
        assert!(print.is_constant);
        assert_eq!(print.kind, SymbolKind::Builtin(Builtin::Print));
        assert_eq!(scope.depth(), 1);
    }

    #[test]
    fn test_duplicate_in_same_frame() {
        let mut scope = SemanticScope::new();
        assert!(scope.declare(variable("x", TypeSymbol::Integer)).is_ok());
        let existing = scope.declare(variable("x", TypeSymbol::String)).unwrap_err();
        assert_eq!(existing.type_symbol, TypeSymbol::Integer);
    }

    #[test]
    fn test_shadowing_and_pop() {
        let mut scope = SemanticScope::new();
        scope.declare(variable("x", TypeSymbol::Integer)).unwrap();
        scope.push();
        assert!(!scope.declared_in_current("x"));
        scope.declare(variable("x", TypeSymbol::String)).unwrap();
        assert_eq!(scope.lookup("x").unwrap().type_symbol, TypeSymbol::String);
        scope.declare(variable("y", TypeSymbol::Char)).unwrap();
        scope.pop();
        assert_eq!(scope.lookup("x").unwrap().type_symbol, TypeSymbol::Integer);
        assert!(scope.lookup("y").is_none());
    }

    #[test]
    fn test_root_is_never_popped() {
        let mut scope = SemanticScope::new();
        scope.pop();
        assert_eq!(scope.depth(), 1);
        assert!(scope.lookup("Read").is_some());
    }

    #[test]
    fn test_make_constant_reaches_outer_frames() {
        let mut scope = SemanticScope::new();
        scope.declare(variable("x", TypeSymbol::Integer)).unwrap();
        scope.push();
        assert!(scope.make_constant("x"));
        assert!(!scope.make_constant("missing"));
        scope.pop();
        assert!(scope.lookup("x").unwrap().is_constant);
    }
}
