//! Runtime scopes.
//!
//! Frames are shared through `Rc<RefCell<_>>` and point to their parent.
//! Blocks push a frame whose parent is the current frame; calls push a frame
//! whose parent is the frame the function was defined in. A function value
//! holds its defining frame, so a closure returned from a call keeps the
//! variables it captured after the call's frame is popped.
//!
//! A function stored in the frame it captures forms a reference cycle, so
//! that frame lives as long as the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::semantic::Builtin;

use super::value::{FunctionValue, Value};

#[derive(Debug)]
struct Frame {
    values: HashMap<String, Value>,
    parent: Option<FrameRef>,
}

/// A shared handle to a frame.
#[derive(Clone)]
pub struct FrameRef(Rc<RefCell<Frame>>);

impl FrameRef {
    fn new(parent: Option<FrameRef>) -> Self {
        FrameRef(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            parent,
        })))
    }

    fn parent(&self) -> Option<FrameRef> {
        self.0.borrow().parent.clone()
    }

    fn owns(&self, name: &str) -> bool {
        self.0.borrow().values.contains_key(name)
    }
}

// Frames can hold functions that point back at them.
impl fmt::Debug for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameRef({:p})", Rc::as_ptr(&self.0))
    }
}

impl PartialEq for FrameRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Runtime name bindings.
#[derive(Debug)]
pub struct Scope {
    /// Frames pushed so far; the first is the root.
    stack: Vec<FrameRef>,
}

impl Scope {
    /// Creates a scope whose root frame holds the built-ins.
    pub fn new() -> Self {
        let root = FrameRef::new(None);
        for builtin in Builtin::ALL {
            root.0
                .borrow_mut()
                .values
                .insert(builtin.name().to_string(), Value::Function(FunctionValue::Builtin(builtin)));
        }
        Self { stack: vec![root] }
    }

    /// Number of pushed frames, the root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// A handle to the current frame.
    pub fn current(&self) -> FrameRef {
        self.stack[self.stack.len() - 1].clone()
    }

    /// Pushes a child of the current frame.
    pub fn push(&mut self) {
        let frame = FrameRef::new(Some(self.current()));
        self.stack.push(frame);
        log::trace!("runtime scope push -> depth {}", self.stack.len());
    }

    /// Pushes a call frame whose parent is the frame `captured` refers to.
    pub fn push_call(&mut self, captured: FrameRef) {
        self.stack.push(FrameRef::new(Some(captured)));
        log::trace!("runtime call push -> depth {}", self.stack.len());
    }

    /// Pops the current frame. The root is never popped.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
            log::trace!("runtime scope pop -> depth {}", self.stack.len());
        }
    }

    /// Binds a name in the current frame.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.current().0.borrow_mut().values.insert(name.into(), value);
    }

    /// The nearest frame owning `name`.
    fn owner(&self, name: &str) -> Option<FrameRef> {
        let mut frame = Some(self.current());
        while let Some(f) = frame {
            if f.owns(name) {
                return Some(f);
            }
            frame = f.parent();
        }
        None
    }

    /// Looks up a name, searching outward from the current frame.
    pub fn get(&self, name: &str) -> Option<Value> {
        let owner = self.owner(name)?;
        let frame = owner.0.borrow();
        frame.values.get(name).cloned()
    }

    /// Runs `f` on the binding of `name` in the nearest frame owning it.
    ///
    /// `f` must not touch the scope.
    pub fn update<R>(&mut self, name: &str, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let owner = self.owner(name)?;
        let mut frame = owner.0.borrow_mut();
        frame.values.get_mut(name).map(f)
    }

    /// Replaces the value in the nearest frame owning `name`.
    ///
    /// Returns false if no frame owns it.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        self.update(name, |slot| *slot = value).is_some()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_in_root() {
        let scope = Scope::new();
        assert!(matches!(
            scope.get("RandomInt"),
            Some(Value::Function(FunctionValue::Builtin(Builtin::RandomInt)))
        ));
    }

    #[test]
    fn test_assignment_targets_owner() {
        let mut scope = Scope::new();
        scope.declare("x", Value::Integer(1.0));
        scope.push();
        scope.declare("y", Value::Integer(2.0));
        assert!(scope.assign("x", Value::Integer(5.0)));
        assert!(!scope.assign("missing", Value::Null));
        scope.pop();
        assert_eq!(scope.get("x"), Some(Value::Integer(5.0)));
        assert!(scope.get("y").is_none());
    }

    #[test]
    fn test_call_frames_use_the_captured_parent() {
        let mut scope = Scope::new();
        scope.declare("x", Value::Integer(1.0));
        let root = scope.current();

        scope.push();
        scope.declare("x", Value::Integer(2.0));
        scope.push_call(root);
        // The caller's `x` is not visible, the definer's is.
        assert_eq!(scope.get("x"), Some(Value::Integer(1.0)));
        scope.pop();
        scope.pop();
        assert_eq!(scope.depth(), 1);
    }

    #[test]
    fn test_captured_frames_outlive_pop() {
        let mut scope = Scope::new();
        scope.push();
        scope.declare("local", Value::Integer(1.0));
        let captured = scope.current();
        scope.pop();

        // A new frame at the same depth does not disturb the captured one.
        scope.push();
        scope.declare("local", Value::Integer(2.0));
        scope.pop();

        scope.push_call(captured);
        assert_eq!(scope.get("local"), Some(Value::Integer(1.0)));
        assert!(scope.get("Print").is_some());
    }

    #[test]
    fn test_update_nested_binding() {
        let mut scope = Scope::new();
        scope.declare("n", Value::Integer(1.0));
        scope.push();
        let old = scope.update("n", |slot| std::mem::replace(slot, Value::Integer(2.0)));
        assert_eq!(old, Some(Value::Integer(1.0)));
        assert_eq!(scope.update("missing", |_| ()), None);
        scope.pop();
        assert_eq!(scope.get("n"), Some(Value::Integer(2.0)));
    }
}
