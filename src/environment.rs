use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{ast::BindKind, builtin::builtin_frame, error::RuntimeError, value::Value};

#[derive(Debug, Clone)]
struct Binding {
    kind: BindKind,
    value: Value,
}

struct Frame {
    bindings: RefCell<HashMap<String, Binding>>,
    parent: Option<Environment>,
}

/// A lexical scope: a frame of bindings plus a link to the enclosing scope.
///
/// Cloning an environment clones the reference, not the frame. Closures hold
/// such a reference to the scope they were created in, so a `molecule`
/// updated through one handle is seen through all of them.
#[derive(Clone)]
pub struct Environment(Rc<Frame>);

impl Environment {
    /// A fresh global scope whose parent is the builtin frame.
    pub fn new() -> Self {
        Self::enclosed(&builtin_frame())
    }

    /// A scope with no parent at all, not even the builtins.
    pub fn root() -> Self {
        Self(Rc::new(Frame { bindings: RefCell::new(HashMap::new()), parent: None }))
    }

    pub fn enclosed(parent: &Environment) -> Self {
        Self(Rc::new(Frame { bindings: RefCell::new(HashMap::new()), parent: Some(parent.clone()) }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.0.bindings.borrow().get(name) {
            return Some(binding.value.clone());
        }
        self.0.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Binds `name` in this frame without any checks, replacing whatever was there.
    pub fn define(&self, kind: BindKind, name: &str, value: Value) {
        self.0.bindings.borrow_mut().insert(name.to_owned(), Binding { kind, value });
    }

    /// Applies a binding statement.
    ///
    /// An atom may only be introduced once per frame. A molecule overwrites
    /// the nearest molecule of the same name in place, wherever in the chain
    /// it was declared, and is otherwise declared in this frame.
    pub fn bind(&self, kind: BindKind, name: &str, value: Value) -> Result<(), RuntimeError> {
        let local = self.0.bindings.borrow().get(name).map(|binding| binding.kind);

        match (kind, local) {
            (BindKind::Atom, Some(_)) => Err(RuntimeError::AtomRedeclared(name.to_owned())),
            (BindKind::Atom, None) => {
                self.define(kind, name, value);
                Ok(())
            }
            (BindKind::Molecule, Some(BindKind::Atom)) => Err(RuntimeError::AtomReassigned(name.to_owned())),
            (BindKind::Molecule, Some(BindKind::Molecule)) => {
                self.define(kind, name, value);
                Ok(())
            }
            (BindKind::Molecule, None) => {
                match self.declaring_frame(name) {
                    Some((frame, BindKind::Molecule)) => frame.define(kind, name, value),
                    _ => self.define(kind, name, value),
                }
                Ok(())
            }
        }
    }

    // The nearest environment in the chain with a binding for name, and that binding's kind
    fn declaring_frame(&self, name: &str) -> Option<(Environment, BindKind)> {
        if let Some(binding) = self.0.bindings.borrow().get(name) {
            return Some((self.clone(), binding.kind));
        }
        self.0.parent.as_ref().and_then(|parent| parent.declaring_frame(name))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
