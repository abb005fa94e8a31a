//! Lexical scopes for the evaluator.
//!
//! A scope maps binding names to values and chains to at most one parent.
//! A fresh scope is created per function invocation and per context block
//! and discarded when it ends; the only retained references are the
//! captured parents held by function values and the named scopes kept for
//! context blocks.

use crate::shared::Shared;
use crate::value::Value;
use rustc_hash::FxHashMap;

/// A single scope in the lexical chain.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Shared<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Shared<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define or overwrite a binding in this scope.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Look a name up through the chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.bindings.get(name) {
            return Some(v.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().lookup(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn define_then_lookup() {
        let mut scope = Scope::new();
        scope.define("x", Value::Num(42.0));
        assert_eq!(scope.lookup("x"), Some(Value::Num(42.0)));
        assert_eq!(scope.lookup("y"), None);
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Shared::new(Scope::new());
        parent.borrow_mut().define("x", Value::Num(1.0));
        let child = Scope::with_parent(parent);
        assert_eq!(child.lookup("x"), Some(Value::Num(1.0)));
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Shared::new(Scope::new());
        parent.borrow_mut().define("x", Value::Num(1.0));
        let mut child = Scope::with_parent(parent.clone());
        child.define("x", Value::Num(2.0));
        assert_eq!(child.lookup("x"), Some(Value::Num(2.0)));
        // Parent binding untouched.
        assert_eq!(parent.borrow().lookup("x"), Some(Value::Num(1.0)));
    }
}
