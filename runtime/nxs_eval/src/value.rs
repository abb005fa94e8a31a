//! Runtime values.

use crate::shared::Shared;
use crate::Scope;
use nxs_ir::Stmt;
use std::fmt;
use std::rc::Rc;

/// A Nexus runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Func(Rc<FuncValue>),
}

/// A user-defined function.
///
/// The body is shared (`Rc<[Stmt]>`) because calls re-enter it without
/// cloning; the captured scope is held by reference, forming the lexical
/// chain for invocations.
pub struct FuncValue {
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub captured: Shared<Scope>,
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncValue")
            .field("params", &self.params)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl Value {
    /// Host-native truthiness: `false`, null, `0`, and the empty string
    /// are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Func(_) => true,
        }
    }

    /// The type name reported by the `type_of` builtin.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Num(_) => "num",
            Value::Str(_) => "str",
            Value::Func(_) => "func",
        }
    }

    /// Text shown for this value in diagnostic output and bound nodes.
    ///
    /// Integral numbers print without a trailing `.0` (`1`, not `1.0`),
    /// matching the display the original host produced.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => format_num(*n),
            Value::Str(s) => s.clone(),
            Value::Func(_) => "[func]".to_string(),
        }
    }
}

fn format_num(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Value equality used by tests and the state store snapshot.
///
/// Functions compare by identity; everything else by content.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn falsy_values() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Num(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
    }

    #[test]
    fn truthy_values() {
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Num(-1.0).is_truthy());
        assert!(Value::Str("x".into()).is_truthy());
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Num(3.0).display_text(), "3");
        assert_eq!(Value::Num(3.5).display_text(), "3.5");
        assert_eq!(Value::Num(-2.0).display_text(), "-2");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Num(1.0).type_name(), "num");
        assert_eq!(Value::Str("s".into()).type_name(), "str");
        assert_eq!(Value::Bool(true).type_name(), "bool");
    }
}
