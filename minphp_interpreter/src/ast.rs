use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::errors::InterpreterError;

// Re-export the token types from minphp_ast
pub use minphp_ast::*;

// --- Runtime Values ---

/// A runtime value. Values are never mutated in place; every operator
/// produces a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }

    /// Zero, the empty string, `"0"`, `false` and null are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty() && s != "0",
            Value::Bool(b) => *b,
            Value::Null => false,
        }
    }

    pub fn less_or_equal(&self, other: &Value) -> bool {
        self.loose_cmp(other) != Ordering::Greater
    }

    /// Loose ordering across types. Null against a string compares as `""`;
    /// otherwise a bool or null on either side compares both sides as
    /// bools. Numeric strings compare numerically with ints and with each
    /// other, anything else compares byte-wise as text.
    fn loose_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => match (numeric(a), numeric(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.as_bytes().cmp(b.as_bytes()),
            },
            (Value::Null, Value::Str(s)) => "".cmp(s.as_str()),
            (Value::Str(s), Value::Null) => s.as_str().cmp(""),
            (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
                self.is_truthy().cmp(&other.is_truthy())
            }
            (Value::Int(n), Value::Str(s)) => int_cmp_str(*n, s),
            (Value::Str(s), Value::Int(n)) => int_cmp_str(*n, s).reverse(),
        }
    }

    /// `===`: same type and same value.
    pub fn strictly_equals(&self, other: &Value) -> bool {
        self == other
    }
}

/// Integer value of a string that is a whole number, allowing surrounding
/// whitespace and a sign.
fn numeric(s: &str) -> Option<i64> {
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b')
        .parse()
        .ok()
}

fn int_cmp_str(n: i64, s: &str) -> Ordering {
    match numeric(s) {
        Some(m) => n.cmp(&m),
        None => n.to_string().as_bytes().cmp(s.as_bytes()),
    }
}

/// The textual form written by `echo`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}

// --- Environment ---

/// The flat variable store of a run. There are no nested scopes: every
/// assignment anywhere in a program writes to the same map.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn get(&self, name: &str) -> Result<&Value, InterpreterError> {
        self.bindings
            .get(name)
            .ok_or_else(|| InterpreterError::UnboundVariable {
                name: name.to_string(),
                position: None,
            })
    }

    /// Inserts or overwrites a binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
