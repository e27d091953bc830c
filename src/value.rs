use core::fmt;
use std::{collections::HashMap, rc::Rc};

use itertools::Itertools;

use crate::{ast::BlockStatement, builtin::Builtin, environment::Environment, error::RuntimeError};

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

// Runtime values. Booleans and null hold no allocation, so the TRUE, FALSE and
// NULL constants are the only instances there are and comparing them by value
// is comparing them by identity
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    String(Rc<str>),
    Boolean(bool),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<HashMap<HashKey, HashPair>>),
    Closure(Rc<Closure>),
    Builtin(Builtin),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::String(_) => "STRING",
            Self::Boolean(_) => "BOOLEAN",
            Self::Null => "NULL",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Closure(_) => "REACTION",
            Self::Builtin(_) => "BUILTIN",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null)
    }

    pub fn string(text: &str) -> Self {
        Self::String(Rc::from(text))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Self::Array(Rc::new(values))
    }

    pub fn hash_key(&self) -> Result<HashKey, RuntimeError> {
        match self {
            Self::Integer(value) => Ok(HashKey::Integer(*value)),
            Self::String(value) => Ok(HashKey::String(value.clone())),
            Self::Boolean(value) => Ok(HashKey::Boolean(*value)),
            other => Err(RuntimeError::UnusableHashKey(other.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::String(value) => f.write_str(value),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Null => f.write_str("null"),
            Self::Array(values) => write!(f, "[{}]", values.iter().join(", ")),
            Self::Hash(pairs) => {
                let pairs = pairs.values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
            Self::Closure(closure) => write!(f, "reaction({}) {}", closure.parameters.iter().join(", "), closure.body),
            Self::Builtin(builtin) => write!(f, "builtin {}", builtin.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(f, "{:?}", value),
            other => write!(f, "{}", other),
        }
    }
}

// Closures and builtins have no useful notion of equality, so they never compare equal
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    String(Rc<str>),
    Boolean(bool),
}

/// A hash entry keeps the original key value around for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// A function value: the literal's parameters and body plus the environment
/// that was current when the literal was evaluated.
pub struct Closure {
    pub parameters: Rc<[String]>,
    pub body: Rc<BlockStatement>,
    pub environment: Environment,
}
