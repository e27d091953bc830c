use itertools::Itertools;
use thiserror::Error;

use crate::ast::{InfixOperator, PrefixOperator};

/// Broad category of a failure, mirroring how drivers report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    NameError,
    EvaluationError,
}

/// An error raised while evaluating a program. These are ordinary values of
/// the language: they end evaluation of every enclosing construct and are
/// surfaced to the driver, there is no way to catch them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("cannot redeclare atom {0}")]
    AtomRedeclared(String),

    #[error("cannot reassign atom {0}")]
    AtomReassigned(String),

    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch { left: &'static str, operator: InfixOperator, right: &'static str },

    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator { operator: PrefixOperator, operand: &'static str },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator { left: &'static str, operator: InfixOperator, right: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow: {left} {operator} {right}")]
    IntegerOverflow { left: i64, operator: InfixOperator, right: i64 },

    #[error("integer overflow: -{0}")]
    NegationOverflow(i64),

    #[error("not a function: {0}")]
    NotCallable(&'static str),

    #[error("wrong number of arguments: want={expected}, got={got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),

    #[error("unusable as hash key: {0}")]
    UnusableHashKey(&'static str),

    #[error("argument to {builtin} not supported, got {got}")]
    UnsupportedArgument { builtin: &'static str, got: &'static str },

    #[error("recursion limit of {0} exceeded")]
    RecursionLimit(usize),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IdentifierNotFound(_) => ErrorKind::NameError,
            _ => ErrorKind::EvaluationError,
        }
    }
}

/// Errors surfaced to whoever drives an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomError {
    #[error("{}", .0.iter().join("\n"))]
    Syntax(Vec<String>),

    #[error("ERROR: {0}")]
    Runtime(#[from] RuntimeError),
}

impl AtomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::SyntaxError,
            Self::Runtime(error) => error.kind(),
        }
    }
}
