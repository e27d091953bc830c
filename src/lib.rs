mod ast;
mod builtin;
mod config;
mod context;
mod environment;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod stack;
mod token;
mod value;

#[cfg(test)]
mod test_utils;

pub use ast::{BindKind, BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
pub use builtin::Builtin;
pub use config::EvalConfig;
pub use context::{evaluate, tokenize, EvaluationContext};
pub use environment::Environment;
pub use error::{AtomError, ErrorKind, RuntimeError};
pub use interpreter::{eval_each, eval_program};
pub use parser::{parse, Parser};
pub use scanner::Scanner;
pub use token::{lookup_ident, Token, TokenKind};
pub use value::{Closure, HashKey, HashPair, Value, FALSE, NULL, TRUE};
