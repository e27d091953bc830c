use core::fmt;
use std::rc::Rc;

use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindKind {
    Atom,
    Molecule,
}

impl fmt::Display for BindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atom => "atom",
            Self::Molecule => "molecule",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bang => "!",
            Self::Minus => "-",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statements.iter().join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    Expression { expression: Expression },
    Bind { kind: BindKind, name: String, value: Expression },
    Return { value: Expression },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expression } => write!(f, "{};", expression),
            Self::Bind { kind, name, value } => write!(f, "{} {} = {};", kind, name, value),
            Self::Return { value } => write!(f, "produce {};", value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() { return write!(f, "{{ }}"); }
        write!(f, "{{ {} }}", self.statements.iter().join(" "))
    }
}

// Expressions are the nodes that produce values. Function literals keep their
// parameters and body behind an Rc, since closures built from them outlive the
// program they were parsed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier { name: String },
    Integer { value: i64 },
    String { value: String },
    Boolean { value: bool },
    Prefix { operator: PrefixOperator, operand: Box<Expression> },
    Infix { operator: InfixOperator, left: Box<Expression>, right: Box<Expression> },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function { parameters: Rc<[String]>, body: Rc<BlockStatement> },
    Call { callee: Box<Expression>, arguments: Vec<Expression> },
    Array { elements: Vec<Expression> },
    Index { collection: Box<Expression>, index: Box<Expression> },
    Hash { pairs: Vec<(Expression, Expression)> },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn integer(value: i64) -> Self {
        Self::Integer { value }
    }

    pub fn prefix(operator: PrefixOperator, operand: Expression) -> Self {
        Self::Prefix { operator, operand: Box::new(operand) }
    }

    pub fn infix(operator: InfixOperator, left: Expression, right: Expression) -> Self {
        Self::Infix { operator, left: Box::new(left), right: Box::new(right) }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name } => f.write_str(name),
            // Source has no negative literals, so these render as the negation
            // the parser would build. i64::MIN has no positive counterpart
            Self::Integer { value: i64::MIN } => write!(f, "((-{}) - 1)", i64::MAX),
            Self::Integer { value } if *value < 0 => write!(f, "(-{})", value.unsigned_abs()),
            Self::Integer { value } => write!(f, "{}", value),
            Self::String { value } => write!(f, "\"{}\"", value),
            Self::Boolean { value } => write!(f, "{}", value),
            Self::Prefix { operator, operand } => write!(f, "({}{})", operator, operand),
            Self::Infix { operator, left, right } => write!(f, "({} {} {})", left, operator, right),
            Self::If { condition, consequence, alternative } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                match alternative {
                    Some(alternative) => write!(f, " else {}", alternative),
                    None => Ok(()),
                }
            }
            Self::Function { parameters, body } => write!(f, "reaction({}) {}", parameters.iter().join(", "), body),
            Self::Call { callee, arguments } => write!(f, "{}({})", callee, arguments.iter().join(", ")),
            Self::Array { elements } => write!(f, "[{}]", elements.iter().join(", ")),
            Self::Index { collection, index } => write!(f, "({}[{}])", collection, index),
            Self::Hash { pairs } => {
                let pairs = pairs.iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
        }
    }
}
