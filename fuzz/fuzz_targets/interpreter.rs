#![no_main]

use core::fmt;

use itertools::Itertools;
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

// A handful of names, so generated programs actually refer to their own bindings
#[derive(Arbitrary, Debug)]
enum Name {
    A, B, C, F, Len, First, Rest, Push,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Name::A => "a",
            Name::B => "b",
            Name::C => "c",
            Name::F => "f",
            Name::Len => "len",
            Name::First => "first",
            Name::Rest => "rest",
            Name::Push => "push",
        })
    }
}

#[derive(Arbitrary, Debug)]
enum Operator {
    Plus, Minus, Asterisk, Slash, Lt, Gt, Eq, NotEq,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Asterisk => "*",
            Operator::Slash => "/",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
        })
    }
}

#[derive(Arbitrary, Debug)]
enum AtomExpression {
    Name(Name),
    Integer(i64),
    Text(String),
    Boolean(bool),
    Not(Box<AtomExpression>),
    Negate(Box<AtomExpression>),
    Infix(Box<AtomExpression>, Operator, Box<AtomExpression>),
    If(Box<AtomExpression>, Vec<AtomStatement>, Option<Vec<AtomStatement>>),
    Reaction(Vec<Name>, Vec<AtomStatement>),
    Call(Box<AtomExpression>, Vec<AtomExpression>),
    Array(Vec<AtomExpression>),
    Index(Box<AtomExpression>, Box<AtomExpression>),
    Hash(Vec<(AtomExpression, AtomExpression)>),
}

#[derive(Arbitrary, Debug)]
enum AtomStatement {
    Atom(Name, AtomExpression),
    Molecule(Name, AtomExpression),
    Produce(AtomExpression),
    Expression(AtomExpression),
}

fn render_block(statements: &[AtomStatement]) -> String {
    format!("{{ {} }}", statements.iter().join(" "))
}

impl fmt::Display for AtomExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => name.fmt(f),
            Self::Integer(value) => write!(f, "{}", value.unsigned_abs()),
            Self::Text(text) => write!(f, "\"{}\"", text.replace('"', "")),
            Self::Boolean(value) => value.fmt(f),
            Self::Not(operand) => write!(f, "!({})", operand),
            Self::Negate(operand) => write!(f, "-({})", operand),
            Self::Infix(left, operator, right) => write!(f, "({} {} {})", left, operator, right),
            Self::If(condition, consequence, alternative) => {
                write!(f, "if ({}) {}", condition, render_block(consequence))?;
                match alternative {
                    Some(alternative) => write!(f, " else {}", render_block(alternative)),
                    None => Ok(()),
                }
            }
            Self::Reaction(parameters, body) => write!(f, "reaction({}) {}", parameters.iter().join(", "), render_block(body)),
            Self::Call(callee, arguments) => write!(f, "({})({})", callee, arguments.iter().join(", ")),
            Self::Array(elements) => write!(f, "[{}]", elements.iter().join(", ")),
            Self::Index(collection, index) => write!(f, "({})[{}]", collection, index),
            Self::Hash(pairs) => write!(f, "{{{}}}", pairs.iter().map(|(key, value)| format!("{}: {}", key, value)).join(", ")),
        }
    }
}

impl fmt::Display for AtomStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name, value) => write!(f, "atom {} = {};", name, value),
            Self::Molecule(name, value) => write!(f, "molecule {} = {};", name, value),
            Self::Produce(value) => write!(f, "produce {};", value),
            Self::Expression(expression) => write!(f, "{};", expression),
        }
    }
}

fuzz_target!(|lines: Vec<Vec<AtomStatement>>| {
    let mut context = atomscript::EvaluationContext::with_config(atomscript::EvalConfig { max_depth: 128 });

    for line in lines {
        let source = line.iter().join(" ");
        let _ = context.evaluate_lines(&source);
    }
});
