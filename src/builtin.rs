use crate::{
    ast::BindKind,
    environment::Environment,
    error::RuntimeError,
    value::{Value, NULL},
};

type BuiltinResult = Result<Value, RuntimeError>;

/// A host function callable from scripts.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    function: fn(Vec<Value>) -> BuiltinResult,
}

impl Builtin {
    pub fn call(&self, arguments: Vec<Value>) -> BuiltinResult {
        (self.function)(arguments)
    }
}

fn expect_arguments<const N: usize>(values: Vec<Value>) -> Result<[Value; N], RuntimeError> {
    let got = values.len();
    values.try_into().map_err(|_| RuntimeError::ArityMismatch { expected: N, got })
}

fn unsupported(builtin: &'static str, value: &Value) -> RuntimeError {
    RuntimeError::UnsupportedArgument { builtin, got: value.type_name() }
}

fn builtin_len(values: Vec<Value>) -> BuiltinResult {
    let [value] = expect_arguments(values)?;

    let length = match &value {
        Value::String(text) => text.len(),
        Value::Array(values) => values.len(),
        other => return Err(unsupported("len", other)),
    };
    // Lengths of in-memory collections are far below i64::MAX
    Ok(Value::Integer(length as i64))
}

fn builtin_first(values: Vec<Value>) -> BuiltinResult {
    match expect_arguments(values)? {
        [Value::Array(values)] => Ok(values.first().cloned().unwrap_or(NULL)),
        [other] => Err(unsupported("first", &other)),
    }
}

fn builtin_last(values: Vec<Value>) -> BuiltinResult {
    match expect_arguments(values)? {
        [Value::Array(values)] => Ok(values.last().cloned().unwrap_or(NULL)),
        [other] => Err(unsupported("last", &other)),
    }
}

fn builtin_rest(values: Vec<Value>) -> BuiltinResult {
    match expect_arguments(values)? {
        [Value::Array(values)] if values.is_empty() => Ok(NULL),
        [Value::Array(values)] => Ok(Value::array(values[1..].to_vec())),
        [other] => Err(unsupported("rest", &other)),
    }
}

fn builtin_push(values: Vec<Value>) -> BuiltinResult {
    // Arrays are immutable, pushing builds a new array with the value appended
    match expect_arguments(values)? {
        [Value::Array(values), value] => {
            let mut values = values.as_ref().clone();
            values.push(value);
            Ok(Value::array(values))
        }
        [other, _] => Err(unsupported("push", &other)),
    }
}

fn builtin_puts(values: Vec<Value>) -> BuiltinResult {
    for value in values {
        println!("{}", value);
    }
    Ok(NULL)
}

const BUILTINS: [Builtin; 6] = [
    Builtin { name: "len", function: builtin_len },
    Builtin { name: "first", function: builtin_first },
    Builtin { name: "last", function: builtin_last },
    Builtin { name: "rest", function: builtin_rest },
    Builtin { name: "push", function: builtin_push },
    Builtin { name: "puts", function: builtin_puts },
];

// The outermost frame of every global environment. Builtins are atoms, but
// since they live in their own frame user code may still shadow them
pub(crate) fn builtin_frame() -> Environment {
    let frame = Environment::root();
    for builtin in BUILTINS {
        frame.define(BindKind::Atom, builtin.name, Value::Builtin(builtin));
    }
    frame
}
