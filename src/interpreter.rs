use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{BindKind, BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement},
    config::EvalConfig,
    environment::Environment,
    error::{AtomError, RuntimeError},
    stack::ensure_sufficient_stack,
    value::{Closure, HashPair, Value, FALSE, NULL, TRUE},
};

// Anything that stops a block early. Both variants travel outward through
// `?` until a call boundary unwraps a return, or the driver sees either
pub(crate) enum Signal {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

pub(crate) type EvaluationResult = Result<Value, Signal>;

// Tracks how deeply expressions are nested, so runaway recursion in a script
// becomes an error. The stack itself grows on demand up to that depth
pub(crate) struct Depth {
    current: usize,
    limit: usize,
}

impl Depth {
    pub(crate) fn new(config: &EvalConfig) -> Self {
        Self { current: 0, limit: config.max_depth }
    }

    fn enter(&mut self) -> Result<(), RuntimeError> {
        if self.current >= self.limit { return Err(RuntimeError::RecursionLimit(self.limit)); }
        self.current += 1;
        Ok(())
    }

    fn exit(&mut self) {
        self.current -= 1;
    }
}

fn call_closure(closure: &Closure, arguments: Vec<Value>, depth: &mut Depth) -> EvaluationResult {
    // A call must receive one argument per parameter. The body runs in a new
    // frame enclosing the environment the closure captured, not the caller's
    if arguments.len() != closure.parameters.len() {
        return Err(RuntimeError::ArityMismatch { expected: closure.parameters.len(), got: arguments.len() }.into());
    }

    let environment = Environment::enclosed(&closure.environment);
    for (parameter, argument) in closure.parameters.iter().zip(arguments) {
        environment.define(BindKind::Atom, parameter, argument);
    }

    match evaluate_block(&closure.body.statements, &environment, depth) {
        Err(Signal::Return(value)) => Ok(value),
        result => result,
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(callee = function.type_name(), arguments = arguments.len()))]
fn apply_function(function: Value, arguments: Vec<Value>, depth: &mut Depth) -> EvaluationResult {
    match function {
        Value::Closure(closure) => call_closure(&closure, arguments, depth),
        Value::Builtin(builtin) => Ok(builtin.call(arguments)?),
        other => Err(RuntimeError::NotCallable(other.type_name()).into()),
    }
}

fn evaluate_prefix(operator: PrefixOperator, operand: Value) -> Result<Value, RuntimeError> {
    match (operator, operand) {
        (PrefixOperator::Bang, operand) => Ok(Value::from(!operand.is_truthy())),
        (PrefixOperator::Minus, Value::Integer(value)) => value.checked_neg()
            .map(Value::Integer)
            .ok_or(RuntimeError::NegationOverflow(value)),
        (PrefixOperator::Minus, operand) => Err(RuntimeError::UnknownPrefixOperator { operator, operand: operand.type_name() }),
    }
}

fn evaluate_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Result<Value, RuntimeError> {
    let overflow = || RuntimeError::IntegerOverflow { left, operator, right };

    Ok(match operator {
        InfixOperator::Plus => Value::Integer(left.checked_add(right).ok_or_else(overflow)?),
        InfixOperator::Minus => Value::Integer(left.checked_sub(right).ok_or_else(overflow)?),
        InfixOperator::Asterisk => Value::Integer(left.checked_mul(right).ok_or_else(overflow)?),
        InfixOperator::Slash => {
            if right == 0 { return Err(RuntimeError::DivisionByZero); }
            Value::Integer(left.checked_div(right).ok_or_else(overflow)?)
        }
        InfixOperator::Lt => Value::from(left < right),
        InfixOperator::Gt => Value::from(left > right),
        InfixOperator::Eq => Value::from(left == right),
        InfixOperator::NotEq => Value::from(left != right),
    })
}

fn evaluate_infix(operator: InfixOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    // Integers support arithmetic and ordering, strings concatenate, and the
    // remaining scalars only compare for equality. Operands of different
    // types never combine
    let unknown = |left: &Value, right: &Value| RuntimeError::UnknownInfixOperator {
        left: left.type_name(),
        operator,
        right: right.type_name(),
    };

    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => evaluate_integer_infix(operator, *a, *b),
        (Value::String(a), Value::String(b)) => match operator {
            InfixOperator::Plus => Ok(Value::String(Rc::from(format!("{}{}", a, b)))),
            InfixOperator::Eq => Ok(Value::from(a == b)),
            InfixOperator::NotEq => Ok(Value::from(a != b)),
            _ => Err(unknown(&left, &right)),
        },
        (Value::Boolean(_), Value::Boolean(_)) | (Value::Null, Value::Null) => match operator {
            InfixOperator::Eq => Ok(Value::from(left == right)),
            InfixOperator::NotEq => Ok(Value::from(left != right)),
            _ => Err(unknown(&left, &right)),
        },
        _ if left.type_name() != right.type_name() => Err(RuntimeError::TypeMismatch {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
        _ => Err(unknown(&left, &right)),
    }
}

fn evaluate_index(collection: Value, index: Value) -> Result<Value, RuntimeError> {
    match (&collection, &index) {
        (Value::Array(values), Value::Integer(position)) => Ok(usize::try_from(*position).ok()
            .and_then(|position| values.get(position))
            .cloned()
            .unwrap_or(NULL)),
        (Value::Hash(pairs), key) => Ok(pairs.get(&key.hash_key()?)
            .map(|pair| pair.value.clone())
            .unwrap_or(NULL)),
        (other, _) => Err(RuntimeError::IndexNotSupported(other.type_name())),
    }
}

fn evaluate_if(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    environment: &Environment,
    depth: &mut Depth,
) -> EvaluationResult {
    // The chosen branch gets its own frame, so bindings made inside it don't
    // leak into the surrounding scope
    let branch = if evaluate_expression(condition, environment, depth)?.is_truthy() {
        consequence
    } else {
        match alternative {
            Some(alternative) => alternative,
            None => return Ok(NULL),
        }
    };

    evaluate_block(&branch.statements, &Environment::enclosed(environment), depth)
}

fn evaluate_hash(pairs: &[(Expression, Expression)], environment: &Environment, depth: &mut Depth) -> EvaluationResult {
    let mut hash = HashMap::with_capacity(pairs.len());

    for (key, value) in pairs {
        let key = evaluate_expression(key, environment, depth)?;
        let hash_key = key.hash_key()?;
        let value = evaluate_expression(value, environment, depth)?;
        hash.insert(hash_key, HashPair { key, value });
    }

    Ok(Value::Hash(Rc::new(hash)))
}

fn evaluate_list(list: &[Expression], environment: &Environment, depth: &mut Depth) -> Result<Vec<Value>, Signal> {
    list.iter()
        .map(|expression| evaluate_expression(expression, environment, depth))
        .collect()
}

fn evaluate_expression(expression: &Expression, environment: &Environment, depth: &mut Depth) -> EvaluationResult {
    depth.enter()?;
    let result = ensure_sufficient_stack(|| evaluate_expression_kind(expression, environment, depth));
    depth.exit();
    result
}

fn evaluate_expression_kind(expression: &Expression, environment: &Environment, depth: &mut Depth) -> EvaluationResult {
    match expression {
        Expression::Identifier { name } => environment.get(name)
            .ok_or_else(|| Signal::from(RuntimeError::IdentifierNotFound(name.clone()))),
        Expression::Integer { value } => Ok(Value::Integer(*value)),
        Expression::String { value } => Ok(Value::string(value)),
        Expression::Boolean { value } => Ok(if *value { TRUE } else { FALSE }),
        Expression::Prefix { operator, operand } => {
            let operand = evaluate_expression(operand, environment, depth)?;
            Ok(evaluate_prefix(*operator, operand)?)
        }
        Expression::Infix { operator, left, right } => {
            let left = evaluate_expression(left, environment, depth)?;
            let right = evaluate_expression(right, environment, depth)?;
            Ok(evaluate_infix(*operator, left, right)?)
        }
        Expression::If { condition, consequence, alternative } =>
            evaluate_if(condition, consequence, alternative.as_ref(), environment, depth),
        Expression::Function { parameters, body } => Ok(Value::Closure(Rc::new(Closure {
            parameters: parameters.clone(),
            body: body.clone(),
            environment: environment.clone(),
        }))),
        Expression::Call { callee, arguments } => {
            let function = evaluate_expression(callee, environment, depth)?;
            let arguments = evaluate_list(arguments, environment, depth)?;
            apply_function(function, arguments, depth)
        }
        Expression::Array { elements } => Ok(Value::array(evaluate_list(elements, environment, depth)?)),
        Expression::Index { collection, index } => {
            let collection = evaluate_expression(collection, environment, depth)?;
            let index = evaluate_expression(index, environment, depth)?;
            Ok(evaluate_index(collection, index)?)
        }
        Expression::Hash { pairs } => evaluate_hash(pairs, environment, depth),
    }
}

fn evaluate_statement(statement: &Statement, environment: &Environment, depth: &mut Depth) -> EvaluationResult {
    match statement {
        Statement::Expression { expression } => evaluate_expression(expression, environment, depth),
        Statement::Bind { kind, name, value } => {
            let value = evaluate_expression(value, environment, depth)?;
            environment.bind(*kind, name, value)?;
            Ok(NULL)
        }
        Statement::Return { value } => Err(Signal::Return(evaluate_expression(value, environment, depth)?)),
    }
}

// Statements run in order in one environment and the block takes the value of
// the last one. A return or an error skips whatever is left
fn evaluate_block(statements: &[Statement], environment: &Environment, depth: &mut Depth) -> EvaluationResult {
    let mut result = NULL;
    for statement in statements {
        result = evaluate_statement(statement, environment, depth)?;
    }
    Ok(result)
}

/// Evaluates a whole program, returning the value of its last statement. A
/// top-level `produce` ends the program with its value.
pub fn eval_program(program: &Program, environment: &Environment, config: &EvalConfig) -> Result<Value, RuntimeError> {
    tracing::trace!(statements = program.statements.len(), "evaluating program");

    let mut depth = Depth::new(config);
    let result = match evaluate_block(&program.statements, environment, &mut depth) {
        Ok(value) | Err(Signal::Return(value)) => Ok(value),
        Err(Signal::Error(error)) => Err(error),
    };

    tracing::trace!(ok = result.is_ok(), "program finished");
    result
}

/// Evaluates a program statement by statement, rendering each result. Stops
/// after the first statement that errors or produces.
pub fn eval_each(program: &Program, environment: &Environment, config: &EvalConfig) -> Vec<String> {
    let mut depth = Depth::new(config);
    let mut output = Vec::with_capacity(program.statements.len());

    for statement in &program.statements {
        match evaluate_statement(statement, environment, &mut depth) {
            Ok(value) => output.push(value.to_string()),
            Err(Signal::Return(value)) => {
                output.push(value.to_string());
                break;
            }
            Err(Signal::Error(error)) => {
                output.push(AtomError::Runtime(error).to_string());
                break;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use crate::{context::EvaluationContext, error::ErrorKind, parser::parse, test_utils::{all_testcases, load_test_pair, TestOutput}};

    use super::*;

    fn run_with(source: &str, config: &EvalConfig) -> Result<Value, RuntimeError> {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "{:?} produced diagnostics {:?}", source, errors);
        eval_program(&program, &Environment::new(), config)
    }

    fn run(source: &str) -> Result<Value, RuntimeError> {
        run_with(source, &EvalConfig::default())
    }

    fn assert_integer(source: &str, expected: i64) {
        assert_eq!(run(source), Ok(Value::Integer(expected)), "source {:?}", source);
    }

    fn assert_boolean(source: &str, expected: bool) {
        assert_eq!(run(source), Ok(Value::from(expected)), "source {:?}", source);
    }

    fn assert_error(source: &str, expected: &str) {
        match run(source) {
            Err(error) => assert_eq!(error.to_string(), expected, "source {:?}", source),
            Ok(value) => panic!("{:?} evaluated to {:?}, expected an error", source, value),
        }
    }

    #[test]
    fn literals() {
        assert_integer("5", 5);
        assert_boolean("true", true);
        assert_boolean("false", false);
        assert_eq!(run("\"hi\""), Ok(Value::string("hi")));
        assert_eq!(run(""), Ok(NULL));
    }

    #[test]
    fn prefix_operators() {
        assert_boolean("!true", false);
        assert_boolean("!false", true);
        assert_boolean("!5", false);
        assert_boolean("!0", false);
        assert_boolean("!!5", true);
        assert_integer("-5", -5);
        assert_integer("--5", 5);
        assert_error("-true", "unknown operator: -BOOLEAN");
        assert_error("-\"a\"", "unknown operator: -STRING");
    }

    #[test]
    fn integer_arithmetic() {
        assert_integer("5 + 5 + 5 + 5 - 10", 10);
        assert_integer("2 * 2 * 2 * 2 * 2", 32);
        assert_integer("-50 + 100 + -50", 0);
        assert_integer("20 + 2 * -10", 0);
        assert_integer("50 / 2 * 2 + 10", 60);
        assert_integer("3 * (3 * 3) + 10", 37);
        assert_integer("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
        assert_integer("7 / 2", 3);
        assert_integer("-7 / 2", -3);
        assert_error("1 / 0", "division by zero");
        assert_error("9223372036854775807 + 1", "integer overflow: 9223372036854775807 + 1");
        assert_error("-(0 - 9223372036854775807 - 1)", "integer overflow: --9223372036854775808");
    }

    #[test]
    fn comparisons() {
        assert_boolean("1 < 2", true);
        assert_boolean("1 > 2", false);
        assert_boolean("1 == 1", true);
        assert_boolean("1 != 1", false);
        assert_boolean("true == true", true);
        assert_boolean("true != false", true);
        assert_boolean("(1 < 2) == true", true);
        assert_boolean("(1 > 2) == true", false);
        assert_boolean("\"a\" == \"a\"", true);
        assert_boolean("\"a\" != \"b\"", true);
        assert_error("true < false", "unknown operator: BOOLEAN < BOOLEAN");
        assert_error("1 == true", "type mismatch: INTEGER == BOOLEAN");
        assert_error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
        assert_error("true + false", "unknown operator: BOOLEAN + BOOLEAN");
    }

    #[test]
    fn strings_concatenate() {
        assert_eq!(run("\"Hello\" + \" \" + \"World!\""), Ok(Value::string("Hello World!")));
        assert_error("\"a\" - \"b\"", "unknown operator: STRING - STRING");
    }

    #[test]
    fn conditionals() {
        assert_integer("if (true) { 10 }", 10);
        assert_eq!(run("if (false) { 10 }"), Ok(NULL));
        assert_integer("if (1) { 10 }", 10);
        assert_integer("if (0) { 10 } else { 20 }", 10);
        assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
        assert_eq!(run("if (if (false) { 1 }) { 10 }"), Ok(NULL));
    }

    #[test]
    fn produce_stops_evaluation() {
        assert_integer("produce 10; 9;", 10);
        assert_integer("9; produce 2 * 5; 9;", 10);
        assert_integer("if (10 > 1) { if (10 > 1) { produce 10; } produce 1; }", 10);
        assert_integer("atom f = reaction(x) { produce x; x + 10; }; f(10);", 10);
        assert_integer("atom f = reaction(x) { atom result = x + 10; produce result; produce 10; }; f(10);", 20);
    }

    #[test]
    fn errors_propagate_outward() {
        assert_error("if (10 > 1) { true + false; 10 }", "unknown operator: BOOLEAN + BOOLEAN");
        assert_error("atom f = reaction() { missing }; f() + 1", "identifier not found: missing");
        assert_error("[1, missing, 3]", "identifier not found: missing");
        assert_error("foobar", "identifier not found: foobar");
    }

    #[test]
    fn bindings() {
        assert_integer("atom a = 5; a;", 5);
        assert_integer("atom a = 5 * 5; a;", 25);
        assert_integer("atom a = 5; atom b = a; atom c = a + b + 5; c;", 15);
        assert_integer("atom a = 5; a + 1;", 6);
        assert_eq!(run("atom a = 5;"), Ok(NULL));
    }

    #[test]
    fn atoms_are_immutable() {
        assert_error("atom a = 5; atom a = 6;", "cannot redeclare atom a");
        assert_error("atom a = 5; molecule a = 6;", "cannot reassign atom a");
        assert_error("molecule a = 5; atom a = 6;", "cannot redeclare atom a");
        assert_error("atom f = reaction(x) { atom x = 1; x }; f(2)", "cannot redeclare atom x");
        assert_integer("atom a = 5; if (true) { atom a = 6; a }", 6);
        assert_integer("atom a = 5; if (true) { atom a = 6; } a", 5);
    }

    #[test]
    fn molecules_are_mutable() {
        assert_integer("molecule a = 5; molecule a = 6; a;", 6);
        assert_integer("molecule a = 5; if (true) { molecule a = a + 1; } a", 6);
        assert_integer("molecule a = 1; atom bump = reaction() { molecule a = a * 10; }; bump(); bump(); a", 100);
        assert_integer("if (true) { molecule fresh = 1; } molecule fresh = 2; fresh", 2);
        assert_error("if (true) { molecule scoped = 1; } scoped", "identifier not found: scoped");
    }

    #[test]
    fn functions() {
        assert_integer("atom identity = reaction(x) { x; }; identity(5);", 5);
        assert_integer("atom identity = reaction(x) { produce x; }; identity(5);", 5);
        assert_integer("atom double = reaction(x) { x * 2; }; double(5);", 10);
        assert_integer("atom add = reaction(x, y) { x + y; }; add(5, 5);", 10);
        assert_integer("atom add = reaction(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20);
        assert_integer("reaction(x) { x; }(5)", 5);
        assert_eq!(run("reaction() { }()"), Ok(NULL));
        assert_eq!(run("reaction(x) { x }").map(|value| value.to_string()), Ok("reaction(x) { x; }".to_owned()));
    }

    #[test]
    fn call_errors() {
        assert_error("5(1)", "not a function: INTEGER");
        assert_error("atom f = reaction(x) { x }; f()", "wrong number of arguments: want=1, got=0");
        assert_error("atom f = reaction() { 1 }; f(1, 2)", "wrong number of arguments: want=0, got=2");
    }

    #[test]
    fn closures_capture_by_reference() {
        assert_integer("atom make = reaction(x) { reaction() { produce x; } }; atom f = make(5); f();", 5);
        assert_integer("atom adder = reaction(x) { reaction(y) { x + y } }; atom add_two = adder(2); add_two(3)", 5);
        assert_integer("molecule n = 1; atom get = reaction() { n }; molecule n = 2; get()", 2);
        assert_integer(
            "atom counter = reaction() { molecule count = 0; reaction() { molecule count = count + 1; count } }; \
             atom tick = counter(); tick(); tick(); tick()",
            3,
        );
    }

    #[test]
    fn scoping_is_lexical() {
        // `y` is visible where `f` is called, but not where `f` was written
        assert_error("atom f = reaction() { y }; atom g = reaction(y) { f() }; g(1)", "identifier not found: y");
    }

    #[test]
    fn recursion() {
        assert_integer("atom fact = reaction(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(10)", 3628800);
        assert_integer("atom fib = reaction(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } }; fib(15)", 610);
    }

    #[test]
    fn runaway_recursion_hits_the_limit() {
        let config = EvalConfig { max_depth: 64 };
        assert_eq!(
            run_with("atom forever = reaction(n) { forever(n + 1) }; forever(0)", &config),
            Err(RuntimeError::RecursionLimit(64))
        );
        assert_eq!(run_with("atom f = reaction(n) { if (n < 2) { 1 } else { f(n - 1) } }; f(5)", &config), Ok(Value::Integer(1)));
    }

    // Spawned threads get far less stack than the main thread
    fn on_small_thread<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn default_limit_fails_cleanly_off_the_main_thread() {
        let result = on_small_thread(|| {
            run("atom forever = reaction(n) { if (n < 0) { 0 } else { forever(n + 1) + 0 } }; forever(0)")
                .map(|value| value.to_string())
        });
        assert_eq!(result, Err(RuntimeError::RecursionLimit(EvalConfig::default().max_depth)));
    }

    #[test]
    fn raised_limit_allows_deep_recursion() {
        let result = on_small_thread(|| {
            let config = EvalConfig { max_depth: 100_000 };
            run_with("atom count = reaction(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } }; count(5000)", &config)
                .map(|value| value.to_string())
        });
        assert_eq!(result, Ok("5000".to_owned()));
    }

    #[test]
    fn collections() {
        assert_eq!(run("[1, 2 * 2, 3 + 3]").map(|value| value.to_string()), Ok("[1, 4, 6]".to_owned()));
        assert_integer("[1, 2, 3][0]", 1);
        assert_integer("[1, 2, 3][1 + 1]", 3);
        assert_integer("atom a = [1, 2, 3]; a[0] + a[1] + a[2]", 6);
        assert_eq!(run("[1, 2, 3][3]"), Ok(NULL));
        assert_eq!(run("[1, 2, 3][-1]"), Ok(NULL));

        assert_integer("{\"one\": 1, \"two\": 2}[\"two\"]", 2);
        assert_integer("atom key = \"k\"; {key: 5}[\"k\"]", 5);
        assert_integer("{4: 4}[4]", 4);
        assert_integer("{true: 5}[true]", 5);
        assert_eq!(run("{\"a\": 1}[\"b\"]"), Ok(NULL));
        assert_eq!(run("{}[1]"), Ok(NULL));

        assert_error("{\"a\": 1}[reaction(x) { x }]", "unusable as hash key: REACTION");
        assert_error("{[1]: 2}", "unusable as hash key: ARRAY");
        assert_error("1[0]", "index operator not supported: INTEGER");
        assert_error("[1] + [2]", "unknown operator: ARRAY + ARRAY");
    }

    #[test]
    fn builtins() {
        assert_integer("len(\"hello\")", 5);
        assert_integer("len([1, 2, 3])", 3);
        assert_integer("first(rest(push([1, 2], 3)))", 2);
        assert_error("len(1)", "argument to len not supported, got INTEGER");
        assert_error("len()", "wrong number of arguments: want=1, got=0");
        assert_integer("atom len = reaction(x) { 0 }; len(\"shadowed\")", 0);
        assert_eq!(run("len").map(|value| value.to_string()), Ok("builtin len".to_owned()));
    }

    #[test]
    fn each_statement_renders() {
        let environment = Environment::new();
        let (program, _) = parse("atom a = 5; a + 1; \"text\"; missing; a");
        assert_eq!(
            eval_each(&program, &environment, &EvalConfig::default()),
            vec!["null", "6", "text", "ERROR: identifier not found: missing"]
        );

        let (program, _) = parse("1; produce 2; 3");
        assert_eq!(eval_each(&program, &environment, &EvalConfig::default()), vec!["1", "2"]);
    }

    fn compare(value: &Value, expected: &TestOutput) -> bool {
        match expected {
            TestOutput::Anything => true,
            TestOutput::Text(text) => value.to_string() == *text,
        }
    }

    fn assert_run(testcase: usize, entries: &[(String, Result<TestOutput, ErrorKind>)]) -> anyhow::Result<()> {
        let mut context = EvaluationContext::new();
        for (lineno, (source, expected)) in entries.iter().enumerate() {
            let result = context.evaluate_str(source);

            match (&result, expected) {
                (Ok(value), Ok(output)) => assert!(
                    compare(value, output),
                    "Testcase({}, {}): Got {:?}, expected {:?}", testcase, lineno, result, expected
                ),
                (Err(error), Err(kind)) => assert_eq!(
                    error.kind(), *kind,
                    "Testcase({}, {}): Got {:?}, expected {:?}", testcase, lineno, result, expected
                ),
                _ => bail!("Testcase({}, {}): Got {:?}, expected {:?}", testcase, lineno, result, expected),
            }
        }

        Ok(())
    }

    #[test]
    fn evaluate_testcases() -> anyhow::Result<()> {
        for testcase in all_testcases() {
            println!("Running testcase {}", testcase);
            let entries = load_test_pair(testcase)?;
            assert_run(testcase, &entries)?;
        }

        Ok(())
    }
}
