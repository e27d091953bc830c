use crate::{
    ast::Program,
    config::EvalConfig,
    environment::Environment,
    error::AtomError,
    interpreter::{eval_each, eval_program},
    parser::parse,
    scanner::Scanner,
    token::Token,
    value::Value,
};

/// Scans the whole source. The last token is always the single EOF.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).collect()
}

/// Evaluates each top-level statement of `program` in `environment`,
/// rendering every result. See [EvaluationContext::evaluate_lines] for the
/// variant that parses too.
pub fn evaluate(program: &Program, environment: &Environment) -> Vec<String> {
    eval_each(program, environment, &EvalConfig::default())
}

/// An evaluation session.
///
/// The context owns one global environment, so bindings made by one call are
/// visible to the next. Sources with parse diagnostics are never evaluated.
pub struct EvaluationContext {
    environment: Environment,
    config: EvalConfig,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self { environment: Environment::new(), config }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn parse_checked(source: &str) -> Result<Program, AtomError> {
        let (program, errors) = parse(source);
        if !errors.is_empty() { return Err(AtomError::Syntax(errors)); }
        Ok(program)
    }

    pub fn evaluate_program(&mut self, program: &Program) -> Result<Value, AtomError> {
        Ok(eval_program(program, &self.environment, &self.config)?)
    }

    /// Parses and evaluates `source`, returning the value of its last statement.
    pub fn evaluate_str(&mut self, source: &str) -> Result<Value, AtomError> {
        let program = Self::parse_checked(source)?;
        self.evaluate_program(&program)
    }

    /// Parses and evaluates `source`, returning one rendered result per
    /// top-level statement.
    pub fn evaluate_lines(&mut self, source: &str) -> Result<Vec<String>, AtomError> {
        let program = Self::parse_checked(source)?;
        Ok(eval_each(&program, &self.environment, &self.config))
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}
