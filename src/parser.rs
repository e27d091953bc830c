use std::rc::Rc;

use crate::{
    ast::{BindKind, BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement},
    scanner::Scanner,
    stack::ensure_sufficient_stack,
    token::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Self::Equals,
            TokenKind::Lt | TokenKind::Gt => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::LeftParen => Self::Call,
            TokenKind::LeftBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    Some(match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        _ => return None,
    })
}

// Deepest nesting of expressions, blocks included, the parser accepts
const MAX_NESTING: usize = 256;

// Failures are recorded in the parser's error list at the point they are
// detected, so the productions only need to signal that they gave up
type ParseResult<O> = Option<O>;

/// Precedence-climbing parser over a [Scanner].
///
/// The parser always holds two tokens of lookahead. Productions start with
/// their first token in `current` and finish with their last token in
/// `current`, leaving `peek` at whatever follows.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    errors: Vec<String>,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut scanner: Scanner<'a>) -> Self {
        let current = scanner.next_token();
        let peek = scanner.next_token();

        Self { scanner, current, peek, errors: Vec::new(), nesting: 0 }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current.is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(statement) => program.statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        program
    }

    fn next_token(&mut self) {
        self.current = self.peek;
        self.peek = self.scanner.next_token();
    }

    fn error(&mut self, message: String) {
        tracing::debug!(%message, "parse diagnostic");
        self.errors.push(message);
    }

    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek.is(kind) {
            self.next_token();
            return Some(());
        }

        self.error(format!("expected next token to be {}, got {} instead", kind, self.peek.kind));
        None
    }

    fn skip_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) { self.next_token(); }
    }

    // Skips the remains of a malformed statement. Stops on the terminating
    // semicolon, or just before the brace closing the enclosing block so the
    // block production can still consume it
    fn synchronize(&mut self) {
        while !self.current.is(TokenKind::Semicolon)
            && !self.current.is(TokenKind::Eof)
            && !self.peek.is(TokenKind::RightBrace)
            && !self.peek.is(TokenKind::Eof)
        {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Atom => self.parse_bind_statement(BindKind::Atom),
            TokenKind::Molecule => self.parse_bind_statement(BindKind::Molecule),
            TokenKind::Produce => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_bind_statement(&mut self, kind: BindKind) -> ParseResult<Statement> {
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current.literal.to_owned();
        self.expect_peek(TokenKind::Assign)?;

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Bind { kind, name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Return { value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Expression { expression })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        if self.nesting >= MAX_NESTING {
            self.error(format!("expression nested deeper than {} levels", MAX_NESTING));
            return None;
        }

        self.nesting += 1;
        let expression = ensure_sufficient_stack(|| self.parse_operators(precedence));
        self.nesting -= 1;
        expression
    }

    fn parse_operators(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek.is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek.kind) {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::identifier(self.current.literal)),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Some(Expression::String { value: self.current.literal.to_owned() }),
            TokenKind::True => Some(Expression::Boolean { value: true }),
            TokenKind::False => Some(Expression::Boolean { value: false }),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOperator::Bang),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOperator::Minus),
            TokenKind::LeftParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Reaction => self.parse_function_literal(),
            TokenKind::LeftBracket => {
                let elements = self.parse_expression_list(TokenKind::RightBracket)?;
                Some(Expression::Array { elements })
            }
            TokenKind::LeftBrace => self.parse_hash_literal(),
            kind => {
                self.error(format!("no parsing rule for token {}", kind));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::LeftParen => {
                let arguments = self.parse_expression_list(TokenKind::RightParen)?;
                Some(Expression::Call { callee: Box::new(left), arguments })
            }
            TokenKind::LeftBracket => {
                self.next_token();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::RightBracket)?;
                Some(Expression::Index { collection: Box::new(left), index: Box::new(index) })
            }
            kind => {
                // Only tokens with a precedence above Lowest reach this point,
                // and all of those besides calls and indexing are binary operators
                let Some(operator) = infix_operator(kind) else {
                    self.error(format!("no parsing rule for token {}", kind));
                    return None;
                };
                let precedence = Precedence::of(kind);
                self.next_token();
                let right = self.parse_expression(precedence)?;
                Some(Expression::infix(operator, left, right))
            }
        }
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(Expression::integer(value)),
            Err(_) => {
                self.error(format!("could not parse {} as integer", self.current.literal));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> ParseResult<Expression> {
        self.next_token();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::prefix(operator, operand))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;
        Some(expression)
    }

    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek.is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If { condition: Box::new(condition), consequence, alternative })
    }

    fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let mut block = BlockStatement::default();
        self.next_token();

        loop {
            match self.current.kind {
                TokenKind::RightBrace => return Some(block),
                TokenKind::Eof => {
                    self.error(format!("expected {} to close block, got {}", TokenKind::RightBrace, TokenKind::Eof));
                    return None;
                }
                _ => {}
            }

            match self.parse_statement() {
                Some(statement) => block.statements.push(statement),
                None => {
                    self.synchronize();
                    // A statement that failed on the closing brace itself
                    // leaves it as the current token
                    if self.current.is(TokenKind::RightBrace) { continue; }
                }
            }
            self.next_token();
        }
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block_statement()?;

        Some(Expression::Function { parameters: Rc::from(parameters), body: Rc::new(body) })
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Vec<String>> {
        let mut parameters = Vec::new();

        if self.peek.is(TokenKind::RightParen) {
            self.next_token();
            return Some(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current.literal.to_owned());

        while self.peek.is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current.literal.to_owned());
        }

        self.expect_peek(TokenKind::RightParen)?;
        Some(parameters)
    }

    // Parses a comma-separated list of expressions, starting on the opening
    // delimiter and finishing on `end`
    fn parse_expression_list(&mut self, end: TokenKind) -> ParseResult<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(list)
    }

    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let mut pairs = Vec::new();

        while !self.peek.is(TokenKind::RightBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek.is(TokenKind::RightBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RightBrace)?;
        Some(Expression::Hash { pairs })
    }
}

/// Parses a whole source string, returning the (possibly partial) program
/// together with every diagnostic produced along the way.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Scanner::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
