use logos::Logos;

use crate::token::{lookup_ident, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Logos)]
#[logos(skip r"[ \t\r\n]+")]
enum Lexeme {
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,

    #[regex("[A-Za-z_]+")]
    Word,

    #[regex("[0-9]+")]
    Number,

    #[token("\"", lex_text)]
    Text,
}

// A string runs to the next quote. Without one, the opening quote alone is illegal
fn lex_text(lexer: &mut logos::Lexer<'_, Lexeme>) -> bool {
    match lexer.remainder().find('"') {
        Some(end) => {
            lexer.bump(end + 1);
            true
        }
        None => false,
    }
}

impl Lexeme {
    fn kind(self, slice: &str) -> TokenKind {
        match self {
            Self::Eq => TokenKind::Eq,
            Self::NotEq => TokenKind::NotEq,
            Self::Assign => TokenKind::Assign,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Bang => TokenKind::Bang,
            Self::Asterisk => TokenKind::Asterisk,
            Self::Slash => TokenKind::Slash,
            Self::Lt => TokenKind::Lt,
            Self::Gt => TokenKind::Gt,
            Self::Comma => TokenKind::Comma,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Colon => TokenKind::Colon,
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::LeftBrace => TokenKind::LeftBrace,
            Self::RightBrace => TokenKind::RightBrace,
            Self::LeftBracket => TokenKind::LeftBracket,
            Self::RightBracket => TokenKind::RightBracket,
            Self::Word => lookup_ident(slice),
            Self::Number => TokenKind::Int,
            Self::Text => TokenKind::String,
        }
    }
}

/// A forward-only token stream over a source string.
///
/// Every call to [Scanner::next_token] consumes exactly one token. Once the
/// input is exhausted the scanner keeps handing out EOF tokens.
pub struct Scanner<'a> {
    lexer: logos::Lexer<'a, Lexeme>,
    finished: bool,
    emitted_eof: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexeme::lexer(source),
            finished: false,
            emitted_eof: false,
        }
    }

    pub fn next_token(&mut self) -> Token<'a> {
        if self.finished { return Token::eof(); }

        match self.lexer.next() {
            Some(Ok(Lexeme::Text)) => {
                // Strip the surrounding quotes, lex_text only accepts when both are present
                let slice = self.lexer.slice();
                Token::new(TokenKind::String, &slice[1..slice.len() - 1])
            }
            Some(Ok(lexeme)) => {
                let slice = self.lexer.slice();
                Token::new(lexeme.kind(slice), slice)
            }
            Some(Err(())) => Token::new(TokenKind::Illegal, self.lexer.slice()),
            None => {
                self.finished = true;
                Token::eof()
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    // Yields every token up to and including the first EOF
    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof { return None; }

        let token = self.next_token();
        if token.is(TokenKind::Eof) { self.emitted_eof = true; }
        Some(token)
    }
}
