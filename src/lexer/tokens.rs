use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span, MK_TOKEN};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    EOF,

    Identifier,
    Int,
    String,

    Assign, // =
    Plus,
    Minus,
    Bang, // !
    Asterisk,
    Slash,

    Less,
    Greater,

    Equals,    // ==
    NotEquals, // !=

    Comma,
    Semicolon,
    Colon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    // Reserved
    Fn,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

/// Prints the symbolic name used in diagnostics, e.g. `=` or `IDENT`.
impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EOF => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Fn => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// Builds the end-of-input sentinel at `position`.
    pub fn eof(position: Position) -> Token {
        MK_TOKEN!(
            TokenKind::EOF,
            String::new(),
            Span {
                start: position.clone(),
                end: position
            }
        )
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Int,
            TokenKind::Illegal,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}

/// A pull-based supplier of tokens.
///
/// Once the input is exhausted every further call yields an `EOF` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Replays an already scanned list of tokens.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    end: Position,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|token| token.span.end.clone())
            .unwrap_or_else(Position::null);

        TokenStream {
            tokens: tokens.into_iter(),
            end,
        }
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => token,
            None => Token::eof(self.end.clone()),
        }
    }
}
