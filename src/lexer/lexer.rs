use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

/// Handles a pattern match at the lexer's position.
///
/// Returns `None` when the matched text produces no token (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Patterns are anchored and tried in order, so two-character operators come first.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"?").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bang, "!") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Asterisk, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
    ];
}

/// Scans source text into tokens on demand.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Creates a token covering the next `len` bytes and moves past them.
    pub fn emit(&mut self, kind: TokenKind, value: String, len: usize) -> Token {
        let start = self.get_position();
        self.advance_n(len);

        MK_TOKEN!(
            kind,
            value,
            Span {
                start,
                end: self.get_position()
            }
        )
    }

    fn illegal(&mut self) -> Token {
        let ch = self.remainder().chars().next().unwrap_or('\0');
        self.emit(TokenKind::Illegal, ch.to_string(), ch.len_utf8())
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        'scan: while !self.at_eof() {
            for pattern in PATTERNS.iter() {
                if !pattern.regex.is_match(self.remainder()) {
                    continue;
                }

                match (pattern.handler)(self, &pattern.regex) {
                    Some(token) => return token,
                    None => continue 'scan,
                }
            }

            return self.illegal();
        }

        Token::eof(self.get_position())
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex
        .find(lexer.remainder())
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_default()
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
    None
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_text(lexer, regex);
    let len = matched.len();

    Some(lexer.emit(TokenKind::Int, matched, len))
}

// An unterminated string runs to the end of the input.
fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_text(lexer, regex);
    let len = matched.len();

    let inner = &matched[1..];
    let literal = inner.strip_suffix('"').unwrap_or(inner).to_string();

    Some(lexer.emit(TokenKind::String, literal, len))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = matched_text(lexer, regex);
    let len = value.len();

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Some(lexer.emit(kind, value, len))
}

/// Scans all of `source`, including the trailing `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
