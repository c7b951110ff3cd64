use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A diagnostic recorded by the parser.
///
/// Diagnostics never stop the parse; they are collected in the order they occur.
/// The `Display` form is the message handed to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParser { .. } => "NoPrefixParser",
            ErrorImpl::IntegerParse { .. } => "IntegerParse",
            ErrorImpl::UnterminatedBlock => "UnterminatedBlock",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, got } => ErrorTip::Suggestion(format!(
                "Unexpected token `{}`, expected `{}`",
                got, expected
            )),
            ErrorImpl::NoPrefixParser { kind } => match kind {
                TokenKind::EOF => ErrorTip::Suggestion(String::from(
                    "Input ended where an expression was expected",
                )),
                TokenKind::Illegal => ErrorTip::None,
                _ => ErrorTip::Suggestion(format!("`{}` cannot start an expression", kind)),
            },
            ErrorImpl::IntegerParse { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnterminatedBlock => {
                ErrorTip::Suggestion(String::from("Block is never closed, did you miss a `}`?"))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression up with `let` bindings",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParser { kind: TokenKind },
    #[error("could not parse {token:?} as integer")]
    IntegerParse { token: String },
    #[error("expected next token to be }}, got EOF instead")]
    UnterminatedBlock,
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
