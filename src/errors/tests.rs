//! Unit tests for error handling.
//!
//! This module contains tests for diagnostic messages, names and tips.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.lang".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::Illegal,
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "NoPrefixParser");
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::NoPrefixParser {
            kind: TokenKind::Illegal
        }
    );
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assign,
            got: TokenKind::Int,
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.lang");
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assign,
            got: TokenKind::Int,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "expected next token to be =, got INT instead"
    );
}

#[test]
fn test_no_prefix_parser_message() {
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::Asterisk,
        },
        at(0),
    );

    assert_eq!(error.to_string(), "no prefix parse function for * found");
}

#[test]
fn test_integer_parse_message() {
    let error = Error::new(
        ErrorImpl::IntegerParse {
            token: "99999999999999999999".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "IntegerParse");
    assert_eq!(
        error.to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
}

#[test]
fn test_unterminated_block_message() {
    let error = Error::new(ErrorImpl::UnterminatedBlock, at(0));

    assert_eq!(error.get_error_name(), "UnterminatedBlock");
    assert_eq!(error.to_string(), "expected next token to be }, got EOF instead");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::Illegal,
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            got: TokenKind::EOF,
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unexpected token `EOF`, expected `)`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_for_missing_expression_at_eof() {
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::EOF,
        },
        at(0),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Input ended where an expression was expected"
    );
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}

    takes_error(&Error::new(ErrorImpl::UnterminatedBlock, at(0)));
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 256 }, at(3));

    assert_eq!(error.to_string(), "expression nested deeper than 256 levels");
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(
        error.get_tip().to_string(),
        "Split the expression up with `let` bindings"
    );
    assert_eq!(error.get_position().0, 3);
}
