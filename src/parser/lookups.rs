use std::collections::HashMap;

use crate::{
    ast::{expressions::Expression, statements::Statement},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding power of an operator; higher binds tighter.
///
/// Kinds without an infix entry in the lookup table bind at `Lowest`.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expression, Error>;
pub type LEDHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equals, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equals, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::LessGreater, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::LessGreater, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Sum, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Sum, parse_binary_expr);
    parser.led(TokenKind::Asterisk, BindingPower::Product, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Product, parse_binary_expr);

    // Mixed-fix
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Index, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Int, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Fn, parse_function_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::OpenCurly, parse_hash_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
