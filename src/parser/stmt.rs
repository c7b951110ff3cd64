use crate::{
    ast::{
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt, Statement},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses the statement starting at the current token.
///
/// Kinds with a registered statement handler use it, everything else is an
/// expression statement. On success the current token is the last one the
/// statement consumed.
pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token_kind = parser.current_token_kind();
    tracing::trace!(kind = %token_kind, "parsing statement");

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier::new(parser.current_token().value.clone());

    parser.expect_peek(TokenKind::Assign)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    while parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Let(LetStmt { name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    // return;
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
        return Ok(Statement::Return(ReturnStmt { value: None }));
    }

    // `return }` and `return<EOF>`: the closer belongs to the enclosing loop
    if parser.peek_token().is_one_of_many(&[TokenKind::CloseCurly, TokenKind::EOF]) {
        return Ok(Statement::Return(ReturnStmt { value: None }));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest)?;

    while parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Return(ReturnStmt { value: Some(value) }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Expression(ExpressionStmt { expression }))
}

/// Parses `{ ... }` with the current token on the `{`.
///
/// Statement errors inside the block are recorded and parsing continues with
/// the next token. Running into `EOF` before the closing `}` fails the whole
/// block.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.nested(parse_block_body)
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let mut body = vec![];
    parser.advance();

    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnterminatedBlock,
                parser.get_position(),
            ));
        }

        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => parser.record_error(error),
        }
        parser.advance();
    }

    tracing::trace!(statements = body.len(), "parsed block");

    Ok(BlockStmt { body })
}
