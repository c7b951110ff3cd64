use crate::{
    ast::expressions::{
        ArrayLiteral, BooleanLiteral, CallExpr, Expression, FunctionLiteral, HashLiteral,
        Identifier, IfExpr, IndexExpr, InfixExpr, IntegerLiteral, PrefixExpr, StringLiteral,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Precedence climbing over the NUD/LED tables.
///
/// On entry the current token starts the expression; on success the current
/// token is the last one the expression consumed.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    parser.nested(|parser| parse_expr_at(parser, bp))
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParser { kind: token_kind },
            parser.get_position(),
        ));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && parser.peek_precedence() > bp {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        // Each fold makes the left operand one level deeper
        parser.enter_level()?;

        parser.advance();
        let operator_bp = parser.current_precedence();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token();

    match token.kind {
        TokenKind::Identifier => Ok(Expression::Identifier(Identifier::new(token.value.clone()))),
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expression::Integer(IntegerLiteral { value })),
            Err(_) => Err(Error::new(
                ErrorImpl::IntegerParse {
                    token: token.value.clone(),
                },
                parser.get_position(),
            )),
        },
        TokenKind::String => Ok(Expression::String(StringLiteral {
            value: token.value.clone(),
        })),
        TokenKind::True | TokenKind::False => Ok(Expression::Boolean(BooleanLiteral {
            value: token.kind == TokenKind::True,
        })),
        kind => Err(Error::new(
            ErrorImpl::NoPrefixParser { kind },
            parser.get_position(),
        )),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator = parser.current_token().value.clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expression::Prefix(PrefixExpr {
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expression::If(IfExpr {
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_params(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expression::Function(FunctionLiteral { parameters, body }))
}

// fn(a, b) - current token is `(` on entry and `)` on exit
fn parse_function_params(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = vec![];

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(Identifier::new(parser.current_token().value.clone()));

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(Identifier::new(parser.current_token().value.clone()));
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expression::Array(ArrayLiteral { elements }))
}

pub fn parse_hash_expr(parser: &mut Parser) -> Result<Expression, Error> {
    // { "one": 1, "two": 2 }
    let mut pairs = vec![];

    while !parser.peek_is(TokenKind::CloseCurly) {
        parser.advance();
        let key = parse_expr(parser, BindingPower::Lowest)?;

        parser.expect_peek(TokenKind::Colon)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Lowest)?;

        pairs.push((key, value));

        if !parser.peek_is(TokenKind::CloseCurly) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }

    parser.expect_peek(TokenKind::CloseCurly)?;

    Ok(Expression::Hash(HashLiteral { pairs }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.current_token().value.clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expression::Infix(InfixExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expression::Call(CallExpr {
        function: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseBracket)?;

    Ok(Expression::Index(IndexExpr {
        left: Box::new(left),
        index: Box::new(index),
    }))
}

/// Parses `expr, expr, ...` up to and including `end`.
///
/// The current token is the opening delimiter on entry and `end` on exit.
pub fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Result<Vec<Expression>, Error> {
    let mut list = vec![];

    if parser.peek_is(end) {
        parser.advance();
        return Ok(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Lowest)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Lowest)?);
    }

    parser.expect_peek(end)?;

    Ok(list)
}
