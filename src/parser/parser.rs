//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenSource},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest nesting of expressions and blocks the parser descends into.
pub const MAX_NESTING: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// This struct pulls tokens from its source on demand, keeping the current
/// token and one token of lookahead. It owns the handler lookup tables and
/// the diagnostics recorded so far.
pub struct Parser {
    /// Where tokens come from
    source: Box<dyn TokenSource>,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were recorded
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Current nesting of `parse_expr` and `parse_block_stmt`
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// Registers every handler and primes the current and peek tokens.
    ///
    /// # Arguments
    ///
    /// * `source` - The token source to pull from
    pub fn new(source: impl TokenSource + 'static) -> Self {
        let mut parser = Parser {
            source: Box::new(source),
            current: Token::eof(Position::null()),
            peek: Token::eof(Position::null()),
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            depth: 0,
        };
        create_token_lookups(&mut parser);

        tracing::trace!(
            stmt = parser.stmt_lookup.len(),
            nud = parser.nud_lookup.len(),
            led = parser.led_lookup.len(),
            "registered parse handlers"
        );

        parser.advance();
        parser.advance();
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts the lookahead into the current slot and pulls a new lookahead.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances if the lookahead is of the expected kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    ///
    /// # Returns
    ///
    /// Returns Ok(()) after advancing, otherwise an unexpected-token Error
    /// positioned at the lookahead. The parser does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_is(expected_kind) {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    got: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    /// Binding power of the current token.
    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current.kind)
    }

    /// Binding power of the lookahead token.
    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Records a diagnostic and keeps going.
    pub fn record_error(&mut self, error: Error) {
        tracing::debug!(
            name = error.get_error_name(),
            position = error.get_position().0,
            "{}",
            error
        );
        self.errors.push(error);
    }

    /// Returns the diagnostics recorded so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Parses the rest of the input and hands back the tree with every
    /// diagnostic recorded along the way.
    pub fn into_parsed(mut self) -> Parsed {
        let program = self.parse_program();

        Parsed {
            program,
            errors: self.errors,
        }
    }

    /// Runs `parse_fn` one nesting level deeper.
    ///
    /// Levels opened inside `parse_fn` with `enter_level` are closed again when
    /// it returns, whether it succeeded or not.
    pub fn nested<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let saved = self.depth;
        self.enter_level()?;

        let result = parse_fn(self);
        self.depth = saved;

        result
    }

    /// Opens one more level of nesting.
    ///
    /// Fails with `NestingTooDeep` at the current token once `MAX_NESTING`
    /// levels are open, so deeply nested input cannot exhaust the stack.
    pub fn enter_level(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power alone, since `(` and `[`
    /// are both prefix and infix triggers.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Parses statements until the end of input.
    ///
    /// A failing statement is recorded and skipped. Every iteration advances at
    /// least one token, so the loop always reaches `EOF`.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => self.record_error(error),
            }
            self.advance();
        }

        tracing::trace!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Program { statements }
    }
}

/// The outcome of one parse: the tree plus every diagnostic recorded on the way.
///
/// When `errors` is non-empty the program may be missing statements and must
/// not be evaluated.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<Error>,
}

impl Parsed {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Diagnostic messages in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// parses every statement until EOF and hands back the program together with
/// the diagnostics.
///
/// # Arguments
///
/// * `source` - The token source to parse
pub fn parse(source: impl TokenSource + 'static) -> Parsed {
    Parser::new(source).into_parsed()
}

/// Scans and parses source text with the reference lexer.
pub fn parse_source(source: String, file: Option<String>) -> Parsed {
    parse(Lexer::new(source, file))
}
