//! Lexical analysis module for the front end.
//!
//! This module contains the reference scanner that turns source text into
//! tokens for the parser. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! The parser only depends on the `TokenSource` trait, so any pull-based
//! supplier of tokens can stand in for the `Lexer`.

pub mod lexer;
pub mod tokens;
