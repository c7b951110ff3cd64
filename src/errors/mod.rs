//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics recorded while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each diagnostic category
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
