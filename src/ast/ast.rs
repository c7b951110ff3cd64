use std::fmt::{Display, Formatter, Result};

use super::statements::Statement;

/// Node Trait
///
/// Implemented by every node of the tree. `Display` gives the canonical rendering,
/// which parses back into a tree with the same rendering.
pub trait Node: Display {
    /// Returns the literal of the token the node starts with.
    fn token_literal(&self) -> String;
}

/// Writes items separated by `, `.
pub(crate) fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }

    Ok(())
}

/// Writes a statement sequence.
///
/// Expression statements carry no terminator of their own, so one is added
/// whenever another statement follows.
pub(crate) fn write_statements(f: &mut Formatter<'_>, statements: &[Statement]) -> Result {
    for (index, statement) in statements.iter().enumerate() {
        if index > 0 {
            match statements[index - 1] {
                Statement::Expression(_) => write!(f, "; ")?,
                _ => write!(f, " ")?,
            }
        }
        write!(f, "{}", statement)?;
    }

    Ok(())
}
