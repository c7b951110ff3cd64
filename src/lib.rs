#![allow(clippy::module_inception)]

use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing a byte offset of `source`.
///
/// Returns the 1-based line number, the line text and the offset within that line.
/// Offsets at or past the end of the input point just after the text of the last line,
/// which is where the scanner places `EOF`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut last = None;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        last = Some((index + 1, line.to_string(), line.trim_end_matches(['\r', '\n']).len()));
        start = end;
    }

    last
}


/// Renders a diagnostic against the source it was produced from.
///
/// ```text
/// Error: expected next token to be =, got INT instead
/// -> final.lang
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    ErrorReport {
        error,
        source,
        file,
    }
    .to_string()
}

/// A diagnostic paired with the source and file name it points into.
pub struct ErrorReport<'a> {
    pub error: &'a Error,
    pub source: &'a str,
    pub file: &'a str,
}

impl Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.error)?;
        writeln!(f, "-> {}", self.file)?;

        if let Some((line, line_text, line_pos)) =
            get_line_at_position(self.source, self.error.get_position().0)
        {
            let line_string = line.to_string();
            let padding = line_string.len() + 2;

            writeln!(f, "{:>padding$}", "|")?;

            let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
            writeln!(f, "{} | {}", line_string, line_text_removed.trim())?;

            // Caret column in characters, not bytes
            let column = line_text
                .get(..line_pos)
                .map(|prefix| prefix.chars().count())
                .unwrap_or(line_pos);
            let arrows = column.saturating_sub(removed_whitespace) + 1;

            writeln!(f, "{:>padding$} {:->arrows$}", "|", "^")?;
        }

        if let ErrorTip::Suggestion(tip) = self.error.get_tip() {
            writeln!(f, "tip: {}", tip)?;
        }

        Ok(())
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
