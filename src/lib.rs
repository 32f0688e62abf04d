#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorTip},
    reader::reader::SourceReader,
};

pub mod arena;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod reader;
pub mod session;
pub mod types;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Renders an error with the source line it points into.
///
/// ```text
/// Error: OperandRequired: operand required, found ";" (Expected a value or identifier, found `;`)
/// -> main.csl
///   |
/// 3 | x = x + ;
///   | --------^
/// ```
///
/// # Arguments
///
/// * `error` - The error to render
/// * `source` - Text of the source the error position points into
/// * `file` - Name printed on the location line
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    let reader = SourceReader::new(source);
    let position = error.get_position().0 as usize;

    let line = reader.line_of(position);
    let line_text = reader.line_text(position);
    let column = reader.column_of(position);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = match error.get_tip() {
        ErrorTip::None => format!("Error: {}: {}\n", error.get_error_name(), error.message()),
        tip => format!(
            "Error: {}: {} ({})\n",
            error.get_error_name(),
            error.message(),
            tip
        ),
    };
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let trimmed = line_text.trim_start_matches(' ');
    let removed_whitespace = line_text.len() - trimmed.len();
    out.push_str(&format!("{} | {}\n", line_string, trimmed.trim_end()));

    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    out
}
