//! Error types for the front end.
//!
//! Every failure is a syntax error carrying the source position where the
//! lexer stood when it was detected. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and imports
//! - Helpful suggestions for display

pub mod errors;

#[cfg(test)]
mod tests;
