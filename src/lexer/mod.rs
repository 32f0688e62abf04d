//! Lexical analysis.
//!
//! Converts source text into a stream of tokens for the parser. It handles:
//!
//! - Tokenization with an ordered list of anchored regex patterns
//! - Keywords, identifiers, literals and operators (including `and`, `or`, ...)
//! - Buffered lookahead with rewind for the parser
//! - Comments and whitespace

pub mod lexer;
pub mod operators;
pub mod tokens;

#[cfg(test)]
mod tests;
