//! Source reading for the lexer.
//!
//! A cursor over an immutable source buffer. Besides plain cursor movement
//! it answers line/column queries, which are only used when reporting errors.

pub mod reader;
