//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive descent parser that pulls tokens from
//! the lexer and allocates nodes in the session's arena. It handles:
//!
//! - Expressions, with prefix and postfix chains assembled by `ExprBuilder`
//!   and binary operators ordered by an explicit operator stack
//! - Types, variable declarations and initializer lists
//! - Statements, blocks, functions, classes and imports
//!
//! Whether a leading identifier starts a declaration depends on the set of
//! type names declared so far, so classes must be declared before use.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
