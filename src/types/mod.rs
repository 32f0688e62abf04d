//! Semantic type model.
//!
//! This module defines the types values can have and the typed constants the
//! parser builds from literals:
//!
//! - Primitive types (`void`, `bool`, `char`, `int`, `float`)
//! - Pointer, array and class types
//! - Constants: a type plus the raw bytes of the value
//!
//! Types and constants are arena-allocated and immutable once built; they are
//! only ever referred to through handles.

pub mod constant;
pub mod types;

#[cfg(test)]
mod tests;
