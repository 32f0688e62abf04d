//! Type parsing.
//!
//! A type is a base name followed by any number of suffixes:
//!
//! - `*` wraps the type in a pointer
//! - `[expr]` wraps it in a sized array, `[]` in an unsized one
//!
//! The suffix loop is shared with variable declarations, where every
//! declarator may add its own suffixes to the common base type.

use crate::{
    ast::{
        node::{TreeError, TypeExprRef},
        types::TypeExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{operators::Operator, tokens::TokenKind},
};

use super::{expr::parse_expr, lookups::PRIMITIVE_LOOKUP, parser::Parser};

/// Parses a complete type: base name and suffixes.
pub fn parse_type(parser: &mut Parser) -> Result<TypeExprRef, Error> {
    let base = parse_type_base(parser)?;
    parse_type_suffixes(parser, base)
}

/// Parses the base name of a type.
///
/// Primitive names map to the canonical primitive types, any other name must
/// already be in the session's type-name table.
pub fn parse_type_base(parser: &mut Parser) -> Result<TypeExprRef, Error> {
    let TokenKind::Id(name) = parser.current_token_kind().clone() else {
        return Err(parser.error(ErrorImpl::TypeNameRequired {
            found: parser.current_token().to_string(),
        }));
    };

    let ty = if let Some(id) = PRIMITIVE_LOOKUP.get(name.as_str()) {
        TypeExpr::Primitive(parser.context().primitive(*id))
    } else if parser.session().is_type_name(&name) {
        TypeExpr::Class(name)
    } else {
        return Err(parser.error(ErrorImpl::TypeUndefined {
            name: name.to_string(),
        }));
    };

    parser.advance()?;
    finish_type(parser, ty)
}

/// Wraps `base` in every `*`, `[expr]` and `[]` suffix that follows.
pub fn parse_type_suffixes(parser: &mut Parser, base: TypeExprRef) -> Result<TypeExprRef, Error> {
    let mut ty = base;

    loop {
        if parser.try_match(Operator::Mul)? {
            ty = finish_type(parser, TypeExpr::Pointer(ty))?;
        } else if parser.try_match(Operator::Index)? {
            let size = if parser.try_match(Operator::RIndex)? {
                None
            } else {
                let size = parse_expr(parser)?;
                parser.expect(Operator::RIndex)?;
                Some(size)
            };

            ty = finish_type(parser, TypeExpr::Array { element: ty, size })?;
        } else {
            return Ok(ty);
        }
    }
}

fn finish_type(parser: &Parser, ty: TypeExpr) -> Result<TypeExprRef, Error> {
    let node = parser.alloc(ty).freeze();
    parser.tree(node.into_type_expr().map_err(|_| TreeError::WrongCategory))
}
