use crate::{
    ast::{
        node::{ExprRef, NodeMut, NodeRef},
        statements::{BlockStmt, ForStmt, IfStmt, ReturnStmt, Stmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        operators::Operator,
        tokens::{Keyword, TokenKind},
    },
};

use super::{decl::parse_var_decl, expr::parse_expr, parser::Parser};

/// Decides whether the current token starts a variable declaration.
///
/// A declared type name starts one, unless it is called (`T(...)`) or
/// multiplied by something that cannot be a declarator (`T * 2`). An unknown
/// name starts one only when what follows cannot be an expression, so that
/// it is reported as an undefined type rather than as a missing `;`.
pub fn is_declaration_start(parser: &mut Parser) -> Result<bool, Error> {
    let TokenKind::Id(_) = parser.current_token_kind() else {
        return Ok(false);
    };

    let next = parser.next_token().kind.clone();

    if !parser.at_type_name() {
        let mut shape = DeclaratorShape::Suffixes;
        if let Some(decision) = shape.step(&next) {
            return Ok(decision);
        }
        return parser.scan_past_next(|kind| shape.step(kind));
    }

    match next {
        TokenKind::Op(Operator::Brac) => Ok(false),
        TokenKind::Op(Operator::Mul) => {
            let after = parser.look_past_next()?;
            Ok(matches!(
                after.kind,
                TokenKind::Id(_) | TokenKind::Op(Operator::Mul) | TokenKind::Op(Operator::Index)
            ))
        }
        _ => Ok(true),
    }
}

/// Tracks the tokens after an unknown name while they still read as
/// `name suffixes declarator`.
///
/// `N x` and `N[..] x` are declarations. After a `*` the reading stays
/// ambiguous (`x * y;` is a product), so `N* x` needs a following `=` or `,`.
#[derive(Clone, Copy)]
enum DeclaratorShape {
    Suffixes,
    Brackets(u32),
    Stars,
    StarsNamed,
}

impl DeclaratorShape {
    fn step(&mut self, kind: &TokenKind) -> Option<bool> {
        use DeclaratorShape::*;

        match (*self, kind) {
            (Suffixes, TokenKind::Id(_)) => Some(true),
            (Suffixes, TokenKind::Op(Operator::Index)) => {
                *self = Brackets(1);
                None
            }
            (Suffixes | Stars, TokenKind::Op(Operator::Mul)) => {
                *self = Stars;
                None
            }
            (Stars, TokenKind::Id(_)) => {
                *self = StarsNamed;
                None
            }
            (StarsNamed, kind) => Some(matches!(
                kind,
                TokenKind::Op(Operator::Asn) | TokenKind::Op(Operator::Comma)
            )),
            (Brackets(depth), TokenKind::Op(Operator::Index)) => {
                *self = Brackets(depth + 1);
                None
            }
            (Brackets(depth), TokenKind::Op(Operator::RIndex)) => {
                *self = if depth == 1 { Suffixes } else { Brackets(depth - 1) };
                None
            }
            (
                Brackets(_),
                TokenKind::Eof
                | TokenKind::Op(Operator::Semicolon | Operator::Comp | Operator::RComp),
            ) => Some(false),
            (Brackets(_), _) => None,
            _ => Some(false),
        }
    }
}

/// Consumes a statement terminator.
///
/// The `;` may be left out right before `}` and at end of input.
pub fn end_statement(parser: &mut Parser) -> Result<(), Error> {
    if parser.try_match(Operator::Semicolon)? || parser.is_op(Operator::RComp) || parser.is_eof() {
        return Ok(());
    }

    Err(parser.error(ErrorImpl::SymbolRequired {
        symbol: String::from(";"),
        found: parser.current_token().to_string(),
    }))
}

/// Parses one block item into `block`: a declaration list, a statement or a stray `;`.
pub fn parse_block_item(parser: &mut Parser, block: &NodeMut) -> Result<(), Error> {
    if parser.try_match(Operator::Semicolon)? {
        return Ok(());
    }

    if is_declaration_start(parser)? {
        for decl in parse_var_decl(parser)? {
            parser.tree(block.borrow_mut().append(decl.into_node()))?;
        }
        return end_statement(parser);
    }

    let stmt = parse_stmt(parser)?;
    parser.tree(block.borrow_mut().append(stmt))
}

/// Parses `{ items }`.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<NodeRef, Error> {
    parser.expect(Operator::Comp)?;
    let block = parser.alloc(Stmt::Block(BlockStmt::default()));

    while !parser.try_match(Operator::RComp)? {
        if parser.is_eof() {
            return Err(parser.error(ErrorImpl::SymbolRequired {
                symbol: String::from("}"),
                found: parser.current_token().to_string(),
            }));
        }

        parse_block_item(parser, &block)?;
    }

    Ok(block.freeze())
}

/// Parses `( expr )`, as used by `if` and `while`.
fn parse_condition(parser: &mut Parser) -> Result<ExprRef, Error> {
    parser.expect(Operator::Brac)?;
    let condition = parse_expr(parser)?;
    parser.expect(Operator::RBrac)?;
    Ok(condition)
}

/// Parses one statement.
///
/// Declarations are not statements: they are only accepted as block items.
pub fn parse_stmt(parser: &mut Parser) -> Result<NodeRef, Error> {
    let stmt = match parser.current_token_kind() {
        TokenKind::Op(Operator::Comp) => return parse_block_stmt(parser),
        TokenKind::Keyword(Keyword::If) => {
            parser.advance()?;
            let condition = parse_condition(parser)?;
            let then_body = parse_stmt(parser)?;

            let else_body = if parser.is_keyword(Keyword::Else) {
                parser.advance()?;
                Some(parse_stmt(parser)?)
            } else {
                None
            };

            Stmt::If(IfStmt {
                condition,
                then_body,
                else_body,
            })
        }
        TokenKind::Keyword(Keyword::While) => {
            parser.advance()?;
            let condition = parse_condition(parser)?;
            let body = parse_stmt(parser)?;

            Stmt::While(WhileStmt { condition, body })
        }
        TokenKind::Keyword(Keyword::For) => {
            parser.advance()?;
            parser.expect(Operator::Brac)?;

            let init = optional_expr(parser, Operator::Semicolon)?;
            parser.expect(Operator::Semicolon)?;
            let condition = optional_expr(parser, Operator::Semicolon)?;
            parser.expect(Operator::Semicolon)?;
            let step = optional_expr(parser, Operator::RBrac)?;
            parser.expect(Operator::RBrac)?;

            let body = parse_stmt(parser)?;

            Stmt::For(ForStmt {
                init,
                condition,
                step,
                body,
            })
        }
        TokenKind::Keyword(Keyword::Break) => {
            parser.advance()?;
            end_statement(parser)?;
            Stmt::Break
        }
        TokenKind::Keyword(Keyword::Continue) => {
            parser.advance()?;
            end_statement(parser)?;
            Stmt::Continue
        }
        TokenKind::Keyword(Keyword::Return) => {
            parser.advance()?;

            let at_end = parser.is_op(Operator::Semicolon) || parser.is_op(Operator::RComp) || parser.is_eof();
            let value = if at_end { None } else { Some(parse_expr(parser)?) };
            end_statement(parser)?;

            Stmt::Return(ReturnStmt { value })
        }
        _ => {
            let expr = parse_expr(parser)?;
            end_statement(parser)?;
            return Ok(expr.into_node());
        }
    };

    Ok(parser.alloc(stmt).freeze())
}

fn optional_expr(
    parser: &mut Parser,
    closer: Operator,
) -> Result<Option<ExprRef>, Error> {
    if parser.is_op(closer) {
        Ok(None)
    } else {
        Ok(Some(parse_expr(parser)?))
    }
}
