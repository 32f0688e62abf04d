use crate::{
    ast::{
        builder::ExprBuilder,
        expressions::{CallExpr, Expr, IdExpr, OpExpr, ValueExpr},
        node::{ExprRef, NodeRef, TreeError},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        operators::Operator,
        tokens::{RawValue, RawValueKind, TokenKind},
    },
    types::{constant::Constant, types::TypeId},
};

use super::{lookups::STACK_FLOOR, parser::Parser};

/// Parses a full expression, assignment included.
///
/// Assignment is right associative and binds loosest: `x = y = z` is
/// `(ASN x (ASN y z))`.
pub fn parse_expr(parser: &mut Parser) -> Result<ExprRef, Error> {
    let lhs = parse_simple_expr(parser)?;

    let Some(op) = parser.current_token_kind().as_op().filter(|op| op.is_assignment()) else {
        return Ok(lhs);
    };

    parser.advance()?;
    let rhs = parse_expr(parser)?;

    let node = parser.alloc(Expr::Op(OpExpr {
        op,
        lhs: Some(lhs),
        rhs: Some(rhs),
    }));
    parser.finish_expr(node)
}

fn top_precedence(operators: &[Operator]) -> u32 {
    operators
        .last()
        .and_then(|op| op.precedence())
        .unwrap_or(STACK_FLOOR)
}

/// Combines the two topmost values under the topmost operator.
fn reduce(
    parser: &Parser,
    operators: &mut Vec<Operator>,
    values: &mut Vec<ExprRef>,
) -> Result<(), Error> {
    let missing = || {
        parser.error(ErrorImpl::OperandRequired {
            found: parser.current_token().to_string(),
        })
    };

    let op = operators.pop().ok_or_else(missing)?;
    let rhs = values.pop().ok_or_else(missing)?;
    let lhs = values.pop().ok_or_else(missing)?;

    let node = parser.alloc(Expr::Op(OpExpr {
        op,
        lhs: Some(lhs),
        rhs: Some(rhs),
    }));
    values.push(parser.finish_expr(node)?);
    Ok(())
}

/// Parses a chain of binary operators with an explicit operator stack.
///
/// An operator is pushed once everything on the stack that binds at least as
/// tightly has been reduced, so equal precedence groups to the left. The loop
/// stops at punctuation and assignment operators, which belong to the caller.
pub fn parse_simple_expr(parser: &mut Parser) -> Result<ExprRef, Error> {
    let mut operators: Vec<Operator> = vec![];
    let mut values = vec![parse_unary_expr(parser)?];

    while let Some(op) = parser.current_token_kind().as_op() {
        if op.is_punctuation() || op.is_assignment() {
            break;
        }

        let Some(precedence) = op.precedence().filter(|_| op.is_binary()) else {
            return Err(parser.error(ErrorImpl::OperatorExpected {
                found: parser.current_token().to_string(),
            }));
        };

        parser.advance()?;

        while precedence >= top_precedence(&operators) {
            reduce(parser, &mut operators, &mut values)?;
        }

        operators.push(op);
        values.push(parse_unary_expr(parser)?);
    }

    while !operators.is_empty() {
        reduce(parser, &mut operators, &mut values)?;
    }

    values.pop().ok_or_else(|| {
        parser.error(ErrorImpl::OperandRequired {
            found: parser.current_token().to_string(),
        })
    })
}

/// Maps a token operator in prefix position to the unary operator it denotes.
fn prefix_operator(op: Operator) -> Option<Operator> {
    match op {
        Operator::Add => Some(Operator::Plus),
        Operator::Sub => Some(Operator::Minus),
        Operator::Mul => Some(Operator::Deref),
        Operator::Inc | Operator::Dec | Operator::Addr | Operator::Not => Some(op),
        _ => None,
    }
}

/// Parses prefix operators, one operand and its postfix forms.
///
/// Postfix forms bind tighter than prefix operators: `-a[0]` negates the
/// element, `*p++` dereferences the incremented pointer expression.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<ExprRef, Error> {
    let mut prefix = ExprBuilder::new();

    while let Some(op) = parser.current_token_kind().as_op().and_then(prefix_operator) {
        parser.advance()?;
        let node = parser.alloc(Expr::Op(OpExpr::new(op)));
        parser.tree(prefix.extend_child(node))?;
    }

    let operand = parse_postfix_expr(parser)?;
    parser.tree(prefix.add_child(operand.into_node()))?;

    finish(parser, prefix)
}

fn finish(parser: &Parser, builder: ExprBuilder) -> Result<ExprRef, Error> {
    let root = builder.finish().ok_or_else(|| {
        parser.error(ErrorImpl::OperandRequired {
            found: parser.current_token().to_string(),
        })
    })?;

    parser.tree(root.into_expr().map_err(|_| TreeError::ExpectedExpression))
}

fn parse_postfix_expr(parser: &mut Parser) -> Result<ExprRef, Error> {
    let mut postfix = ExprBuilder::new();
    let operand = parse_operand(parser)?;
    parser.tree(postfix.add_child(operand))?;

    loop {
        match parser.current_token_kind().as_op() {
            Some(Operator::Index) => {
                parser.advance()?;
                let node = parser.alloc(Expr::Op(OpExpr::new(Operator::Index)));
                parser.tree(postfix.extend_parent(node))?;

                let index = parse_expr(parser)?;
                parser.tree(postfix.add_child(index.into_node()))?;
                parser.expect(Operator::RIndex)?;
            }
            Some(Operator::Brac) => {
                let callable = postfix.root().is_some_and(|root| root.borrow().is_id());
                if !callable {
                    return Err(parser.error(ErrorImpl::CallTargetNotIdentifier));
                }

                parser.advance()?;
                let node = parser.alloc(Expr::Call(CallExpr::default()));
                parser.tree(postfix.extend_parent(node))?;

                if !parser.try_match(Operator::RBrac)? {
                    loop {
                        let arg = parse_expr(parser)?;
                        parser.tree(postfix.add_child(arg.into_node()))?;

                        if !parser.try_match(Operator::Comma)? {
                            parser.expect(Operator::RBrac)?;
                            break;
                        }
                    }
                }
            }
            Some(op @ (Operator::Mber | Operator::Arrow)) => {
                parser.advance()?;

                let Some(name) = parser.current_token_kind().as_id().cloned() else {
                    return Err(parser.error(ErrorImpl::MemberNameRequired {
                        found: parser.current_token().to_string(),
                    }));
                };
                parser.advance()?;

                let node = parser.alloc(Expr::Op(OpExpr::new(op)));
                parser.tree(postfix.extend_parent(node))?;
                let member = parser.alloc(Expr::Id(IdExpr { name })).freeze();
                parser.tree(postfix.add_child(member))?;
            }
            Some(Operator::Inc) => {
                parser.advance()?;
                let node = parser.alloc(Expr::Op(OpExpr::new(Operator::PostInc)));
                parser.tree(postfix.extend_parent(node))?;
            }
            Some(Operator::Dec) => {
                parser.advance()?;
                let node = parser.alloc(Expr::Op(OpExpr::new(Operator::PostDec)));
                parser.tree(postfix.extend_parent(node))?;
            }
            _ => break,
        }
    }

    finish(parser, postfix)
}

/// Parses an identifier, a literal or a parenthesised expression.
fn parse_operand(parser: &mut Parser) -> Result<NodeRef, Error> {
    match parser.current_token_kind().clone() {
        TokenKind::Id(name) => {
            parser.advance()?;
            Ok(parser.alloc(Expr::Id(IdExpr { name })).freeze())
        }
        TokenKind::Value(raw) => {
            let constant = build_value(parser, &raw)?;
            parser.advance()?;

            let constant = parser.context().alloc_constant(constant);
            Ok(parser.alloc(Expr::Value(ValueExpr { constant })).freeze())
        }
        TokenKind::Op(Operator::Brac) => {
            parser.advance()?;
            let inner = parse_expr(parser)?;
            parser.expect(Operator::RBrac)?;
            Ok(inner.into_node())
        }
        _ => Err(parser.error(ErrorImpl::OperandRequired {
            found: parser.current_token().to_string(),
        })),
    }
}

/// Converts a raw literal into a typed constant.
///
/// Characters are stored as 32-bit integers holding their byte, strings as
/// their decoded bytes typed `char*`. Integer literals up to `u32::MAX` are
/// kept as their 32-bit pattern, so `3000000000` reads back negative.
pub fn build_value(parser: &Parser, raw: &RawValue) -> Result<Constant, Error> {
    let ctx = parser.context();
    let text = raw.text.as_str();

    let number_error = || {
        parser.error(ErrorImpl::NumberParseError {
            token: String::from(text),
        })
    };

    let constant = match raw.kind {
        RawValueKind::Bool => Constant::new(ctx.primitive(TypeId::Bool), vec![(text == "true") as u8]),
        RawValueKind::Char => {
            let byte = raw.bytes.first().copied().unwrap_or(0);
            Constant::new(ctx.primitive(TypeId::Int), (byte as i32).to_le_bytes().to_vec())
        }
        RawValueKind::Int => {
            let value: u32 = text.parse().map_err(|_| number_error())?;
            Constant::new(ctx.primitive(TypeId::Int), value.to_le_bytes().to_vec())
        }
        RawValueKind::Float => {
            let value: f64 = text.parse().map_err(|_| number_error())?;
            Constant::new(ctx.primitive(TypeId::Float), value.to_le_bytes().to_vec())
        }
        RawValueKind::String => Constant::new(
            ctx.pointer_to(ctx.primitive(TypeId::Char)),
            raw.bytes.to_vec(),
        ),
    };

    Ok(constant)
}
