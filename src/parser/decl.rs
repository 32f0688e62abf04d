use tracing::warn;

use crate::{
    ast::{
        declarations::{ClassDecl, Decl, FunctionDecl, Param, VarDecl},
        expressions::{Expr, ListExpr},
        node::{DeclRef, ExprRef, NodeMut, NodeRef, TreeError, TypeExprRef},
        types::TypeExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        operators::Operator,
        tokens::{Keyword, RawValueKind, TokenKind},
    },
    types::types::TypeId,
};

use super::{
    expr::parse_expr,
    parser::Parser,
    stmt::{end_statement, parse_block_stmt},
    types::{parse_type, parse_type_base, parse_type_suffixes},
};

fn finish_decl(parser: &Parser, node: NodeMut) -> Result<DeclRef, Error> {
    parser.tree(node.freeze().into_decl().map_err(|_| TreeError::WrongCategory))
}

/// Parses `type declarator (, declarator)*` without the terminator.
///
/// The base type is read once. Each declarator may add its own `*` and `[]`
/// suffixes before its name, so `int* a, b` declares an `int*` and an `int`.
pub fn parse_var_decl(parser: &mut Parser) -> Result<Vec<DeclRef>, Error> {
    let base = parse_type_base(parser)?;
    let mut decls = vec![];

    loop {
        let ty = parse_type_suffixes(parser, base.clone())?;
        let name = parser.expect_identifier()?;

        let initializer = if parser.try_match(Operator::Asn)? {
            Some(parse_initializer(parser)?)
        } else {
            None
        };

        let node = parser.alloc(Decl::Var(VarDecl {
            ty,
            name,
            initializer,
        }));
        decls.push(finish_decl(parser, node)?);

        if !parser.try_match(Operator::Comma)? {
            return Ok(decls);
        }
    }
}

/// Parses an initializer: an expression or a brace list of initializers.
pub fn parse_initializer(parser: &mut Parser) -> Result<ExprRef, Error> {
    if !parser.try_match(Operator::Comp)? {
        return parse_expr(parser);
    }

    let list = parser.alloc(Expr::List(ListExpr::default()));

    while !parser.try_match(Operator::RComp)? {
        let member = parse_initializer(parser)?;
        parser.tree(list.borrow_mut().add_child(member.into_node()))?;

        if !parser.try_match(Operator::Comma)? {
            parser.expect(Operator::RComp)?;
            break;
        }
    }

    parser.finish_expr(list)
}

fn void_type(parser: &Parser) -> Result<TypeExprRef, Error> {
    let node = parser
        .alloc(TypeExpr::Primitive(parser.context().primitive(TypeId::Void)))
        .freeze();
    parser.tree(node.into_type_expr().map_err(|_| TreeError::WrongCategory))
}

/// Parses `fn name(params) (-> type)? (body | ;)`.
///
/// Parameters are `name`, `name: type` or `: type`. A parameter without a type
/// is typed `void`, which is almost certainly not what the author meant, so it
/// is reported.
pub fn parse_function_decl(parser: &mut Parser) -> Result<DeclRef, Error> {
    parser.advance()?;
    let name = parser.expect_identifier()?;
    parser.expect(Operator::Brac)?;

    let function = parser.alloc(Decl::Function(FunctionDecl {
        name: name.clone(),
        params: vec![],
        return_type: void_type(parser)?,
        body: None,
    }));

    if !parser.try_match(Operator::RBrac)? {
        loop {
            let param = match parser.current_token_kind().clone() {
                TokenKind::Id(param_name) => {
                    parser.advance()?;

                    let ty = if parser.try_match(Operator::Colon)? {
                        parse_type(parser)?
                    } else {
                        warn!(function = %name, param = %param_name, "untyped parameter defaults to void");
                        void_type(parser)?
                    };

                    Param {
                        name: Some(param_name),
                        ty,
                    }
                }
                TokenKind::Op(Operator::Colon) => {
                    parser.advance()?;
                    Param {
                        name: None,
                        ty: parse_type(parser)?,
                    }
                }
                _ => {
                    return Err(parser.error(ErrorImpl::IdentifierRequired {
                        found: parser.current_token().to_string(),
                    }))
                }
            };

            parser.tree(function.borrow_mut().add_argument(param))?;

            if !parser.try_match(Operator::Comma)? {
                parser.expect(Operator::RBrac)?;
                break;
            }
        }
    }

    if parser.try_match(Operator::Arrow)? {
        let return_type = parse_type(parser)?;
        parser.tree(function.borrow_mut().set_return_type(return_type))?;
    }

    if parser.is_op(Operator::Comp) {
        let body = parse_block_stmt(parser)?;
        let body = parser.tree(body.into_stmt().map_err(|_| TreeError::WrongCategory))?;
        parser.tree(function.borrow_mut().set_body(body))?;
    } else {
        parser.expect(Operator::Semicolon)?;
    }

    finish_decl(parser, function)
}

/// Parses `class Name;` or `class Name { members and methods }`.
///
/// A forward declaration registers nothing. A class with a body is added to
/// the type-name table once the body is parsed, so it cannot name itself.
pub fn parse_class_decl(parser: &mut Parser) -> Result<DeclRef, Error> {
    let position = parser.get_position();
    parser.advance()?;
    let name = parser.expect_identifier()?;

    let class = parser.alloc(Decl::Class(ClassDecl {
        name: name.clone(),
        members: vec![],
        methods: vec![],
    }));

    if parser.try_match(Operator::Semicolon)? {
        return finish_decl(parser, class);
    }

    if parser.session().is_type_name(&name) {
        return Err(parser.error(ErrorImpl::ClassAlreadyDefined {
            name: name.to_string(),
        }));
    }

    parser.expect(Operator::Comp)?;

    while !parser.try_match(Operator::RComp)? {
        if parser.try_match(Operator::Semicolon)? {
            continue;
        }

        if parser.is_keyword(Keyword::Fn) {
            let method = parse_function_decl(parser)?;
            parser.tree(class.borrow_mut().add_method(method))?;
        } else if matches!(parser.current_token_kind(), TokenKind::Id(_)) {
            for member in parse_var_decl(parser)? {
                parser.tree(class.borrow_mut().add_member(member))?;
            }
            end_statement(parser)?;
        } else if parser.is_eof() {
            return Err(parser.error(ErrorImpl::SymbolRequired {
                symbol: String::from("}"),
                found: parser.current_token().to_string(),
            }));
        } else {
            return Err(parser.error(ErrorImpl::DeclarationRequired {
                found: parser.current_token().to_string(),
            }));
        }
    }

    let class = finish_decl(parser, class)?;
    parser
        .session()
        .register_class(&class)
        .map_err(|e| Error::new(e, position))?;

    Ok(class)
}

/// Parses `import "path";` and returns the imported program's root block.
pub fn parse_import(parser: &mut Parser) -> Result<NodeRef, Error> {
    let position = parser.get_position();
    parser.advance()?;

    let path = match parser.current_token_kind() {
        TokenKind::Value(raw) if raw.kind == RawValueKind::String => raw.text.clone(),
        _ => {
            return Err(parser.error(ErrorImpl::UnexpectedToken {
                token: parser.current_token().to_string(),
            }))
        }
    };
    parser.advance()?;
    end_statement(parser)?;

    let importer = parser.path().cloned();
    parser
        .session()
        .import(importer.as_deref(), path.as_str(), position)
}
