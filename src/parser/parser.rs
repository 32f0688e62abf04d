//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the token-level helpers
//! shared by the grammar functions. The parser pulls tokens from the lexer on
//! demand and keeps two of them in hand: the current token and the next one.
//! When a decision needs a third token it peeks through the lexer's lookahead
//! buffer and rewinds.

use std::path::PathBuf;

use crate::{
    arena::{context::Context, strings::Name},
    ast::{
        node::{ExprRef, Node, NodeMut, NodeRef, TreeError},
        statements::{BlockStmt, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        operators::Operator,
        tokens::{Keyword, Token, TokenKind},
    },
    session::session::Session,
    Position,
};

use super::{
    decl::{parse_class_decl, parse_function_decl, parse_import},
    expr::parse_expr,
    stmt::parse_block_item,
};

/// The main parser structure that maintains parsing state.
///
/// A parser reads one source and allocates into the session's context. It
/// is not reentrant; imports create a fresh parser over the same session.
pub struct Parser<'s> {
    /// Token source
    lexer: Lexer,
    /// Owner of the arena, the type-name table and the import cache
    session: &'s mut Session,
    cur_token: Token,
    next_token: Token,
    /// Path of the source being parsed, imports resolve relative to it
    path: Option<PathBuf>,
}

impl<'s> Parser<'s> {
    /// Creates a new Parser and primes the current and next tokens.
    ///
    /// # Arguments
    ///
    /// * `source` - Text to parse
    /// * `file` - Name reported in error positions
    /// * `path` - Location of the source, if it came from a file
    /// * `session` - Session to allocate into
    pub fn new(
        source: &str,
        file: Option<String>,
        path: Option<PathBuf>,
        session: &'s mut Session,
    ) -> Result<Self, Error> {
        let mut lexer = Lexer::new(source, file, session.context().strings.clone());
        let cur_token = lexer.get_token()?;
        let next_token = lexer.get_token()?;

        Ok(Parser {
            lexer,
            session,
            cur_token,
            next_token,
            path,
        })
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> &TokenKind {
        &self.cur_token.kind
    }

    /// Returns the token after the current one.
    pub fn next_token(&self) -> &Token {
        &self.next_token
    }

    /// Advances to the next token and returns the previous current token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let fetched = self.lexer.get_token()?;
        let next = std::mem::replace(&mut self.next_token, fetched);
        Ok(std::mem::replace(&mut self.cur_token, next))
    }

    /// Peeks at the token following `next_token` without consuming anything.
    pub fn look_past_next(&mut self) -> Result<Token, Error> {
        let token = self.lexer.look_ahead()?;
        self.lexer.go_back()?;
        Ok(token)
    }

    /// Feeds the tokens after `next_token` to `scan` until it decides, then
    /// rewinds the lexer so nothing is consumed.
    ///
    /// `scan` must return `Some` at the latest on end of input.
    pub fn scan_past_next<T>(
        &mut self,
        mut scan: impl FnMut(&TokenKind) -> Option<T>,
    ) -> Result<T, Error> {
        let mut steps = 0;
        let decision = loop {
            let token = self.lexer.look_ahead()?;
            steps += 1;
            if let Some(decision) = scan(&token.kind) {
                break decision;
            }
        };

        for _ in 0..steps {
            self.lexer.go_back()?;
        }
        Ok(decision)
    }

    pub fn is_op(&self, op: Operator) -> bool {
        self.cur_token.kind.is_op(op)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.cur_token.kind.is_keyword(keyword)
    }

    /// True at end of input.
    pub fn is_eof(&self) -> bool {
        self.cur_token.kind.is_eof()
    }

    /// Consumes the current token if it is `op`.
    pub fn try_match(&mut self, op: Operator) -> Result<bool, Error> {
        if self.is_op(op) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects the current token to be `op` and consumes it.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a
    /// "symbol required" error naming both the symbol and what was found.
    pub fn expect(&mut self, op: Operator) -> Result<Token, Error> {
        if self.is_op(op) {
            return self.advance();
        }

        Err(self.error(ErrorImpl::SymbolRequired {
            symbol: String::from(op.name()),
            found: self.cur_token.to_string(),
        }))
    }

    /// Expects an identifier and consumes it.
    pub fn expect_identifier(&mut self) -> Result<Name, Error> {
        match &self.cur_token.kind {
            TokenKind::Id(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.error(ErrorImpl::IdentifierRequired {
                found: self.cur_token.to_string(),
            })),
        }
    }

    /// Returns the start of the current token, where parse errors point.
    ///
    /// Lexing errors carry the reader position instead, see [`Lexer::position`].
    pub fn get_position(&self) -> Position {
        self.cur_token.span.start.clone()
    }

    pub fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.get_position())
    }

    /// Lifts a tree mutation failure into a positioned error.
    pub fn tree<T>(&self, result: Result<T, TreeError>) -> Result<T, Error> {
        result.map_err(|e| self.error(ErrorImpl::MalformedTree(e)))
    }

    pub fn context(&self) -> &Context {
        self.session.context()
    }

    pub fn session(&mut self) -> &mut Session {
        &mut *self.session
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Allocates a node in the session's context.
    pub fn alloc(&self, node: impl Into<Node>) -> NodeMut {
        self.context().alloc_node(node)
    }

    /// Finishes an expression node and hands back its typed view.
    pub fn finish_expr(&self, node: NodeMut) -> Result<ExprRef, Error> {
        self.tree(
            node.freeze()
                .into_expr()
                .map_err(|_| TreeError::ExpectedExpression),
        )
    }

    /// True when the current identifier names a declared type.
    pub fn at_type_name(&self) -> bool {
        match &self.cur_token.kind {
            TokenKind::Id(name) => self.session.is_type_name(name),
            _ => false,
        }
    }
}

/// Parses a whole translation unit into a root block.
///
/// Top-level items are functions, classes, imports, variable declarations and
/// statements, kept in source order. An import splices the imported root block
/// in at the point of the `import`.
pub fn parse_program(parser: &mut Parser) -> Result<NodeRef, Error> {
    let program = parser.alloc(Stmt::Block(BlockStmt::default()));

    while !parser.is_eof() {
        match parser.current_token_kind() {
            TokenKind::Keyword(Keyword::Fn) => {
                let function = parse_function_decl(parser)?;
                parser.tree(program.borrow_mut().append(function.into_node()))?;
            }
            TokenKind::Keyword(Keyword::Class) => {
                let class = parse_class_decl(parser)?;
                parser.tree(program.borrow_mut().append(class.into_node()))?;
            }
            TokenKind::Keyword(Keyword::Import) => {
                let imported = parse_import(parser)?;
                parser.tree(program.borrow_mut().append(imported))?;
            }
            _ => parse_block_item(parser, &program)?,
        }
    }

    Ok(program.freeze())
}

/// Parses exactly one expression; the whole input must be consumed.
///
/// A single trailing `;` is allowed.
pub fn parse_line(parser: &mut Parser) -> Result<ExprRef, Error> {
    let expr = parse_expr(parser)?;
    parser.try_match(Operator::Semicolon)?;

    if !parser.is_eof() {
        return Err(parser.error(ErrorImpl::UnexpectedToken {
            token: parser.current_token().to_string(),
        }));
    }

    Ok(expr)
}
