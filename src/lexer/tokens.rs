use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::{arena::strings::Name, Span};

use super::operators::Operator;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("if", Keyword::If);
        map.insert("else", Keyword::Else);
        map.insert("while", Keyword::While);
        map.insert("for", Keyword::For);
        map.insert("break", Keyword::Break);
        map.insert("continue", Keyword::Continue);
        map.insert("return", Keyword::Return);
        map.insert("fn", Keyword::Fn);
        map.insert("class", Keyword::Class);
        map.insert("import", Keyword::Import);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    // Control
    If,
    Else,
    For,
    While,
    Return,
    Break,
    Continue,

    // Declarations
    Fn,
    Class,
    Import,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = RESERVED_LOOKUP
            .iter()
            .find(|(_, keyword)| *keyword == self)
            .map(|(word, _)| *word)
            .unwrap_or("?");
        write!(f, "{}", word)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawValueKind {
    Bool,
    Char,
    Int,
    Float,
    String,
}

/// Literal text as it appeared in the source, before it is typed.
///
/// Quotes are stripped and escape sequences already decoded. `bytes` is the
/// decoded literal, `\xHH` escapes included as single bytes. `text` is its
/// lossy UTF-8 rendering, used for display and for numbers.
#[derive(Debug, PartialEq, Clone)]
pub struct RawValue {
    pub kind: RawValueKind,
    pub text: Name,
    pub bytes: Rc<[u8]>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Eof,
    Value(RawValue),
    Id(Name),
    Op(Operator),
    Keyword(Keyword),
}

impl TokenKind {
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    pub fn is_op(&self, op: Operator) -> bool {
        matches!(self, TokenKind::Op(o) if *o == op)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == keyword)
    }

    pub fn as_op(&self) -> Option<Operator> {
        match self {
            TokenKind::Op(op) => Some(*op),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&Name> {
        match self {
            TokenKind::Id(name) => Some(name),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Value(raw) if raw.kind == RawValueKind::String => write!(f, "{:?}", raw.text.as_str()),
            TokenKind::Value(raw) if raw.kind == RawValueKind::Char => write!(f, "'{}'", raw.text),
            TokenKind::Value(raw) => write!(f, "{}", raw.text),
            TokenKind::Id(name) => write!(f, "{}", name),
            TokenKind::Op(op) => write!(f, "{}", op),
            TokenKind::Keyword(keyword) => write!(f, "{}", keyword),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Token {
    pub fn debug(&self) -> String {
        match &self.kind {
            TokenKind::Value(raw) => format!("Value {:?} ({})", raw.kind, self.kind),
            TokenKind::Id(_) => format!("Id ({})", self.kind),
            TokenKind::Op(op) => format!("Op {:?}", op),
            TokenKind::Keyword(keyword) => format!("Keyword {:?}", keyword),
            TokenKind::Eof => String::from("EOF"),
        }
    }
}
