use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    arena::strings::StringPool,
    errors::errors::{Error, ErrorImpl},
    reader::reader::SourceReader,
    Position, Span, MK_TOKEN,
};

use super::{
    operators::{Operator, OPERATOR_LOOKUP},
    tokens::{RawValue, RawValueKind, Token, TokenKind, RESERVED_LOOKUP},
};

/// Turns the matched text into a token kind, `None` for text that is skipped.
pub type RegexHandler = fn(&Lexer, &str) -> Result<Option<TokenKind>, ErrorImpl>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Matchers in priority order: the first one that matches at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"[ \t\r\n]+", skip_handler),
        RegexPattern::new(r"//[^\n]*", skip_handler),
        RegexPattern::new(r";", separator_handler),
        RegexPattern::new(r"'(?:\\.|[^'\\])*'", char_handler),
        RegexPattern::new(r#""(?:\\.|[^"\\])*""#, string_handler),
        RegexPattern::new(r"\+\+|--|!=|->|[+\-*/%=^<>!]=?|[&.,:{}()\[\]]", operator_handler),
        RegexPattern::new(r"(?:\d*\.|\d+e[+\-]?)\d+", float_handler),
        RegexPattern::new(r"\d+", int_handler),
        RegexPattern::new(r"[_a-zA-Z][_0-9a-zA-Z]*", symbol_handler),
    ];
}

/// Pull-based lexer with unlimited lookahead.
///
/// Tokens are produced lazily into a buffer. Two cursors index the stream:
/// `consumed` counts tokens handed out by [`Lexer::get_token`], `looked` is
/// where the next [`Lexer::look_ahead`] reads from. `looked` never falls
/// behind `consumed`.
pub struct Lexer {
    reader: SourceReader,
    strings: StringPool,
    file: Rc<String>,
    buffer: VecDeque<Token>,
    consumed: usize,
    looked: usize,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>, strings: StringPool) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            reader: SourceReader::new(source),
            strings,
            file: file_name,
            buffer: VecDeque::new(),
            consumed: 0,
            looked: 0,
        }
    }

    pub fn reader(&self) -> &SourceReader {
        &self.reader
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    /// Current reader position, i.e. how far the source has been scanned.
    pub fn position(&self) -> Position {
        Position(self.reader.pos() as u32, Rc::clone(&self.file))
    }

    /// Consumes and returns the next token.
    pub fn get_token(&mut self) -> Result<Token, Error> {
        if self.buffer.is_empty() {
            self.fetch_token()?;
        }

        self.consumed += 1;
        self.looked = self.consumed;

        match self.buffer.pop_front() {
            Some(token) => Ok(token),
            None => Err(self.error(ErrorImpl::UnexpectedEof)),
        }
    }

    /// Returns the token at the lookahead cursor without consuming it.
    pub fn look_ahead(&mut self) -> Result<Token, Error> {
        let index = self.looked - self.consumed;

        while self.buffer.len() <= index {
            self.fetch_token()?;
        }

        self.looked += 1;
        Ok(self.buffer[index].clone())
    }

    /// Rewinds the lookahead cursor by one token.
    pub fn go_back(&mut self) -> Result<(), Error> {
        if self.looked <= self.consumed {
            return Err(self.error(ErrorImpl::LookaheadUnderflow));
        }

        self.looked -= 1;
        Ok(())
    }

    fn fetch_token(&mut self) -> Result<(), Error> {
        let token = self.next_raw_token()?;
        trace!(token = %token.kind, offset = token.span.start.0, "lexed token");
        self.buffer.push_back(token);
        Ok(())
    }

    /// Scans one token straight from the reader, bypassing the buffer.
    pub fn next_raw_token(&mut self) -> Result<Token, Error> {
        loop {
            let start = self.reader.pos();
            if self.reader.at_end() {
                return Ok(MK_TOKEN!(TokenKind::Eof, start, start, &self.file));
            }

            let remaining = self.reader.remainder();
            let found = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remaining)
                    .filter(|m| !m.is_empty())
                    .map(|m| (pattern.handler, m.as_str().to_string()))
            });

            let Some((handler, matched)) = found else {
                let token = self.reader.current().map(String::from).unwrap_or_default();
                return Err(self.error(ErrorImpl::UnrecognisedToken { token }));
            };

            let kind = handler(self, &matched).map_err(|e| self.error(e))?;
            self.reader.advance(matched.len());

            if let Some(kind) = kind {
                return Ok(MK_TOKEN!(kind, start, self.reader.pos(), &self.file));
            }
        }
    }

    fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.position())
    }

    fn raw_value(&self, kind: RawValueKind, text: &str) -> TokenKind {
        self.raw_bytes(kind, text.as_bytes().to_vec())
    }

    fn raw_bytes(&self, kind: RawValueKind, bytes: Vec<u8>) -> TokenKind {
        TokenKind::Value(RawValue {
            kind,
            text: self.strings.intern(&String::from_utf8_lossy(&bytes)),
            bytes: bytes.into(),
        })
    }
}

fn skip_handler(_lexer: &Lexer, _matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    Ok(None)
}

fn separator_handler(_lexer: &Lexer, _matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    Ok(Some(TokenKind::Op(Operator::Semicolon)))
}

fn char_handler(lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    let literal = unescape(&matched[1..matched.len() - 1]);

    // 'a' is a character, anything longer than one byte in single quotes is a string
    let kind = if literal.len() == 1 {
        RawValueKind::Char
    } else {
        RawValueKind::String
    };

    Ok(Some(lexer.raw_bytes(kind, literal)))
}

fn string_handler(lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    let literal = unescape(&matched[1..matched.len() - 1]);
    Ok(Some(lexer.raw_bytes(RawValueKind::String, literal)))
}

fn operator_handler(_lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    match OPERATOR_LOOKUP.get(matched) {
        Some(op) => Ok(Some(TokenKind::Op(*op))),
        None => Err(ErrorImpl::UnrecognisedToken {
            token: String::from(matched),
        }),
    }
}

fn float_handler(lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    Ok(Some(lexer.raw_value(RawValueKind::Float, matched)))
}

fn int_handler(lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    Ok(Some(lexer.raw_value(RawValueKind::Int, matched)))
}

fn symbol_handler(lexer: &Lexer, matched: &str) -> Result<Option<TokenKind>, ErrorImpl> {
    if matched == "true" || matched == "false" {
        return Ok(Some(lexer.raw_value(RawValueKind::Bool, matched)));
    }

    if let Some(op) = OPERATOR_LOOKUP.get(matched) {
        return Ok(Some(TokenKind::Op(*op)));
    }

    if let Some(keyword) = RESERVED_LOOKUP.get(matched) {
        return Ok(Some(TokenKind::Keyword(*keyword)));
    }

    Ok(Some(TokenKind::Id(lexer.strings.intern(matched))))
}

/// Decodes escape sequences inside a quoted literal.
fn unescape(literal: &str) -> Vec<u8> {
    let mut result = vec![];
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
            continue;
        }

        match chars.next() {
            Some('n') => result.push(b'\n'),
            Some('t') => result.push(b'\t'),
            Some('r') => result.push(b'\r'),
            Some('0') => result.push(0),
            Some('\\') => result.push(b'\\'),
            Some('\'') => result.push(b'\''),
            Some('"') => result.push(b'"'),
            Some('x') => {
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte),
                    Err(_) => result.extend_from_slice(b"\\x"),
                }
            }
            // Unknown escapes keep the backslash
            Some(other) => {
                result.push(b'\\');
                result.extend_from_slice(other.encode_utf8(&mut [0; 4]).as_bytes());
            }
            None => result.push(b'\\'),
        }
    }

    result
}

/// Scans a whole source into a token vector ending with a single `Eof`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file, StringPool::new());
    let mut tokens = vec![];

    loop {
        let token = lex.get_token()?;
        let done = token.kind.is_eof();
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
