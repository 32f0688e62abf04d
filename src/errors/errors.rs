use std::fmt::Display;

use thiserror::Error;

use crate::{ast::node::TreeError, Position};

/// A front-end error: what went wrong and where.
///
/// Parsing stops at the first error, there is no recovery.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Broad classification of errors. The front end only produces syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Syntax
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Human readable description of the error.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::SymbolRequired { .. } => "SymbolRequired",
            ErrorImpl::OperatorExpected { .. } => "OperatorExpected",
            ErrorImpl::OperandRequired { .. } => "OperandRequired",
            ErrorImpl::IdentifierRequired { .. } => "IdentifierRequired",
            ErrorImpl::TypeNameRequired { .. } => "TypeNameRequired",
            ErrorImpl::TypeUndefined { .. } => "TypeUndefined",
            ErrorImpl::ClassAlreadyDefined { .. } => "ClassAlreadyDefined",
            ErrorImpl::CallTargetNotIdentifier => "CallTargetNotIdentifier",
            ErrorImpl::MemberNameRequired { .. } => "MemberNameRequired",
            ErrorImpl::DeclarationRequired { .. } => "DeclarationRequired",
            ErrorImpl::UnexpectedEof => "UnexpectedEof",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NonConstantArraySize => "NonConstantArraySize",
            ErrorImpl::LookaheadUnderflow => "LookaheadUnderflow",
            ErrorImpl::ImportFailed { .. } => "ImportFailed",
            ErrorImpl::CircularImport { .. } => "CircularImport",
            ErrorImpl::MalformedTree(_) => "MalformedTree",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::SymbolRequired { symbol, found } => {
                ErrorTip::Suggestion(format!("Expected `{}` before `{}`", symbol, found))
            }
            ErrorImpl::OperatorExpected { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot join two operands, use an arithmetic or logic operator",
                found
            )),
            ErrorImpl::OperandRequired { found } => {
                ErrorTip::Suggestion(format!("Expected a value or identifier, found `{}`", found))
            }
            ErrorImpl::IdentifierRequired { found } => {
                ErrorTip::Suggestion(format!("Expected a name, found `{}`", found))
            }
            ErrorImpl::TypeNameRequired { found } => {
                ErrorTip::Suggestion(format!("Expected a type name, found `{}`", found))
            }
            ErrorImpl::TypeUndefined { name } => ErrorTip::Suggestion(format!(
                "Type `{}` is not declared, declare the class before using it",
                name
            )),
            ErrorImpl::ClassAlreadyDefined { name } => {
                ErrorTip::Suggestion(format!("Class `{}` already has a body", name))
            }
            ErrorImpl::CallTargetNotIdentifier => {
                ErrorTip::Suggestion(String::from("Only named functions can be called"))
            }
            ErrorImpl::MemberNameRequired { .. } => {
                ErrorTip::Suggestion(String::from("Member access needs a member name"))
            }
            ErrorImpl::DeclarationRequired { .. } => ErrorTip::Suggestion(String::from(
                "Class bodies may only contain variable and function declarations",
            )),
            ErrorImpl::UnexpectedEof => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NonConstantArraySize => ErrorTip::Suggestion(String::from(
                "Array sizes must be integer constant expressions",
            )),
            ErrorImpl::LookaheadUnderflow => ErrorTip::None,
            ErrorImpl::ImportFailed { path, .. } => {
                ErrorTip::Suggestion(format!("Check that `{}` exists and is readable", path))
            }
            ErrorImpl::CircularImport { path } => {
                ErrorTip::Suggestion(format!("`{}` ends up importing itself", path))
            }
            ErrorImpl::MalformedTree(_) => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "syntax error: {} ({}:{})",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("symbol required: {symbol:?}, found {found:?}")]
    SymbolRequired { symbol: String, found: String },
    #[error("arithmetic operator expected, found {found:?}")]
    OperatorExpected { found: String },
    #[error("operand required, found {found:?}")]
    OperandRequired { found: String },
    #[error("identifier required, found {found:?}")]
    IdentifierRequired { found: String },
    #[error("type name required, found {found:?}")]
    TypeNameRequired { found: String },
    #[error("type undefined: {name}")]
    TypeUndefined { name: String },
    #[error("class {name:?} already defined")]
    ClassAlreadyDefined { name: String },
    #[error("only identifiers can be called")]
    CallTargetNotIdentifier,
    #[error("member name required, found {found:?}")]
    MemberNameRequired { found: String },
    #[error("declaration required, found {found:?}")]
    DeclarationRequired { found: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("array size is not a constant expression")]
    NonConstantArraySize,
    #[error("cannot go back past the consumed token")]
    LookaheadUnderflow,
    #[error("cannot import {path:?}: {reason}")]
    ImportFailed { path: String, reason: String },
    #[error("circular import of {path:?}")]
    CircularImport { path: String },
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] TreeError),
}
