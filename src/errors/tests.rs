//! Unit tests for error handling.

use crate::ast::node::TreeError;
use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.csl".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.kind(), ErrorKind::Syntax);
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::UnexpectedEof, at(42));

    assert_eq!(error.get_position().0, 42);
    assert_eq!(*error.get_position().1, "test.csl");
}

#[test]
fn test_error_message() {
    let error = Error::new(
        ErrorImpl::TypeUndefined {
            name: "Foo".to_string(),
        },
        at(0),
    );

    assert_eq!(error.message(), "type undefined: Foo");
    assert_eq!(error.to_string(), "syntax error: type undefined: Foo (test.csl:0)");
}

#[test]
fn test_operator_expected_message() {
    let error = Error::new(
        ErrorImpl::OperatorExpected {
            found: "(".to_string(),
        },
        at(1),
    );

    assert_eq!(error.get_error_name(), "OperatorExpected");
    assert!(error.message().starts_with("arithmetic operator expected"));
}

#[test]
fn test_malformed_tree_from_tree_error() {
    let error_impl: ErrorImpl = TreeError::LeafHasNoChildren.into();
    let error = Error::new(error_impl, at(0));

    assert_eq!(error.get_error_name(), "MalformedTree");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::SymbolRequired {
            symbol: ";".to_string(),
            found: "}".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Expected `;` before `}`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
