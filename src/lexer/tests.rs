//! Unit tests for the lexer module.

use crate::arena::strings::StringPool;

use super::{
    lexer::{tokenize, Lexer},
    operators::Operator,
    tokens::{Keyword, RawValueKind, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.csl".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn value(kind: &TokenKind) -> (RawValueKind, String) {
    match kind {
        TokenKind::Value(raw) => (raw.kind, raw.text.to_string()),
        other => panic!("Expected a value token, found {}", other),
    }
}

#[test]
fn test_tokenize_compound_assignment() {
    let tokens = kinds("+=");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], TokenKind::Op(Operator::AddAsn));
    assert_eq!(tokens[1], TokenKind::Eof);
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("++ -- != -> <= >= == + - * / % ^ < > = & . , : { } ( ) [ ] !");
    let expected = [
        Operator::Inc,
        Operator::Dec,
        Operator::Ne,
        Operator::Arrow,
        Operator::Le,
        Operator::Ge,
        Operator::Eq,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Pow,
        Operator::Lt,
        Operator::Gt,
        Operator::Asn,
        Operator::Addr,
        Operator::Mber,
        Operator::Comma,
        Operator::Colon,
        Operator::Comp,
        Operator::RComp,
        Operator::Brac,
        Operator::RBrac,
        Operator::Index,
        Operator::RIndex,
        Operator::Not,
    ];

    for (token, op) in tokens.iter().zip(expected.iter()) {
        assert_eq!(token.as_op(), Some(*op));
    }
    assert_eq!(tokens.len(), expected.len() + 1);
}

#[test]
fn test_tokenize_word_operators() {
    let tokens = kinds("a and b or not c xor d");

    assert_eq!(tokens[1], TokenKind::Op(Operator::And));
    assert_eq!(tokens[3], TokenKind::Op(Operator::Or));
    assert_eq!(tokens[4], TokenKind::Op(Operator::Not));
    assert_eq!(tokens[6], TokenKind::Op(Operator::Xor));
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("if else while for break continue return fn class import");

    assert_eq!(tokens[0], TokenKind::Keyword(Keyword::If));
    assert_eq!(tokens[1], TokenKind::Keyword(Keyword::Else));
    assert_eq!(tokens[2], TokenKind::Keyword(Keyword::While));
    assert_eq!(tokens[3], TokenKind::Keyword(Keyword::For));
    assert_eq!(tokens[4], TokenKind::Keyword(Keyword::Break));
    assert_eq!(tokens[5], TokenKind::Keyword(Keyword::Continue));
    assert_eq!(tokens[6], TokenKind::Keyword(Keyword::Return));
    assert_eq!(tokens[7], TokenKind::Keyword(Keyword::Fn));
    assert_eq!(tokens[8], TokenKind::Keyword(Keyword::Class));
    assert_eq!(tokens[9], TokenKind::Keyword(Keyword::Import));
    assert_eq!(tokens[10], TokenKind::Eof);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = kinds("foo _bar baz_123 iffy");

    let names: Vec<&str> = tokens.iter().filter_map(|t| t.as_id()).map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["foo", "_bar", "baz_123", "iffy"]);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = kinds("42 3.14 2e-7 .5 7e3");

    assert_eq!(value(&tokens[0]), (RawValueKind::Int, "42".to_string()));
    assert_eq!(value(&tokens[1]), (RawValueKind::Float, "3.14".to_string()));
    assert_eq!(value(&tokens[2]), (RawValueKind::Float, "2e-7".to_string()));
    // A leading dot is member access
    assert_eq!(tokens[3], TokenKind::Op(Operator::Mber));
    assert_eq!(value(&tokens[4]), (RawValueKind::Int, "5".to_string()));
    assert_eq!(value(&tokens[5]), (RawValueKind::Float, "7e3".to_string()));
}

#[test]
fn test_tokenize_exponent_identifier() {
    let tokens = kinds("e5");
    assert_eq!(tokens[0].as_id().map(|n| n.as_str()), Some("e5"));
}

#[test]
fn test_tokenize_bools() {
    let tokens = kinds("true false");

    assert_eq!(value(&tokens[0]), (RawValueKind::Bool, "true".to_string()));
    assert_eq!(value(&tokens[1]), (RawValueKind::Bool, "false".to_string()));
}

#[test]
fn test_tokenize_chars_and_strings() {
    let tokens = kinds(r#"'a' 'ab' "hello world" '\n'"#);

    assert_eq!(value(&tokens[0]), (RawValueKind::Char, "a".to_string()));
    assert_eq!(value(&tokens[1]), (RawValueKind::String, "ab".to_string()));
    assert_eq!(value(&tokens[2]), (RawValueKind::String, "hello world".to_string()));
    assert_eq!(value(&tokens[3]), (RawValueKind::Char, "\n".to_string()));
}

#[test]
fn test_tokenize_escape_sequences() {
    let tokens = kinds(r#""a\tb\"c\\d\x41""#);
    assert_eq!(value(&tokens[0]), (RawValueKind::String, "a\tb\"c\\dA".to_string()));
}

#[test]
fn test_byte_escapes_decode_to_single_bytes() {
    let tokens = kinds(r#""\xff\x80!" '\xe9' 'é'"#);

    let bytes = |kind: &TokenKind| match kind {
        TokenKind::Value(raw) => (raw.kind, raw.bytes.to_vec()),
        other => panic!("Expected a value token, found {}", other),
    };

    assert_eq!(bytes(&tokens[0]), (RawValueKind::String, vec![0xff, 0x80, b'!']));
    assert_eq!(bytes(&tokens[1]), (RawValueKind::Char, vec![0xe9]));
    // A character that takes two bytes in UTF-8 does not fit a char
    assert_eq!(bytes(&tokens[2]), (RawValueKind::String, "é".as_bytes().to_vec()));
    assert_eq!(value(&tokens[2]).1, "é");
}

#[test]
fn test_tokenize_comments_and_separators() {
    let tokens = kinds("x; // trailing comment\ny;");

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[1], TokenKind::Op(Operator::Semicolon));
    assert_eq!(tokens[2].as_id().map(|n| n.as_str()), Some("y"));
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("ab  +=", None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[1].span.end.0, 6);
    assert_eq!(*tokens[1].span.start.1, "shell");
}

#[test]
fn test_tokenize_unrecognised() {
    let error = tokenize("x = @;", Some("test.csl".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x", None, StringPool::new());

    assert!(lexer.get_token().unwrap().kind.as_id().is_some());
    assert!(lexer.get_token().unwrap().kind.is_eof());
    assert!(lexer.get_token().unwrap().kind.is_eof());
    assert!(lexer.next_raw_token().unwrap().kind.is_eof());
}

#[test]
fn test_look_ahead_then_get_token() {
    let mut lexer = Lexer::new("a b c", None, StringPool::new());

    let first = lexer.look_ahead().unwrap();
    let second = lexer.look_ahead().unwrap();
    assert_eq!(first.kind.as_id().unwrap(), "a");
    assert_eq!(second.kind.as_id().unwrap(), "b");

    assert_eq!(lexer.get_token().unwrap().kind, first.kind);
    assert_eq!(lexer.get_token().unwrap().kind, second.kind);
    assert_eq!(lexer.get_token().unwrap().kind.as_id().unwrap(), "c");
}

#[test]
fn test_go_back_rereads_token() {
    let mut lexer = Lexer::new("a b", None, StringPool::new());

    let first = lexer.look_ahead().unwrap();
    lexer.go_back().unwrap();
    let again = lexer.look_ahead().unwrap();

    assert_eq!(first.kind, again.kind);
}

#[test]
fn test_get_token_resets_look_cursor() {
    let mut lexer = Lexer::new("a b c", None, StringPool::new());

    lexer.look_ahead().unwrap();
    lexer.look_ahead().unwrap();
    lexer.get_token().unwrap();

    // Lookahead restarts right after the consumed token
    assert_eq!(lexer.look_ahead().unwrap().kind.as_id().unwrap(), "b");
}

#[test]
fn test_look_ahead_and_go_back_any_depth() {
    let ids = ["a", "b", "c", "d", "e"];

    for k in 1..=3 {
        for j in 0..=k {
            let mut lexer = Lexer::new("a b c d e", None, StringPool::new());

            for id in &ids[..k] {
                assert_eq!(lexer.look_ahead().unwrap().kind.as_id().unwrap(), *id);
            }
            for _ in 0..j {
                lexer.go_back().unwrap();
            }
            if j == k {
                assert!(lexer.go_back().is_err(), "k={} j={}", k, j);
            }

            // The look cursor sits k - j tokens in
            let peeked = lexer.look_ahead().unwrap();
            assert_eq!(peeked.kind.as_id().unwrap(), ids[k - j], "k={} j={}", k, j);
            lexer.go_back().unwrap();

            // Consumption ignores the look cursor and starts from the front
            for id in &ids[..=k - j] {
                assert_eq!(lexer.get_token().unwrap().kind.as_id().unwrap(), *id, "k={} j={}", k, j);
            }
            assert_eq!(
                lexer.look_ahead().unwrap().kind.as_id().unwrap(),
                ids[k - j + 1],
                "k={} j={}",
                k,
                j
            );
        }
    }
}

#[test]
fn test_go_back_underflow() {
    let mut lexer = Lexer::new("a b", None, StringPool::new());

    lexer.get_token().unwrap();
    let error = lexer.go_back().unwrap_err();

    assert_eq!(error.get_error_name(), "LookaheadUnderflow");
}

#[test]
fn test_identifiers_are_interned() {
    let pool = StringPool::new();
    let mut lexer = Lexer::new("foo foo", None, pool.clone());

    let a = lexer.get_token().unwrap();
    let b = lexer.get_token().unwrap();

    assert!(a.kind.as_id().unwrap().ptr_eq(b.kind.as_id().unwrap()));
    assert_eq!(pool.len(), 1);
}
