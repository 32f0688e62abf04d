//! Integration tests for the whole front end.
//!
//! These tests drive the public entry points of a `Session`: parsing files
//! from disk, resolving and caching imports through in-memory loaders, and
//! rendering diagnostics against the source they point into.

use std::path::Path;

use csl::{
    ast::node::NodeRef,
    errors::errors::ErrorImpl,
    render_error,
    session::session::{MemoryLoader, Session},
};
use pretty_assertions::assert_eq;

fn items(root: &NodeRef) -> Vec<NodeRef> {
    let block = root.clone().into_stmt().unwrap();
    let items = block.get().as_block().unwrap().iter().cloned().collect();
    items
}

#[test]
fn test_parse_fixture_program() {
    let mut session = Session::new();
    let root = session.parse_file(Path::new("tests/fixtures/main.csl")).unwrap();

    assert_eq!(
        root.to_string(),
        "(block \
         (block (class Point (decl int x) (decl int y) \
         (fn scale (k: int) void (block (MULASN x k) (MULASN y k))))) \
         (fn norm2 (p: Point*) int (block (return \
         (ADD (MUL (ARROW p x) (ARROW p x)) (MUL (ARROW p y) (ARROW p y)))))) \
         (fn main () int (block \
         (decl Point[2] points (list (list 1 2) (list 3 4))) \
         (decl int total 0) \
         (for (ASN i 0) (LT i 2) (POSTINC i) \
         (block (ADDASN total (call norm2 (ADDR (INDEX points i)))))) \
         (return total))))"
    );

    let point = session.class_type("Point").unwrap();
    assert_eq!(point.borrow().members().len(), 2);
}

#[test]
fn test_parse_file_is_cached() {
    let mut session = Session::new();
    let first = session.parse_file(Path::new("tests/fixtures/lib/point.csl")).unwrap();
    let second = session.parse_file(Path::new("tests/fixtures/lib/point.csl")).unwrap();

    assert!(first.ptr_eq(&second));
}

#[test]
fn test_import_parsed_once() {
    let loader = MemoryLoader::new()
        .with("main.csl", "import \"shapes.csl\"; import \"./shapes.csl\"; Square s;")
        .with("shapes.csl", "class Square { int side; }");
    let mut session = Session::with_loader(loader);

    let root = session.parse_file(Path::new("main.csl")).unwrap();
    let items = items(&root);

    assert_eq!(items.len(), 3);
    assert!(items[0].ptr_eq(&items[1]));
    assert_eq!(items[2].to_string(), "(decl Square s)");
}

#[test]
fn test_import_relative_to_importer() {
    let loader = MemoryLoader::new()
        .with("app/main.csl", "import \"util/a.csl\"; A x;")
        .with("app/util/a.csl", "import \"../b.csl\"; class A { B b; }")
        .with("app/b.csl", "class B { int v; }");
    let mut session = Session::with_loader(loader);

    let root = session.parse_file(Path::new("app/main.csl")).unwrap();
    assert_eq!(
        root.to_string(),
        "(block (block (block (class B (decl int v))) (class A (decl B b))) (decl A x))"
    );
}

#[test]
fn test_import_from_string_source() {
    let loader = MemoryLoader::new().with("lib.csl", "fn one() -> int { return 1; }");
    let mut session = Session::with_loader(loader);

    let root = session
        .parse_string("import \"lib.csl\"; one();", None)
        .unwrap();
    assert_eq!(
        root.to_string(),
        "(block (block (fn one () int (block (return 1)))) (call one))"
    );
}

#[test]
fn test_circular_import() {
    let loader = MemoryLoader::new()
        .with("a.csl", "import \"b.csl\";")
        .with("b.csl", "import \"a.csl\";");
    let mut session = Session::with_loader(loader);

    let err = session.parse_file(Path::new("a.csl")).unwrap_err();
    assert!(matches!(err.get_impl(), ErrorImpl::CircularImport { path } if path == "a.csl"));
    assert_eq!(err.get_position().1.as_str(), "b.csl");
}

#[test]
fn test_missing_import() {
    let loader = MemoryLoader::new().with("main.csl", "import \"nowhere.csl\";");
    let mut session = Session::with_loader(loader);

    let err = session.parse_file(Path::new("main.csl")).unwrap_err();
    assert!(matches!(err.get_impl(), ErrorImpl::ImportFailed { path, .. } if path == "nowhere.csl"));

    let err = session.parse_string("import nowhere;", None).unwrap_err();
    assert!(matches!(err.get_impl(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_error_in_imported_unit() {
    let loader = MemoryLoader::new()
        .with("main.csl", "import \"bad.csl\";")
        .with("bad.csl", "int x = @;");
    let mut session = Session::with_loader(loader);

    let err = session.parse_file(Path::new("main.csl")).unwrap_err();
    assert_eq!(err.get_error_name(), "UnrecognisedToken");

    let file = err.get_position().1.to_string();
    assert_eq!(file, "bad.csl");

    let source = session.source_of(&file).unwrap();
    assert_eq!(
        render_error(&err, &source, &file),
        "Error: UnrecognisedToken: unrecognised token: \"@\"\n\
         -> bad.csl\n  \
         |\n\
         1 | int x = @;\n  \
         | --------^"
    );
}

#[test]
fn test_render_fixture_error() {
    let mut session = Session::new();
    let err = session
        .parse_file(Path::new("tests/fixtures/broken.csl"))
        .unwrap_err();

    assert_eq!(err.get_error_name(), "OperandRequired");

    let file = err.get_position().1.to_string();
    let source = session.source_of(&file).unwrap();
    let rendered = render_error(&err, &source, "broken.csl");

    assert!(rendered.starts_with("Error: OperandRequired: operand required, found \";\""));
    assert!(rendered.contains("-> broken.csl\n"));
    assert!(rendered.ends_with("3 | x = x + ;\n  | --------^"));
}
