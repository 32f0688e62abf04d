//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance spanning two source offsets
//! - `MK_NODE_REF!` - Declares a category-checked view over a `NodeRef`
//!
//! These macros reduce boilerplate in the lexer and the AST model.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$start` - Byte offset where the token starts
/// * `$end` - Byte offset just past the token
/// * `$file` - `Rc<String>` naming the source
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Eof, pos, pos, &lexer.file);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $start:expr, $end:expr, $file:expr) => {
        Token {
            kind: $kind,
            span: Span {
                start: Position($start as u32, Rc::clone($file)),
                end: Position($end as u32, Rc::clone($file)),
            },
        }
    };
}

/// Declares a handle type that is statically known to point at one node category.
///
/// The generated type wraps a `NodeRef` and can only be built through the
/// checked conversion `from_node`, so `get` can project to the category without
/// re-checking.
///
/// # Arguments
///
/// * `$name` - The handle type to declare
/// * `$variant` - The `Node` variant it views
/// * `$inner` - The category type held by that variant
#[macro_export]
macro_rules! MK_NODE_REF {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(NodeRef);

        impl $name {
            /// Checked down-cast; gives the handle back when the category differs.
            pub fn from_node(node: NodeRef) -> Result<Self, NodeRef> {
                let matches = node.exists() && matches!(&*node.borrow(), Node::$variant(_));
                if matches {
                    Ok($name(node))
                } else {
                    Err(node)
                }
            }

            pub fn get(&self) -> std::cell::Ref<'_, $inner> {
                std::cell::Ref::map(self.0.borrow(), |node| match node {
                    Node::$variant(inner) => inner,
                    _ => unreachable!(concat!(stringify!($name), " always views ", stringify!($variant))),
                })
            }

            pub fn node(&self) -> &NodeRef {
                &self.0
            }

            pub fn into_node(self) -> NodeRef {
                self.0
            }

            pub fn ptr_eq(&self, other: &$name) -> bool {
                self.0.ptr_eq(&other.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", &*self.0.borrow())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", &*self.0.borrow())
            }
        }
    };
}
