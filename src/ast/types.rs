//! Type syntax as written in the source.
//!
//! These nodes are what the parser reads (`int*`, `Foo[4]`, `char[]`). They are
//! lowered to semantic [`crate::types::types::Type`]s by the session when a
//! class is registered.

use crate::{arena::strings::Name, types::types::TypeRef};

use super::node::{ExprRef, TypeExprRef};

#[derive(Debug)]
pub enum TypeExpr {
    /// One of the canonical primitive types.
    Primitive(TypeRef),
    Pointer(TypeExprRef),
    /// `size` is `None` for `[]`.
    Array {
        element: TypeExprRef,
        size: Option<ExprRef>,
    },
    /// Reference to a declared class by name.
    Class(Name),
}

impl TypeExpr {
    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeExpr::Pointer(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeExpr::Array { .. })
    }

    /// The innermost named type, after peeling every suffix.
    pub fn base_name(&self) -> String {
        match self {
            TypeExpr::Primitive(ty) => ty.borrow().to_string(),
            TypeExpr::Pointer(inner) => inner.get().base_name(),
            TypeExpr::Array { element, .. } => element.get().base_name(),
            TypeExpr::Class(name) => name.to_string(),
        }
    }
}
