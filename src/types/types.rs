use std::fmt::{self, Display};

use crate::arena::{handle::Ref, strings::Name};

pub type TypeRef = Ref<Type>;

/// Type tags.
///
/// The declaration order is meaningful: primitives come first and
/// `Bool..=Int` are the integer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeId {
    Void,
    Bool,
    Char,
    Int,
    Float,
    Pointer,
    Array,
    Class,
}

impl TypeId {
    pub fn is_void(self) -> bool {
        self == TypeId::Void
    }

    pub fn is_integer(self) -> bool {
        matches!(self, TypeId::Bool | TypeId::Char | TypeId::Int)
    }

    pub fn is_primitive(self) -> bool {
        self <= TypeId::Float
    }

    pub fn is_pointer(self) -> bool {
        self == TypeId::Pointer
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, TypeId::Array | TypeId::Class)
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeId::Void => "void",
            TypeId::Bool => "bool",
            TypeId::Char => "char",
            TypeId::Int => "int",
            TypeId::Float => "float",
            TypeId::Pointer => "pointer",
            TypeId::Array => "array",
            TypeId::Class => "class",
        }
    }
}

#[derive(Debug)]
pub enum Type {
    Primitive(TypeId),
    Pointer { pointee: TypeRef },
    /// `length` is 0 for an unsized array (`int[]`).
    Array { element: TypeRef, length: u32 },
    Class { name: Name, members: Vec<TypeRef> },
}

impl Type {
    pub fn id(&self) -> TypeId {
        match self {
            Type::Primitive(id) => *id,
            Type::Pointer { .. } => TypeId::Pointer,
            Type::Array { .. } => TypeId::Array,
            Type::Class { .. } => TypeId::Class,
        }
    }

    pub fn pointee(&self) -> Option<&TypeRef> {
        match self {
            Type::Pointer { pointee } => Some(pointee),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            Type::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn members(&self) -> &[TypeRef] {
        match self {
            Type::Class { members, .. } => members,
            _ => &[],
        }
    }
}

/// Compares two types.
///
/// Class types are equal only when they are the same slot; primitive, pointer
/// and array types compare structurally.
pub fn same_type(a: &TypeRef, b: &TypeRef) -> bool {
    if a.ptr_eq(b) {
        return true;
    }

    match (&*a.borrow(), &*b.borrow()) {
        (Type::Primitive(x), Type::Primitive(y)) => x == y,
        (Type::Pointer { pointee: x }, Type::Pointer { pointee: y }) => same_type(x, y),
        (
            Type::Array {
                element: x,
                length: n,
            },
            Type::Array {
                element: y,
                length: m,
            },
        ) => n == m && same_type(x, y),
        _ => false,
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(id) => write!(f, "{}", id.name()),
            Type::Pointer { pointee } => write!(f, "{}*", pointee.borrow()),
            Type::Array { element, length } => write!(f, "[{} x {}]", length, element.borrow()),
            Type::Class { name, .. } => write!(f, "class {}", name),
        }
    }
}
