use std::fmt::{self, Display};

use crate::arena::handle::Ref;

use super::types::{Type, TypeId, TypeRef};

pub type ConstantRef = Ref<Constant>;

/// A typed compile-time value: its type and the raw little-endian bytes.
///
/// The accessors reinterpret the bytes according to the type. Asking for a
/// representation the type does not have is a bug in the caller and panics.
#[derive(Debug)]
pub struct Constant {
    ty: TypeRef,
    bytes: Vec<u8>,
}

impl Constant {
    pub fn new(ty: TypeRef, bytes: Vec<u8>) -> Self {
        Constant { ty, bytes }
    }

    pub fn get_type(&self) -> &TypeRef {
        &self.ty
    }

    pub fn type_id(&self) -> TypeId {
        self.ty.borrow().id()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get_bool(&self) -> bool {
        self.expect_type(TypeId::Bool);
        self.bytes[0] != 0
    }

    pub fn get_char(&self) -> u8 {
        self.expect_type(TypeId::Char);
        self.bytes[0]
    }

    pub fn get_int(&self) -> i32 {
        self.expect_type(TypeId::Int);
        i32::from_le_bytes(self.fixed::<4>())
    }

    pub fn get_float(&self) -> f64 {
        self.expect_type(TypeId::Float);
        f64::from_le_bytes(self.fixed::<8>())
    }

    /// Raw bytes of a string constant (`char*`).
    pub fn get_string(&self) -> &[u8] {
        let is_char_pointer = matches!(
            &*self.ty.borrow(),
            Type::Pointer { pointee } if pointee.borrow().id() == TypeId::Char
        );
        assert!(is_char_pointer, "Constant is not a string");
        &self.bytes
    }

    /// Value of any integer-typed constant (bool, char or int).
    pub fn get_integer_value(&self) -> i64 {
        match self.type_id() {
            TypeId::Bool => self.get_bool() as i64,
            TypeId::Char => self.get_char() as i64,
            TypeId::Int => self.get_int() as i64,
            other => panic!("Constant of type {} is not an integer", other.name()),
        }
    }

    fn expect_type(&self, id: TypeId) {
        let actual = self.type_id();
        assert!(
            actual == id,
            "Constant is not {} (found {})",
            id.name(),
            actual.name()
        );
    }

    fn fixed<const N: usize>(&self) -> [u8; N] {
        let mut buffer = [0u8; N];
        let len = self.bytes.len().min(N);
        buffer[..len].copy_from_slice(&self.bytes[..len]);
        buffer
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_id() {
            TypeId::Bool => write!(f, "{}", self.get_bool()),
            TypeId::Char => write!(f, "'{}'", self.get_char() as char),
            TypeId::Int => write!(f, "{}", self.get_int()),
            TypeId::Float => write!(f, "{:?}", self.get_float()),
            TypeId::Pointer => write!(f, "{:?}", String::from_utf8_lossy(self.get_string())),
            other => write!(f, "<{}>", other.name()),
        }
    }
}
