use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::types::TypeId;

/// Precedence of the operator stack floor. No real operator binds this loosely.
pub const STACK_FLOOR: u32 = 100;

lazy_static! {
    /// Builtin type names, which also seed every session's type-name table.
    pub static ref PRIMITIVE_LOOKUP: HashMap<&'static str, TypeId> = {
        let mut map = HashMap::new();
        map.insert("void", TypeId::Void);
        map.insert("bool", TypeId::Bool);
        map.insert("char", TypeId::Char);
        map.insert("int", TypeId::Int);
        map.insert("float", TypeId::Float);
        map
    };
}
