use crate::{
    ast::node::{Node, NodeMut},
    types::{
        constant::{Constant, ConstantRef},
        types::{Type, TypeId, TypeRef},
    },
};

use super::{
    pool::Pool,
    strings::{Name, StringPool},
};

/// Owner of every pool used by one compilation.
///
/// All handles produced while parsing point into these pools. Nothing is freed
/// until the context itself is dropped.
pub struct Context {
    pub strings: StringPool,
    pub nodes: Pool<Node>,
    pub types: Pool<Type>,
    pub constants: Pool<Constant>,
    primitives: [TypeRef; 5],
}

impl Context {
    pub fn new() -> Self {
        let types = Pool::new();
        let primitives = [
            TypeId::Void,
            TypeId::Bool,
            TypeId::Char,
            TypeId::Int,
            TypeId::Float,
        ]
        .map(|id| types.allocate(Type::Primitive(id)).freeze());

        Context {
            strings: StringPool::new(),
            nodes: Pool::new(),
            types,
            constants: Pool::new(),
            primitives,
        }
    }

    /// The canonical type for a primitive tag.
    pub fn primitive(&self, id: TypeId) -> TypeRef {
        match id {
            TypeId::Void => self.primitives[0].clone(),
            TypeId::Bool => self.primitives[1].clone(),
            TypeId::Char => self.primitives[2].clone(),
            TypeId::Int => self.primitives[3].clone(),
            TypeId::Float => self.primitives[4].clone(),
            _ => panic!("Attempted to get primitive type for {:?}", id),
        }
    }

    pub fn intern(&self, text: &str) -> Name {
        self.strings.intern(text)
    }

    pub fn alloc_node(&self, node: impl Into<Node>) -> NodeMut {
        self.nodes.allocate(node.into())
    }

    pub fn alloc_type(&self, ty: Type) -> TypeRef {
        self.types.allocate(ty).freeze()
    }

    pub fn alloc_constant(&self, constant: Constant) -> ConstantRef {
        self.constants.allocate(constant).freeze()
    }

    pub fn pointer_to(&self, pointee: TypeRef) -> TypeRef {
        self.alloc_type(Type::Pointer { pointee })
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
