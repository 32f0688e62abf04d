//! Unit tests for types and constants.

use crate::arena::context::Context;

use super::{
    constant::Constant,
    types::{same_type, Type, TypeId},
};

#[test]
fn test_same_type_structural() {
    let ctx = Context::new();
    let a = ctx.pointer_to(ctx.primitive(TypeId::Int));
    let b = ctx.pointer_to(ctx.primitive(TypeId::Int));
    let c = ctx.pointer_to(ctx.primitive(TypeId::Char));

    assert!(same_type(&a, &b));
    assert!(!same_type(&a, &c));

    let array = ctx.alloc_type(Type::Array {
        element: ctx.primitive(TypeId::Int),
        length: 4,
    });
    let other = ctx.alloc_type(Type::Array {
        element: ctx.primitive(TypeId::Int),
        length: 5,
    });
    assert!(!same_type(&array, &other));
}

#[test]
fn test_same_type_class_identity() {
    let ctx = Context::new();
    let make = |name: &str| {
        ctx.alloc_type(Type::Class {
            name: ctx.intern(name),
            members: vec![ctx.primitive(TypeId::Int)],
        })
    };

    let foo = make("Foo");
    let twin = make("Foo");

    assert!(same_type(&foo, &foo.clone()));
    assert!(!same_type(&foo, &twin));
}

#[test]
fn test_type_display() {
    let ctx = Context::new();
    let pointer = ctx.pointer_to(ctx.primitive(TypeId::Int));
    let array = ctx.alloc_type(Type::Array {
        element: ctx.primitive(TypeId::Float),
        length: 10,
    });
    let class = ctx.alloc_type(Type::Class {
        name: ctx.intern("Foo"),
        members: vec![],
    });

    assert_eq!(pointer.borrow().to_string(), "int*");
    assert_eq!(array.borrow().to_string(), "[10 x float]");
    assert_eq!(class.borrow().to_string(), "class Foo");
}

#[test]
fn test_type_id_predicates() {
    assert!(TypeId::Bool.is_integer());
    assert!(TypeId::Char.is_integer());
    assert!(!TypeId::Float.is_integer());
    assert!(TypeId::Float.is_primitive());
    assert!(!TypeId::Pointer.is_primitive());
    assert!(TypeId::Class.is_aggregate());
    assert!(TypeId::Void.is_void());
}

#[test]
fn test_constant_accessors() {
    let ctx = Context::new();
    let int = Constant::new(ctx.primitive(TypeId::Int), (-5i32).to_le_bytes().to_vec());
    let float = Constant::new(ctx.primitive(TypeId::Float), 2.5f64.to_le_bytes().to_vec());
    let boolean = Constant::new(ctx.primitive(TypeId::Bool), vec![1]);
    let string = Constant::new(
        ctx.pointer_to(ctx.primitive(TypeId::Char)),
        b"hi".to_vec(),
    );

    assert_eq!(int.get_int(), -5);
    assert_eq!(int.get_integer_value(), -5);
    assert_eq!(float.get_float(), 2.5);
    assert!(boolean.get_bool());
    assert_eq!(boolean.get_integer_value(), 1);
    assert_eq!(string.get_string(), b"hi");
    assert_eq!(string.to_string(), "\"hi\"");
}

#[test]
#[should_panic(expected = "Constant is not int")]
fn test_constant_wrong_accessor_panics() {
    let ctx = Context::new();
    let float = Constant::new(ctx.primitive(TypeId::Float), 1.0f64.to_le_bytes().to_vec());

    float.get_int();
}

#[test]
#[should_panic(expected = "Constant is not a string")]
fn test_constant_string_accessor_panics() {
    let ctx = Context::new();
    let int = Constant::new(ctx.primitive(TypeId::Int), 0i32.to_le_bytes().to_vec());

    int.get_string();
}
