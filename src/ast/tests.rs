//! Unit tests for the AST model and the expression builder.

use pretty_assertions::assert_eq;

use crate::{
    arena::context::Context,
    lexer::operators::Operator,
    types::{constant::Constant, types::TypeId},
};

use super::{
    builder::ExprBuilder,
    declarations::{Decl, FunctionDecl, Param},
    eval::eval_const_expr,
    expressions::{CallExpr, Expr, IdExpr, ListExpr, OpExpr, ValueExpr},
    node::{NodeMut, NodeRef, NodeTag, TreeError},
    statements::{BlockStmt, Stmt},
    types::TypeExpr,
};

fn id(ctx: &Context, name: &str) -> NodeRef {
    ctx.alloc_node(Expr::Id(IdExpr {
        name: ctx.intern(name),
    }))
    .freeze()
}

fn int(ctx: &Context, value: i32) -> NodeRef {
    let constant = ctx.alloc_constant(Constant::new(
        ctx.primitive(TypeId::Int),
        value.to_le_bytes().to_vec(),
    ));
    ctx.alloc_node(Expr::Value(ValueExpr { constant })).freeze()
}

fn op(ctx: &Context, operator: Operator) -> NodeMut {
    ctx.alloc_node(Expr::Op(OpExpr::new(operator)))
}

fn binary(ctx: &Context, operator: Operator, lhs: NodeRef, rhs: NodeRef) -> NodeRef {
    let node = op(ctx, operator);
    node.borrow_mut().add_child(lhs).unwrap();
    node.borrow_mut().add_child(rhs).unwrap();
    node.freeze()
}

#[test]
fn test_op_fills_lhs_then_rhs() {
    let ctx = Context::new();
    let add = binary(&ctx, Operator::Add, id(&ctx, "a"), int(&ctx, 1));

    assert_eq!(add.to_string(), "(ADD a 1)");
    assert_eq!(add.tag(), NodeTag::Op);
}

#[test]
fn test_op_rejects_third_operand() {
    let ctx = Context::new();
    let node = op(&ctx, Operator::Mul);
    node.borrow_mut().add_child(id(&ctx, "a")).unwrap();
    node.borrow_mut().add_child(id(&ctx, "b")).unwrap();

    let result = node.borrow_mut().add_child(id(&ctx, "c"));
    assert_eq!(result, Err(TreeError::OperandsFull));
}

#[test]
fn test_leaf_rejects_children() {
    let ctx = Context::new();
    let leaf = ctx.alloc_node(Expr::Id(IdExpr {
        name: ctx.intern("x"),
    }));

    let result = leaf.borrow_mut().add_child(id(&ctx, "y"));
    assert_eq!(result, Err(TreeError::LeafHasNoChildren));
}

#[test]
fn test_call_requires_identifier_callee() {
    let ctx = Context::new();
    let call = ctx.alloc_node(Expr::Call(CallExpr::default()));

    let result = call.borrow_mut().add_child(int(&ctx, 1));
    assert_eq!(result, Err(TreeError::CallTargetNotIdentifier));

    call.borrow_mut().add_child(id(&ctx, "f")).unwrap();
    call.borrow_mut().add_child(int(&ctx, 1)).unwrap();
    call.borrow_mut().add_child(int(&ctx, 2)).unwrap();
    assert_eq!(call.freeze().to_string(), "(call f 1 2)");
}

#[test]
fn test_children_must_be_expressions() {
    let ctx = Context::new();
    let list = ctx.alloc_node(Expr::List(ListExpr::default()));
    let block = ctx.alloc_node(Stmt::Block(BlockStmt::default())).freeze();

    let result = list.borrow_mut().add_child(block);
    assert_eq!(result, Err(TreeError::ExpectedExpression));
}

#[test]
fn test_block_append_keeps_order() {
    let ctx = Context::new();
    let block = ctx.alloc_node(Stmt::Block(BlockStmt::default()));

    block.borrow_mut().append(id(&ctx, "a")).unwrap();
    block.borrow_mut().append(id(&ctx, "b")).unwrap();

    let result = op(&ctx, Operator::Add).borrow_mut().append(id(&ctx, "c"));
    assert_eq!(result, Err(TreeError::NotABlock));
    assert_eq!(block.freeze().to_string(), "(block a b)");
}

#[test]
fn test_function_mutators() {
    let ctx = Context::new();
    let void = ctx
        .alloc_node(TypeExpr::Primitive(ctx.primitive(TypeId::Void)))
        .freeze()
        .into_type_expr()
        .unwrap();
    let int_ty = ctx
        .alloc_node(TypeExpr::Primitive(ctx.primitive(TypeId::Int)))
        .freeze()
        .into_type_expr()
        .unwrap();

    let function = ctx.alloc_node(Decl::Function(FunctionDecl {
        name: ctx.intern("f"),
        params: vec![],
        return_type: void,
        body: None,
    }));

    function
        .borrow_mut()
        .add_argument(Param {
            name: Some(ctx.intern("a")),
            ty: int_ty.clone(),
        })
        .unwrap();
    function.borrow_mut().set_return_type(int_ty).unwrap();
    let body = ctx
        .alloc_node(Stmt::Block(BlockStmt::default()))
        .freeze()
        .into_stmt()
        .unwrap();
    function.borrow_mut().set_body(body).unwrap();

    let function = function.freeze();
    assert_eq!(function.to_string(), "(fn f (a: int) int (block))");
    assert!(function.borrow().is_decl());
}

#[test]
fn test_category_predicates() {
    let ctx = Context::new();
    let expr = id(&ctx, "x");
    let block = ctx.alloc_node(Stmt::Break).freeze();

    assert!(expr.borrow().is_expr());
    assert!(expr.borrow().is_stmt());
    assert!(expr.borrow().is_id());
    assert!(!expr.borrow().is_decl());
    assert!(block.borrow().is_stmt());
    assert!(block.borrow().is_control());
    assert!(!block.borrow().is_expr());
}

#[test]
fn test_checked_down_cast() {
    let ctx = Context::new();
    let node = id(&ctx, "x");

    let node = node.into_decl().unwrap_err();
    let expr = node.into_expr().unwrap();
    assert_eq!(expr.get().as_id().unwrap(), "x");
}

#[test]
fn test_builder_prefix_chain() {
    let ctx = Context::new();
    let mut builder = ExprBuilder::new();

    builder.extend_child(op(&ctx, Operator::Minus)).unwrap();
    builder.extend_child(op(&ctx, Operator::Inc)).unwrap();
    builder.add_child(id(&ctx, "x")).unwrap();

    assert_eq!(builder.finish().unwrap().to_string(), "(MINUS (INC x))");
}

#[test]
fn test_builder_postfix_chain() {
    let ctx = Context::new();
    let mut builder = ExprBuilder::new();

    builder.add_child(id(&ctx, "a")).unwrap();
    builder.extend_parent(op(&ctx, Operator::Index)).unwrap();
    builder.add_child(id(&ctx, "i")).unwrap();
    builder.extend_parent(op(&ctx, Operator::Mber)).unwrap();
    builder.add_child(id(&ctx, "b")).unwrap();
    builder.extend_parent(op(&ctx, Operator::PostInc)).unwrap();

    assert_eq!(
        builder.finish().unwrap().to_string(),
        "(POSTINC (MBER (INDEX a i) b))"
    );
}

#[test]
fn test_builder_first_node_is_root() {
    let ctx = Context::new();
    let mut builder = ExprBuilder::new();
    assert!(builder.is_empty());

    let x = id(&ctx, "x");
    builder.add_child(x.clone()).unwrap();

    assert!(builder.root().unwrap().ptr_eq(&x));
    // A const root leaves nothing open
    assert_eq!(builder.add_child(id(&ctx, "y")), Err(TreeError::NoOpenNode));
}

#[test]
fn test_eval_const_expr() {
    let ctx = Context::new();
    let product = binary(&ctx, Operator::Mul, int(&ctx, 4), int(&ctx, 8));
    let sum = binary(&ctx, Operator::Add, product, int(&ctx, 2));

    assert_eq!(eval_const_expr(&sum.into_expr().unwrap()), Some(34));

    let with_id = binary(&ctx, Operator::Add, id(&ctx, "n"), int(&ctx, 2));
    assert_eq!(eval_const_expr(&with_id.into_expr().unwrap()), None);

    let by_zero = binary(&ctx, Operator::Div, int(&ctx, 1), int(&ctx, 0));
    assert_eq!(eval_const_expr(&by_zero.into_expr().unwrap()), None);
}
