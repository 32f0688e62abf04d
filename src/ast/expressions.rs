use crate::{arena::strings::Name, lexer::operators::Operator, types::constant::ConstantRef};

use super::node::ExprRef;

/// Expression Nodes
#[derive(Debug)]
pub enum Expr {
    Op(OpExpr),
    Value(ValueExpr),
    Id(IdExpr),
    Call(CallExpr),
    List(ListExpr),
}

/// Operator application.
///
/// Binary operators and indexing use both operands, unary operators only
/// `lhs`. Member access stores the member name as an identifier in `rhs`.
#[derive(Debug)]
pub struct OpExpr {
    pub op: Operator,
    pub lhs: Option<ExprRef>,
    pub rhs: Option<ExprRef>,
}

impl OpExpr {
    pub fn new(op: Operator) -> Self {
        OpExpr {
            op,
            lhs: None,
            rhs: None,
        }
    }

    pub fn is_unary(&self) -> bool {
        self.rhs.is_none()
    }
}

/// Literal value.
#[derive(Debug)]
pub struct ValueExpr {
    pub constant: ConstantRef,
}

#[derive(Debug)]
pub struct IdExpr {
    pub name: Name,
}

/// Function call. The callee is always an identifier.
#[derive(Debug, Default)]
pub struct CallExpr {
    pub callee: Option<ExprRef>,
    pub args: Vec<ExprRef>,
}

/// Brace-delimited initializer list, possibly nested.
#[derive(Debug, Default)]
pub struct ListExpr {
    pub members: Vec<ExprRef>,
}

impl Expr {
    pub fn as_op(&self) -> Option<&OpExpr> {
        match self {
            Expr::Op(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&Name> {
        match self {
            Expr::Id(id) => Some(&id.name),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&ConstantRef> {
        match self {
            Expr::Value(value) => Some(&value.constant),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListExpr> {
        match self {
            Expr::List(list) => Some(list),
            _ => None,
        }
    }
}
