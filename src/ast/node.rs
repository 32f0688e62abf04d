use thiserror::Error;

use crate::{
    arena::handle::{MutRef, Ref},
    MK_NODE_REF,
};

use super::{
    declarations::{Decl, Param},
    expressions::Expr,
    statements::Stmt,
    types::TypeExpr,
};

pub type NodeRef = Ref<Node>;
pub type NodeMut = MutRef<Node>;

/// Node Tags
///
/// Grouped by category: expressions, declarations, type syntax, statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Op,
    Value,
    Id,
    Call,
    List,
    VarDecl,
    Function,
    Class,
    Type,
    Block,
    If,
    While,
    For,
    Continue,
    Break,
    Return,
}

/// Any node of the syntax tree.
#[derive(Debug)]
pub enum Node {
    Expr(Expr),
    Decl(Decl),
    Type(TypeExpr),
    Stmt(Stmt),
}

/// Misuse of a node mutator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("leaf nodes take no children")]
    LeafHasNoChildren,
    #[error("operator already has both operands")]
    OperandsFull,
    #[error("call target must be an identifier")]
    CallTargetNotIdentifier,
    #[error("child must be an expression")]
    ExpectedExpression,
    #[error("node is not a block")]
    NotABlock,
    #[error("node is not a function declaration")]
    NotAFunction,
    #[error("node is not a class declaration")]
    NotAClass,
    #[error("builder has no open node to attach to")]
    NoOpenNode,
    #[error("node has the wrong category")]
    WrongCategory,
}

MK_NODE_REF!(
    /// Handle to a node known to be an expression.
    ExprRef,
    Expr,
    Expr
);
MK_NODE_REF!(
    /// Handle to a node known to be a declaration.
    DeclRef,
    Decl,
    Decl
);
MK_NODE_REF!(
    /// Handle to a node known to be type syntax.
    TypeExprRef,
    Type,
    TypeExpr
);
MK_NODE_REF!(
    /// Handle to a node known to be a statement (not an expression).
    StmtRef,
    Stmt,
    Stmt
);

impl Node {
    pub fn tag(&self) -> NodeTag {
        match self {
            Node::Expr(expr) => match expr {
                Expr::Op(_) => NodeTag::Op,
                Expr::Value(_) => NodeTag::Value,
                Expr::Id(_) => NodeTag::Id,
                Expr::Call(_) => NodeTag::Call,
                Expr::List(_) => NodeTag::List,
            },
            Node::Decl(decl) => match decl {
                Decl::Var(_) => NodeTag::VarDecl,
                Decl::Function(_) => NodeTag::Function,
                Decl::Class(_) => NodeTag::Class,
            },
            Node::Type(_) => NodeTag::Type,
            Node::Stmt(stmt) => match stmt {
                Stmt::Block(_) => NodeTag::Block,
                Stmt::If(_) => NodeTag::If,
                Stmt::While(_) => NodeTag::While,
                Stmt::For(_) => NodeTag::For,
                Stmt::Continue => NodeTag::Continue,
                Stmt::Break => NodeTag::Break,
                Stmt::Return(_) => NodeTag::Return,
            },
        }
    }

    pub fn is_expr(&self) -> bool {
        matches!(self, Node::Expr(_))
    }

    pub fn is_decl(&self) -> bool {
        matches!(self, Node::Decl(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Node::Type(_))
    }

    /// Statements, and expressions since every expression is a valid statement.
    pub fn is_stmt(&self) -> bool {
        matches!(self, Node::Stmt(_) | Node::Expr(_))
    }

    pub fn is_id(&self) -> bool {
        self.tag() == NodeTag::Id
    }

    pub fn is_control(&self) -> bool {
        matches!(
            self.tag(),
            NodeTag::If
                | NodeTag::While
                | NodeTag::For
                | NodeTag::Continue
                | NodeTag::Break
                | NodeTag::Return
        )
    }

    /// Attaches an expression child.
    ///
    /// Operators fill their left operand, then their right one. Calls take the
    /// callee first, which must be an identifier, then arguments. Lists append.
    pub fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        let child = child
            .into_expr()
            .map_err(|_| TreeError::ExpectedExpression)?;

        match self {
            Node::Expr(Expr::Op(op)) => {
                if op.lhs.is_none() {
                    op.lhs = Some(child);
                } else if op.rhs.is_none() {
                    op.rhs = Some(child);
                } else {
                    return Err(TreeError::OperandsFull);
                }
            }
            Node::Expr(Expr::Call(call)) => {
                if call.callee.is_none() {
                    if !child.node().borrow().is_id() {
                        return Err(TreeError::CallTargetNotIdentifier);
                    }
                    call.callee = Some(child);
                } else {
                    call.args.push(child);
                }
            }
            Node::Expr(Expr::List(list)) => list.members.push(child),
            _ => return Err(TreeError::LeafHasNoChildren),
        }

        Ok(())
    }

    /// Appends an item to a block.
    pub fn append(&mut self, item: NodeRef) -> Result<(), TreeError> {
        match self {
            Node::Stmt(Stmt::Block(block)) => {
                block.items.push(item);
                Ok(())
            }
            _ => Err(TreeError::NotABlock),
        }
    }

    pub fn add_argument(&mut self, param: Param) -> Result<(), TreeError> {
        match self {
            Node::Decl(Decl::Function(function)) => {
                function.params.push(param);
                Ok(())
            }
            _ => Err(TreeError::NotAFunction),
        }
    }

    pub fn set_return_type(&mut self, ty: TypeExprRef) -> Result<(), TreeError> {
        match self {
            Node::Decl(Decl::Function(function)) => {
                function.return_type = ty;
                Ok(())
            }
            _ => Err(TreeError::NotAFunction),
        }
    }

    pub fn set_body(&mut self, body: StmtRef) -> Result<(), TreeError> {
        match self {
            Node::Decl(Decl::Function(function)) => {
                function.body = Some(body);
                Ok(())
            }
            _ => Err(TreeError::NotAFunction),
        }
    }

    pub fn add_member(&mut self, member: DeclRef) -> Result<(), TreeError> {
        match self {
            Node::Decl(Decl::Class(class)) => {
                class.members.push(member);
                Ok(())
            }
            _ => Err(TreeError::NotAClass),
        }
    }

    pub fn add_method(&mut self, method: DeclRef) -> Result<(), TreeError> {
        match self {
            Node::Decl(Decl::Class(class)) => {
                class.methods.push(method);
                Ok(())
            }
            _ => Err(TreeError::NotAClass),
        }
    }
}

impl Ref<Node> {
    pub fn tag(&self) -> NodeTag {
        self.borrow().tag()
    }

    pub fn into_expr(self) -> Result<ExprRef, NodeRef> {
        ExprRef::from_node(self)
    }

    pub fn into_decl(self) -> Result<DeclRef, NodeRef> {
        DeclRef::from_node(self)
    }

    pub fn into_type_expr(self) -> Result<TypeExprRef, NodeRef> {
        TypeExprRef::from_node(self)
    }

    pub fn into_stmt(self) -> Result<StmtRef, NodeRef> {
        StmtRef::from_node(self)
    }
}

impl From<Expr> for Node {
    fn from(expr: Expr) -> Self {
        Node::Expr(expr)
    }
}

impl From<Decl> for Node {
    fn from(decl: Decl) -> Self {
        Node::Decl(decl)
    }
}

impl From<TypeExpr> for Node {
    fn from(ty: TypeExpr) -> Self {
        Node::Type(ty)
    }
}

impl From<Stmt> for Node {
    fn from(stmt: Stmt) -> Self {
        Node::Stmt(stmt)
    }
}
