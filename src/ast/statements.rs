use super::node::{ExprRef, NodeRef};

/// Statement Nodes
///
/// Bodies are plain node handles: any statement, expression or declaration.
#[derive(Debug)]
pub enum Stmt {
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Continue,
    Break,
    Return(ReturnStmt),
}

/// Ordered sequence of declarations and statements.
#[derive(Debug, Default)]
pub struct BlockStmt {
    pub items: Vec<NodeRef>,
}

impl BlockStmt {
    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug)]
pub struct IfStmt {
    pub condition: ExprRef,
    pub then_body: NodeRef,
    pub else_body: Option<NodeRef>,
}

#[derive(Debug)]
pub struct WhileStmt {
    pub condition: ExprRef,
    pub body: NodeRef,
}

/// `for (init; condition; step) body`, each header part optional.
#[derive(Debug)]
pub struct ForStmt {
    pub init: Option<ExprRef>,
    pub condition: Option<ExprRef>,
    pub step: Option<ExprRef>,
    pub body: NodeRef,
}

#[derive(Debug)]
pub struct ReturnStmt {
    pub value: Option<ExprRef>,
}

impl Stmt {
    pub fn as_block(&self) -> Option<&BlockStmt> {
        match self {
            Stmt::Block(block) => Some(block),
            _ => None,
        }
    }
}
