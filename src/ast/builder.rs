use super::node::{NodeMut, NodeRef, TreeError};

/// Assembles prefix and postfix operator chains around an operand.
///
/// The builder tracks the root of the tree built so far and the open node new
/// children attach to. The first node handed to a fresh builder becomes the
/// root, and also the open node when it was given mutably.
///
/// - prefix `- ++ x`: `extend_child(MINUS)`, `extend_child(INC)`, `add_child(x)`
/// - postfix `a[i].b`: `add_child(a)`, `extend_parent(INDEX)`, `add_child(i)`,
///   `extend_parent(MBER)`, `add_child(b)`
#[derive(Default)]
pub struct ExprBuilder {
    root: Option<NodeRef>,
    open: Option<NodeMut>,
}

impl ExprBuilder {
    pub fn new() -> Self {
        ExprBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    /// Attaches `node` under the open node and makes it the open node.
    pub fn extend_child(&mut self, node: NodeMut) -> Result<(), TreeError> {
        if self.root.is_none() {
            self.root = Some(node.to_const());
        } else {
            let open = self.open.as_ref().ok_or(TreeError::NoOpenNode)?;
            open.borrow_mut().add_child(node.to_const())?;
        }

        self.open = Some(node);
        Ok(())
    }

    /// Attaches `node` under the open node, which stays open.
    pub fn add_child(&mut self, node: NodeRef) -> Result<(), TreeError> {
        if self.root.is_none() {
            self.root = Some(node);
            return Ok(());
        }

        let open = self.open.as_ref().ok_or(TreeError::NoOpenNode)?;
        open.borrow_mut().add_child(node)
    }

    /// Makes the tree built so far a child of `node`, which becomes root and open node.
    pub fn extend_parent(&mut self, node: NodeMut) -> Result<(), TreeError> {
        if let Some(root) = self.root.take() {
            node.borrow_mut().add_child(root)?;
        }

        self.root = Some(node.to_const());
        self.open = Some(node);
        Ok(())
    }

    /// Returns the root of the assembled tree.
    pub fn finish(self) -> Option<NodeRef> {
        self.root
    }
}
