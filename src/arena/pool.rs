use std::{cell::RefCell, rc::Rc};

use super::handle::{Block, MutRef};

/// Append-only allocation pool.
///
/// Slots are never reused, compacted or freed individually; everything is
/// released together when the pool is dropped.
pub struct Pool<T> {
    blocks: RefCell<Vec<Rc<Block<T>>>>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Pool {
            blocks: RefCell::new(Vec::new()),
        }
    }

    /// Moves `value` into a new slot and returns the builder handle to it.
    pub fn allocate(&self, value: T) -> MutRef<T> {
        let block = Rc::new(Block::new(value));
        let handle = MutRef::build(&block);
        self.blocks.borrow_mut().push(block);
        handle
    }

    /// Number of slots ever allocated.
    pub fn len(&self) -> usize {
        self.blocks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.borrow().is_empty()
    }

    /// Number of slots that still have at least one logical holder.
    pub fn live_count(&self) -> usize {
        self.blocks.borrow().iter().filter(|b| b.is_live()).count()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool::new()
    }
}
