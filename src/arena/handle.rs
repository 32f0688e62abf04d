use std::{
    cell::{self, Cell, RefCell},
    fmt::{self, Debug, Display},
    rc::Rc,
};

/// A pool slot: the value plus its logical reference count.
pub(crate) struct Block<T> {
    value: RefCell<T>,
    refs: Cell<usize>,
}

impl<T> Block<T> {
    pub(crate) fn new(value: T) -> Self {
        Block {
            value: RefCell::new(value),
            refs: Cell::new(0),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.refs.get() > 0
    }

    fn retain(&self) {
        self.refs.set(self.refs.get() + 1);
    }

    fn release(&self) {
        self.refs.set(self.refs.get().saturating_sub(1));
    }
}

/// Shared, read-only handle to a pooled value.
///
/// Cloning a `Ref` adds a logical holder, dropping one removes it. A null
/// `Ref` points nowhere and never exists.
pub struct Ref<T> {
    block: Option<Rc<Block<T>>>,
}

impl<T> Ref<T> {
    pub(crate) fn build(block: &Rc<Block<T>>) -> Self {
        block.retain();
        Ref {
            block: Some(Rc::clone(block)),
        }
    }

    pub fn null() -> Self {
        Ref { block: None }
    }

    /// True while the handle points at a slot that still has logical holders.
    pub fn exists(&self) -> bool {
        self.block.as_ref().is_some_and(|b| b.is_live())
    }

    pub fn is_null(&self) -> bool {
        self.block.is_none()
    }

    /// Number of logical holders of the slot, zero for a null handle.
    pub fn use_count(&self) -> usize {
        self.block.as_ref().map_or(0, |b| b.refs.get())
    }

    /// Borrows the value.
    ///
    /// Panics on a null handle, and while the node is mutably borrowed by its builder.
    pub fn borrow(&self) -> cell::Ref<'_, T> {
        match &self.block {
            Some(block) => block.value.borrow(),
            None => panic!("Attempted to borrow through a null handle"),
        }
    }

    /// Detaches this handle from its slot, dropping one logical holder.
    pub fn reset(&mut self) {
        if let Some(block) = self.block.take() {
            block.release();
        }
    }

    /// True when both handles alias the same slot.
    pub fn ptr_eq(&self, other: &Ref<T>) -> bool {
        match (&self.block, &other.block) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns a non-counting alias of this slot.
    pub fn observe(&self) -> Observer<T> {
        Observer {
            block: self.block.clone(),
        }
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        match &self.block {
            Some(block) => Ref::build(block),
            None => Ref::null(),
        }
    }
}

impl<T> Drop for Ref<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: Debug> Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => match block.value.try_borrow() {
                Ok(value) => Debug::fmt(&*value, f),
                Err(_) => write!(f, "<under construction>"),
            },
            None => write!(f, "<null>"),
        }
    }
}

impl<T: Display> Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => match block.value.try_borrow() {
                Ok(value) => Display::fmt(&*value, f),
                Err(_) => write!(f, "<under construction>"),
            },
            None => write!(f, "<null>"),
        }
    }
}

/// Exclusive handle to a pooled value, used while the value is being built.
///
/// Not `Clone`: there is one builder per node. Convert to a [`Ref`] with
/// [`MutRef::to_const`] to hand the node to a parent.
pub struct MutRef<T> {
    inner: Ref<T>,
}

impl<T> MutRef<T> {
    pub(crate) fn build(block: &Rc<Block<T>>) -> Self {
        MutRef {
            inner: Ref::build(block),
        }
    }

    pub fn borrow(&self) -> cell::Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> cell::RefMut<'_, T> {
        match &self.inner.block {
            Some(block) => block.value.borrow_mut(),
            None => panic!("Attempted to mutate through a null handle"),
        }
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    pub fn use_count(&self) -> usize {
        self.inner.use_count()
    }

    /// A new shared handle to the same slot.
    pub fn to_const(&self) -> Ref<T> {
        self.inner.clone()
    }

    /// Gives up mutable access, keeping the same logical holder.
    pub fn freeze(self) -> Ref<T> {
        self.inner
    }

    pub fn observe(&self) -> Observer<T> {
        self.inner.observe()
    }
}

impl<T: Debug> Debug for MutRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.inner, f)
    }
}

/// Non-counting alias to a pool slot.
///
/// Reports whether any counting handle is still alive, independent of the
/// memory, which stays readable for as long as the pool lives.
pub struct Observer<T> {
    block: Option<Rc<Block<T>>>,
}

impl<T> Observer<T> {
    pub fn exists(&self) -> bool {
        self.block.as_ref().is_some_and(|b| b.is_live())
    }

    pub fn use_count(&self) -> usize {
        self.block.as_ref().map_or(0, |b| b.refs.get())
    }

    /// Reads the value regardless of liveness.
    pub fn peek<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.block.as_ref().map(|b| f(&b.value.borrow()))
    }

    /// Revives a counting handle, `None` once the slot is no longer live.
    pub fn upgrade(&self) -> Option<Ref<T>> {
        match &self.block {
            Some(block) if block.is_live() => Some(Ref::build(block)),
            _ => None,
        }
    }
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Observer {
            block: self.block.clone(),
        }
    }
}
