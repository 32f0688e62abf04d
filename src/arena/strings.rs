use std::{
    cell::RefCell,
    collections::HashSet,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

/// Interned string handle.
///
/// Names compare and hash by content; two names produced by the same
/// [`StringPool`] for equal text also share storage ([`Name::ptr_eq`]).
#[derive(Clone)]
pub struct Name(Rc<str>);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Name) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl std::borrow::Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// String interning pool.
///
/// Cheap to clone: clones share the same table, which is how the lexer and
/// the owning context intern into one pool.
#[derive(Clone, Default)]
pub struct StringPool {
    names: Rc<RefCell<HashSet<Name>>>,
}

impl StringPool {
    pub fn new() -> Self {
        StringPool::default()
    }

    /// Returns the unique [`Name`] for `text`, allocating it on first use.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(name) = self.names.borrow().get(text) {
            return name.clone();
        }

        let name = Name(Rc::from(text));
        self.names.borrow_mut().insert(name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.names.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.borrow().is_empty()
    }
}
