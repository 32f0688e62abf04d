//! Arena allocation for everything the front end builds.
//!
//! Every AST node, type and constant is allocated once into an append-only
//! [`pool::Pool`] owned by a [`context::Context`] and is never freed on its
//! own. Callers hold reference-counted handles into the pool:
//!
//! - [`handle::MutRef`] - exclusive handle used while a node is assembled
//! - [`handle::Ref`] - shared, read-only handle
//! - [`handle::Observer`] - non-counting alias used to query liveness
//!
//! The count tracks *logical* holders only. When it reaches zero the slot
//! reports that it no longer exists, but its memory stays valid until the
//! owning pool is dropped.

pub mod context;
pub mod handle;
pub mod pool;
pub mod strings;
