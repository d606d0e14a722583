//! Represents an abstract object store.
//!
//! ## Design Goals
//!
//! Objects may be stored in multiple different mechanisms. The local
//! on-disk store lives in the `objstore_on_disk` crate; `InMemory` here is
//! a throwaway store that keeps everything in a `HashMap`.

mod error;
pub use error::{Error, Result};

mod in_memory;
pub use in_memory::InMemory;

use crate::object::{Attribution, Commit, Id, Object};

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing objects.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture: store encoded
/// bytes under their digest, and read them back.
///
/// The provided methods build the encode/decode and commit-composition
/// operations on top of those primitives, regardless of storage mechanism.
pub trait Repo {
    /// Stores an already-encoded object and returns its ID.
    ///
    /// Storing an object that is already present is a no-op.
    fn put_loose_object(&mut self, encoded: &[u8]) -> Result<Id>;

    /// Returns the encoded form (header and payload) of a stored object.
    ///
    /// Fails with `Error::NotFound` if no such object exists.
    fn get_loose_object(&self, id: &Id) -> Result<Vec<u8>>;

    /// Returns true if an object with this ID is stored.
    fn has_object(&self, id: &Id) -> Result<bool>;

    /// Encodes and stores an object.
    fn put_object(&mut self, object: &Object) -> Result<Id> {
        self.put_loose_object(&object.encode())
    }

    /// Reads and decodes a stored object.
    fn get_object(&self, id: &Id) -> Result<Object> {
        let encoded = self.get_loose_object(id)?;
        Ok(Object::decode(&encoded)?)
    }

    /// Composes a commit from a tree, optional parent, and message, stores
    /// it, and returns its ID.
    ///
    /// Analogous to [`git commit-tree`](https://git-scm.com/docs/git-commit-tree).
    ///
    /// Neither `tree` nor `parent` is checked for existence; callers that
    /// need referential integrity should check with `has_object` first.
    fn commit_tree(
        &mut self,
        tree: Id,
        parent: Option<Id>,
        message: &str,
        author: Attribution,
        committer: Attribution,
    ) -> Result<Id> {
        let commit = Commit {
            tree,
            parent,
            author,
            committer,
            message: message.to_string(),
        };

        self.put_object(&Object::Commit(commit))
    }
}
