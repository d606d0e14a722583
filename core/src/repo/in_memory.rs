use std::collections::HashMap;

use super::{Error, Repo, Result};
use crate::object::Id;

/// Implementation of `Repo` that keeps encoded objects in memory.
///
/// Nothing is compressed or persisted. Useful for tests and for
/// computing IDs of object graphs without touching the file system.
#[derive(Debug, Default)]
pub struct InMemory {
    objects: HashMap<Id, Vec<u8>>,
}

impl InMemory {
    pub fn new() -> InMemory {
        InMemory::default()
    }

    /// Returns the number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Repo for InMemory {
    fn put_loose_object(&mut self, encoded: &[u8]) -> Result<Id> {
        let id = Id::for_encoded(encoded);

        match self.objects.get(&id) {
            Some(existing) if existing.as_slice() != encoded => Err(Error::Collision(id)),
            Some(_) => Ok(id),
            None => {
                self.objects.insert(id, encoded.to_vec());
                Ok(id)
            }
        }
    }

    fn get_loose_object(&self, id: &Id) -> Result<Vec<u8>> {
        self.objects.get(id).cloned().ok_or(Error::NotFound(*id))
    }

    fn has_object(&self, id: &Id) -> Result<bool> {
        Ok(self.objects.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent_put() {
        let mut r = InMemory::new();
        assert!(r.is_empty());

        let id1 = r.put_loose_object(b"blob 5\0hello").unwrap();
        let id2 = r.put_loose_object(b"blob 5\0hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn collision_is_an_error() {
        let mut r = InMemory::new();
        let id = Id::for_encoded(b"blob 5\0hello");

        // Plant different bytes under the ID to simulate a digest collision.
        r.objects.insert(id, b"blob 5\0jello".to_vec());

        match r.put_loose_object(b"blob 5\0hello").unwrap_err() {
            Error::Collision(c) => assert_eq!(c, id),
            err => panic!("Unexpected error {:?}", err),
        }
    }
}
