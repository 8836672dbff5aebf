//! In-memory contact store.

use async_trait::async_trait;
use contacts_core::{Contact, ContactId, ContactPatch, NewContact, Result};
use parking_lot::RwLock;

use crate::collection::Collection;
use crate::store::ContactStore;

/// In-memory contact store (for development/testing).
pub struct InMemoryStore {
    collection: RwLock<Collection>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn insert(&self, fields: NewContact) -> Result<Contact> {
        Ok(self.collection.write().insert(fields))
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.collection.read().all())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>> {
        Ok(self.collection.read().get(id))
    }

    async fn update_by_id(&self, id: &ContactId, patch: ContactPatch) -> Result<Option<Contact>> {
        Ok(self.collection.write().update(id, patch))
    }

    async fn delete_by_id(&self, id: &ContactId) -> Result<Option<Contact>> {
        Ok(self.collection.write().remove(id))
    }

    async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<Contact>> {
        Ok(self.collection.read().matching(pattern))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.collection.read().len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
