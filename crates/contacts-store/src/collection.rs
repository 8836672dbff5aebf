//! In-memory document collection shared by the store backends.

use contacts_core::{Contact, ContactId, ContactPatch, NewContact};
use serde::{Deserialize, Serialize};

/// Ordered set of contact documents. Insertion order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Collection {
    documents: Vec<Contact>,
}

impl Collection {
    pub(crate) fn insert(&mut self, fields: NewContact) -> Contact {
        let mut contact = Contact::create(fields);
        while self.position(&contact.id).is_some() {
            contact.id = ContactId::generate();
        }
        self.documents.push(contact.clone());
        contact
    }

    pub(crate) fn all(&self) -> Vec<Contact> {
        self.documents.clone()
    }

    pub(crate) fn get(&self, id: &ContactId) -> Option<Contact> {
        self.position(id).map(|idx| self.documents[idx].clone())
    }

    pub(crate) fn update(&mut self, id: &ContactId, patch: ContactPatch) -> Option<Contact> {
        let idx = self.position(id)?;
        let contact = &mut self.documents[idx];
        contact.apply(patch);
        Some(contact.clone())
    }

    pub(crate) fn remove(&mut self, id: &ContactId) -> Option<Contact> {
        let idx = self.position(id)?;
        Some(self.documents.remove(idx))
    }

    pub(crate) fn matching(&self, pattern: &str) -> Vec<Contact> {
        self.documents
            .iter()
            .filter(|c| c.name_contains(pattern))
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    fn position(&self, id: &ContactId) -> Option<usize> {
        self.documents.iter().position(|c| &c.id == id)
    }
}
