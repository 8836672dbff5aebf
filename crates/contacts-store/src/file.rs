//! JSON document-file contact store.
//!
//! The whole collection lives in memory behind an async mutex. Every mutation
//! is applied to a copy, written to `<path>.tmp`, renamed over `<path>`, and
//! only then committed, so a failed write leaves both disk and memory
//! unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use contacts_core::{Contact, ContactId, ContactPatch, Error, NewContact, Result};
use tokio::sync::Mutex;

use crate::collection::Collection;
use crate::store::ContactStore;

/// Contact store persisted as a JSON array of documents.
pub struct JsonFileStore {
    path: PathBuf,
    collection: Mutex<Collection>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing documents.
    ///
    /// A missing or empty file yields an empty store; the file and its parent
    /// directories are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let collection = load(&path).await?;

        tracing::debug!(
            path = %path.display(),
            documents = collection.len(),
            "Loaded contact documents"
        );

        Ok(Self {
            path,
            collection: Mutex::new(collection),
        })
    }

    /// Returns the document file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `op` against a copy of the collection, persists the copy, then
    /// swaps it in. Nothing is written when `op` returns `None`.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Collection) -> Option<T>) -> Result<Option<T>> {
        let mut guard = self.collection.lock().await;
        let mut next = guard.clone();
        let Some(out) = op(&mut next) else {
            return Ok(None);
        };
        persist(&self.path, &next).await?;
        *guard = next;
        Ok(Some(out))
    }
}

async fn load(path: &Path) -> Result<Collection> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Collection::default()),
        Err(e) => return Err(e.into()),
    };

    // serde_json rejects empty input
    if data.trim().is_empty() {
        return Ok(Collection::default());
    }

    Ok(serde_json::from_str(&data)?)
}

async fn persist(path: &Path, collection: &Collection) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let json = serde_json::to_vec_pretty(collection)?;
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl ContactStore for JsonFileStore {
    async fn insert(&self, fields: NewContact) -> Result<Contact> {
        let contact = self.mutate(|c| Some(c.insert(fields))).await?;
        contact.ok_or_else(|| Error::store("insert produced no document"))
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.collection.lock().await.all())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>> {
        Ok(self.collection.lock().await.get(id))
    }

    async fn update_by_id(&self, id: &ContactId, patch: ContactPatch) -> Result<Option<Contact>> {
        self.mutate(|c| c.update(id, patch)).await
    }

    async fn delete_by_id(&self, id: &ContactId) -> Result<Option<Contact>> {
        self.mutate(|c| c.remove(id)).await
    }

    async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<Contact>> {
        Ok(self.collection.lock().await.matching(pattern))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.collection.lock().await.len())
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }

    async fn close(&self) -> Result<()> {
        let guard = self.collection.lock().await;
        persist(&self.path, &guard).await?;
        tracing::info!(
            path = %self.path.display(),
            documents = guard.len(),
            "Contact store closed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        let john = store
            .insert(NewContact::new("John Doe", "john@example.com", "1111111111"))
            .await
            .unwrap();
        let jane = store
            .insert(NewContact::new("Jane Doe", "jane@example.com", "2222222222"))
            .await
            .unwrap();
        store
            .update_by_id(&jane.id, ContactPatch::default().with_phone("3333333333"))
            .await
            .unwrap();
        store.delete_by_id(&john.id).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let all = reopened.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, jane.id);
        assert_eq!(all[0].phone, "3333333333");
    }

    #[tokio::test]
    async fn test_missing_and_empty_files_open_empty() {
        let dir = tempfile::tempdir().unwrap();

        let missing = JsonFileStore::open(dir.path().join("absent.json")).await.unwrap();
        assert_eq!(missing.count().await.unwrap(), 0);
        assert!(!missing.path().exists());

        let empty_path = dir.path().join("empty.json");
        std::fs::write(&empty_path, "").unwrap();
        let empty = JsonFileStore::open(&empty_path).await.unwrap();
        assert_eq!(empty.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = JsonFileStore::open(&path).await;
        assert!(matches!(result, Err(contacts_core::Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_unknown_id_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        let missing = ContactId::from("missing");
        assert!(store.delete_by_id(&missing).await.unwrap().is_none());
        assert!(store
            .update_by_id(&missing, ContactPatch::default().with_name("x"))
            .await
            .unwrap()
            .is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_collection_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        let kept = store
            .insert(NewContact::new("Kept", "kept@example.com", "1111111111"))
            .await
            .unwrap();

        // A directory squatting on the temp path makes every write fail.
        std::fs::create_dir(dir.path().join("contacts.json.tmp")).unwrap();

        let result = store
            .insert(NewContact::new("Lost", "lost@example.com", "2222222222"))
            .await;
        assert!(matches!(result, Err(contacts_core::Error::Io(_))));

        let result = store
            .update_by_id(&kept.id, ContactPatch::default().with_name("Renamed"))
            .await;
        assert!(matches!(result, Err(contacts_core::Error::Io(_))));

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.find_by_id(&kept.id).await.unwrap().unwrap().name, "Kept");
    }

    #[tokio::test]
    async fn test_file_is_a_document_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store
            .insert(NewContact::new("Contact 1", "contact1@example.com", "1111111111"))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["email"], "contact1@example.com");
    }
}
