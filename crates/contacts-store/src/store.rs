//! The store trait and connection-string dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use contacts_core::{Contact, ContactId, ContactPatch, Error, NewContact, Result};
use url::Url;

use crate::file::JsonFileStore;
use crate::memory::InMemoryStore;

/// Trait for contact storage backends.
///
/// Each method is a single operation against one document (or a read over
/// the whole collection). Backends serialise their own mutations.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persists a new contact and returns it with its assigned identifier.
    async fn insert(&self, fields: NewContact) -> Result<Contact>;

    /// Returns every contact in insertion order.
    async fn find_all(&self) -> Result<Vec<Contact>>;

    /// Looks up a contact by identifier.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>>;

    /// Applies a partial update. Returns `None` if the identifier is unknown.
    async fn update_by_id(&self, id: &ContactId, patch: ContactPatch) -> Result<Option<Contact>>;

    /// Removes a contact permanently. Returns `None` if the identifier is unknown.
    async fn delete_by_id(&self, id: &ContactId) -> Result<Option<Contact>>;

    /// Returns contacts whose name contains `pattern`, ignoring case.
    async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<Contact>>;

    /// Returns the number of stored contacts.
    async fn count(&self) -> Result<usize>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Releases the store. Called once at shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Memory,
    File(PathBuf),
}

fn parse_location(database_url: &str) -> Result<Location> {
    let invalid = |reason: &str| Error::InvalidDatabaseUrl {
        url: database_url.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = database_url.trim();
    if trimmed.is_empty() {
        return Err(invalid("connection string is empty"));
    }

    match Url::parse(trimmed) {
        Ok(url) => match url.scheme() {
            "memory" => Ok(Location::Memory),
            "file" => url
                .to_file_path()
                .map(Location::File)
                .map_err(|()| invalid("file URL must hold an absolute path")),
            other => Err(invalid(&format!("unsupported scheme '{other}'"))),
        },
        // No scheme at all: a plain filesystem path.
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Location::File(PathBuf::from(trimmed))),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Checks that a connection string names a supported backend, without
/// opening anything.
///
/// # Errors
///
/// Returns [`Error::InvalidDatabaseUrl`] when [`open`] would reject it.
pub fn validate_database_url(database_url: &str) -> Result<()> {
    parse_location(database_url).map(|_| ())
}

/// Opens the store named by a connection string.
///
/// Accepted forms:
/// - `memory://`
/// - `file:///absolute/path/contacts.json`
/// - `relative/or/absolute/path.json`
///
/// # Errors
///
/// Returns [`Error::InvalidDatabaseUrl`] for unrecognised connection strings
/// and an I/O or serialization error if an existing document file cannot be read.
pub async fn open(database_url: &str) -> Result<Arc<dyn ContactStore>> {
    let store: Arc<dyn ContactStore> = match parse_location(database_url)? {
        Location::Memory => Arc::new(InMemoryStore::new()),
        Location::File(path) => Arc::new(JsonFileStore::open(path).await?),
    };

    tracing::info!(backend = store.backend(), "Contact store opened");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_url() {
        assert_eq!(parse_location("memory://").unwrap(), Location::Memory);
    }

    #[test]
    fn test_parse_file_url() {
        let location = parse_location("file:///var/lib/contacts/db.json").unwrap();
        assert_eq!(
            location,
            Location::File(PathBuf::from("/var/lib/contacts/db.json"))
        );
    }

    #[test]
    fn test_parse_bare_path() {
        let location = parse_location("./.instance/contacts.json").unwrap();
        assert_eq!(
            location,
            Location::File(PathBuf::from("./.instance/contacts.json"))
        );
    }

    #[test]
    fn test_validate_database_url() {
        assert!(validate_database_url("memory://").is_ok());
        assert!(validate_database_url("/srv/contacts/contacts.json").is_ok());
        assert!(matches!(
            validate_database_url("mongodb://localhost:27017/contacts"),
            Err(Error::InvalidDatabaseUrl { .. })
        ));
        assert!(validate_database_url("  ").is_err());
    }

    #[test]
    fn test_rejects_unknown_scheme_and_empty() {
        let err = parse_location("mongodb://mongoService:27017/ads").unwrap_err();
        assert!(matches!(err, Error::InvalidDatabaseUrl { .. }));
        assert!(err.to_string().contains("unsupported scheme 'mongodb'"));

        assert!(parse_location("   ").is_err());
    }

    #[tokio::test]
    async fn test_open_memory() {
        let store = open("memory://").await.unwrap();
        assert_eq!(store.backend(), "memory");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let store = open(path.to_str().unwrap()).await.unwrap();
        assert_eq!(store.backend(), "json-file");

        store
            .insert(NewContact::new("John Doe", "john@example.com", "1234567890"))
            .await
            .unwrap();
        store.close().await.unwrap();

        assert!(path.exists());
    }
}
