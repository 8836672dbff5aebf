//! Request and response bodies for the contacts API.

use contacts_core::Contact;
use serde::{Deserialize, Serialize};

/// Message returned after a contact is created.
pub const ADDED: &str = "Contact added successfully";
/// Message returned with the full contact list.
pub const VIEWING_ALL: &str = "Viewing all contacts";
/// Message returned after a contact is updated.
pub const UPDATED: &str = "Contact updated successfully";
/// Message returned after a contact is deleted.
pub const DELETED: &str = "Contact deleted successfully";
/// Message returned with search results.
pub const SEARCH_RESULTS: &str = "Search results";

/// Query string for the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Substring to look for in contact names.
    #[serde(default)]
    pub query: Option<String>,
}

/// A message plus a single contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The affected contact.
    pub contact: Contact,
}

/// A message plus every stored contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactListResponse {
    /// Human-readable outcome.
    pub message: String,
    /// All contacts.
    pub contacts: Vec<Contact>,
}

/// A message plus the contacts matching a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Matching contacts.
    pub results: Vec<Contact>,
}

/// A bare message. Used for deletions and every error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a new message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Service status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Always `"running"` while the server answers.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Store backend name.
    pub backend: String,
    /// Number of stored contacts.
    pub contacts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_core::NewContact;

    #[test]
    fn test_search_params_query_is_optional() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_none());

        let params: SearchParams = serde_json::from_str(r#"{"query": "john"}"#).unwrap();
        assert_eq!(params.query.as_deref(), Some("john"));
    }

    #[test]
    fn test_contact_response_shape() {
        let response = ContactResponse {
            message: ADDED.to_string(),
            contact: Contact::create(NewContact::new("John Doe", "john@example.com", "1234567890")),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["message"], "Contact added successfully");
        assert_eq!(value["contact"]["name"], "John Doe");
    }

    #[test]
    fn test_list_responses_use_expected_keys() {
        let list = serde_json::to_value(ContactListResponse {
            message: VIEWING_ALL.to_string(),
            contacts: vec![],
        })
        .unwrap();
        assert!(list["contacts"].is_array());

        let search = serde_json::to_value(SearchResponse {
            message: SEARCH_RESULTS.to_string(),
            results: vec![],
        })
        .unwrap();
        assert!(search["results"].is_array());
    }
}
