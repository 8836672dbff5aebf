//! # Contacts Store
//!
//! Document persistence for contacts.
//!
//! ## Backends
//!
//! - **Memory** (`memory://`): process-local collection, lost on exit
//! - **JSON file** (`file:///path/contacts.json` or a bare path): the collection
//!   is kept in memory and rewritten to disk after every mutation
//!
//! Use [`open`] to pick a backend from a connection string.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod collection;
pub mod file;
pub mod memory;
pub mod store;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use store::{open, validate_database_url, ContactStore};
