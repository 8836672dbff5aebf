//! # Contacts Core
//!
//! Core types shared by every crate in the contacts workspace:
//! - The unified error type and `Result` alias
//! - The `Contact` document and its identifier
//! - Typed request payloads for creating and patching contacts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contact;
pub mod error;

pub use contact::{Contact, ContactId, ContactPatch, NewContact};
pub use error::{Error, Result};
