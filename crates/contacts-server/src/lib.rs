//! # Contacts Server
//!
//! HTTP API server exposing contact CRUD and search under `/api/v1/contacts`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, Server, ServerConfig};
