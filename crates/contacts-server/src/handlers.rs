//! Request handlers.
//!
//! Each contact handler validates its input, makes exactly one store call,
//! and shapes the JSON response.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contacts_core::{ContactId, ContactPatch, Error, NewContact};

use crate::api::{
    self, ContactListResponse, ContactResponse, MessageResponse, SearchParams, SearchResponse,
    ServerStatus,
};
use crate::error::ApiError;
use crate::server::AppState;

type Shared = State<Arc<AppState>>;

/// `POST /api/v1/contacts/add`
pub async fn add_contact(
    State(state): Shared,
    payload: Result<Json<NewContact>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let Json(fields) = payload.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected contact payload");
        ApiError::from(rejection)
    })?;
    fields.validate().map_err(rejected)?;

    let contact = state.store.insert(fields).await?;
    tracing::debug!(id = %contact.id, "Contact added");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: api::ADDED.to_string(),
            contact,
        }),
    ))
}

/// `GET /api/v1/contacts/view`
pub async fn view_contacts(
    State(state): Shared,
) -> Result<Json<ContactListResponse>, ApiError> {
    let contacts = state.store.find_all().await?;
    tracing::debug!(count = contacts.len(), "Listed contacts");

    Ok(Json(ContactListResponse {
        message: api::VIEWING_ALL.to_string(),
        contacts,
    }))
}

/// `PUT /api/v1/contacts/update/:id`
pub async fn update_contact(
    State(state): Shared,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(patch) = payload.map_err(|rejection| {
        tracing::warn!(id = %id, reason = %rejection.body_text(), "Rejected contact patch");
        ApiError::from(rejection)
    })?;
    patch.validate().map_err(rejected)?;

    let id = ContactId::from(id);
    let contact = state
        .store
        .update_by_id(&id, patch)
        .await?
        .ok_or_else(|| Error::not_found(id.as_str()))?;
    tracing::debug!(id = %contact.id, "Contact updated");

    Ok(Json(ContactResponse {
        message: api::UPDATED.to_string(),
        contact,
    }))
}

/// `DELETE /api/v1/contacts/delete/:id`
pub async fn delete_contact(
    State(state): Shared,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ContactId::from(id);
    state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found(id.as_str()))?;
    tracing::debug!(id = %id, "Contact deleted");

    Ok(Json(MessageResponse::new(api::DELETED)))
}

/// `GET /api/v1/contacts/search?query=`
///
/// A missing or blank query matches nothing.
pub async fn search_contacts(
    State(state): Shared,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params?;

    let results = match params.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => state.store.find_by_pattern(query).await?,
        _ => Vec::new(),
    };
    tracing::debug!(matches = results.len(), "Searched contacts");

    Ok(Json(SearchResponse {
        message: api::SEARCH_RESULTS.to_string(),
        results,
    }))
}

// === Operational ===

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /api/v1/status`
pub async fn server_status(State(state): Shared) -> Result<Json<ServerStatus>, ApiError> {
    Ok(Json(ServerStatus {
        status: "running".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        backend: state.store.backend().to_string(),
        contacts: state.store.count().await?,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Route not found")),
    )
}

/// Fallback for a known route hit with the wrong method.
pub async fn method_not_allowed() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MessageResponse::new("Method not allowed")),
    )
}

fn rejected(err: Error) -> ApiError {
    tracing::warn!(reason = %err, "Rejected contact fields");
    ApiError(err)
}
