//! Mapping from service errors to HTTP responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contacts_core::Error;

use crate::api::MessageResponse;

const NOT_FOUND_MESSAGE: &str = "Contact not found";

/// Body for every 5xx; the detail goes to the log only.
const INTERNAL_MESSAGE: &str = "Internal store error";

/// An error on its way out as an HTTP response.
///
/// Every error renders as `{"message": ...}` with a status derived from the
/// underlying [`Error`].
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// The HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Store { .. }
            | Error::InvalidDatabaseUrl { .. }
            | Error::Io(_)
            | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let message = match &self.0 {
            Error::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            _ if status.is_server_error() => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
