//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a `{"error": "..."}`
//! JSON body with a matching status code.
//!
//! Database and internal errors are logged here with full detail; gateway
//! errors are logged by the orchestrator that made the call. The caller only
//! ever sees a fixed message.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::ai::GatewayError;

/// All errors that can occur in the natureheal-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials, or the caller does not own the resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The language model could not be reached or returned garbage.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),

            // Logged where the call failed, with the session it belongs to.
            ServerError::Gateway(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service temporarily unavailable".to_owned(),
            ),
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ServerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| errors.to_string());
        ServerError::BadRequest(message)
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        error!(error = ?e, "converting anyhow error to ServerError::Internal");
        ServerError::Internal(e.to_string())
    }
}
