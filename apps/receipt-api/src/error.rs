//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Receipt API                        │
//! │                                                                         │
//! │  Bad/missing bearer token ─────────────► Unauthenticated  → 401        │
//! │  Wrong username/password  ─────────────► InvalidCredentials → 401      │
//! │  Body not parseable JSON/form ─────────► MalformedBody    → 422        │
//! │  ValidationErrors (receipt-core) ──────► Validation       → 422        │
//! │  StoreError::NotFound (receipt-store) ─► NotFound         → 404        │
//! │  Lock poisoned / signing failure ──────► Internal         → 500        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "receipt failed validation with 1 error(s)",
//!   "details": [{ "field": "total", "message": "total is required" }]
//! }
//! ```

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use receipt_core::ValidationErrors;
use receipt_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or unverifiable bearer token.
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Request body could not be decoded at all.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("No receipt found for that ID: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthenticated,
    ValidationError,
    NotFound,
    Internal,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldDetail>>,
}

/// One failed field of a validation error.
#[derive(Debug, Serialize)]
pub struct FieldDetail {
    pub field: String,
    pub message: String,
}

impl ApiError {
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        ApiError::Unauthenticated(reason.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::MalformedBody(_) | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Unauthenticated(_) | ApiError::InvalidCredentials => {
                ErrorCode::Unauthenticated
            }
            ApiError::MalformedBody(_) | ApiError::Validation(_) => ErrorCode::ValidationError,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Builds the response body. Internal details never leave the process.
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            ApiError::NotFound(_) => "No receipt found for that ID.".to_string(),
            other => other.to_string(),
        };

        let details = match self {
            ApiError::Validation(errors) => Some(
                errors
                    .errors()
                    .iter()
                    .map(|e| FieldDetail {
                        field: e.field().to_string(),
                        message: e.to_string(),
                    })
                    .collect(),
            ),
            ApiError::MalformedBody(reason) => Some(vec![FieldDetail {
                field: "body".to_string(),
                message: reason.clone(),
            }]),
            _ => None,
        };

        ErrorBody {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Request failed with internal error");
        }

        let body = Json(self.body());
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}
