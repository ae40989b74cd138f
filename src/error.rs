// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Clients only ever see a fixed message per category; upstream details
//! are logged here and dropped.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing or invalid authorization header")]
    MissingOrMalformedAuth,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid request: {0}")]
    BadRequest(&'static str),

    #[error("Workout not found or not owned by user")]
    NotFoundOrNotOwned,

    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("Service role key not configured")]
    ServiceNotConfigured,

    #[error("Data store error: {0}")]
    Upstream(String),

    #[error("Unexpected response format from data store")]
    UnexpectedResponseShape,

    #[error("Failed to {action}: {source}")]
    Failed {
        action: &'static str,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const MISSING_BODY: &'static str = "Request body required";
    pub const BODY_NOT_OBJECT: &'static str = "Request body must be a JSON object";

    /// Attach the endpoint action to upstream failures so the client gets
    /// "Failed to <action>". Client errors pass through untouched.
    pub fn during(self, action: &'static str) -> Self {
        match self {
            AppError::ServiceNotConfigured | AppError::Upstream(_) | AppError::Internal(_) => {
                AppError::Failed {
                    action,
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingOrMalformedAuth | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFoundOrNotOwned | AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::ServiceNotConfigured
            | AppError::Upstream(_)
            | AppError::UnexpectedResponseShape
            | AppError::Failed { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message clients see. Never includes upstream detail.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingOrMalformedAuth => "Missing or invalid authorization header".into(),
            AppError::InvalidToken => "Invalid or expired token".into(),
            AppError::BadRequest(msg) => (*msg).to_string(),
            AppError::NotFoundOrNotOwned => "Workout not found or not owned by user".into(),
            AppError::EndpointNotFound => "Endpoint not found".into(),
            AppError::UnexpectedResponseShape => "Unexpected response format".into(),
            AppError::Failed { action, .. } => format!("Failed to {}", action),
            AppError::ServiceNotConfigured | AppError::Upstream(_) | AppError::Internal(_) => {
                "Internal server error".into()
            }
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "Not found");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
