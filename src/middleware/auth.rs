// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires a bearer token accepted by the identity
/// provider. On success the caller's `Principal` is added to the request
/// extensions for handlers to extract.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers().get(header::AUTHORIZATION))?;
    let principal = state.identity.verify_token(token).await?;

    tracing::debug!(user_id = %principal.subject, "Request authenticated");
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The header must be exactly two whitespace-separated parts.
pub fn extract_bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let value = header
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingOrMalformedAuth)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AppError::MissingOrMalformedAuth),
    }
}
