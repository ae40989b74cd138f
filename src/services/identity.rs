// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client for bearer token verification.
//!
//! Every protected request re-verifies its token against
//! `GET /auth/v1/user`; results are not cached.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Principal;
use reqwest::StatusCode;
use serde::Deserialize;

/// Subset of the provider's user object we rely on.
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Option<String>,
}

/// Client for the identity provider's "current user" endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    user_url: String,
    anon_key: String,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            user_url: format!("{}/auth/v1/user", config.supabase_url),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Verify a bearer token, returning the caller's subject identifier.
    ///
    /// Only a 200 carrying a non-empty `id` counts as verified. Every other
    /// outcome, transport failures and timeouts included, is
    /// `InvalidToken`.
    pub async fn verify_token(&self, token: &str) -> Result<Principal, AppError> {
        let response = self
            .http
            .get(&self.user_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Token validation request failed");
                AppError::InvalidToken
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Token validation failed");
            return Err(AppError::InvalidToken);
        }

        let user: ProviderUser = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Token validation returned unreadable user");
            AppError::InvalidToken
        })?;

        match user.id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(Principal::new(id)),
            None => {
                tracing::warn!("Token validation returned user without id");
                Err(AppError::InvalidToken)
            }
        }
    }
}
