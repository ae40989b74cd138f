// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Read once at startup and handed to the services through `AppState`;
//! nothing else in the crate reads the environment.

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project (auth and REST live under it)
    pub supabase_url: String,
    /// Public anon key, identifies this app to the identity provider
    pub anon_key: String,
    /// Service role key used for data store calls. `None` disables forwarding.
    pub service_role_key: Option<String>,
    /// Server port
    pub port: u16,
    /// Verbose logging for this crate (`DEBUG`, or legacy `FLASK_DEBUG`)
    pub debug: bool,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Timeout for every outbound HTTP call
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            anon_key: env::var("SUPABASE_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            service_role_key: env::var("SUPABASE_SERVICE_ROLE")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            debug: env::var("DEBUG")
                .or_else(|_| env::var("FLASK_DEBUG"))
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            ),
        })
    }

    /// Config for tests; point `supabase_url` at a mock server.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://127.0.0.1:54321".to_string(),
            anon_key: "test-anon-key".to_string(),
            service_role_key: Some("test-service-role".to_string()),
            port: DEFAULT_PORT,
            debug: false,
            cors_allowed_origins: Vec::new(),
            upstream_timeout: Duration::from_secs(5),
        }
    }

    /// Whether data store calls can be made at all.
    pub fn service_role_configured(&self) -> bool {
        self.service_role_key.is_some()
    }
}

/// Parse a boolean-ish env flag (`true`, `1`, `on`).
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on"
    )
}

/// Parse a comma-separated origin list. A `*` entry means any origin.
fn parse_origins(value: &str) -> Vec<String> {
    let origins: Vec<String> = value
        .split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
