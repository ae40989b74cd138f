// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API: authenticated proxy in front of a Supabase project.
//!
//! Verifies caller bearer tokens with the Supabase auth service and
//! forwards workout reads and writes to its REST API with the service role
//! key, scoping every call to the verified user.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{build_http_client, DataStoreClient, IdentityClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub identity: IdentityClient,
    pub store: DataStoreClient,
}

impl AppState {
    /// Build the upstream clients from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = build_http_client(&config)?;
        let identity = IdentityClient::new(http.clone(), &config);
        let store = DataStoreClient::new(http, &config);

        Ok(Self {
            config,
            identity,
            store,
        })
    }
}
