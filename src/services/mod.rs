// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and workout logic.

pub mod identity;
pub mod store;
pub mod workouts;

pub use identity::IdentityClient;
pub use store::{DataStoreClient, ScopedQuery};

use crate::config::Config;
use anyhow::Context;

/// Build the HTTP client shared by all upstream calls.
pub fn build_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .context("failed building upstream HTTP client")
}
