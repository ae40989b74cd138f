// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod principal;
pub mod workout;

pub use principal::Principal;
pub use workout::{parse_object_body, HealthResponse, RecentQuery};
