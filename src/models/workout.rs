// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and response shapes for the workout endpoints.
//!
//! Workout records themselves are owned by the data store and pass
//! through as JSON; only the inputs we shape are typed here.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table holding workout records in the data store.
pub const WORKOUTS_TABLE: &str = "workouts";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub timestamp: String,
}

/// Query string for `GET /api/workouts/recent`.
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    /// Only workouts started at or after this ISO-8601 timestamp
    pub since: Option<String>,
}

/// Parse a request body as a JSON object.
///
/// Empty bodies and `null` are `None`. Anything that is not an object is
/// rejected, whatever the Content-Type says.
pub fn parse_object_body(bytes: &[u8]) -> Result<Option<Map<String, Value>>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(Value::Null) => Ok(None),
        Ok(_) | Err(_) => Err(AppError::BadRequest(AppError::BODY_NOT_OBJECT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_and_null_bodies() {
        assert!(parse_object_body(b"").unwrap().is_none());
        assert!(parse_object_body(b"  \n").unwrap().is_none());
        assert!(parse_object_body(b"null").unwrap().is_none());
    }

    #[test]
    fn test_object_body() {
        let map = parse_object_body(br#"{"template_name": "Leg Day"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(map.get("template_name"), Some(&json!("Leg Day")));
    }

    #[test]
    fn test_non_object_bodies_rejected() {
        for body in [&b"[1, 2]"[..], b"42", b"\"text\"", b"{not json"] {
            let err = parse_object_body(body).unwrap_err();
            assert!(matches!(
                err,
                AppError::BadRequest(AppError::BODY_NOT_OBJECT)
            ));
        }
    }
}
