// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout operations: shape client input into data store calls and
//! interpret the results.
//!
//! All calls are scoped to the verified principal; a `user_id` sent by the
//! client is never read.

use crate::error::{AppError, Result};
use crate::models::workout::WORKOUTS_TABLE;
use crate::models::Principal;
use crate::services::store::{DataStoreClient, ScopedQuery};
use serde_json::{Map, Value};

/// Build the record for a new workout (without `user_id`, which the store
/// client forces).
pub fn start_record(body: &Map<String, Value>, now: &str) -> Map<String, Value> {
    let mut record = Map::new();

    record.insert(
        "started_at".to_string(),
        present(body, "started_at")
            .cloned()
            .unwrap_or_else(|| Value::String(now.to_string())),
    );

    if let Some(raw) = present(body, "template_id") {
        match coerce_template_id(raw) {
            Some(id) => {
                record.insert("template_id".to_string(), Value::from(id));
            }
            None => {
                tracing::warn!(template_id = %raw, "Ignoring non-numeric template_id");
            }
        }
    }

    if let Some(name) = body.get("template_name").filter(|v| is_truthy(v)) {
        record.insert("template_name".to_string(), name.clone());
    }

    record
}

/// Build the changes that close out a workout.
pub fn end_changes(body: &Map<String, Value>, now: &str) -> Map<String, Value> {
    let mut changes = Map::new();

    changes.insert(
        "ended_at".to_string(),
        present(body, "ended_at")
            .cloned()
            .unwrap_or_else(|| Value::String(now.to_string())),
    );

    // Passed through as sent, null included.
    if let Some(duration) = body.get("duration_minutes") {
        changes.insert("duration_minutes".to_string(), duration.clone());
    }

    changes
}

/// Coerce a client-supplied template id to an integer.
///
/// Integers pass, finite floats truncate toward zero, and strings must hold
/// an integer literal (surrounding whitespace and a sign allowed).
pub fn coerce_template_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
            if unsigned.starts_with(['+', '-']) {
                return None;
            }
            s.parse().ok()
        }
        _ => None,
    }
}

/// Pick the single record out of a `return=representation` response.
pub fn single_record(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        obj @ Value::Object(_) => Some(obj),
        _ => None,
    }
}

/// Create a workout owned by `principal`.
pub async fn start(
    store: &DataStoreClient,
    principal: &Principal,
    body: &Map<String, Value>,
    now: &str,
) -> Result<Value> {
    let record = start_record(body, now);
    let created = store.insert(WORKOUTS_TABLE, principal, record).await?;

    let workout = single_record(created).ok_or(AppError::UnexpectedResponseShape)?;
    tracing::info!(user_id = %principal.subject, "Workout started");
    Ok(workout)
}

/// List the principal's workouts, most recent first, optionally only those
/// started at or after `since`. `since` is handed to the store as sent.
pub async fn recent(
    store: &DataStoreClient,
    principal: &Principal,
    since: Option<&str>,
) -> Result<Value> {
    let mut query = ScopedQuery::for_principal(principal)
        .select("*")
        .order_desc("started_at");

    if let Some(since) = since {
        query = query.gte("started_at", since);
    }

    store.select(WORKOUTS_TABLE, &query).await
}

/// Mark the principal's workout `workout_id` as ended.
///
/// A workout owned by someone else matches no rows and is reported the
/// same as a missing one.
pub async fn end(
    store: &DataStoreClient,
    principal: &Principal,
    workout_id: &str,
    body: &Map<String, Value>,
    now: &str,
) -> Result<Value> {
    let changes = end_changes(body, now);
    let query = ScopedQuery::for_principal(principal).eq("id", workout_id);

    let updated = store.update(WORKOUTS_TABLE, &query, changes).await?;

    let workout = single_record(updated).ok_or(AppError::NotFoundOrNotOwned)?;
    tracing::info!(user_id = %principal.subject, workout_id, "Workout ended");
    Ok(workout)
}

/// Value for `key` unless absent or null.
fn present<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: &str = "2024-05-01T10:00:00.000000Z";

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_coerce_template_id() {
        assert_eq!(coerce_template_id(&json!(12)), Some(12));
        assert_eq!(coerce_template_id(&json!("12")), Some(12));
        assert_eq!(coerce_template_id(&json!(" -7 ")), Some(-7));
        assert_eq!(coerce_template_id(&json!("+3")), Some(3));
        assert_eq!(coerce_template_id(&json!(4.9)), Some(4));
        assert_eq!(coerce_template_id(&json!(-4.9)), Some(-4));

        assert_eq!(coerce_template_id(&json!("abc")), None);
        assert_eq!(coerce_template_id(&json!("12.5")), None);
        assert_eq!(coerce_template_id(&json!("++3")), None);
        assert_eq!(coerce_template_id(&json!("+-3")), None);
        assert_eq!(coerce_template_id(&json!("")), None);
        assert_eq!(coerce_template_id(&json!(true)), None);
        assert_eq!(coerce_template_id(&json!([1])), None);
        assert_eq!(coerce_template_id(&json!({"id": 1})), None);
    }

    #[test]
    fn test_start_record_coerces_template() {
        let record = start_record(
            &obj(json!({"template_id": "12", "template_name": "Leg Day"})),
            NOW,
        );
        assert_eq!(
            Value::Object(record),
            json!({"started_at": NOW, "template_id": 12, "template_name": "Leg Day"})
        );
    }

    #[test]
    fn test_start_record_drops_bad_template_id() {
        let record = start_record(&obj(json!({"template_id": "abc"})), NOW);
        assert!(!record.contains_key("template_id"));
        assert_eq!(record.get("started_at"), Some(&json!(NOW)));
    }

    #[test]
    fn test_start_record_keeps_client_started_at_and_ignores_user_id() {
        let record = start_record(
            &obj(json!({
                "started_at": "2024-01-01T08:00:00Z",
                "user_id": "someone-else",
                "template_name": ""
            })),
            NOW,
        );
        assert_eq!(
            Value::Object(record),
            json!({"started_at": "2024-01-01T08:00:00Z"})
        );
    }

    #[test]
    fn test_start_record_null_started_at_defaults() {
        let record = start_record(&obj(json!({"started_at": null, "template_id": null})), NOW);
        assert_eq!(Value::Object(record), json!({"started_at": NOW}));
    }

    #[test]
    fn test_end_changes() {
        assert_eq!(
            Value::Object(end_changes(&Map::new(), NOW)),
            json!({"ended_at": NOW})
        );
        assert_eq!(
            Value::Object(end_changes(
                &obj(json!({"ended_at": "2024-05-01T11:00:00Z", "duration_minutes": "sixty"})),
                NOW
            )),
            json!({"ended_at": "2024-05-01T11:00:00Z", "duration_minutes": "sixty"})
        );
        assert_eq!(
            Value::Object(end_changes(&obj(json!({"duration_minutes": null})), NOW)),
            json!({"ended_at": NOW, "duration_minutes": null})
        );
    }

    #[test]
    fn test_single_record() {
        assert_eq!(
            single_record(json!([{"id": 1}, {"id": 2}])),
            Some(json!({"id": 1}))
        );
        assert_eq!(single_record(json!({"id": 3})), Some(json!({"id": 3})));
        assert_eq!(single_record(json!([])), None);
        assert_eq!(single_record(Value::Null), None);
        assert_eq!(single_record(json!("created")), None);
    }
}
