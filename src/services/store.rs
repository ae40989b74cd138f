// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data store client (Supabase PostgREST) using the service role key.
//!
//! The service role bypasses row-level security, so ownership is enforced
//! here: reads, updates and deletes only accept a [`ScopedQuery`], which
//! always carries `user_id=eq.<subject>`, and inserts have `user_id`
//! forced to the caller.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Principal;
use reqwest::Method;
use serde_json::{Map, Value};

/// Column every workout row is owned by.
const OWNER_COLUMN: &str = "user_id";

/// PostgREST filter/modifier parameters bound to one owner.
#[derive(Debug, Clone)]
pub struct ScopedQuery {
    params: Vec<(String, String)>,
}

impl ScopedQuery {
    /// Start a query scoped to the principal's rows.
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            params: vec![(
                OWNER_COLUMN.to_string(),
                format!("eq.{}", principal.subject),
            )],
        }
    }

    /// `column = value`
    pub fn eq(self, column: &str, value: &str) -> Self {
        self.filter(column, format!("eq.{}", value))
    }

    /// `column >= value`
    pub fn gte(self, column: &str, value: &str) -> Self {
        self.filter(column, format!("gte.{}", value))
    }

    /// Columns to return.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Sort by `column`, newest/largest first.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.desc", column)));
        self
    }

    /// Query parameters as sent on the wire.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn filter(mut self, column: &str, expr: String) -> Self {
        // The owner filter cannot be replaced or widened.
        if column == OWNER_COLUMN {
            return self;
        }
        self.params.push((column.to_string(), expr));
        self
    }
}

/// PostgREST client authenticated with the service role key.
#[derive(Clone)]
pub struct DataStoreClient {
    http: reqwest::Client,
    rest_url: String,
    service_role_key: Option<String>,
}

impl DataStoreClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", config.supabase_url),
            service_role_key: config.service_role_key.clone(),
        }
    }

    /// Insert one record owned by `principal`. Any client-supplied
    /// `user_id` is overwritten.
    pub async fn insert(
        &self,
        table: &str,
        principal: &Principal,
        mut record: Map<String, Value>,
    ) -> Result<Value, AppError> {
        record.insert(
            OWNER_COLUMN.to_string(),
            Value::String(principal.subject.clone()),
        );
        self.send(Method::POST, table, None, Some(&Value::Object(record)))
            .await
    }

    /// Fetch rows matching the scoped query.
    pub async fn select(&self, table: &str, query: &ScopedQuery) -> Result<Value, AppError> {
        self.send(Method::GET, table, Some(query), None).await
    }

    /// Apply `changes` to rows matching the scoped query, returning the
    /// updated rows.
    pub async fn update(
        &self,
        table: &str,
        query: &ScopedQuery,
        mut changes: Map<String, Value>,
    ) -> Result<Value, AppError> {
        // Ownership cannot be reassigned through an update.
        changes.remove(OWNER_COLUMN);
        self.send(
            Method::PATCH,
            table,
            Some(query),
            Some(&Value::Object(changes)),
        )
        .await
    }

    /// Delete rows matching the scoped query, returning the deleted rows.
    pub async fn delete(&self, table: &str, query: &ScopedQuery) -> Result<Value, AppError> {
        self.send(Method::DELETE, table, Some(query), None).await
    }

    async fn send(
        &self,
        method: Method,
        table: &str,
        query: Option<&ScopedQuery>,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let key = self
            .service_role_key
            .as_deref()
            .ok_or(AppError::ServiceNotConfigured)?;

        let url = format!("{}/{}", self.rest_url, table);
        tracing::debug!(%method, table, "Forwarding to data store");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("apikey", key)
            .bearer_auth(key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation");

        if let Some(query) = query {
            request = request.query(query.params());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("{} {} failed: {}", method, table, e)))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::Upstream(format!("{} {} body read failed: {}", method, table, e))
        })?;

        if !status.is_success() {
            tracing::error!(
                %method,
                table,
                status = status.as_u16(),
                body = %text,
                "Data store request failed"
            );
            return Err(AppError::Upstream(format!("HTTP {}", status)));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            AppError::Upstream(format!("{} {} returned invalid JSON: {}", method, table, e))
        })
    }
}
