//! Remote Data Gateway: the only place that talks to the screening API.
//!
//! Callers pass a path relative to the API base (`/candidates/`) and get the
//! parsed JSON body back. Non-2xx answers become [`Error::Api`] carrying the
//! backend's own message; requests that never complete become
//! [`Error::Transport`]. Nothing is retried.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

pub use http::HttpGateway;

/// A file plus the extra text fields sent with it as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub file_name: String,
    pub bytes: Bytes,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> Result<JsonValue>;

    async fn upload(&self, path: &str, form: UploadForm) -> Result<JsonValue>;
}

/// Human-readable failure text from a backend body, if it carries one.
pub fn backend_message(body: &JsonValue) -> Option<String> {
    if let Some(msg) = body
        .get("message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    {
        return Some(msg.to_string());
    }
    let joined = body
        .get("messages")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty());
    joined
}

/// Promotes a 2xx body with `"success": false` to an application failure.
pub fn ensure_success(body: JsonValue, fallback: &str) -> Result<JsonValue> {
    if body.get("success").and_then(|v| v.as_bool()) == Some(false) {
        let message = backend_message(&body).unwrap_or_else(|| fallback.to_string());
        return Err(Error::api(200, message));
    }
    Ok(body)
}

pub fn decode<T: DeserializeOwned>(body: JsonValue) -> Result<T> {
    Ok(serde_json::from_value(body)?)
}
