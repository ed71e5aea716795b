//! Transport layer for the duty scheduling API.
//!
//! Every request resolves to a uniform `ApiResponse`. HTTP-level failures (4xx/5xx)
//! are ordinary responses with `ok == false`; only failures that prevent obtaining a
//! response at all surface as `ClientError`.

mod http;
#[cfg(test)]
pub mod scripted;

pub use http::*;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;

/// Normalized outcome of a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub status: u16,
    pub method: String,
    pub url: String,
    pub elapsed_ms: u64,
    /// Decoded JSON body, the raw text when it is not JSON, or null when empty
    pub payload: Value,
}

impl ApiResponse {
    /// Decode a response body: empty is null, JSON is parsed, anything else is kept as text.
    pub fn decode_payload(text: &str) -> Value {
        if text.is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}

/// Query string and body for a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter; empty values are skipped.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.query.push((key.to_string(), value));
        }
        self
    }

    /// Add an optional query parameter.
    pub fn param_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add a list as repeated query parameters.
    pub fn param_list<I, T>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        for value in values {
            self = self.param(key, value);
        }
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Issues requests against the API.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Base URL requests are resolved against.
    async fn base_url(&self) -> String;

    /// Point subsequent requests at another API; returns the normalized URL.
    async fn set_base_url(&self, raw: &str) -> String;

    /// Send a request and normalize the response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError>;
}
