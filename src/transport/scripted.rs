//! In-memory transport for unit tests.
//!
//! Responses are queued per `METHOD path`; once a route's queue drains, the last
//! response served for it is repeated. Unscripted routes answer 404.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use reqwest::Method;
use serde_json::Value;

use super::{ApiResponse, RequestOptions, Transport};
use crate::errors::ClientError;

type Scripted = Result<(u16, Value), ClientError>;

/// A request observed by the scripted transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub options: RequestOptions,
}

#[derive(Default)]
pub struct ScriptedTransport {
    base_url: Mutex<String>,
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    served: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            base_url: Mutex::new("http://scripted".to_string()),
            ..Self::default()
        }
    }

    fn route_key(method: &Method, path: &str) -> String {
        format!("{} {}", method, path)
    }

    /// Queue a response for a route.
    pub fn respond(&self, method: Method, path: &str, status: u16, payload: Value) {
        self.push(method, path, Ok((status, payload)));
    }

    /// Queue a client-side failure for a route.
    pub fn fail(&self, method: Method, path: &str, error: ClientError) {
        self.push(method, path, Err(error));
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry(Self::route_key(&method, path))
            .or_default()
            .push_back(scripted);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls for a route.
    pub fn count(&self, method: Method, path: &str) -> usize {
        let method = method.to_string();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn next(&self, method: &Method, path: &str) -> Scripted {
        let key = Self::route_key(method, path);
        let queued = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        let mut served = self.served.lock().unwrap();
        match queued {
            Some(scripted) => {
                served.insert(key, scripted.clone());
                scripted
            }
            None => served
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Ok((404, serde_json::json!({ "detail": "Not Found" })))),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn base_url(&self) -> String {
        self.base_url.lock().unwrap().clone()
    }

    async fn set_base_url(&self, raw: &str) -> String {
        let normalized = crate::config::normalize_base_url(raw);
        *self.base_url.lock().unwrap() = normalized.clone();
        normalized
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            options,
        });

        let (status, payload) = self.next(&method, path)?;
        Ok(ApiResponse {
            ok: (200..300).contains(&status),
            status,
            method: method.to_string(),
            url: format!("http://scripted{}", path),
            elapsed_ms: 0,
            payload,
        })
    }
}
