//! Activity and result reporting.
//!
//! Keeps the most recent response detail, a bounded activity log (newest first) and
//! the server-state line, and forwards every outcome to registered hooks.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{ClientError, ClientErrorReport};
use crate::transport::ApiResponse;

/// Outcome of a single user-triggered operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub operation: String,
    pub ok: bool,
    /// HTTP status, absent for client errors
    pub status: Option<u16>,
    pub message: String,
}

/// Full detail of the last response, as shown in the response panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDetail {
    pub operation: String,
    pub method: String,
    pub status: u16,
    pub url: String,
    pub elapsed_ms: u64,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LastResponse {
    Result(ResponseDetail),
    ClientError(ClientErrorReport),
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub at: String,
    pub operation: String,
    pub ok: bool,
    pub message: String,
}

impl std::fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {}", self.at, self.operation, self.message)
    }
}

/// Connection indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerState {
    pub text: String,
    pub ok: bool,
}

pub type OutcomeHook = Box<dyn Fn(&Outcome) + Send + Sync>;

#[derive(Default)]
struct ReporterState {
    meta: Option<(String, bool)>,
    last: Option<LastResponse>,
    activity: VecDeque<ActivityEntry>,
    server_state: Option<ServerState>,
}

pub struct Reporter {
    state: Mutex<ReporterState>,
    hooks: Vec<OutcomeHook>,
    limit: usize,
}

impl Reporter {
    pub fn new(limit: usize) -> Self {
        Self {
            state: Mutex::new(ReporterState::default()),
            hooks: Vec::new(),
            limit,
        }
    }

    /// Register a hook notified for every outcome.
    pub fn with_hook(mut self, hook: OutcomeHook) -> Self {
        self.hooks.push(hook);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReporterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a response, successful or not.
    pub fn show_result(&self, operation: &str, result: &ApiResponse) {
        self.record_response(operation, result, result.ok, None);
    }

    /// Record a response the server accepted but whose body could not be applied.
    pub fn show_unusable(&self, operation: &str, result: &ApiResponse, error: &ClientError) {
        self.record_response(operation, result, false, Some(error.error_code()));
    }

    fn record_response(
        &self,
        operation: &str,
        result: &ApiResponse,
        ok: bool,
        note: Option<&str>,
    ) {
        let mut meta = format!("{} | {} | {}ms", operation, result.status, result.elapsed_ms);
        let mut message = format!("HTTP {}", result.status);
        if let Some(note) = note {
            meta = format!("{} | {}", meta, note);
            message = format!("{} | {}", message, note);
        }

        if ok {
            tracing::info!("{}", meta);
        } else {
            tracing::warn!("{} | {}", meta, result.payload);
        }

        {
            let mut state = self.lock();
            state.meta = Some((meta, ok));
            state.last = Some(LastResponse::Result(ResponseDetail {
                operation: operation.to_string(),
                method: result.method.clone(),
                status: result.status,
                url: result.url.clone(),
                elapsed_ms: result.elapsed_ms,
                response: result.payload.clone(),
            }));
        }

        self.push_activity(Outcome {
            operation: operation.to_string(),
            ok,
            status: Some(result.status),
            message,
        });
    }

    /// Record a failure that happened before a response was obtained.
    pub fn show_client_error(&self, operation: &str, error: &ClientError) {
        tracing::warn!("{} | client error | {}", operation, error);

        {
            let mut state = self.lock();
            state.meta = Some((format!("{} | client error", operation), false));
            state.last = Some(LastResponse::ClientError(ClientErrorReport::new(
                operation, error,
            )));
        }

        self.push_activity(Outcome {
            operation: operation.to_string(),
            ok: false,
            status: None,
            message: "client error".to_string(),
        });
    }

    pub fn set_server_state(&self, text: impl Into<String>, ok: bool) {
        let text = text.into();
        tracing::info!("Server state: {}", text);
        self.lock().server_state = Some(ServerState { text, ok });
    }

    fn push_activity(&self, outcome: Outcome) {
        {
            let mut state = self.lock();
            state.activity.push_front(ActivityEntry {
                at: chrono::Local::now().format("%H:%M:%S").to_string(),
                operation: outcome.operation.clone(),
                ok: outcome.ok,
                message: outcome.message.clone(),
            });
            state.activity.truncate(self.limit);
        }

        for hook in &self.hooks {
            hook(&outcome);
        }
    }

    /// Summary line of the last response and whether it succeeded.
    pub fn meta(&self) -> Option<(String, bool)> {
        self.lock().meta.clone()
    }

    pub fn last(&self) -> Option<LastResponse> {
        self.lock().last.clone()
    }

    /// Activity log, newest first.
    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.lock().activity.iter().cloned().collect()
    }

    pub fn server_state(&self) -> Option<ServerState> {
        self.lock().server_state.clone()
    }
}
