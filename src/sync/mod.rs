//! Synchronizer: refreshes entity collections from the API into the store.
//!
//! A refresh replaces a kind's collection only when the response succeeded and its
//! body decodes as a list of that kind; anything else leaves the previous data in
//! place. A full refresh visits every kind in declared order and renders once.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ClientError;
use crate::models::EntityKind;
use crate::report::Reporter;
use crate::store::{Collection, EntityStore, SharedStore};
use crate::transport::{ApiResponse, RequestOptions, Transport};

/// Status reported for a full refresh where every kind succeeded.
pub const STATUS_SYNC_OK: u16 = 200;
/// Status reported for a full refresh where at least one kind failed.
pub const STATUS_SYNC_PARTIAL: u16 = 207;

/// Called with the current store contents after a refresh.
pub type RenderHook = Box<dyn Fn(&EntityStore) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Suppress outcome reporting
    pub silent: bool,
    /// Re-render after the store is updated
    pub render: bool,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            silent: true,
            render: true,
        }
    }
}

/// Result of refreshing one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub kind: EntityKind,
    pub response: ApiResponse,
    /// Whether the store collection was replaced
    pub applied: bool,
    /// Records now held for this kind when applied, otherwise zero
    pub count: usize,
}

impl RefreshOutcome {
    pub fn ok(&self) -> bool {
        self.response.ok && self.applied
    }
}

/// Per-kind line of a full refresh summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    #[serde(skip)]
    pub kind: EntityKind,
    /// HTTP status, absent when the request never got a response
    pub status: Option<u16>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of a full refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub ok: bool,
    pub status: u16,
    pub elapsed_ms: u64,
    /// One entry per kind, in refresh order
    pub summary: Vec<KindSummary>,
}

impl SyncOutcome {
    #[cfg(test)]
    pub fn summary_for(&self, kind: EntityKind) -> Option<&KindSummary> {
        self.summary.iter().find(|line| line.kind == kind)
    }

    /// Present the aggregate as a response so it can be reported like any other.
    /// Payload keys follow refresh order.
    pub fn to_response(&self, base_url: &str) -> ApiResponse {
        let mut payload = Map::new();
        for line in &self.summary {
            payload.insert(
                line.kind.as_str().to_string(),
                serde_json::to_value(line).unwrap_or(Value::Null),
            );
        }

        ApiResponse {
            ok: self.ok,
            status: self.status,
            method: Method::GET.to_string(),
            url: format!("{}/(sync)", base_url),
            elapsed_ms: self.elapsed_ms,
            payload: Value::Object(payload),
        }
    }
}

pub struct Synchronizer<T: Transport> {
    transport: Arc<T>,
    store: SharedStore,
    reporter: Arc<Reporter>,
    render: Option<RenderHook>,
}

impl<T: Transport> Synchronizer<T> {
    pub fn new(transport: Arc<T>, store: SharedStore, reporter: Arc<Reporter>) -> Self {
        Self {
            transport,
            store,
            reporter,
            render: None,
        }
    }

    pub fn with_render_hook(mut self, hook: RenderHook) -> Self {
        self.render = Some(hook);
        self
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Run the render hook against the current store contents.
    pub async fn render(&self) {
        if let Some(hook) = &self.render {
            let store = self.store.read().await;
            hook(&store);
        }
    }

    /// Refresh a single kind.
    ///
    /// Fails only when no response could be obtained; a server failure or an
    /// undecodable body is an outcome with `ok() == false`.
    pub async fn refresh_one(
        &self,
        kind: EntityKind,
        options: RefreshOptions,
    ) -> Result<RefreshOutcome, ClientError> {
        let response = self
            .transport
            .request(Method::GET, kind.endpoint(), RequestOptions::new())
            .await?;

        let mut applied = false;
        let mut count = 0;
        let mut rejected = None;
        if response.ok {
            match Collection::decode(kind, &response.payload) {
                Ok(collection) => {
                    tracing::debug!(
                        "Replacing {} with {} records",
                        collection.kind(),
                        collection.len()
                    );
                    let mut store = self.store.write().await;
                    store.replace(collection);
                    count = store.len(kind);
                    applied = true;
                }
                Err(e) => {
                    tracing::warn!("Keeping previous {}: {}", kind, e);
                    rejected = Some(e);
                }
            }
        }

        if options.render {
            self.render().await;
        }
        if !options.silent {
            let operation = format!("{} 조회", kind);
            match &rejected {
                Some(e) => self.reporter.show_unusable(&operation, &response, e),
                None => self.reporter.show_result(&operation, &response),
            }
        }

        Ok(RefreshOutcome {
            kind,
            response,
            applied,
            count,
        })
    }

    /// Refresh every kind in declared order, then render once.
    ///
    /// A failing kind does not stop the others; it keeps its previous data and turns
    /// the aggregate into a partial result.
    pub async fn refresh_all(&self, silent: bool) -> SyncOutcome {
        let started_at = Instant::now();
        let mut summary = Vec::with_capacity(EntityKind::ALL.len());
        let mut all_ok = true;

        for kind in EntityKind::ALL {
            let options = RefreshOptions {
                silent: true,
                render: false,
            };
            let line = match self.refresh_one(kind, options).await {
                Ok(outcome) => {
                    all_ok &= outcome.ok();
                    KindSummary {
                        kind,
                        status: Some(outcome.response.status),
                        count: outcome.count,
                        error: None,
                    }
                }
                Err(e) => {
                    all_ok = false;
                    KindSummary {
                        kind,
                        status: None,
                        count: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            summary.push(line);
        }

        self.render().await;

        let outcome = SyncOutcome {
            ok: all_ok,
            status: if all_ok {
                STATUS_SYNC_OK
            } else {
                STATUS_SYNC_PARTIAL
            },
            elapsed_ms: started_at.elapsed().as_millis() as u64,
            summary,
        };

        if !silent {
            let base_url = self.transport.base_url().await;
            self.reporter
                .show_result("전체 동기화", &outcome.to_response(&base_url));
        }

        outcome
    }
}
