//! Mutation coordinator.
//!
//! Every write goes through `perform`: run the request, report it, and on success
//! await a silent full refresh so the store reflects what the server now holds.
//! No optimistic local update is ever applied.

mod forms;
mod validate;

pub use forms::*;
pub use validate::*;

use std::future::Future;
use std::sync::Arc;

use crate::errors::ClientError;
use crate::report::Reporter;
use crate::sync::Synchronizer;
use crate::transport::{ApiResponse, Transport};

pub struct MutationCoordinator<T: Transport> {
    sync: Arc<Synchronizer<T>>,
    reporter: Arc<Reporter>,
}

impl<T: Transport> MutationCoordinator<T> {
    pub fn new(sync: Arc<Synchronizer<T>>, reporter: Arc<Reporter>) -> Self {
        Self { sync, reporter }
    }

    /// Run a write request through the reporting and refresh lifecycle.
    ///
    /// Returns the response whether or not the server accepted it, or `None` when no
    /// response was obtained. By the time an ok response is returned the store has
    /// already been refreshed.
    pub async fn perform<F, Fut>(&self, operation: &str, request: F) -> Option<ApiResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ApiResponse, ClientError>>,
    {
        match request().await {
            Ok(result) => {
                self.reporter.show_result(operation, &result);
                if result.ok {
                    self.sync.refresh_all(true).await;
                }
                Some(result)
            }
            Err(e) => {
                self.reporter.show_client_error(operation, &e);
                None
            }
        }
    }

    /// Send an already validated mutation under its own operation name.
    pub async fn submit(&self, mutation: &Mutation) -> Option<ApiResponse> {
        self.submit_as(mutation.operation(), mutation).await
    }

    /// Send an already validated mutation, reporting it as `operation`.
    pub async fn submit_as(&self, operation: &str, mutation: &Mutation) -> Option<ApiResponse> {
        let transport = self.sync.transport().clone();
        self.perform(operation, || async move { mutation.send(transport.as_ref()).await })
            .await
    }

    /// Validate a form and submit it. Validation failures are reported as client
    /// errors and nothing is sent.
    pub async fn submit_form<F: Form>(&self, form: &F) -> Option<ApiResponse> {
        match form.validate() {
            Ok(mutation) => self.submit(&mutation).await,
            Err(e) => {
                tracing::debug!("{} rejected before sending: {}", form.operation(), e);
                self.reporter.show_client_error(form.operation(), &e);
                None
            }
        }
    }
}
