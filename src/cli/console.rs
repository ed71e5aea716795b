//! Command dispatch.
//!
//! The console owns one engine instance (store, synchronizer, coordinator, view
//! state and reporter) and maps each `Command` to the component that serves it.
//! Every failure ends up as a reported outcome; nothing propagates to the caller.

use std::sync::{Arc, Mutex};

use reqwest::Method;

use super::command::{Command, HELP};
use super::render::{render_activity, render_last, render_view};
use crate::coordinator::{
    parse_required_int, AutoAssignForm, Form, Mutation, MutationCoordinator,
};
use crate::models::UpdateTradeRequest;
use crate::report::Reporter;
use crate::store::{EntityStore, SharedStore};
use crate::sync::{RefreshOptions, Synchronizer};
use crate::transport::{RequestOptions, Transport};
use crate::view::{ActionEffect, Control, RowAction, ViewState};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Console<T: Transport> {
    sync: Arc<Synchronizer<T>>,
    coordinator: MutationCoordinator<T>,
    reporter: Arc<Reporter>,
    view: Arc<Mutex<ViewState>>,
}

impl<T: Transport> Console<T> {
    pub fn new(transport: Arc<T>, reporter: Reporter) -> Self {
        let reporter = Arc::new(reporter);
        let store: SharedStore = EntityStore::shared();
        let view = Arc::new(Mutex::new(ViewState::new()));

        let target = view.clone();
        let sync = Arc::new(
            Synchronizer::new(transport, store, reporter.clone()).with_render_hook(Box::new(
                move |store| {
                    let mut view = target.lock().unwrap_or_else(|e| e.into_inner());
                    view.render(store);
                },
            )),
        );
        let coordinator = MutationCoordinator::new(sync.clone(), reporter.clone());

        Self {
            sync,
            coordinator,
            reporter,
            view,
        }
    }

    pub fn reporter(&self) -> &Arc<Reporter> {
        &self.reporter
    }

    pub fn store(&self) -> &SharedStore {
        self.sync.store()
    }

    fn view(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current selection of a control.
    pub fn selected(&self, control: Control) -> Option<i64> {
        self.view().selected(control)
    }

    /// Initial silent synchronization.
    pub async fn bootstrap(&self) {
        let outcome = self.sync.refresh_all(true).await;
        if outcome.ok {
            self.reporter.set_server_state("초기 데이터 동기화 완료", true);
        } else {
            self.reporter.set_server_state("초기 동기화 실패", false);
        }
    }

    /// Fill a blank id field from the control's current selection.
    fn or_selected(&self, raw: &str, control: Control) -> String {
        if raw.trim().is_empty() {
            self.selected(control)
                .map(|id| id.to_string())
                .unwrap_or_default()
        } else {
            raw.to_string()
        }
    }

    fn meta_line(&self) -> Reply {
        Reply::Text(
            self.reporter
                .meta()
                .map(|(line, _)| line)
                .unwrap_or_default(),
        )
    }

    async fn submit<F: Form>(&self, form: F) -> Reply {
        self.coordinator.submit_form(&form).await;
        self.meta_line()
    }

    pub async fn execute(&self, command: Command) -> Reply {
        match command {
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => Reply::Quit,
            Command::Sync => {
                self.sync.refresh_all(false).await;
                self.meta_line()
            }
            Command::Refresh(kind) => {
                let options = RefreshOptions {
                    silent: false,
                    render: true,
                };
                if let Err(e) = self.sync.refresh_one(kind, options).await {
                    self.reporter
                        .show_client_error(&format!("{} 조회", kind), &e);
                }
                self.meta_line()
            }
            Command::Health => {
                self.health().await;
                self.meta_line()
            }
            Command::BaseUrl(raw) => {
                let applied = self.sync.transport().set_base_url(&raw).await;
                self.reporter
                    .set_server_state(format!("Base URL 적용: {}", applied), true);
                Reply::Text(applied)
            }
            Command::Show => Reply::Text(render_view(self.view().current())),
            Command::Dump(kind) => {
                let collection = self.store().read().await.get(kind);
                Reply::Text(serde_json::to_string_pretty(&collection).unwrap_or_default())
            }
            Command::Log => Reply::Text(render_activity(&self.reporter.activity())),
            Command::Last => Reply::Text(render_last(&self.reporter)),
            Command::Select(control, raw) => self.select(control, &raw),
            Command::CreateSchedule(form) => self.submit(form).await,
            Command::AutoAssign => self.submit(AutoAssignForm).await,
            Command::SetAssignmentStatus(mut form) => {
                form.assignment_id =
                    self.or_selected(&form.assignment_id, Control::StatusAssignment);
                self.submit(form).await
            }
            Command::Reassign(mut form) => {
                form.assignment_id =
                    self.or_selected(&form.assignment_id, Control::ReassignAssignment);
                self.submit(form).await
            }
            Command::CreateTrade(mut form) => {
                form.requester_assignment_id =
                    self.or_selected(&form.requester_assignment_id, Control::TradeRequester);
                form.target_assignment_id =
                    self.or_selected(&form.target_assignment_id, Control::TradeTarget);
                self.submit(form).await
            }
            Command::DecideTrade(mut form) => {
                form.request_id = self.or_selected(&form.request_id, Control::TradeRequest);
                self.submit(form).await
            }
            Command::QuickDecide { request_id, status } => {
                let operation = format!("교환 요청 {}", status.as_str());
                match parse_required_int(&request_id, "요청 ID") {
                    Ok(request_id) => {
                        let mutation = Mutation::DecideTrade {
                            request_id,
                            body: UpdateTradeRequest {
                                status: status.as_str().to_string(),
                            },
                        };
                        self.coordinator.submit_as(&operation, &mutation).await;
                    }
                    Err(e) => self.reporter.show_client_error(&operation, &e),
                }
                self.meta_line()
            }
            Command::CreateStudent(form) => self.submit(form).await,
            Command::CreateArea(form) => self.submit(form).await,
        }
    }

    fn select(&self, control: Control, raw: &str) -> Reply {
        let id = match parse_required_int(raw, control.as_str()) {
            Ok(id) => id,
            Err(e) => return Reply::Text(e.message()),
        };

        let action = match control {
            Control::StatusAssignment => Some(RowAction::SetStatusTarget(id)),
            Control::TradeRequester => Some(RowAction::SetRequester(id)),
            Control::TradeTarget => Some(RowAction::SetTarget(id)),
            Control::TradeRequest => Some(RowAction::PickTrade(id)),
            Control::ReassignAssignment => None,
        };

        let mut view = self.view();
        let picked = match action {
            Some(action) => view.apply(action) == ActionEffect::Selected,
            None => view.pick(control, id),
        };

        if picked {
            Reply::Text(format!("{} = {}", control.as_str(), id))
        } else {
            Reply::Text(format!("{} is not offered by {}", id, control.as_str()))
        }
    }

    async fn health(&self) {
        match self
            .sync
            .transport()
            .request(Method::GET, "/health", RequestOptions::new())
            .await
        {
            Ok(result) => {
                self.reporter.show_result("헬스체크", &result);
                if result.ok {
                    self.reporter.set_server_state("API 연결 정상", true);
                } else {
                    self.reporter
                        .set_server_state(format!("API 응답 오류 ({})", result.status), false);
                }
            }
            Err(e) => {
                self.reporter.show_client_error("헬스체크", &e);
                self.reporter.set_server_state("API 연결 실패", false);
            }
        }
    }
}
