//! Dependent selection lists.
//!
//! Every projection rebuilds the option lists from the store. A control keeps its
//! previous selection only if that key is still offered; otherwise it falls back
//! to its placeholder.

use crate::models::AssignmentStatus;
use crate::store::EntityStore;

/// The selection controls fed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Assignment whose status is being changed
    StatusAssignment,
    /// Canceled assignment to hand to someone else
    ReassignAssignment,
    /// Requester side of a new trade
    TradeRequester,
    /// Target side of a new trade
    TradeTarget,
    /// Pending trade awaiting a decision
    TradeRequest,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::StatusAssignment,
        Control::ReassignAssignment,
        Control::TradeRequester,
        Control::TradeTarget,
        Control::TradeRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::StatusAssignment => "status",
            Control::ReassignAssignment => "reassign",
            Control::TradeRequester => "requester",
            Control::TradeTarget => "target",
            Control::TradeRequest => "request",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "status" => Some(Control::StatusAssignment),
            "reassign" => Some(Control::ReassignAssignment),
            "requester" => Some(Control::TradeRequester),
            "target" => Some(Control::TradeTarget),
            "request" => Some(Control::TradeRequest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

/// A rebuilt control: placeholder, options and the surviving selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    pub placeholder: String,
    pub options: Vec<SelectOption>,
    pub selected: Option<i64>,
}

impl SelectControl {
    /// Build a control, keeping `previous` only when it is still among `options`.
    pub fn build(placeholder: &str, options: Vec<SelectOption>, previous: Option<i64>) -> Self {
        let selected = previous.filter(|value| options.iter().any(|o| o.value == *value));
        Self {
            placeholder: placeholder.to_string(),
            options,
            selected,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        let selected = self.selected?;
        self.options.iter().find(|option| option.value == selected)
    }
}

/// Selected key per control, carried from one projection to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub status_assignment: Option<i64>,
    pub reassign_assignment: Option<i64>,
    pub trade_requester: Option<i64>,
    pub trade_target: Option<i64>,
    pub trade_request: Option<i64>,
}

impl Selection {
    pub fn get(&self, control: Control) -> Option<i64> {
        match control {
            Control::StatusAssignment => self.status_assignment,
            Control::ReassignAssignment => self.reassign_assignment,
            Control::TradeRequester => self.trade_requester,
            Control::TradeTarget => self.trade_target,
            Control::TradeRequest => self.trade_request,
        }
    }

    pub fn set(&mut self, control: Control, value: Option<i64>) {
        let slot = match control {
            Control::StatusAssignment => &mut self.status_assignment,
            Control::ReassignAssignment => &mut self.reassign_assignment,
            Control::TradeRequester => &mut self.trade_requester,
            Control::TradeTarget => &mut self.trade_target,
            Control::TradeRequest => &mut self.trade_request,
        };
        *slot = value;
    }
}

/// All five controls after a projection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub status_assignment: SelectControl,
    pub reassign_assignment: SelectControl,
    pub trade_requester: SelectControl,
    pub trade_target: SelectControl,
    pub trade_request: SelectControl,
}

impl Selectors {
    pub fn get(&self, control: Control) -> &SelectControl {
        match control {
            Control::StatusAssignment => &self.status_assignment,
            Control::ReassignAssignment => &self.reassign_assignment,
            Control::TradeRequester => &self.trade_requester,
            Control::TradeTarget => &self.trade_target,
            Control::TradeRequest => &self.trade_request,
        }
    }

    /// Current selection of every control.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        for control in Control::ALL {
            selection.set(control, self.get(control).selected);
        }
        selection
    }

    /// Select `value` in `control` if it is offered there.
    pub fn pick(&mut self, control: Control, value: i64) -> bool {
        let target = match control {
            Control::StatusAssignment => &mut self.status_assignment,
            Control::ReassignAssignment => &mut self.reassign_assignment,
            Control::TradeRequester => &mut self.trade_requester,
            Control::TradeTarget => &mut self.trade_target,
            Control::TradeRequest => &mut self.trade_request,
        };
        if target.contains(value) {
            target.selected = Some(value);
            true
        } else {
            false
        }
    }
}

/// Rebuild every control from the store, carrying over still-valid selections.
pub fn build_selectors(store: &EntityStore, previous: &Selection) -> Selectors {
    let assignment_options: Vec<SelectOption> = store
        .assignments()
        .iter()
        .map(|assignment| SelectOption {
            value: assignment.assignment_id,
            label: format!(
                "#{} | 일정 {} | {}",
                assignment.assignment_id, assignment.schedule_id, assignment.status
            ),
        })
        .collect();

    let canceled_options: Vec<SelectOption> = store
        .assignments()
        .iter()
        .filter(|assignment| assignment.is_canceled())
        .map(|assignment| SelectOption {
            value: assignment.assignment_id,
            label: format!(
                "#{} | 일정 {} | {}",
                assignment.assignment_id,
                assignment.schedule_id,
                AssignmentStatus::Canceled.as_str()
            ),
        })
        .collect();

    let pending_trade_options: Vec<SelectOption> = store
        .trades()
        .iter()
        .filter(|trade| trade.is_pending())
        .map(|trade| SelectOption {
            value: trade.request_id,
            label: format!(
                "#{} | {} ↔ {}",
                trade.request_id, trade.requester_assignment_id, trade.target_assignment_id
            ),
        })
        .collect();

    let reassign_placeholder = if canceled_options.is_empty() {
        "취소 배정 없음"
    } else {
        "취소 배정 선택"
    };
    let request_placeholder = if pending_trade_options.is_empty() {
        "대기 요청 없음"
    } else {
        "요청 선택"
    };

    Selectors {
        status_assignment: SelectControl::build(
            "배정 선택",
            assignment_options.clone(),
            previous.get(Control::StatusAssignment),
        ),
        reassign_assignment: SelectControl::build(
            reassign_placeholder,
            canceled_options,
            previous.get(Control::ReassignAssignment),
        ),
        trade_requester: SelectControl::build(
            "신청자 배정 선택",
            assignment_options.clone(),
            previous.get(Control::TradeRequester),
        ),
        trade_target: SelectControl::build(
            "대상자 배정 선택",
            assignment_options,
            previous.get(Control::TradeTarget),
        ),
        trade_request: SelectControl::build(
            request_placeholder,
            pending_trade_options,
            previous.get(Control::TradeRequest),
        ),
    }
}
