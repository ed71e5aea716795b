//! View projection.
//!
//! `project` is a pure function of the store contents and the previous selection:
//! row listings with resolved joins, the five dependent selection controls, and the
//! aggregate counters. Nothing here is cached between passes.

mod options;
mod rows;

pub use options::*;
pub use rows::*;

use crate::models::TradeStatus;
use crate::store::EntityStore;

/// Derived totals shown above the tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub students: usize,
    pub active_students: usize,
    pub areas: usize,
    pub assignments: usize,
    pub pending_trades: usize,
}

pub fn counters(store: &EntityStore) -> Counters {
    Counters {
        students: store.students().len(),
        active_students: store.students().iter().filter(|s| s.is_active()).count(),
        areas: store.areas().len(),
        assignments: store.assignments().len(),
        pending_trades: store.trades().iter().filter(|t| t.is_pending()).count(),
    }
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub students: Listing<StudentRow>,
    pub areas: Listing<AreaRow>,
    pub schedules: Listing<ScheduleRow>,
    pub assignments: Listing<AssignmentRow>,
    pub trades: Listing<TradeRow>,
    pub selectors: Selectors,
    pub counters: Counters,
}

/// Project the store into a view model.
pub fn project(store: &EntityStore, previous: &Selection) -> ViewModel {
    ViewModel {
        students: student_rows(store),
        areas: area_rows(store),
        schedules: schedule_rows(store),
        assignments: assignment_rows(store),
        trades: trade_rows(store),
        selectors: build_selectors(store, previous),
        counters: counters(store),
    }
}

/// Follow-up requested by a row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Only local selection changed
    Selected,
    /// The value was not offered by the target control
    Ignored,
    /// A trade decision should be submitted
    DecideTrade { request_id: i64, status: TradeStatus },
}

/// The latest view model plus the selection that will seed the next projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    current: ViewModel,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            current: project(&EntityStore::new(), &Selection::default()),
        }
    }

    pub fn current(&self) -> &ViewModel {
        &self.current
    }

    pub fn selection(&self) -> Selection {
        self.current.selectors.selection()
    }

    pub fn selected(&self, control: Control) -> Option<i64> {
        self.current.selectors.get(control).selected
    }

    /// Re-project from the store, keeping selections that are still valid.
    pub fn render(&mut self, store: &EntityStore) {
        let previous = self.selection();
        self.current = project(store, &previous);
    }

    pub fn pick(&mut self, control: Control, value: i64) -> bool {
        self.current.selectors.pick(control, value)
    }

    /// Apply a row shortcut.
    pub fn apply(&mut self, action: RowAction) -> ActionEffect {
        let picked = match action {
            RowAction::SetRequester(id) => self.pick(Control::TradeRequester, id),
            RowAction::SetTarget(id) => self.pick(Control::TradeTarget, id),
            RowAction::SetStatusTarget(id) => {
                let picked = self.pick(Control::StatusAssignment, id);
                // Canceled assignments also become the reassignment candidate.
                self.pick(Control::ReassignAssignment, id);
                picked
            }
            RowAction::PickTrade(id) => self.pick(Control::TradeRequest, id),
            RowAction::DecideTrade { request_id, status } => {
                return ActionEffect::DecideTrade { request_id, status };
            }
        };

        if picked {
            ActionEffect::Selected
        } else {
            ActionEffect::Ignored
        }
    }
}
