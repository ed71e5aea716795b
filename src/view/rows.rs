//! Row listings and join resolution.

use std::collections::HashMap;

use crate::models::{Area, Student, TradeStatus};
use crate::store::EntityStore;

/// Placeholder shown instead of an empty table.
pub const NO_DATA: &str = "데이터 없음";

/// Rows of one table, or the single "no data" placeholder row.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<R> {
    Empty,
    Rows(Vec<R>),
}

impl<R> Listing<R> {
    fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            Listing::Empty
        } else {
            Listing::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            Listing::Empty => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }
}

/// Display form of a status value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    /// Style class for known statuses
    pub class: Option<&'static str>,
}

/// Map a raw status to its badge. Unknown values get no class; empty shows "-".
pub fn status_badge(status: &str) -> StatusBadge {
    let class = match status {
        "배정" => Some("status-배정"),
        "완료" => Some("status-완료"),
        "취소" => Some("status-취소"),
        "추노" => Some("status-추노"),
        "대기" => Some("status-대기"),
        "수락" => Some("status-수락"),
        "거절" => Some("status-거절"),
        _ => None,
    };
    let label = if status.is_empty() { "-" } else { status };

    StatusBadge {
        label: label.to_string(),
        class,
    }
}

/// Row-level shortcut offered next to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    SetRequester(i64),
    SetTarget(i64),
    SetStatusTarget(i64),
    PickTrade(i64),
    DecideTrade { request_id: i64, status: TradeStatus },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub student_pk: i64,
    pub student_id: String,
    pub name: String,
    pub grade: i64,
    pub status: StatusBadge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaRow {
    pub area_id: i64,
    pub name: String,
    pub need_peoples: i64,
    pub target_grades: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub schedule_id: i64,
    pub cleaning_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub schedule_id: i64,
    pub area_label: String,
    pub student_label: String,
    pub status: StatusBadge,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub request_id: i64,
    pub requester_assignment_id: i64,
    pub target_assignment_id: i64,
    pub status: StatusBadge,
    pub actions: Vec<RowAction>,
}

pub fn student_rows(store: &EntityStore) -> Listing<StudentRow> {
    Listing::from_rows(
        store
            .students()
            .iter()
            .map(|student| StudentRow {
                student_pk: student.student_pk,
                student_id: student.student_id.clone(),
                name: student.name.clone(),
                grade: student.grade,
                status: status_badge(&student.status),
            })
            .collect(),
    )
}

pub fn area_rows(store: &EntityStore) -> Listing<AreaRow> {
    Listing::from_rows(
        store
            .areas()
            .iter()
            .map(|area| AreaRow {
                area_id: area.area_id,
                name: area.name.clone(),
                need_peoples: area.need_peoples,
                target_grades: area
                    .target_grades
                    .iter()
                    .map(|grade| grade.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect(),
    )
}

pub fn schedule_rows(store: &EntityStore) -> Listing<ScheduleRow> {
    Listing::from_rows(
        store
            .schedules()
            .iter()
            .map(|schedule| ScheduleRow {
                schedule_id: schedule.schedule_id,
                cleaning_date: schedule.cleaning_date.to_string(),
            })
            .collect(),
    )
}

/// Label for the student behind an assignment, falling back to the raw key.
pub fn student_label(students: &HashMap<i64, &Student>, student_pk: i64) -> String {
    match students.get(&student_pk) {
        Some(student) => format!("{}({})", student.name, student.student_pk),
        None => format!("PK {}", student_pk),
    }
}

/// Label for the area behind an assignment, falling back to the raw key.
pub fn area_label(areas: &HashMap<i64, &Area>, area_id: i64) -> String {
    match areas.get(&area_id) {
        Some(area) => format!("{}({})", area.name, area.area_id),
        None => format!("구역 {}", area_id),
    }
}

pub fn assignment_rows(store: &EntityStore) -> Listing<AssignmentRow> {
    let students: HashMap<i64, &Student> = store
        .students()
        .iter()
        .map(|student| (student.student_pk, student))
        .collect();
    let areas: HashMap<i64, &Area> = store
        .areas()
        .iter()
        .map(|area| (area.area_id, area))
        .collect();

    Listing::from_rows(
        store
            .assignments()
            .iter()
            .map(|assignment| AssignmentRow {
                assignment_id: assignment.assignment_id,
                schedule_id: assignment.schedule_id,
                area_label: area_label(&areas, assignment.area_id),
                student_label: student_label(&students, assignment.student_pk),
                status: status_badge(&assignment.status),
                actions: vec![
                    RowAction::SetRequester(assignment.assignment_id),
                    RowAction::SetTarget(assignment.assignment_id),
                    RowAction::SetStatusTarget(assignment.assignment_id),
                ],
            })
            .collect(),
    )
}

pub fn trade_rows(store: &EntityStore) -> Listing<TradeRow> {
    Listing::from_rows(
        store
            .trades()
            .iter()
            .map(|trade| {
                let mut actions = vec![RowAction::PickTrade(trade.request_id)];
                if trade.is_pending() {
                    actions.push(RowAction::DecideTrade {
                        request_id: trade.request_id,
                        status: TradeStatus::Accepted,
                    });
                    actions.push(RowAction::DecideTrade {
                        request_id: trade.request_id,
                        status: TradeStatus::Rejected,
                    });
                }

                TradeRow {
                    request_id: trade.request_id,
                    requester_assignment_id: trade.requester_assignment_id,
                    target_assignment_id: trade.target_assignment_id,
                    status: status_badge(&trade.status),
                    actions,
                }
            })
            .collect(),
    )
}
