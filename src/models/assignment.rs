//! Assignment model: one student on one area for one schedule.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    #[serde(rename = "배정")]
    Assigned,
    #[serde(rename = "완료")]
    Completed,
    #[serde(rename = "취소")]
    Canceled,
    #[serde(rename = "추노")]
    Absconded,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "배정",
            AssignmentStatus::Completed => "완료",
            AssignmentStatus::Canceled => "취소",
            AssignmentStatus::Absconded => "추노",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "배정" => Some(AssignmentStatus::Assigned),
            "완료" => Some(AssignmentStatus::Completed),
            "취소" => Some(AssignmentStatus::Canceled),
            "추노" => Some(AssignmentStatus::Absconded),
            _ => None,
        }
    }
}

/// A duty assignment. The central join entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: i64,
    pub schedule_id: i64,
    pub student_pk: i64,
    pub area_id: i64,
    #[serde(default)]
    pub status: String,
}

impl Assignment {
    pub fn status(&self) -> Option<AssignmentStatus> {
        AssignmentStatus::from_str(&self.status)
    }

    pub fn is_canceled(&self) -> bool {
        self.status() == Some(AssignmentStatus::Canceled)
    }
}
