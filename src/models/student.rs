//! Student model matching the server Student schema.

use serde::{Deserialize, Serialize};

/// Enrollment status meaning the student is currently attending.
pub const STATUS_ACTIVE: &str = "재학";

/// A student who can be assigned cleaning duty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_pk: i64,
    pub student_id: String,
    pub name: String,
    pub grade: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

fn default_role() -> String {
    "학생".to_string()
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Query parameters for registering a new student.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStudentRequest {
    pub student_pk: i64,
    pub student_id: String,
    pub name: String,
    pub grade: i64,
    pub status: Option<String>,
    pub role: Option<String>,
}
