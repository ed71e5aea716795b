//! Cleaning area model.

use serde::{Deserialize, Serialize};

/// A cleaning area with its staffing requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: i64,
    pub name: String,
    pub need_peoples: i64,
    #[serde(default)]
    pub target_grades: Vec<i64>,
}

/// Query parameters for registering a new area.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAreaRequest {
    pub area_id: i64,
    pub name: String,
    pub need_peoples: i64,
    pub target_grades: Vec<i64>,
}
