//! Cleaning schedule model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cleaning day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule_id: i64,
    pub cleaning_date: NaiveDate,
}

/// Date range for generating schedules.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
