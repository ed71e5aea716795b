//! Trade model: a request to swap two assignments.

use serde::{Deserialize, Serialize};

/// Decision state of a trade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    #[serde(rename = "대기")]
    Pending,
    #[serde(rename = "수락")]
    Accepted,
    #[serde(rename = "거절")]
    Rejected,
    #[serde(rename = "취소")]
    Canceled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Pending => "대기",
            TradeStatus::Accepted => "수락",
            TradeStatus::Rejected => "거절",
            TradeStatus::Canceled => "취소",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "대기" => Some(TradeStatus::Pending),
            "수락" => Some(TradeStatus::Accepted),
            "거절" => Some(TradeStatus::Rejected),
            "취소" => Some(TradeStatus::Canceled),
            _ => None,
        }
    }
}

/// A trade request between two assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub request_id: i64,
    pub requester_assignment_id: i64,
    pub target_assignment_id: i64,
    #[serde(default)]
    pub status: String,
}

impl Trade {
    pub fn status(&self) -> Option<TradeStatus> {
        TradeStatus::from_str(&self.status)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Some(TradeStatus::Pending)
    }
}

/// Request body for opening a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTradeRequest {
    pub requester_assignment_id: i64,
    pub target_assignment_id: i64,
}

/// Request body for deciding a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTradeRequest {
    pub status: String,
}
