use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RechargeStatus {
    Pending,
    Completed,
}

/// A wallet top-up waiting for cash at the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeRequest {
    pub id: String,
    pub code: String,
    /// Whole coins.
    pub amount: u32,
    pub user_id: String,
    pub user_name: String,
    pub status: RechargeStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new recharge request.
#[derive(Debug, Clone)]
pub struct RechargeCreate {
    pub code: String,
    pub amount: u32,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a successful redemption, used to credit the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct RedeemedRecharge {
    pub user_id: String,
    pub amount: u32,
}
