use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum RechargeAction {
    /// Marks a pending request as paid and returns what to credit.
    Redeem { at: DateTime<Utc> },
    /// Puts a redeemed request back to pending when the credit failed.
    Reopen,
}
