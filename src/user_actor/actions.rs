/// Wallet movement produced by one checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// Coins taken from the balance. Zero for cash payments.
    pub charge: f64,
    pub points_redeemed: u32,
    pub points_earned: u32,
}

/// Custom actions for User entities.
///
/// Every action reads and writes balance and points in one step, so two
/// concurrent operations on the same user can never lose an update.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Applies a checkout settlement.
    ///
    /// # Errors
    /// Fails without changing anything if the balance cannot cover `charge`
    /// or the user holds fewer points than `points_redeemed`.
    Settle(Settlement),
    /// Undoes a settlement whose order could not be written.
    Reverse(Settlement),
    /// Adds coins from a validated recharge.
    Credit(f64),
}
