use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order forward to the given status.
    ///
    /// # Errors
    /// Fails for backward moves and for any change to a completed order.
    Advance(OrderStatus),
    /// Hands the order over at the counter, whatever its current stage.
    ///
    /// # Errors
    /// Fails if the order was already delivered.
    Deliver,
}
