use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::actions::OrderAction;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = (); // Orders are only changed through actions
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order is initialized with status `Pending`; `date` is the UTC day
    /// of `placed_at`.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::ValidationError("Order has no items".to_string()));
        }
        if params.total < 0.0 || params.discount < 0.0 || params.total > params.subtotal {
            return Err(OrderError::ValidationError(format!(
                "Inconsistent amounts: subtotal {}, discount {}, total {}",
                params.subtotal, params.discount, params.total
            )));
        }
        Ok(Self {
            id,
            lines: params.lines,
            subtotal: params.subtotal,
            discount: params.discount,
            total: params.total,
            points_earned: params.points_earned,
            points_redeemed: params.points_redeemed,
            status: OrderStatus::Pending,
            date: params.placed_at.date_naive(),
            timestamp: params.placed_at,
            pickup_time: params.pickup_time,
            pickup_code: params.pickup_code,
            user_id: params.user_id,
            payment_method: params.payment_method,
        })
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.pickup_code)
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    /// Only delivered orders may be removed, so paid orders never vanish.
    fn on_delete(&self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Completed {
            return Err(OrderError::ValidationError(format!("Order {} is still {}", self.id, self.status)));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Advance(next) => {
                if !self.status.can_advance_to(next) {
                    return Err(OrderError::InvalidTransition { from: self.status, to: next });
                }
                self.status = next;
            }
            OrderAction::Deliver => {
                if self.status == OrderStatus::Completed {
                    return Err(OrderError::AlreadyDelivered(self.pickup_code.clone()));
                }
                self.status = OrderStatus::Completed;
            }
        }
        Ok(self.clone())
    }
}
