use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::domain::CartLine;

/// Order lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        self != OrderStatus::Completed && next > self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Preparing => "Preparando",
            OrderStatus::Ready => "Listo",
            OrderStatus::Completed => "Entregado",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupTime {
    Asap,
    Recess,
    Custom(String),
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickupTime::Asap => f.write_str("Lo antes posible"),
            PickupTime::Recess => f.write_str("Recreo (9:30 AM)"),
            PickupTime::Custom(time) => f.write_str(time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Coins,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub discount: f64,
    /// Amount charged to the student.
    pub total: f64,
    pub points_earned: u32,
    pub points_redeemed: u32,
    pub status: OrderStatus,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub pickup_time: PickupTime,
    pub pickup_code: String,
    pub user_id: String,
    pub payment_method: PaymentMethod,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub points_earned: u32,
    pub points_redeemed: u32,
    pub pickup_time: PickupTime,
    pub pickup_code: String,
    pub user_id: String,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

/// What the student asks for at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub pickup_time: PickupTime,
    pub payment_method: PaymentMethod,
    pub redeem_reward: bool,
}

/// Staff view of all orders.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    pub active: Vec<Order>,
    pub history: Vec<Order>,
}

impl OrderBoard {
    /// Splits orders (already sorted newest first) by completion.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let (history, active) = orders.into_iter().partition(|o| o.status == OrderStatus::Completed);
        Self { active, history }
    }
}
