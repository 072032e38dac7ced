use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;
use crate::user_actor::UserError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Duplicate order key: {0}")]
    AlreadyExists(String),
    #[error("Invalid menu item: {0}")]
    InvalidItem(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Payment refused: {0}")]
    PaymentRefused(UserError),
    #[error("Order already delivered: {0}")]
    AlreadyDelivered(String),
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::AlreadyExists(key) => OrderError::AlreadyExists(key),
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
