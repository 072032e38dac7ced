use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::user_actor::UserError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RechargeError {
    #[error("Recharge code not found: {0}")]
    NotFound(String),
    #[error("Duplicate recharge key: {0}")]
    AlreadyExists(String),
    #[error("Recharge code already used: {0}")]
    AlreadyUsed(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Credit failed: {0}")]
    CreditFailed(UserError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<RechargeError>> for RechargeError {
    fn from(e: FrameworkError<RechargeError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => RechargeError::NotFound(id),
            FrameworkError::AlreadyExists(key) => RechargeError::AlreadyExists(key),
            FrameworkError::Entity(e) => e,
            other => RechargeError::ActorCommunicationError(other.to_string()),
        }
    }
}
