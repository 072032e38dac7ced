use thiserror::Error;
use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),
    #[error("Insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance { needed: f64, available: f64 },
    #[error("Insufficient points: needed {needed}, available {available}")]
    InsufficientPoints { needed: u32, available: u32 },
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    #[error("Preferences error: {0}")]
    Preferences(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<UserError>> for UserError {
    fn from(e: FrameworkError<UserError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::AlreadyExists(id) => UserError::AlreadyExists(id),
            FrameworkError::Entity(e) => e,
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
