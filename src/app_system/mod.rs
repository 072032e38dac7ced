//! System orchestration, startup, and shutdown logic.

pub mod cafeteria_system;
pub mod tracing;
pub mod error;

pub use cafeteria_system::*;
pub use self::tracing::*;
pub use error::*;
