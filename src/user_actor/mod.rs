//! User-specific domain logic: profile updates and atomic wallet operations.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
