//! Order lifecycle rules: forward-only status and immutable completed orders.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
