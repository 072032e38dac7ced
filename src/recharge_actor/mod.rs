//! Recharge request redemption: a code credits a wallet at most once.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
