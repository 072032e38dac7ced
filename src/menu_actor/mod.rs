//! Menu item validation and the default menu.

pub mod entity;
pub mod error;
pub mod seed;

pub use error::*;
