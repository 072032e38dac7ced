#[macro_use]
mod macros;
mod auth;
mod user_client;
mod menu_client;
mod order_client;
mod recharge_client;

pub use user_client::*;
pub use menu_client::*;
pub use order_client::*;
pub use recharge_client::*;
