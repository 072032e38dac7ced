pub mod user;
pub mod menu;
pub mod cart;
pub mod order;
pub mod recharge;
pub mod loyalty;

pub use user::*;
pub use menu::*;
pub use cart::*;
pub use order::*;
pub use recharge::*;
pub use loyalty::*;
