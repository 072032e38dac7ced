use thiserror::Error;
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::prefs::PrefsError;
use crate::recharge_actor::RechargeError;
use crate::user_actor::UserError;

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Recharge(#[from] RechargeError),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
