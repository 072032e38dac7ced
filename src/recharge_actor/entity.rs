use crate::actor_framework::Entity;
use crate::domain::{RechargeCreate, RechargeRequest, RechargeStatus, RedeemedRecharge};
use super::actions::RechargeAction;
use super::error::RechargeError;

impl Entity for RechargeRequest {
    type Id = String;
    type CreatePayload = RechargeCreate;
    type Patch = ();
    type Action = RechargeAction;
    type ActionResult = RedeemedRecharge;
    type Error = RechargeError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, params: RechargeCreate) -> Result<Self, RechargeError> {
        if params.amount == 0 {
            return Err(RechargeError::InvalidAmount("amount must be positive".to_string()));
        }
        Ok(Self {
            id,
            code: params.code,
            amount: params.amount,
            user_id: params.user_id,
            user_name: params.user_name,
            status: RechargeStatus::Pending,
            created_at: params.created_at,
            processed_at: None,
        })
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.code)
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), RechargeError> {
        Ok(())
    }

    fn handle_action(&mut self, action: RechargeAction) -> Result<RedeemedRecharge, RechargeError> {
        match action {
            RechargeAction::Redeem { at } => {
                if self.status == RechargeStatus::Completed {
                    return Err(RechargeError::AlreadyUsed(self.code.clone()));
                }
                self.status = RechargeStatus::Completed;
                self.processed_at = Some(at);
            }
            RechargeAction::Reopen => {
                self.status = RechargeStatus::Pending;
                self.processed_at = None;
            }
        }
        Ok(RedeemedRecharge { user_id: self.user_id.clone(), amount: self.amount })
    }
}
