use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch, Wallet};
use super::actions::{Settlement, UserAction};
use super::error::UserError;

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = Wallet;
    type Error = UserError;

    fn id(&self) -> &String { &self.email }

    fn from_create(id: String, payload: UserCreate) -> Result<Self, UserError> {
        if id != payload.email {
            return Err(UserError::ValidationError(format!("Users are keyed by email, got id {}", id)));
        }
        if payload.balance < 0.0 || !payload.balance.is_finite() {
            return Err(UserError::ValidationError(format!("Invalid starting balance: {}", payload.balance)));
        }
        Ok(Self {
            email: id,
            name: payload.name,
            school: payload.school,
            grade: payload.grade,
            group: payload.group,
            balance: payload.balance,
            loyalty_points: 0,
            avatar: None,
            password_hash: payload.password_hash,
        })
    }

    /// Updates profile fields. Balance and points only change through actions.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(UserError::ValidationError("Name cannot be empty".to_string()));
            }
            self.name = name;
        }
        if let Some(school) = patch.school {
            self.school = school;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<Wallet, UserError> {
        match action {
            UserAction::Settle(settlement) => self.settle(settlement),
            UserAction::Reverse(settlement) => {
                self.balance += settlement.charge;
                self.loyalty_points = self
                    .loyalty_points
                    .saturating_add(settlement.points_redeemed)
                    .saturating_sub(settlement.points_earned);
                Ok(self.wallet())
            }
            UserAction::Credit(amount) => {
                if amount <= 0.0 || !amount.is_finite() {
                    return Err(UserError::ValidationError(format!("Invalid credit amount: {}", amount)));
                }
                self.balance += amount;
                Ok(self.wallet())
            }
        }
    }
}

impl User {
    fn settle(&mut self, settlement: Settlement) -> Result<Wallet, UserError> {
        if settlement.charge < 0.0 || !settlement.charge.is_finite() {
            return Err(UserError::ValidationError(format!("Invalid charge: {}", settlement.charge)));
        }
        if settlement.charge > self.balance {
            return Err(UserError::InsufficientBalance { needed: settlement.charge, available: self.balance });
        }
        if settlement.points_redeemed > self.loyalty_points {
            return Err(UserError::InsufficientPoints {
                needed: settlement.points_redeemed,
                available: self.loyalty_points,
            });
        }
        self.balance -= settlement.charge;
        self.loyalty_points = (self.loyalty_points - settlement.points_redeemed).saturating_add(settlement.points_earned);
        Ok(self.wallet())
    }
}
