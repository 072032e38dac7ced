use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use crate::actor_framework::{Query, ResourceClient};
use crate::domain::{User, UserPatch, Wallet};
use crate::live::live_query;
use crate::user_actor::{Settlement, UserAction, UserError};

/// Rules applied when students sign up or sign in.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub admin_email: String,
    pub admin_password: String,
    pub email_domain: String,
    pub starting_balance: f64,
}

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    pub(super) inner: ResourceClient<User>,
    pub(super) auth: AuthSettings,
}

impl_client_methods!(UserClient, User, UserError, user);

impl UserClient {
    pub fn new(inner: ResourceClient<User>, auth: AuthSettings) -> Self {
        Self { inner, auth }
    }

    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, email: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.inner.update(normalize_email(&email), patch).await?;
        info!("Profile updated");
        Ok(user)
    }

    /// Charges a checkout to the wallet in one step.
    #[instrument(skip(self))]
    pub async fn settle(&self, email: String, settlement: Settlement) -> Result<Wallet, UserError> {
        debug!("Sending request");
        let wallet = self.inner.perform_action(email, UserAction::Settle(settlement)).await?;
        info!(balance = wallet.balance, points = wallet.loyalty_points, "Wallet settled");
        Ok(wallet)
    }

    #[instrument(skip(self))]
    pub async fn reverse(&self, email: String, settlement: Settlement) -> Result<Wallet, UserError> {
        debug!("Sending request");
        let wallet = self.inner.perform_action(email, UserAction::Reverse(settlement)).await?;
        warn!(balance = wallet.balance, points = wallet.loyalty_points, "Wallet settlement reversed");
        Ok(wallet)
    }

    #[instrument(skip(self))]
    pub async fn credit(&self, email: String, amount: f64) -> Result<Wallet, UserError> {
        debug!("Sending request");
        let wallet = self.inner.perform_action(email, UserAction::Credit(amount)).await?;
        info!(balance = wallet.balance, "Wallet credited");
        Ok(wallet)
    }

    /// Live view of one user record: one element while it exists, none otherwise.
    pub async fn watch_user(&self, email: String) -> Result<watch::Receiver<Vec<User>>, UserError> {
        let email = normalize_email(&email);
        live_query(&self.inner, move || {
            let email = email.clone();
            Query::all().filter(move |user: &User| user.email == email)
        })
        .await
        .map_err(UserError::from)
    }
}

pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
