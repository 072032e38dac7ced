use chrono::Utc;
use rand::Rng;
use tracing::{debug, error, info, instrument, warn};
use crate::actor_framework::{Query, ResourceClient};
use super::user_client::{normalize_email, UserClient};
use crate::domain::{RechargeCreate, RechargeRequest, RechargeStatus, Wallet};
use crate::recharge_actor::{RechargeAction, RechargeError};

/// Amounts offered as one-tap buttons. 1 MXN buys 1 coin.
pub const RECHARGE_PRESETS: [u32; 4] = [20, 50, 100, 200];

const CODE_ATTEMPTS: usize = 5;

/// Client for interacting with the RechargeRequest actor.
#[derive(Clone)]
pub struct RechargeClient {
    inner: ResourceClient<RechargeRequest>,
    user_client: UserClient,
}

impl_client_methods!(RechargeClient, RechargeRequest, RechargeError, recharge);

impl RechargeClient {
    pub fn new(inner: ResourceClient<RechargeRequest>, user_client: UserClient) -> Self {
        Self { inner, user_client }
    }

    /// Opens a pending recharge. Fractional amounts are rounded down.
    #[instrument(skip(self))]
    pub async fn request_recharge(&self, email: String, amount: f64) -> Result<RechargeRequest, RechargeError> {
        if !amount.is_finite() || amount.floor() < 1.0 {
            return Err(RechargeError::InvalidAmount(amount.to_string()));
        }
        let amount = amount.floor().min(f64::from(u32::MAX)) as u32;
        let email = normalize_email(&email);

        let user = match self.user_client.get_user(email.clone()).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(RechargeError::InvalidUser(email)),
            Err(e) => return Err(RechargeError::InvalidUser(format!("User lookup failed: {}", e))),
        };

        for _ in 0..CODE_ATTEMPTS {
            let payload = RechargeCreate {
                code: recharge_code(amount),
                amount,
                user_id: user.email.clone(),
                user_name: user.name.clone(),
                created_at: Utc::now(),
            };
            match self.inner.create(payload).await.map_err(RechargeError::from) {
                Ok(id) => {
                    let request = self.inner.get(id.clone()).await?.ok_or(RechargeError::NotFound(id))?;
                    info!(code = %request.code, amount, "Recharge requested");
                    return Ok(request);
                }
                Err(RechargeError::AlreadyExists(code)) => debug!(%code, "Recharge code taken, retrying"),
                Err(e) => return Err(e),
            }
        }
        Err(RechargeError::InvalidAmount(format!("No free recharge code for amount {}", amount)))
    }

    /// Pending requests, oldest first, for the counter.
    #[instrument(skip(self))]
    pub async fn pending(&self) -> Result<Vec<RechargeRequest>, RechargeError> {
        let query = Query::all()
            .filter(|r: &RechargeRequest| r.status == RechargeStatus::Pending)
            .order_by(|a: &RechargeRequest, b: &RechargeRequest| a.created_at.cmp(&b.created_at));
        Ok(self.inner.query(query).await?)
    }

    /// Validates a paid recharge and credits the owner's wallet once.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: &str) -> Result<Wallet, RechargeError> {
        let code = code.trim().to_uppercase();
        let lookup = code.clone();
        let found = self.inner
            .query(Query::all().filter(move |r: &RechargeRequest| r.code == lookup).limit(1))
            .await?;
        let Some(request) = found.into_iter().next() else {
            warn!("Recharge code not found");
            return Err(RechargeError::NotFound(code));
        };
        if request.status == RechargeStatus::Completed {
            warn!("Recharge code already used");
            return Err(RechargeError::AlreadyUsed(code));
        }

        // The request stays pending when its owner no longer exists.
        match self.user_client.get_user(request.user_id.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(RechargeError::InvalidUser(request.user_id)),
            Err(e) => return Err(RechargeError::InvalidUser(format!("User lookup failed: {}", e))),
        }

        let redeemed = self.inner
            .perform_action(request.id.clone(), RechargeAction::Redeem { at: Utc::now() })
            .await?;
        match self.user_client.credit(redeemed.user_id.clone(), f64::from(redeemed.amount)).await {
            Ok(wallet) => {
                info!(user_id = %redeemed.user_id, amount = redeemed.amount, "Recharge redeemed");
                Ok(wallet)
            }
            Err(e) => {
                error!(error = %e, "Credit failed, reopening recharge");
                if let Err(reopen_error) = self.inner.perform_action(request.id, RechargeAction::Reopen).await {
                    error!(error = %reopen_error, "Reopening recharge failed");
                }
                Err(RechargeError::CreditFailed(e))
            }
        }
    }
}

fn recharge_code(amount: u32) -> String {
    format!("UCOL-{}-{}", amount, rand::thread_rng().gen_range(1000..=9999))
}
