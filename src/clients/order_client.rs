use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use crate::actor_framework::{BatchOp, Query, ResourceClient};
use super::user_client::{normalize_email, UserClient};
use super::MenuClient;
use crate::domain::{
    Cart, CartLine, CheckoutRequest, LoyaltyPolicy, Order, OrderBoard, OrderCreate, OrderStatus, PaymentMethod,
};
use crate::live::live_query;
use crate::order_actor::{OrderAction, OrderError};
use crate::user_actor::Settlement;

const PICKUP_CODE_LEN: usize = 6;
const CODE_ATTEMPTS: usize = 5;

/// Which orders a live list follows.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderScope {
    /// One student's orders.
    User(String),
    /// Every order, for the counter.
    All,
}

/// Client for interacting with the Order actor.
///
/// This client handles the checkout orchestration, validating the user and
/// re-pricing the cart before charging the wallet and writing the order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    menu_client: MenuClient,
    loyalty: LoyaltyPolicy,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        menu_client: MenuClient,
        loyalty: LoyaltyPolicy,
    ) -> Self {
        Self {
            inner,
            user_client,
            menu_client,
            loyalty,
        }
    }

    /// Places an order for the cart. The caller clears the cart on success.
    #[instrument(skip(self, cart, request), fields(user_id = %email, lines = cart.lines().len()))]
    pub async fn checkout(&self, email: &str, cart: &Cart, request: CheckoutRequest) -> Result<Order, OrderError> {
        info!("Processing checkout request");
        let email = normalize_email(email);
        let email = email.as_str();
        if cart.is_empty() {
            return Err(OrderError::ValidationError("Cart is empty".to_string()));
        }

        // Step 1: Validate user
        match self.user_client.get_user(email.to_string()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(email.to_string()));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {}", e)));
            }
        }

        // Step 2: Re-price every line from the current menu
        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            match self.menu_client.get_menu_item(line.item.id.clone()).await {
                Ok(Some(item)) => lines.push(CartLine { item, quantity: line.quantity, note: line.note.clone() }),
                Ok(None) => {
                    error!(item_id = %line.item.id, "Menu item not found");
                    return Err(OrderError::InvalidItem(line.item.id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Menu lookup failed");
                    return Err(OrderError::InvalidItem(format!("Menu lookup failed: {}", e)));
                }
            }
        }
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        let quote = self.loyalty.quote(subtotal, request.redeem_reward);
        info!(subtotal = quote.subtotal, discount = quote.discount, total = quote.total, "Cart priced");

        // Step 3: Settle the wallet
        let settlement = Settlement {
            charge: match request.payment_method {
                PaymentMethod::Coins => quote.total,
                PaymentMethod::Cash => 0.0,
            },
            points_redeemed: quote.points_redeemed,
            points_earned: quote.points_earned,
        };
        if let Err(e) = self.user_client.settle(email.to_string(), settlement).await {
            warn!(error = %e, "Payment refused");
            return Err(OrderError::PaymentRefused(e));
        }

        // Step 4: Write the order, undoing the settlement if that fails
        let payload = OrderCreate {
            lines,
            subtotal: quote.subtotal,
            discount: quote.discount,
            total: quote.total,
            points_earned: quote.points_earned,
            points_redeemed: quote.points_redeemed,
            pickup_time: request.pickup_time,
            pickup_code: String::new(),
            user_id: email.to_string(),
            payment_method: request.payment_method,
            placed_at: Utc::now(),
        };
        match self.place(payload).await {
            Ok(order) => {
                info!(order_id = %order.id, pickup_code = %order.pickup_code, "Order placed");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order write failed, reversing settlement");
                if let Err(reverse_error) = self.user_client.reverse(email.to_string(), settlement).await {
                    error!(error = %reverse_error, "Settlement reversal failed");
                }
                Err(e)
            }
        }
    }

    /// Inserts the order under a fresh pickup code, retrying on collisions.
    async fn place(&self, mut payload: OrderCreate) -> Result<Order, OrderError> {
        for _ in 0..CODE_ATTEMPTS {
            payload.pickup_code = pickup_code();
            match self.inner.create(payload.clone()).await {
                Ok(id) => {
                    return self.inner.get(id.clone()).await?.ok_or(OrderError::NotFound(id));
                }
                Err(e) => match OrderError::from(e) {
                    OrderError::AlreadyExists(code) => debug!(%code, "Pickup code taken, retrying"),
                    other => return Err(other),
                },
            }
        }
        Err(OrderError::ValidationError("Could not allocate a pickup code".to_string()))
    }

    /// A student's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, email: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.query(scope_query(&OrderScope::User(email))).await?)
    }

    /// Every order split into active and delivered, newest first.
    #[instrument(skip(self))]
    pub async fn board(&self) -> Result<OrderBoard, OrderError> {
        debug!("Sending request");
        let orders = self.inner.query(scope_query(&OrderScope::All)).await?;
        Ok(OrderBoard::from_orders(orders))
    }

    #[instrument(skip(self))]
    pub async fn advance_status(&self, order_id: String, status: OrderStatus) -> Result<Order, OrderError> {
        let order = self.inner.perform_action(order_id, OrderAction::Advance(status)).await?;
        info!(status = %order.status, "Order status changed");
        Ok(order)
    }

    /// Completes the order carrying `code`. Safe to call concurrently: the
    /// order actor completes it once and refuses the rest.
    #[instrument(skip(self))]
    pub async fn deliver_by_code(&self, code: &str) -> Result<Order, OrderError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(OrderError::ValidationError("Pickup code is empty".to_string()));
        }
        let lookup = code.clone();
        let found = self.inner
            .query(Query::all().filter(move |o: &Order| o.pickup_code == lookup).limit(1))
            .await?;
        let Some(order) = found.into_iter().next() else {
            warn!("Pickup code not found");
            return Err(OrderError::NotFound(code));
        };
        match self.inner.perform_action(order.id.clone(), OrderAction::Deliver).await {
            Ok(order) => {
                info!(order_id = %order.id, user_id = %order.user_id, "Order delivered");
                Ok(order)
            }
            Err(e) => {
                let e = OrderError::from(e);
                warn!(error = %e, "Delivery refused");
                Err(e)
            }
        }
    }

    /// Removes a student's delivered orders in one batch.
    #[instrument(skip(self))]
    pub async fn clear_history(&self, email: String) -> Result<usize, OrderError> {
        let email = normalize_email(&email);
        let query = Query::all()
            .filter(move |o: &Order| o.user_id == email && o.status == OrderStatus::Completed);
        let ops = self.inner
            .query(query)
            .await?
            .into_iter()
            .map(|o| BatchOp::Delete { id: o.id })
            .collect();
        let removed = self.inner.batch(ops).await?;
        info!(removed, "Order history cleared");
        Ok(removed)
    }

    pub async fn watch(&self, scope: OrderScope) -> Result<watch::Receiver<Vec<Order>>, OrderError> {
        Ok(live_query(&self.inner, move || scope_query(&scope)).await?)
    }
}

fn scope_query(scope: &OrderScope) -> Query<Order> {
    let newest_first = |a: &Order, b: &Order| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id));
    match scope {
        OrderScope::User(email) => {
            let email = normalize_email(email);
            Query::all().filter(move |o: &Order| o.user_id == email).order_by(newest_first)
        }
        OrderScope::All => Query::all().order_by(newest_first),
    }
}

fn pickup_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PICKUP_CODE_LEN)
        .map(|c| char::from(c).to_ascii_uppercase())
        .collect()
}
