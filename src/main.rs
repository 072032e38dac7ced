mod domain;
mod clients;
mod config;
mod prefs;
mod live;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod user_actor;
mod menu_actor;
mod order_actor;
mod recharge_actor;

use clap::Parser;
use tracing::{info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, CafeteriaSystem};
use crate::clients::{OrderScope, RECHARGE_PRESETS};
use crate::config::Config;
use crate::domain::{Cart, Category, CheckoutRequest, OrderStatus, PaymentMethod, PickupTime, RegisterForm, UserPatch};
use crate::prefs::Prefs;

const DEMO_STUDENT: &str = "maria.garcia@ucol.mx";
const DEMO_PASSWORD: &str = "colima2024";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing(config.verbose);

    info!("Starting cafeteria service day");

    let mut prefs = Prefs::open(config.prefs_path.clone())?;
    info!(path = %prefs.path().display(), "Preferences loaded");
    let system = CafeteriaSystem::start(&config).await?;
    let loyalty = config.loyalty();

    // A student signs up and signs in
    let span = tracing::info_span!("student_session");
    let session = async {
        let form = RegisterForm {
            name: "María García".to_string(),
            email: DEMO_STUDENT.to_string(),
            password: DEMO_PASSWORD.to_string(),
            school: "Bachillerato 4".to_string(),
            grade: "2".to_string(),
            group: "A".to_string(),
        };
        system.user_client.register(form).await?;
        let patch = UserPatch { avatar: Some("🌮".to_string()), ..Default::default() };
        system.user_client.update_profile(DEMO_STUDENT.to_string(), patch).await?;
        prefs.set_theme(prefs.theme().toggled())?;
        Ok::<_, AppError>(system.user_client.login(DEMO_STUDENT, DEMO_PASSWORD, &mut prefs).await?)
    }
    .instrument(span)
    .await?;
    info!(user_email = %session.email(), theme = ?prefs.theme(), "Student signed in");

    let wallet = system.user_client.watch_user(DEMO_STUDENT.to_string()).await?;
    let orders = system.order_client.watch(OrderScope::User(DEMO_STUDENT.to_string())).await?;

    // Browse, fill the cart and pay with coins
    let span = tracing::info_span!("checkout");
    let order = async {
        for category in Category::BROWSABLE {
            let items = system.menu_client.browse(category, "").await?;
            info!(%category, items = items.len(), "Menu section");
        }

        let mut cart = Cart::new();
        for item in system.menu_client.browse(Category::Breakfast, "").await? {
            if item.is_popular {
                cart.add(&item);
                cart.set_note(&item.id, "Sin crema");
            }
        }
        if let Some(drink) = system.menu_client.browse(Category::Drinks, "jamaica").await?.first() {
            cart.add(drink);
        }
        info!(items = cart.item_count(), subtotal = cart.subtotal(), "Cart ready");

        let request = CheckoutRequest {
            pickup_time: PickupTime::Recess,
            payment_method: PaymentMethod::Coins,
            redeem_reward: false,
        };
        let order = system.order_client.checkout(DEMO_STUDENT, &cart, request).await?;
        cart.clear();
        Ok::<_, AppError>(order)
    }
    .instrument(span)
    .await?;

    if let Some(user) = wallet.borrow().first() {
        info!(
            balance = user.balance,
            points = user.loyalty_points,
            reward_progress = loyalty.progress(user.loyalty_points),
            reward_ready = loyalty.can_redeem(user.loyalty_points),
            "Wallet after checkout"
        );
    }

    // The counter works the order and hands it over
    let span = tracing::info_span!("counter");
    async {
        system.user_client.login(&config.admin_email, &config.admin_password, &mut prefs).await?;
        let board = system.order_client.board().await?;
        info!(active = board.active.len(), delivered = board.history.len(), "Order board");

        system.order_client.advance_status(order.id.clone(), OrderStatus::Preparing).await?;
        system.order_client.advance_status(order.id.clone(), OrderStatus::Ready).await?;
        system.order_client.deliver_by_code(&order.pickup_code.to_lowercase()).await?;
        if let Err(e) = system.order_client.deliver_by_code(&order.pickup_code).await {
            warn!(error = %e, "Second hand-over refused");
        }
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    // Top up the wallet at the counter
    let span = tracing::info_span!("recharge");
    async {
        let amount = f64::from(RECHARGE_PRESETS[2]);
        let request = system.recharge_client.request_recharge(DEMO_STUDENT.to_string(), amount).await?;
        info!(code = %request.code, pending = system.recharge_client.pending().await?.len(), "Recharge awaiting payment");
        let wallet = system.recharge_client.redeem(&request.code).await?;
        info!(balance = wallet.balance, "Recharge credited");
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let removed = system.order_client.clear_history(DEMO_STUDENT.to_string()).await?;
    info!(removed, remaining = orders.borrow().len(), "History cleared");

    system.user_client.logout(&mut prefs)?;
    drop(wallet);
    drop(orders);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Service day completed successfully");
    Ok(())
}
