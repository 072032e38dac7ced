use tracing::{error, info};
use crate::actor_framework::ResourceActor;
use crate::app_system::AppError;
use crate::clients::{AuthSettings, MenuClient, OrderClient, RechargeClient, UserClient};
use crate::config::Config;
use crate::domain::{MenuItem, Order, RechargeRequest, User};
use crate::menu_actor::seed::default_menu;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, id)
    }
}

/// The cafeteria backend: one actor per collection plus the clients that
/// orchestrate them.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct CafeteriaSystem {
    pub user_client: UserClient,
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub recharge_client: RechargeClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CafeteriaSystem {
    pub fn new(config: &Config) -> Self {
        let capacity = config.inbox_capacity.max(1);

        // 1. Users, keyed by email
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(capacity, sequential_ids("user"));
        let auth = AuthSettings {
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            email_domain: config.email_domain.clone(),
            starting_balance: config.starting_balance,
        };
        let user_client = UserClient::new(user_resource_client, auth);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Menu
        let (menu_actor, menu_resource_client) = ResourceActor::<MenuItem>::new(capacity, sequential_ids("item"));
        let menu_client = MenuClient::new(menu_resource_client);
        let menu_handle = tokio::spawn(menu_actor.run());

        // 3. Orders, orchestrating users and menu
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(capacity, sequential_ids("order"));
        let order_client = OrderClient::new(
            order_resource_client,
            user_client.clone(),
            menu_client.clone(),
            config.loyalty(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Recharge requests
        let (recharge_actor, recharge_resource_client) =
            ResourceActor::<RechargeRequest>::new(capacity, sequential_ids("recharge"));
        let recharge_client = RechargeClient::new(recharge_resource_client, user_client.clone());
        let recharge_handle = tokio::spawn(recharge_actor.run());

        info!("Cafeteria system started");
        Self {
            user_client,
            menu_client,
            order_client,
            recharge_client,
            handles: vec![user_handle, menu_handle, order_handle, recharge_handle],
        }
    }

    /// Starts the system and writes the default menu if none exists.
    pub async fn start(config: &Config) -> Result<Self, AppError> {
        let system = Self::new(config);
        system.menu_client.seed_if_empty(default_menu()).await?;
        Ok(system)
    }

    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        // Actors stop once every client handle is gone.
        drop(self.order_client);
        drop(self.recharge_client);
        drop(self.user_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
