#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::actor_framework::{Entity, FrameworkError};
    use crate::app_system::CafeteriaSystem;
    use crate::clients::{AuthSettings, MenuClient, OrderClient, OrderScope, RechargeClient, UserClient};
    use crate::config::Config;
    use crate::domain::{
        Cart, Category, CheckoutRequest, MenuItem, MenuItemDraft, Order, OrderStatus, PaymentMethod, PickupTime,
        RechargeRequest, RechargeStatus, RegisterForm, Session, User, UserCreate, UserPatch, Wallet,
    };
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get, expect_query};
    use crate::order_actor::OrderError;
    use crate::prefs::Prefs;
    use crate::recharge_actor::{RechargeAction, RechargeError};
    use crate::user_actor::{Settlement, UserAction, UserError};

    fn auth_settings() -> AuthSettings {
        let config = Config::default();
        AuthSettings {
            admin_email: config.admin_email,
            admin_password: config.admin_password,
            email_domain: config.email_domain,
            starting_balance: config.starting_balance,
        }
    }

    fn student() -> User {
        User::from_create("ana@ucol.mx".to_string(), UserCreate {
            name: "Ana".to_string(),
            email: "ana@ucol.mx".to_string(),
            school: "Bach 1".to_string(),
            grade: "3".to_string(),
            group: "B".to_string(),
            password_hash: String::new(),
            balance: 50.0,
        }).unwrap()
    }

    fn menu_item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price,
            category: Category::Snacks,
            image: String::new(),
            calories: None,
            prep_time: 3,
            is_popular: false,
        }
    }

    fn coins(pickup_time: PickupTime) -> CheckoutRequest {
        CheckoutRequest { pickup_time, payment_method: PaymentMethod::Coins, redeem_reward: false }
    }

    fn form(email: &str) -> RegisterForm {
        RegisterForm {
            name: "Ana López".to_string(),
            email: email.to_string(),
            password: "tacos123".to_string(),
            school: "Bachillerato 1".to_string(),
            grade: "3".to_string(),
            group: "B".to_string(),
        }
    }

    async fn item_named(system: &CafeteriaSystem, name: &str) -> MenuItem {
        system.menu_client.browse(Category::All, name).await.unwrap().remove(0)
    }

    // --- Orchestration against scripted actors ---

    #[tokio::test]
    async fn test_checkout_flow() {
        // 1. Setup Mocks
        let (user_inner, mut user_rx) = create_mock_client::<User>(10);
        let (menu_inner, mut menu_rx) = create_mock_client::<MenuItem>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);

        let user_client = UserClient::new(user_inner, auth_settings());
        let menu_client = MenuClient::new(menu_inner);
        let order_client = OrderClient::new(order_inner, user_client, menu_client, Default::default());

        // 2. Execute checkout in background; the cart holds a stale price
        let order_task = tokio::spawn(async move {
            let mut cart = Cart::new();
            cart.add(&menu_item("7", 10.0));
            cart.update_quantity("7", 1);
            order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Recess)).await
        });

        // 3. Verify Interactions

        // Expect User Get
        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "ana@ucol.mx");
        responder.send(Ok(Some(student()))).unwrap();

        // Expect Menu Get, answered with the current price
        let (item_id, responder) = expect_get(&mut menu_rx).await.expect("Expected Menu Get");
        assert_eq!(item_id, "7");
        responder.send(Ok(Some(menu_item("7", 15.0)))).unwrap();

        // Expect Wallet Settlement (Action)
        let (user_id, action, responder) = expect_action(&mut user_rx).await.expect("Expected User Action");
        assert_eq!(user_id, "ana@ucol.mx");
        match action {
            UserAction::Settle(settlement) => {
                assert_eq!(settlement, Settlement { charge: 30.0, points_redeemed: 0, points_earned: 30 })
            }
            _ => panic!("Unexpected action: {:?}", action),
        }
        responder.send(Ok(Wallet { balance: 20.0, loyalty_points: 30 })).unwrap();

        // Expect Order Create, then the read-back
        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.user_id, "ana@ucol.mx");
        assert_eq!(payload.total, 30.0);
        assert_eq!(payload.lines[0].item.price, 15.0);
        assert_eq!(payload.pickup_code.len(), 6);
        let stored = Order::from_create("order_1".to_string(), payload).unwrap();
        responder.send(Ok("order_1".to_string())).unwrap();

        let (order_id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, "order_1");
        responder.send(Ok(Some(stored))).unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.id, "order_1");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_failed_order_write_reverses_settlement() {
        let (user_inner, mut user_rx) = create_mock_client::<User>(10);
        let (menu_inner, mut menu_rx) = create_mock_client::<MenuItem>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(
            order_inner,
            UserClient::new(user_inner, auth_settings()),
            MenuClient::new(menu_inner),
            Default::default(),
        );

        let order_task = tokio::spawn(async move {
            let mut cart = Cart::new();
            cart.add(&menu_item("5", 25.0));
            order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Asap)).await
        });

        let (_, responder) = expect_get(&mut user_rx).await.unwrap();
        responder.send(Ok(Some(student()))).unwrap();
        let (_, responder) = expect_get(&mut menu_rx).await.unwrap();
        responder.send(Ok(Some(menu_item("5", 25.0)))).unwrap();
        let (_, _, responder) = expect_action(&mut user_rx).await.unwrap();
        responder.send(Ok(Wallet { balance: 25.0, loyalty_points: 25 })).unwrap();

        let (_, responder) = expect_create(&mut order_rx).await.unwrap();
        responder.send(Err(FrameworkError::ActorClosed)).unwrap();

        let (user_id, action, responder) = expect_action(&mut user_rx).await.expect("Expected reversal");
        assert_eq!(user_id, "ana@ucol.mx");
        assert!(matches!(action, UserAction::Reverse(s) if s.charge == 25.0 && s.points_earned == 25));
        responder.send(Ok(Wallet { balance: 50.0, loyalty_points: 0 })).unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }

    #[tokio::test]
    async fn test_failed_credit_reopens_recharge() {
        let (user_inner, mut user_rx) = create_mock_client::<User>(10);
        let (recharge_inner, mut recharge_rx) = create_mock_client::<RechargeRequest>(10);
        let recharges = RechargeClient::new(recharge_inner, UserClient::new(user_inner, auth_settings()));
        let pending = RechargeRequest {
            id: "recharge_1".to_string(),
            code: "UCOL-50-1234".to_string(),
            amount: 50,
            user_id: "ana@ucol.mx".to_string(),
            user_name: "Ana".to_string(),
            status: RechargeStatus::Pending,
            created_at: Utc::now(),
            processed_at: None,
        };

        let redeem_task = tokio::spawn(async move { recharges.redeem(" ucol-50-1234 ").await });

        // Expect the code lookup, answered from the one stored request
        let (query, responder) = expect_query(&mut recharge_rx).await.expect("Expected Recharge Query");
        responder.send(Ok(query.apply(std::iter::once(&pending)))).unwrap();

        // Expect the owner check
        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "ana@ucol.mx");
        responder.send(Ok(Some(student()))).unwrap();

        // Expect the request to flip to Completed
        let mut stored = pending.clone();
        let (id, action, responder) = expect_action(&mut recharge_rx).await.expect("Expected Redeem");
        assert_eq!(id, "recharge_1");
        assert!(matches!(action, RechargeAction::Redeem { .. }));
        responder.send(Ok(stored.handle_action(action).unwrap())).unwrap();

        // The wallet refuses the credit
        let (user_id, action, responder) = expect_action(&mut user_rx).await.expect("Expected Credit");
        assert_eq!(user_id, "ana@ucol.mx");
        assert!(matches!(action, UserAction::Credit(amount) if amount == 50.0));
        let refusal = UserError::ValidationError("wallet locked".to_string());
        responder.send(Err(FrameworkError::Entity(refusal.clone()))).unwrap();

        // Expect the request to be reopened
        let (id, action, responder) = expect_action(&mut recharge_rx).await.expect("Expected Reopen");
        assert_eq!(id, "recharge_1");
        assert!(matches!(action, RechargeAction::Reopen));
        responder.send(Ok(stored.handle_action(action).unwrap())).unwrap();
        assert_eq!(stored.status, RechargeStatus::Pending);

        assert_eq!(redeem_task.await.unwrap(), Err(RechargeError::CreditFailed(refusal)));
    }

    // --- Full system ---

    #[tokio::test]
    async fn test_register_login_and_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Prefs::open(dir.path().join("prefs.json")).unwrap();
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        let users = &system.user_client;

        let user = users.register(form(" Ana@UCOL.mx ")).await.unwrap();
        assert_eq!(user.email, "ana@ucol.mx");
        assert_eq!(user.wallet(), Wallet { balance: 50.0, loyalty_points: 0 });
        assert_ne!(user.password_hash, "tacos123");

        assert_eq!(
            users.register(form("ana@ucol.mx")).await,
            Err(UserError::AlreadyExists("ana@ucol.mx".to_string()))
        );
        assert!(matches!(users.register(form("ana@gmail.com")).await, Err(UserError::ValidationError(_))));
        let incomplete = RegisterForm { group: " ".to_string(), ..form("luis@ucol.mx") };
        assert!(matches!(users.register(incomplete).await, Err(UserError::ValidationError(_))));

        assert_eq!(
            users.login("ana@ucol.mx", "wrong", &mut prefs).await,
            Err(UserError::InvalidCredentials("ana@ucol.mx".to_string()))
        );
        assert!(matches!(users.login("nadie@ucol.mx", "x", &mut prefs).await, Err(UserError::NotFound(_))));

        let session = users.login("ana@ucol.mx", "tacos123", &mut prefs).await.unwrap();
        assert!(!session.is_admin());
        assert_eq!(prefs.active_session_email(), Some("ana@ucol.mx"));

        let restored = users.restore_session(&mut prefs).await.unwrap();
        assert!(matches!(restored, Some(Session::Student(u)) if u.name == "Ana López"));

        users.logout(&mut prefs).unwrap();
        assert_eq!(users.restore_session(&mut prefs).await.unwrap(), None);

        let admin = users.login("admin@ucol.mx", "admin", &mut prefs).await.unwrap();
        assert!(admin.is_admin());
        let admin = users.set_avatar(&admin, "👩‍🍳".to_string(), &mut prefs).await.unwrap();
        assert!(matches!(users.restore_session(&mut prefs).await.unwrap(), Some(Session::Admin(a)) if a.avatar == Some("👩‍🍳".to_string())));
        assert!(admin.is_admin());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_session_is_forgotten() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Prefs::open(dir.path().join("prefs.json")).unwrap();
        prefs.set(crate::prefs::ACTIVE_SESSION_EMAIL, "gone@ucol.mx").unwrap();
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();

        assert_eq!(system.user_client.restore_session(&mut prefs).await.unwrap(), None);
        assert_eq!(prefs.active_session_email(), None);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_checkout_charges_wallet_and_awards_points() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();

        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Agua de Jamaica").await);
        cart.add(&item_named(&system, "Café Americano").await);

        let order = system.order_client
            .checkout("ana@ucol.mx", &cart, coins(PickupTime::Custom("11:15".to_string())))
            .await
            .unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(order.total, 35.0);
        assert_eq!(order.points_earned, 35);
        assert_eq!(order.pickup_time.to_string(), "11:15");
        let user = system.user_client.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.wallet(), Wallet { balance: 15.0, loyalty_points: 35 });

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_payment_changes_nothing() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();

        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Torta de Milanesa").await);

        let result = system.order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Asap)).await;
        assert_eq!(
            result,
            Err(OrderError::PaymentRefused(UserError::InsufficientBalance { needed: 55.0, available: 50.0 }))
        );
        let user = system.user_client.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.wallet(), Wallet { balance: 50.0, loyalty_points: 0 });
        assert!(system.order_client.orders_for("ana@ucol.mx".to_string()).await.unwrap().is_empty());

        // Cash needs no balance and still earns points.
        let cash = CheckoutRequest { payment_method: PaymentMethod::Cash, ..coins(PickupTime::Asap) };
        system.order_client.checkout("ana@ucol.mx", &cart, cash).await.unwrap();
        let user = system.user_client.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.wallet(), Wallet { balance: 50.0, loyalty_points: 55 });

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_reward_redemption() {
        let config = Config { starting_balance: 500.0, ..Config::default() };
        let system = CafeteriaSystem::start(&config).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();

        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Molletes").await);
        let redeem = CheckoutRequest { redeem_reward: true, ..coins(PickupTime::Recess) };

        let early = system.order_client.checkout("ana@ucol.mx", &cart, redeem.clone()).await;
        assert!(matches!(early, Err(OrderError::PaymentRefused(UserError::InsufficientPoints { needed: 200, .. }))));

        let mut big = Cart::new();
        big.add(&item_named(&system, "Enchiladas Suizas").await);
        big.update_quantity("4", 3);
        system.order_client.checkout("ana@ucol.mx", &big, coins(PickupTime::Asap)).await.unwrap();

        let order = system.order_client.checkout("ana@ucol.mx", &cart, redeem).await.unwrap();
        assert_eq!(order.discount, 35.0);
        assert_eq!(order.total, 0.0);
        assert_eq!(order.points_redeemed, 200);
        let user = system.user_client.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.wallet(), Wallet { balance: 260.0, loyalty_points: 40 });

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_delivery_completes_once() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Bowl de Fruta").await);
        let order = system.order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Asap)).await.unwrap();

        let typed = format!("  {} ", order.pickup_code.to_lowercase());
        let first = tokio::spawn({
            let orders = system.order_client.clone();
            let code = typed.clone();
            async move { orders.deliver_by_code(&code).await }
        });
        let second = tokio::spawn({
            let orders = system.order_client.clone();
            async move { orders.deliver_by_code(&typed).await }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(OrderError::AlreadyDelivered(_)))));
        assert!(matches!(system.order_client.deliver_by_code("NOPE00").await, Err(OrderError::NotFound(_))));

        let board = system.order_client.board().await.unwrap();
        assert!(board.active.is_empty());
        assert_eq!(board.history.len(), 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_status_moves_forward_only() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Molletes").await);
        let order = system.order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Asap)).await.unwrap();
        let orders = &system.order_client;

        assert_eq!(orders.advance_status(order.id.clone(), OrderStatus::Ready).await.unwrap().status, OrderStatus::Ready);
        assert_eq!(
            orders.advance_status(order.id.clone(), OrderStatus::Preparing).await,
            Err(OrderError::InvalidTransition { from: OrderStatus::Ready, to: OrderStatus::Preparing })
        );
        orders.advance_status(order.id.clone(), OrderStatus::Completed).await.unwrap();
        assert!(orders.advance_status(order.id.clone(), OrderStatus::Completed).await.is_err());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_history_keeps_open_orders() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Agua de Jamaica").await);
        let cash = CheckoutRequest { payment_method: PaymentMethod::Cash, ..coins(PickupTime::Asap) };

        let delivered = system.order_client.checkout("ana@ucol.mx", &cart, cash.clone()).await.unwrap();
        let open = system.order_client.checkout("ana@ucol.mx", &cart, cash).await.unwrap();
        system.order_client.deliver_by_code(&delivered.pickup_code).await.unwrap();

        assert_eq!(system.order_client.clear_history("ana@ucol.mx".to_string()).await.unwrap(), 1);
        let remaining = system.order_client.orders_for("ana@ucol.mx".to_string()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, open.id);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_recharge_redeems_once() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let recharges = &system.recharge_client;

        assert!(matches!(recharges.request_recharge("ana@ucol.mx".to_string(), 0.5).await, Err(RechargeError::InvalidAmount(_))));
        assert!(matches!(recharges.request_recharge("nadie@ucol.mx".to_string(), 20.0).await, Err(RechargeError::InvalidUser(_))));

        let request = recharges.request_recharge("ana@ucol.mx".to_string(), 50.9).await.unwrap();
        assert_eq!(request.amount, 50);
        assert!(request.code.starts_with("UCOL-50-"));
        assert_eq!(recharges.pending().await.unwrap().len(), 1);

        let first = tokio::spawn({
            let recharges = system.recharge_client.clone();
            let code = request.code.clone();
            async move { recharges.redeem(&code).await }
        });
        let second = tokio::spawn({
            let recharges = system.recharge_client.clone();
            let code = format!(" {} ", request.code);
            async move { recharges.redeem(&code).await }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(RechargeError::AlreadyUsed(_)))));

        let user = system.user_client.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.balance, 100.0);
        assert!(recharges.pending().await.unwrap().is_empty());
        assert!(matches!(recharges.redeem("UCOL-1-0000").await, Err(RechargeError::NotFound(_))));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_menu_administration() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        let menu = &system.menu_client;
        assert_eq!(menu.list().await.unwrap().len(), 10);
        assert_eq!(menu.seed_if_empty(crate::menu_actor::seed::default_menu()).await.unwrap(), 0);

        let created = menu.save_item(MenuItemDraft {
            name: "Gordita".to_string(),
            description: "Rellena de chicharrón".to_string(),
            price: 28.0,
            category: Category::Snacks,
            ..Default::default()
        }).await.unwrap();
        assert_eq!(menu.browse(Category::Snacks, "chicharrón").await.unwrap().len(), 1);

        let mut draft = MenuItemDraft::from(&created);
        draft.price = 30.0;
        assert_eq!(menu.save_item(draft).await.unwrap().price, 30.0);

        menu.delete_menu_item(created.id.clone()).await.unwrap();
        assert_eq!(menu.get_menu_item(created.id).await.unwrap(), None);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_live_order_list_follows_checkout() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let mut mine = system.order_client.watch(OrderScope::User("ana@ucol.mx".to_string())).await.unwrap();
        let mut wallet = system.user_client.watch_user("ana@ucol.mx".to_string()).await.unwrap();
        assert!(mine.borrow().is_empty());

        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Café Americano").await);
        system.order_client.checkout("ana@ucol.mx", &cart, coins(PickupTime::Asap)).await.unwrap();

        mine.wait_for(|orders| orders.len() == 1).await.unwrap();
        wallet.wait_for(|users| users.first().map(|u| u.balance) == Some(30.0)).await.unwrap();

        drop(mine);
        drop(wallet);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_recharge_for_missing_owner_stays_pending() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let recharges = &system.recharge_client;
        let request = recharges.request_recharge("ana@ucol.mx".to_string(), 20.0).await.unwrap();

        system.user_client.delete_user("ana@ucol.mx".to_string()).await.unwrap();
        assert_eq!(
            recharges.redeem(&request.code).await,
            Err(RechargeError::InvalidUser("ana@ucol.mx".to_string()))
        );

        let pending = recharges.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, RechargeStatus::Pending);
        assert_eq!(pending[0].processed_at, None);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_profile() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        let users = &system.user_client;
        users.register(form("ana@ucol.mx")).await.unwrap();

        let patch = UserPatch { name: Some("Ana María".to_string()), group: Some("C".to_string()), ..Default::default() };
        let user = users.update_profile("ANA@ucol.mx".to_string(), patch).await.unwrap();
        assert_eq!(user.name, "Ana María");
        assert_eq!(user.group, "C");
        assert_eq!(user.wallet(), Wallet { balance: 50.0, loyalty_points: 0 });

        let blank = UserPatch { name: Some("  ".to_string()), school: Some("Bach 2".to_string()), ..Default::default() };
        assert!(matches!(users.update_profile("ana@ucol.mx".to_string(), blank).await, Err(UserError::ValidationError(_))));
        let user = users.get_user("ana@ucol.mx".to_string()).await.unwrap().unwrap();
        assert_eq!(user.name, "Ana María");
        assert_eq!(user.school, "Bachillerato 1");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_emails_are_matched_case_insensitively() {
        let system = CafeteriaSystem::start(&Config::default()).await.unwrap();
        system.user_client.register(form("ana@ucol.mx")).await.unwrap();
        let mut cart = Cart::new();
        cart.add(&item_named(&system, "Agua de Jamaica").await);

        let order = system.order_client.checkout(" Ana@UCOL.mx ", &cart, coins(PickupTime::Asap)).await.unwrap();
        assert_eq!(order.user_id, "ana@ucol.mx");
        assert_eq!(system.order_client.orders_for("ANA@ucol.mx".to_string()).await.unwrap().len(), 1);

        let request = system.recharge_client.request_recharge("Ana@Ucol.mx".to_string(), 20.0).await.unwrap();
        assert_eq!(request.user_id, "ana@ucol.mx");

        system.order_client.deliver_by_code(&order.pickup_code).await.unwrap();
        assert_eq!(system.order_client.clear_history("ANA@UCOL.MX".to_string()).await.unwrap(), 1);

        system.shutdown().await.unwrap();
    }
}
