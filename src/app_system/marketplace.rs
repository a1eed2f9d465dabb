use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::Session;
use crate::cart_actor::CartService;
use crate::clients::{AuthClient, OrderClient, ProductClient, UserClient};
use crate::config::MarketplaceConfig;
use crate::domain::{Cart, FavoritesSet, User};
use crate::error::AppError;
use crate::favorites_actor::FavoritesService;
use crate::order_actor::order_book;
use crate::preferences::Preferences;
use crate::product_actor::seeded_catalog;
use crate::store::{keys, CommitHook, KeyValueStore, NoPersistence, PersistOnCommit};
use crate::user_actor::seeded_registry;

/// The application system: owns the shared resource actors and hands out
/// per-user [`Session`]s wired to them.
pub struct Marketplace {
    pub products: ProductClient,
    pub users: UserClient,
    pub orders: OrderClient,
    pub auth: AuthClient,
    pub preferences: Preferences,
    store: Arc<dyn KeyValueStore>,
    channel_buffer: usize,
    handles: Vec<JoinHandle<()>>,
}

impl Marketplace {
    /// Starts the catalog, user registry and order book.
    #[instrument(name = "marketplace", skip_all)]
    pub fn new(config: MarketplaceConfig, store: Arc<dyn KeyValueStore>) -> Self {
        info!("Starting marketplace");
        let buffer = config.channel_buffer;
        let mut handles = Vec::new();

        let (catalog, product_inner) = seeded_catalog(buffer);
        handles.push(tokio::spawn(catalog.run()));
        let products = ProductClient::new(product_inner)
            .with_latency(config.latency)
            .with_page_size(config.default_page_size);

        let (registry, user_inner) = seeded_registry(buffer, &config.admin);
        handles.push(tokio::spawn(registry.run()));
        let users = UserClient::new(user_inner);

        let (book, order_inner) = order_book(buffer);
        handles.push(tokio::spawn(book.run()));
        let orders = OrderClient::new(order_inner).with_latency(config.latency.checkout);

        let auth = AuthClient::new(users.clone(), store.clone(), config.admin.clone())
            .with_latency(config.latency.auth);
        let preferences = Preferences::new(store.clone());

        info!("Marketplace started");
        Self {
            products,
            users,
            orders,
            auth,
            preferences,
            store,
            channel_buffer: buffer,
            handles,
        }
    }

    /// Starts cart and favorites services for `user`, reloading their saved
    /// state. Anonymous sessions start empty and never persist.
    #[instrument(skip(self, user), fields(user_id = ?user.as_ref().map(|u| u.id)))]
    pub fn open_session(&self, user: Option<User>) -> Session {
        let (cart_hook, initial_cart, favorites_hook, initial_favorites): (
            Box<dyn CommitHook<Cart>>,
            Cart,
            Box<dyn CommitHook<FavoritesSet>>,
            FavoritesSet,
        ) = match &user {
            Some(user) => {
                let cart_hook = PersistOnCommit::new(self.store.clone(), keys::cart(user.id));
                let favorites_hook =
                    PersistOnCommit::new(self.store.clone(), keys::favorites(user.id));
                let cart = cart_hook.load::<Cart>().unwrap_or_default();
                let favorites = favorites_hook.load::<FavoritesSet>().unwrap_or_default();
                (Box::new(cart_hook), cart, Box::new(favorites_hook), favorites)
            }
            None => (
                Box::new(NoPersistence),
                Cart::empty(),
                Box::new(NoPersistence),
                FavoritesSet::new(),
            ),
        };

        let (cart_service, cart) = CartService::new(
            self.channel_buffer,
            user.as_ref().map(|u| u.id),
            initial_cart,
            self.orders.clone(),
            cart_hook,
        );
        let (favorites_service, favorites) =
            FavoritesService::new(self.channel_buffer, initial_favorites, favorites_hook);
        let handles = vec![
            tokio::spawn(cart_service.run()),
            tokio::spawn(favorites_service.run()),
        ];

        info!("Session opened");
        Session::new(user, cart, favorites, handles)
    }

    /// Logs in and opens the user's session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let auth = self.auth.login(email, password).await?;
        Ok(self.open_session(Some(auth.user)))
    }

    /// Session for the last logged-in user, or an anonymous one.
    #[instrument(skip(self))]
    pub async fn resume(&self) -> Session {
        let user = self.auth.restore().await.ok().map(|auth| auth.user);
        self.open_session(user)
    }

    /// Ends the session: the cart and its saved copy are dropped, favorites
    /// stay saved for the next login.
    #[instrument(skip(self, session), fields(user_id = ?session.user_id()))]
    pub async fn logout(&self, session: Session) -> Result<(), AppError> {
        if session.is_authenticated() {
            session.cart.discard().await?;
            self.auth.logout();
        }
        session.close().await
    }

    /// Stops the shared actors. Close every open session first: a running
    /// cart service keeps the order book alive.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down marketplace");

        // Resource actors stop once every client is dropped.
        drop(self.auth);
        drop(self.orders);
        drop(self.users);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(AppError::ServiceTask(e.to_string()));
            }
        }

        info!("Marketplace shutdown complete");
        Ok(())
    }
}
