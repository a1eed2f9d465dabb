use tokio::sync::mpsc;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

use super::machine::{self, CartAction};
use super::CartError;
use crate::clients::{CartClient, OrderClient};
use crate::domain::{Cart, Order, UserId};
use crate::messages::{CartRequest, ServiceResponse};
use crate::order_actor::OrderError;
use crate::store::CommitHook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartStatus {
    #[default]
    Idle,
    /// A checkout is in flight.
    Loading,
}

/// What the view layer renders: the cart plus the busy flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub cart: Cart,
    pub status: CartStatus,
}

impl CartSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == CartStatus::Loading
    }
}

/// Owns one session's cart. Mutations run one at a time through
/// [`machine::apply`]; each success is handed to the commit hook before the
/// caller is answered.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    sender: mpsc::WeakSender<CartRequest>,
    user_id: Option<UserId>,
    cart: Cart,
    status: CartStatus,
    orders: OrderClient,
    hook: Box<dyn CommitHook<Cart>>,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        user_id: Option<UserId>,
        initial: Cart,
        orders: OrderClient,
        hook: Box<dyn CommitHook<Cart>>,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            sender: sender.downgrade(),
            user_id,
            cart: initial,
            status: CartStatus::Idle,
            orders,
            hook,
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self), fields(user_id = ?self.user_id))]
    pub async fn run(mut self) {
        info!(lines = self.cart.lines().len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem {
                    product,
                    quantity,
                    respond_to,
                } => {
                    let product_id = product.id;
                    self.handle_mutation(CartAction::Add { product, quantity }, respond_to);
                    debug!(%product_id, quantity, "add_item handled");
                }
                CartRequest::RemoveItem {
                    product_id,
                    respond_to,
                } => self.handle_mutation(CartAction::Remove { product_id }, respond_to),
                CartRequest::UpdateQuantity {
                    product_id,
                    quantity,
                    respond_to,
                } => self.handle_mutation(
                    CartAction::UpdateQuantity {
                        product_id,
                        quantity,
                    },
                    respond_to,
                ),
                CartRequest::Clear { respond_to } => {
                    self.handle_mutation(CartAction::Clear, respond_to)
                }
                CartRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(CartSnapshot {
                        cart: self.cart.clone(),
                        status: self.status,
                    }));
                }
                CartRequest::Checkout { respond_to } => self.handle_checkout(respond_to),
                CartRequest::CheckoutCompleted { result, respond_to } => {
                    self.handle_checkout_completed(result, respond_to)
                }
                CartRequest::Discard { respond_to } => {
                    self.cart = Cart::empty();
                    self.hook.discarded();
                    info!("Cart discarded");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_mutation(&mut self, action: CartAction, respond_to: ServiceResponse<Cart, CartError>) {
        match machine::apply(&self.cart, action) {
            Ok(next) => {
                self.cart = next;
                self.hook.committed(&self.cart);
                debug!(total = %self.cart.total(), items = self.cart.item_count(), "Cart committed");
                let _ = respond_to.send(Ok(self.cart.clone()));
            }
            Err(e) => {
                warn!(error = %e, "Cart mutation rejected");
                let _ = respond_to.send(Err(e));
            }
        }
    }

    /// Starts a checkout in the background. The mailbox keeps serving other
    /// requests while the order call is pending; a second checkout is refused
    /// until the first one completes.
    #[instrument(skip(self, respond_to))]
    fn handle_checkout(&mut self, respond_to: ServiceResponse<Order, CartError>) {
        if self.status == CartStatus::Loading {
            warn!("Checkout already in flight");
            let _ = respond_to.send(Err(CartError::CheckoutInProgress));
            return;
        }
        let Some(user_id) = self.user_id else {
            let _ = respond_to.send(Err(CartError::CheckoutFailed("login required".to_string())));
            return;
        };
        if self.cart.is_empty() {
            let _ = respond_to.send(Err(CartError::CheckoutFailed("cart is empty".to_string())));
            return;
        }
        let Some(sender) = self.sender.upgrade() else {
            let _ = respond_to.send(Err(CartError::ActorCommunicationError(
                "Cart service is stopping".to_string(),
            )));
            return;
        };

        info!(total = %self.cart.total(), "Checkout started");
        self.status = CartStatus::Loading;
        let orders = self.orders.clone();
        let cart = self.cart.clone();

        tokio::spawn(
            async move {
                let result = orders.place_order(user_id, &cart).await;
                if sender
                    .send(CartRequest::CheckoutCompleted { result, respond_to })
                    .await
                    .is_err()
                {
                    error!("Cart service gone before checkout completed");
                }
            }
            .instrument(info_span!("checkout", %user_id)),
        );
    }

    #[instrument(skip(self, result, respond_to))]
    fn handle_checkout_completed(
        &mut self,
        result: Result<Order, OrderError>,
        respond_to: ServiceResponse<Order, CartError>,
    ) {
        self.status = CartStatus::Idle;
        match result {
            Ok(order) => {
                self.cart = Cart::empty();
                self.hook.discarded();
                info!(order_id = %order.id, "Checkout completed");
                let _ = respond_to.send(Ok(order));
            }
            Err(e) => {
                error!(error = %e, "Checkout failed");
                let _ = respond_to.send(Err(CartError::CheckoutFailed(e.to_string())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductId};
    use crate::order_actor::order_book;
    use crate::product_actor::catalog;
    use crate::store::{keys, KeyValueStore, MemoryStore, NoPersistence, PersistOnCommit};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::time::Duration;

    fn product(id: u32) -> Product {
        catalog::products()
            .into_iter()
            .find(|p| p.id == ProductId::new(id))
            .unwrap()
    }

    fn start(
        user_id: Option<UserId>,
        initial: Cart,
        latency: Duration,
        hook: Box<dyn CommitHook<Cart>>,
    ) -> (CartClient, OrderClient) {
        let (book, inner) = order_book(8);
        tokio::spawn(book.run());
        let orders = OrderClient::new(inner).with_latency(latency);
        let (service, client) = CartService::new(8, user_id, initial, orders.clone(), hook);
        tokio::spawn(service.run());
        (client, orders)
    }

    #[tokio::test]
    async fn mutations_are_persisted_on_commit() {
        let store = Arc::new(MemoryStore::new());
        let user = UserId::new(2);
        let hook = PersistOnCommit::new(store.clone(), keys::cart(user));
        let (cart, _) = start(Some(user), Cart::empty(), Duration::ZERO, Box::new(hook));

        cart.add_item(product(3), 2).await.unwrap();
        let saved = store.get("cart_2").unwrap().unwrap();
        let restored: Cart = serde_json::from_str(&saved).unwrap();
        assert_eq!(restored.total(), Decimal::new(5998, 2));

        let err = cart.add_item(product(4), 21).await.unwrap_err();
        assert!(matches!(err, CartError::InsufficientStock { available: 20, .. }));
        assert_eq!(store.get("cart_2").unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn quantity_edits_go_through_the_client() {
        let (cart, _) = start(None, Cart::empty(), Duration::ZERO, Box::new(NoPersistence));
        cart.add_item(product(1), 1).await.unwrap();
        cart.add_item(product(3), 1).await.unwrap();

        let updated = cart.update_quantity(ProductId::new(3), 4).await.unwrap();
        assert_eq!(updated.item_count(), 5);

        let err = cart.update_quantity(ProductId::new(3), 101).await.unwrap_err();
        assert!(matches!(err, CartError::InsufficientStock { available: 100, .. }));
        let err = cart.update_quantity(ProductId::new(6), 1).await.unwrap_err();
        assert_eq!(err, CartError::LineNotFound(ProductId::new(6)));

        let removed = cart.remove_item(ProductId::new(1)).await.unwrap();
        assert_eq!(removed.total(), Decimal::new(11996, 2));
        assert_eq!(cart.clear().await.unwrap(), Cart::empty());
        assert_eq!(cart.item_count().await, Ok(0));
    }

    #[tokio::test]
    async fn checkout_records_order_and_clears_saved_cart() {
        let store = Arc::new(MemoryStore::new());
        let user = UserId::new(2);
        let hook = PersistOnCommit::new(store.clone(), keys::cart(user));
        let (cart, orders) = start(Some(user), Cart::empty(), Duration::ZERO, Box::new(hook));

        cart.add_item(product(1), 1).await.unwrap();
        cart.add_item(product(6), 2).await.unwrap();
        let order = cart.checkout().await.unwrap();

        assert_eq!(order.total_amount, Decimal::new(107997, 2));
        assert_eq!(order.items.len(), 2);
        let snapshot = cart.snapshot().await.unwrap();
        assert!(snapshot.cart.is_empty());
        assert!(!snapshot.is_loading());
        assert_eq!(store.get("cart_2").unwrap(), None);
        assert_eq!(orders.orders_for_user(user).await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn second_checkout_is_refused_while_in_flight() {
        let user = UserId::new(2);
        let initial = machine::add_item(&Cart::empty(), &product(5), 1).unwrap();
        let (cart, _) = start(Some(user), initial, Duration::from_millis(300), Box::new(NoPersistence));

        let first = {
            let cart = cart.clone();
            tokio::spawn(async move { cart.checkout().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cart.snapshot().await.unwrap().is_loading());
        assert_eq!(cart.checkout().await, Err(CartError::CheckoutInProgress));
        // Other requests are still served while the checkout is pending.
        let during = cart.add_item(product(3), 1).await.unwrap();
        assert_eq!(during.lines().len(), 2);

        let order = first.await.unwrap().unwrap();
        assert_eq!(order.items.len(), 1);
        assert!(cart.snapshot().await.unwrap().cart.is_empty());
    }

    #[tokio::test]
    async fn checkout_requires_a_user_and_lines() {
        let (anonymous, _) = start(None, Cart::empty(), Duration::ZERO, Box::new(NoPersistence));
        anonymous.add_item(product(2), 1).await.unwrap();
        let err = anonymous.checkout().await.unwrap_err();
        assert!(matches!(err, CartError::CheckoutFailed(_)));
        assert_eq!(anonymous.snapshot().await.unwrap().cart.item_count(), 1);

        let (empty, _) = start(Some(UserId::new(3)), Cart::empty(), Duration::ZERO, Box::new(NoPersistence));
        assert!(matches!(empty.checkout().await, Err(CartError::CheckoutFailed(_))));
    }

    #[tokio::test]
    async fn discard_empties_cart_and_removes_key() {
        let store = Arc::new(MemoryStore::new());
        let user = UserId::new(4);
        let hook = PersistOnCommit::new(store.clone(), keys::cart(user));
        let (cart, _) = start(Some(user), Cart::empty(), Duration::ZERO, Box::new(hook));

        cart.add_item(product(2), 1).await.unwrap();
        assert!(store.get("cart_4").unwrap().is_some());
        cart.discard().await.unwrap();
        assert_eq!(store.get("cart_4").unwrap(), None);
        assert!(cart.snapshot().await.unwrap().cart.is_empty());
    }

    #[tokio::test]
    async fn shutdown_stops_the_service() {
        let (cart, _) = start(None, Cart::empty(), Duration::ZERO, Box::new(NoPersistence));
        cart.shutdown().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(matches!(
            cart.clear().await,
            Err(CartError::ActorCommunicationError(_))
        ));
    }
}
