use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartSnapshot};
use crate::domain::{Cart, Order, Product, ProductId};
use crate::messages::CartRequest;

/// Handle to a session's cart service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Units across all lines, for the header badge.
    pub async fn item_count(&self) -> Result<u32, CartError> {
        Ok(self.snapshot().await?.cart.item_count())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CartClient => fn add_item(product: Product, quantity: u32) -> Cart as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn remove_item(product_id: ProductId) -> Cart as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn update_quantity(product_id: ProductId, quantity: i64) -> Cart as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn clear() -> Cart as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);
client_method!(CartClient => fn checkout() -> Order as CartRequest::Checkout, Error = CartError);
client_method!(CartClient => fn discard() -> () as CartRequest::Discard, Error = CartError);
