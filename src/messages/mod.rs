use tokio::sync::oneshot;

use crate::cart_actor::{CartError, CartSnapshot};
use crate::domain::{Cart, Order, Product, ProductId};
use crate::favorites_actor::FavoritesError;
use crate::order_actor::OrderError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests served by a session's `CartService`. Every mutation answers with
/// the resulting cart.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        product: Product,
        quantity: u32,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    RemoveItem {
        product_id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    UpdateQuantity {
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    Clear {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Checkout {
        respond_to: ServiceResponse<Order, CartError>,
    },
    /// Sent by the service to itself when the order call returns.
    CheckoutCompleted {
        result: Result<Order, OrderError>,
        respond_to: ServiceResponse<Order, CartError>,
    },
    /// Empties the cart and drops its saved copy (logout).
    Discard {
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum FavoritesRequest {
    Add {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, FavoritesError>,
    },
    Remove {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, FavoritesError>,
    },
    IsMember {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, FavoritesError>,
    },
    Toggle {
        product_id: ProductId,
        respond_to: ServiceResponse<bool, FavoritesError>,
    },
    List {
        respond_to: ServiceResponse<Vec<ProductId>, FavoritesError>,
    },
    Shutdown,
}
