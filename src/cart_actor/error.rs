use thiserror::Error;

use crate::domain::ProductId;

/// Errors surfaced by cart operations. A failed operation never changes the
/// cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Product {0} is not in the cart")]
    LineNotFound(ProductId),
    #[error("A checkout is already in progress")]
    CheckoutInProgress,
    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
