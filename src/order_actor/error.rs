use thiserror::Error;

/// Errors that can occur while recording orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Cannot place an order for an empty cart")]
    EmptyCart,
    #[error("Order rejected: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
