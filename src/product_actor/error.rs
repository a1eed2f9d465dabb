use thiserror::Error;

use crate::domain::ProductId;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
