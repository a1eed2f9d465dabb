use thiserror::Error;

use crate::product_actor::ProductError;

/// Set operations never fail; only the mailbox and catalog lookups can.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoritesError {
    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] ProductError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
