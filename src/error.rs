use thiserror::Error;

use crate::auth::AuthError;
use crate::cart_actor::CartError;
use crate::config::ConfigError;
use crate::favorites_actor::FavoritesError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::store::StoreError;
use crate::user_actor::UserError;

/// Any failure surfaced by the marketplace as a whole.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Favorites(#[from] FavoritesError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Service task failed: {0}")]
    ServiceTask(String),
}
