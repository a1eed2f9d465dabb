use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::clients::{CartClient, FavoritesClient};
use crate::domain::{User, UserId};
use crate::error::AppError;

/// Per-user state of one storefront visit: the cart and favorites services
/// scoped to `user`, or to nobody for anonymous browsing.
pub struct Session {
    pub user: Option<User>,
    pub cart: CartClient,
    pub favorites: FavoritesClient,
    handles: Vec<JoinHandle<()>>,
}

impl Session {
    pub(crate) fn new(
        user: Option<User>,
        cart: CartClient,
        favorites: FavoritesClient,
        handles: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            user,
            cart,
            favorites,
            handles,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Stops both services and waits for them.
    #[instrument(skip(self), fields(user_id = ?self.user_id()))]
    pub async fn close(self) -> Result<(), AppError> {
        let _ = self.cart.shutdown().await;
        let _ = self.favorites.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Session service failed");
                return Err(AppError::ServiceTask(e.to_string()));
            }
        }
        info!("Session closed");
        Ok(())
    }
}
