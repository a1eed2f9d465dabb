use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::ProductClient;
use crate::domain::{Product, ProductId};
use crate::favorites_actor::FavoritesError;
use crate::messages::FavoritesRequest;
use crate::product_actor::ProductError;

/// Handle to a session's favorites service.
#[derive(Clone)]
pub struct FavoritesClient {
    sender: mpsc::Sender<FavoritesRequest>,
}

impl FavoritesClient {
    pub fn new(sender: mpsc::Sender<FavoritesRequest>) -> Self {
        Self { sender }
    }

    /// Resolves the favorite ids against the catalog. Products deleted since
    /// they were favorited are skipped.
    #[instrument(skip(self, products))]
    pub async fn favorite_products(
        &self,
        products: &ProductClient,
    ) -> Result<Vec<Product>, FavoritesError> {
        let mut resolved = Vec::new();
        for id in self.list().await? {
            match products.get_product(id).await {
                Ok(product) => resolved.push(product),
                Err(ProductError::NotFound(_)) => debug!(product_id = %id, "Skipping deleted favorite"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(resolved)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), FavoritesError> {
        debug!("Sending shutdown request");
        self.sender
            .send(FavoritesRequest::Shutdown)
            .await
            .map_err(|e| FavoritesError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(FavoritesClient => fn add(product_id: ProductId) -> bool as FavoritesRequest::Add, Error = FavoritesError);
client_method!(FavoritesClient => fn remove(product_id: ProductId) -> bool as FavoritesRequest::Remove, Error = FavoritesError);
client_method!(FavoritesClient => fn is_member(product_id: ProductId) -> bool as FavoritesRequest::IsMember, Error = FavoritesError);
client_method!(FavoritesClient => fn toggle(product_id: ProductId) -> bool as FavoritesRequest::Toggle, Error = FavoritesError);
client_method!(FavoritesClient => fn list() -> Vec<ProductId> as FavoritesRequest::List, Error = FavoritesError);
