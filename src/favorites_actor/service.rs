use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::FavoritesClient;
use crate::domain::{FavoritesSet, ProductId};
use crate::messages::FavoritesRequest;
use crate::store::CommitHook;

pub struct FavoritesService {
    receiver: mpsc::Receiver<FavoritesRequest>,
    favorites: FavoritesSet,
    hook: Box<dyn CommitHook<FavoritesSet>>,
}

impl FavoritesService {
    pub fn new(
        buffer_size: usize,
        initial: FavoritesSet,
        hook: Box<dyn CommitHook<FavoritesSet>>,
    ) -> (Self, FavoritesClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            favorites: initial,
            hook,
        };
        (service, FavoritesClient::new(sender))
    }

    #[instrument(name = "favorites_service", skip(self))]
    pub async fn run(mut self) {
        info!(count = self.favorites.len(), "FavoritesService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                FavoritesRequest::Add {
                    product_id,
                    respond_to,
                } => {
                    let added = self.favorites.add(product_id);
                    self.commit_if(added, product_id);
                    let _ = respond_to.send(Ok(added));
                }
                FavoritesRequest::Remove {
                    product_id,
                    respond_to,
                } => {
                    let removed = self.favorites.remove(product_id);
                    self.commit_if(removed, product_id);
                    let _ = respond_to.send(Ok(removed));
                }
                FavoritesRequest::IsMember {
                    product_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.favorites.contains(product_id)));
                }
                FavoritesRequest::Toggle {
                    product_id,
                    respond_to,
                } => {
                    let member = self.favorites.toggle(product_id);
                    self.commit_if(true, product_id);
                    let _ = respond_to.send(Ok(member));
                }
                FavoritesRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.favorites.to_vec()));
                }
                FavoritesRequest::Shutdown => {
                    info!("FavoritesService shutting down");
                    break;
                }
            }
        }
        info!("FavoritesService stopped");
    }

    fn commit_if(&self, changed: bool, product_id: ProductId) {
        if changed {
            self.hook.committed(&self.favorites);
            debug!(%product_id, count = self.favorites.len(), "Favorites committed");
        }
    }
}
