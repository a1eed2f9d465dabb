use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::config::LatencyProfile;
use crate::domain::{Category, Page, Product, ProductCreate, ProductFilter, ProductId, ProductUpdate, User};
use crate::product_actor::{catalog, query, ProductAction, ProductActionResult, ProductError};

const DEFAULT_PAGE_SIZE: usize = 20;

/// Client for the catalog actor, standing in for the remote product service.
/// Each call waits out the configured latency before reaching the actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    categories: Arc<[Category]>,
    latency: LatencyProfile,
    default_page_size: usize,
}

fn product_error(id: ProductId, error: FrameworkError) -> ProductError {
    match error {
        FrameworkError::NotFound(_) => ProductError::NotFound(id),
        FrameworkError::Rejected(reason) => ProductError::Validation(reason),
        other => ProductError::ActorCommunicationError(other.to_string()),
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self {
            inner,
            categories: catalog::categories().into(),
            latency: LatencyProfile::none(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Filter, sort and paginate the catalog.
    #[instrument(skip(self))]
    pub async fn query(&self, filter: ProductFilter) -> Result<Page<Product>, ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.list_products).await;
        let products = self
            .inner
            .list()
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        let page = query::run(products, &filter, self.default_page_size);
        debug!(total = page.total_count, page = page.page, "Query answered");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.get_product).await;
        match self.inner.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::NotFound(id)),
            Err(e) => Err(product_error(id, e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ProductError> {
        tokio::time::sleep(self.latency.categories).await;
        Ok(self.categories.to_vec())
    }

    #[instrument(skip(self, params), fields(name = %params.name, owner_id = %params.owner_id))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.create_product).await;
        let id = self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Rejected(reason) => {
                warn!(%reason, "Product rejected");
                ProductError::Validation(reason)
            }
            other => ProductError::ActorCommunicationError(other.to_string()),
        })?;
        info!(product_id = %id, "Product created");
        match self.inner.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::NotFound(id)),
            Err(e) => Err(product_error(id, e)),
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.update_product).await;
        let product = self
            .inner
            .update(id, update)
            .await
            .map_err(|e| product_error(id, e))?;
        info!("Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.delete_product).await;
        self.inner.delete(id).await.map_err(|e| product_error(id, e))?;
        info!("Product deleted");
        Ok(())
    }

    /// Products managed by `user` in the console. Administrators manage the
    /// whole catalog.
    #[instrument(skip(self, user), fields(user_id = %user.id, admin = user.is_admin()))]
    pub async fn products_for_owner(
        &self,
        user: &User,
        only_active: bool,
    ) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        tokio::time::sleep(self.latency.owner_products).await;
        let products = self
            .inner
            .list()
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        Ok(products
            .into_iter()
            .filter(|p| user.is_admin() || p.owner_id == user.id)
            .filter(|p| !only_active || p.is_active)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(product_error(id, e)),
        }
    }

    /// Returns whether the product is featured afterwards.
    #[instrument(skip(self))]
    pub async fn toggle_featured(&self, id: ProductId) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ToggleFeatured).await {
            Ok(ProductActionResult::ToggleFeatured(featured)) => Ok(featured),
            Ok(_) => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(product_error(id, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, Role, SortKey, SortOrder, UserId};
    use crate::product_actor::seeded_catalog;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn client() -> ProductClient {
        let (actor, inner) = seeded_catalog(16);
        tokio::spawn(actor.run());
        ProductClient::new(inner)
    }

    fn seller(id: u32, role: Role) -> User {
        User {
            id: UserId::new(id),
            username: format!("seller{id}"),
            email: format!("seller{id}@example.com"),
            first_name: "Usuario".into(),
            last_name: "Demo".into(),
            role,
            avatar: None,
            created_at: Utc::now(),
        }
    }

    fn lamp(owner_id: UserId) -> ProductCreate {
        ProductCreate {
            owner_id,
            name: "Lámpara de escritorio".into(),
            description: "Lámpara LED regulable para oficina".into(),
            price: Decimal::new(4550, 2),
            stock: 12,
            category_id: CategoryId::new(3),
            brand: None,
            image_urls: vec!["https://img.example/lamp.jpg".into()],
            tags: Vec::new(),
            featured: false,
        }
    }

    #[tokio::test]
    async fn query_finds_iphone_regardless_of_case() {
        let products = client();
        let page = products.query(ProductFilter::new().search("IPHONE")).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "iPhone 15 Pro");
    }

    #[tokio::test]
    async fn created_products_get_the_next_id_and_join_queries() {
        let products = client();
        let created = products.create_product(lamp(UserId::new(2))).await.unwrap();
        assert_eq!(created.id, ProductId::new(7));
        assert!(created.images[0].is_primary);

        let page = products
            .query(ProductFilter::new().sort(SortKey::CreatedAt, SortOrder::Desc).page(1, 1))
            .await
            .unwrap();
        assert_eq!(page.items[0].id, created.id);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.page_count, 7);
    }

    #[tokio::test]
    async fn invalid_products_are_rejected() {
        let products = client();
        let mut params = lamp(UserId::new(2));
        params.price = Decimal::ZERO;
        let err = products.create_product(params).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));

        let err = products
            .update_product(
                ProductId::new(1),
                ProductUpdate {
                    name: Some("x".into()),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
        assert_eq!(products.get_product(ProductId::new(1)).await.unwrap().name, "iPhone 15 Pro");
    }

    #[tokio::test]
    async fn missing_products_report_not_found() {
        let products = client();
        let missing = ProductId::new(99);
        assert_eq!(products.get_product(missing).await, Err(ProductError::NotFound(missing)));
        assert_eq!(products.delete_product(missing).await, Err(ProductError::NotFound(missing)));
        assert_eq!(products.check_stock(missing).await, Err(ProductError::NotFound(missing)));
    }

    #[tokio::test]
    async fn owners_see_their_products_and_admins_see_all() {
        let products = client();
        let owner = seller(2, Role::User);
        let created = products.create_product(lamp(owner.id)).await.unwrap();

        let mine = products.products_for_owner(&owner, false).await.unwrap();
        assert_eq!(mine.iter().map(|p| p.id).collect::<Vec<_>>(), vec![created.id]);

        products
            .update_product(
                created.id,
                ProductUpdate {
                    is_active: Some(false),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(products.products_for_owner(&owner, true).await.unwrap().is_empty());

        let admin = seller(1, Role::Admin);
        assert_eq!(products.products_for_owner(&admin, false).await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn stock_and_featured_actions() {
        let products = client();
        assert_eq!(products.check_stock(ProductId::new(4)).await, Ok(20));
        assert_eq!(products.toggle_featured(ProductId::new(4)).await, Ok(true));
        let featured = products.query(ProductFilter::new().featured_only()).await.unwrap();
        assert_eq!(featured.total_count, 3);
        assert_eq!(products.categories().await.unwrap().len(), 5);
    }
}
