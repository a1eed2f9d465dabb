use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use haversack::{
    setup_tracing, AppError, Marketplace, MarketplaceConfig, MemoryStore, ProductFilter, SortKey,
    SortOrder,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }
    setup_tracing();

    let config = MarketplaceConfig::from_env()?;
    info!(?config.latency, page_size = config.default_page_size, "Starting haversack");

    let market = Marketplace::new(config, Arc::new(MemoryStore::new()));

    let span = tracing::info_span!("browsing");
    let page = async {
        info!("Querying featured products");
        market
            .products
            .query(
                ProductFilter::new()
                    .featured_only()
                    .sort(SortKey::Price, SortOrder::Asc),
            )
            .await
    }
    .instrument(span)
    .await?;
    for product in &page.items {
        info!(product_id = %product.id, name = %product.name, price = %product.price, "Featured");
    }

    let session = market.login("ana@example.com", "secreto").await?;

    let span = tracing::info_span!("shopping", user_id = ?session.user_id());
    let checkout = async {
        for product in &page.items {
            session.cart.add_item(product.clone(), 1).await?;
        }
        if let Some(first) = page.items.first() {
            session.favorites.toggle(first.id).await?;
        }
        let count = session.cart.item_count().await?;
        info!(count, "Cart ready, checking out");
        session.cart.checkout().await.map_err(AppError::from)
    }
    .instrument(span)
    .await;

    match checkout {
        Ok(order) => info!(order_id = %order.id, total = %order.total_amount, "Order confirmed"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    let theme = market.preferences.toggle_theme();
    info!(%theme, "Theme switched");

    if let Err(e) = market.logout(session).await {
        warn!(error = %e, "Logout did not complete cleanly");
    }
    market.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
