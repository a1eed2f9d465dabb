//! # Haversack
//!
//! Client core of a small marketplace storefront, built as a set of actors:
//!
//! - **Resource actors** hold the catalog, user registry and order book
//!   ([`actor_framework::ResourceActor`]).
//! - **Session services** own one visitor's cart and favorites
//!   ([`cart_actor::CartService`], [`favorites_actor::FavoritesService`]).
//! - **Clients** are cheap, cloneable handles with instrumented async methods
//!   ([`clients`]).
//! - The [`Marketplace`] coordinator starts everything, opens sessions and
//!   shuts down in order.
//!
//! ```no_run
//! # async fn demo() -> Result<(), haversack::AppError> {
//! use std::sync::Arc;
//! use haversack::{Marketplace, MarketplaceConfig, MemoryStore, ProductFilter};
//!
//! let market = Marketplace::new(MarketplaceConfig::instant(), Arc::new(MemoryStore::new()));
//! let session = market.login("ana@example.com", "secreto").await?;
//!
//! let page = market.products.query(ProductFilter::new().search("iphone")).await?;
//! session.cart.add_item(page.items[0].clone(), 1).await?;
//! let order = session.cart.checkout().await?;
//! println!("order {} confirmed", order.id);
//!
//! market.logout(session).await?;
//! market.shutdown().await
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod auth;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod favorites_actor;
pub mod messages;
pub mod order_actor;
pub mod preferences;
pub mod product_actor;
pub mod store;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, Marketplace, Session};
pub use config::MarketplaceConfig;
pub use domain::*;
pub use error::AppError;
pub use store::{KeyValueStore, MemoryStore};
