//! Catalog domain logic: validation, stock actions, seed data and queries.

mod actions;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod query;

pub use actions::*;
pub use error::*;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::domain::{Product, ProductId};

/// Builds the catalog actor preloaded with the seed products. New products
/// are numbered after the highest seeded id.
pub fn seeded_catalog(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    let seed = catalog::products();
    let first_free = seed.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
    let counter = Arc::new(AtomicU32::new(first_free));
    let next_product_id = move || ProductId::new(counter.fetch_add(1, Ordering::SeqCst));

    let (actor, client) = ResourceActor::new(buffer_size, next_product_id);
    (actor.with_seed(seed), client)
}
