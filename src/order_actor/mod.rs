//! Order book filled by checkout.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::domain::{Order, OrderId};

pub fn order_book(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    let counter = Arc::new(AtomicU32::new(1));
    let next_order_id = move || OrderId::new(counter.fetch_add(1, Ordering::SeqCst));
    ResourceActor::new(buffer_size, next_order_id)
}
