//! Cloneable handles to the marketplace services.

#[macro_use]
mod macros;

mod auth_client;
mod cart_client;
mod favorites_client;
mod order_client;
mod product_client;
mod user_client;

pub use auth_client::*;
pub use cart_client::*;
pub use favorites_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
