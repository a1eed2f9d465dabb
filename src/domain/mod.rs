//! Business domain types. Pure data structures with no actor-specific concerns.

mod id;
pub mod cart;
pub mod favorites;
pub mod order;
pub mod product;
pub mod query;
pub mod user;

pub use cart::*;
pub use favorites::*;
pub use id::*;
pub use order::*;
pub use product::*;
pub use query::*;
pub use user::*;
