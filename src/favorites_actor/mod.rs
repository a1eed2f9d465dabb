//! Per-session favorites, backed by a [`FavoritesSet`](crate::domain::FavoritesSet).

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
