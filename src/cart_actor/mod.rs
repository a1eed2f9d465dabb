//! Per-session cart: pure transitions plus the service actor that owns the
//! state, persists it and runs checkout.

pub mod error;
pub mod machine;
pub mod service;

pub use error::*;
pub use machine::CartAction;
pub use service::*;
