//! System orchestration, startup, and shutdown logic.

pub mod marketplace;
pub mod session;
pub mod tracing;

pub use marketplace::*;
pub use session::*;
pub use self::tracing::*;
