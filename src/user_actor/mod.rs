//! User registry backing the mock authentication flow.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::config::AdminCredentials;
use crate::domain::{Role, User, UserId};

/// Id of the built-in administrator.
pub const ADMIN_ID: UserId = UserId::new(1);

pub fn admin_user(credentials: &AdminCredentials) -> User {
    User {
        id: ADMIN_ID,
        username: "admin".to_string(),
        email: credentials.email.clone(),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        role: Role::Admin,
        avatar: None,
        created_at: Utc::now(),
    }
}

/// Builds the registry actor holding only the administrator.
pub fn seeded_registry(
    buffer_size: usize,
    admin: &AdminCredentials,
) -> (ResourceActor<User>, ResourceClient<User>) {
    let counter = Arc::new(AtomicU32::new(ADMIN_ID.get() + 1));
    let next_user_id = move || UserId::new(counter.fetch_add(1, Ordering::SeqCst));

    let (actor, client) = ResourceActor::new(buffer_size, next_user_id);
    (actor.with_seed([admin_user(admin)]), client)
}
