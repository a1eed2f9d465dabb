use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;

/// Client for the user registry actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_client_methods!(UserClient, User, UserId, UserError, user);

fn user_error(id: UserId, error: FrameworkError) -> UserError {
    match error {
        FrameworkError::NotFound(_) => UserError::NotFound(id),
        FrameworkError::Rejected(reason) => UserError::ValidationError(reason),
        other => UserError::ActorCommunicationError(other.to_string()),
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    /// Registers a user. Emails are unique, compared case-insensitively.
    #[instrument(skip(self, params), fields(username = %params.username, email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        if self.find_by_email(&params.email).await?.is_some() {
            return Err(UserError::AlreadyExists(params.email));
        }
        let id = self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Rejected(reason) => UserError::ValidationError(reason),
            other => UserError::ActorCommunicationError(other.to_string()),
        })?;
        info!(user_id = %id, "User created");
        self.get_user(id).await?.ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = email.trim();
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email)))
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(|e| user_error(id, e))
    }
}
