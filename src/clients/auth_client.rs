use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use super::UserClient;
use crate::auth::{self, AuthError, AuthSession};
use crate::config::AdminCredentials;
use crate::domain::{RegisterForm, Role, User, UserCreate};
use crate::store::{keys, load_json, save_json, KeyValueStore};
use crate::user_actor::ADMIN_ID;

/// Mock login/registration over the user registry. The current session is
/// kept in the key-value store under `token` and `user`.
#[derive(Clone)]
pub struct AuthClient {
    users: UserClient,
    store: Arc<dyn KeyValueStore>,
    admin: AdminCredentials,
    latency: Duration,
}

impl AuthClient {
    pub fn new(users: UserClient, store: Arc<dyn KeyValueStore>, admin: AdminCredentials) -> Self {
        Self {
            users,
            store,
            admin,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The administrator credentials log in as the built-in admin; any other
    /// well-formed credentials log in as the user registered under that email,
    /// registering a demo user on first sight.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        tokio::time::sleep(self.latency).await;
        let email = email.trim();
        auth::check_login(email, password)?;

        let user = if email.eq_ignore_ascii_case(&self.admin.email) {
            if password != self.admin.password {
                warn!("Wrong administrator password");
                return Err(AuthError::InvalidCredentials);
            }
            self.users
                .get_user(ADMIN_ID)
                .await?
                .ok_or(AuthError::NotAuthenticated)?
        } else {
            match self.users.find_by_email(email).await? {
                Some(user) => user,
                None => self.users.create_user(demo_user(email)).await?,
            }
        };

        let session = AuthSession::new(user);
        self.persist(&session);
        info!(user_id = %session.user.id, role = session.user.role.as_str(), "Logged in");
        Ok(session)
    }

    #[instrument(skip(self, form), fields(username = %form.username, email = %form.email))]
    pub async fn register(&self, form: RegisterForm) -> Result<AuthSession, AuthError> {
        tokio::time::sleep(self.latency).await;
        auth::check_registration(&form)?;
        let user = self
            .users
            .create_user(UserCreate {
                username: form.username,
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
                role: Role::User,
            })
            .await?;

        let session = AuthSession::new(user);
        self.persist(&session);
        info!(user_id = %session.user.id, "Registered");
        Ok(session)
    }

    /// Reloads the session saved by the last login. A token without a
    /// readable user is cleared.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<AuthSession, AuthError> {
        let token = match self.store.get(keys::TOKEN) {
            Ok(Some(token)) => token,
            Ok(None) => return Err(AuthError::NotAuthenticated),
            Err(e) => {
                warn!(error = %e, "Failed to read saved token");
                return Err(AuthError::NotAuthenticated);
            }
        };
        match load_json::<User>(self.store.as_ref(), keys::USER) {
            Some(user) => {
                info!(user_id = %user.id, "Session restored");
                Ok(AuthSession { user, token })
            }
            None => {
                self.clear();
                Err(AuthError::NotAuthenticated)
            }
        }
    }

    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.clear();
        info!("Logged out");
    }

    fn persist(&self, session: &AuthSession) {
        if let Err(e) = self.store.set(keys::TOKEN, session.token.clone()) {
            warn!(error = %e, "Failed to save token");
        }
        if let Err(e) = save_json(self.store.as_ref(), keys::USER, &session.user) {
            warn!(error = %e, "Failed to save user");
        }
    }

    fn clear(&self) {
        for key in [keys::TOKEN, keys::USER] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear session key");
            }
        }
    }
}

fn demo_user(email: &str) -> UserCreate {
    let username = email.split('@').next().unwrap_or(email).to_string();
    UserCreate {
        username,
        email: email.to_string(),
        first_name: "Usuario".to_string(),
        last_name: "Demo".to_string(),
        role: Role::User,
    }
}
