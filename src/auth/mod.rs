//! Mock authentication: there is no security model, only the session
//! bookkeeping the storefront needs.

use chrono::Utc;
use thiserror::Error;

use crate::domain::{RegisterForm, Role, User};
use crate::user_actor::UserError;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid registration: {0}")]
    Validation(String),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<UserError> for AuthError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::AlreadyExists(email) => {
                AuthError::Validation(format!("email already registered: {email}"))
            }
            UserError::ValidationError(reason) => AuthError::Validation(reason),
            other => AuthError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// A logged-in user and the token handed out at login.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

impl AuthSession {
    pub fn new(user: User) -> Self {
        let token = mock_token(user.role);
        Self { user, token }
    }
}

pub fn mock_token(role: Role) -> String {
    format!("mock-{}-token-{}", role.as_str(), Utc::now().timestamp_millis())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Login form rules. Anything passing them is accepted by the mock backend.
pub fn check_login(email: &str, password: &str) -> Result<(), AuthError> {
    if !looks_like_email(email) || password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(())
}

/// Sign-up form rules.
pub fn check_registration(form: &RegisterForm) -> Result<(), AuthError> {
    let min_len = |value: &str, min: usize, field: &str| {
        if value.trim().chars().count() < min {
            Err(AuthError::Validation(format!(
                "{field} must be at least {min} characters"
            )))
        } else {
            Ok(())
        }
    };
    min_len(&form.first_name, 2, "first name")?;
    min_len(&form.last_name, 2, "last name")?;
    min_len(&form.username, 3, "username")?;
    if !looks_like_email(form.email.trim()) {
        return Err(AuthError::Validation(format!("invalid email: {}", form.email)));
    }
    min_len(&form.password, MIN_PASSWORD_LEN, "password")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            username: "lucia".into(),
            email: "lucia@example.com".into(),
            password: "secreto1".into(),
            first_name: "Lucía".into(),
            last_name: "Pérez".into(),
        }
    }

    #[test]
    fn tokens_carry_the_role() {
        assert!(mock_token(Role::Admin).starts_with("mock-admin-token-"));
        assert!(mock_token(Role::User).starts_with("mock-user-token-"));
    }

    #[test]
    fn login_rules() {
        assert_eq!(check_login("ana@example.com", "123456"), Ok(()));
        assert_eq!(check_login("ana@example.com", ""), Err(AuthError::InvalidCredentials));
        assert_eq!(check_login("ana", "123456"), Err(AuthError::InvalidCredentials));
        assert_eq!(check_login("@example.com", "123456"), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn registration_rules() {
        assert_eq!(check_registration(&form()), Ok(()));

        let short_username = RegisterForm {
            username: "lu".into(),
            ..form()
        };
        assert!(matches!(check_registration(&short_username), Err(AuthError::Validation(_))));

        let short_password = RegisterForm {
            password: "abc".into(),
            ..form()
        };
        assert!(matches!(check_registration(&short_password), Err(AuthError::Validation(_))));
    }
}
