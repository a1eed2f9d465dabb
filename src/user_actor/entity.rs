use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserId, UserUpdate};

impl Entity for User {
    type Id = UserId;
    type CreateParams = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &UserId {
        &self.id
    }

    /// Creates a new User. Username and email are required and the email
    /// must at least look like one.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, String> {
        let username = params.username.trim();
        let email = params.email.trim();
        if username.is_empty() {
            return Err("username is required".to_string());
        }
        if !email.contains('@') {
            return Err(format!("invalid email: {email}"));
        }
        Ok(Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
            first_name: params.first_name,
            last_name: params.last_name,
            role: params.role,
            avatar: None,
            created_at: Utc::now(),
        })
    }

    /// Updates the user's profile information.
    fn on_update(&mut self, update: UserUpdate) -> Result<(), String> {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar).filter(|url| !url.is_empty());
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn params(username: &str, email: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            email: email.into(),
            first_name: "Usuario".into(),
            last_name: "Demo".into(),
            role: Role::User,
        }
    }

    #[test]
    fn create_trims_and_validates() {
        let user = User::from_create_params(UserId::new(4), params(" ana ", "ana@example.com ")).unwrap();
        assert_eq!(user.username, "ana");
        assert_eq!(user.email, "ana@example.com");
        assert!(!user.is_admin());

        assert!(User::from_create_params(UserId::new(5), params("", "x@example.com")).is_err());
        assert!(User::from_create_params(UserId::new(5), params("bob", "bob")).is_err());
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut user = User::from_create_params(UserId::new(4), params("ana", "ana@example.com")).unwrap();
        user.on_update(UserUpdate {
            last_name: Some("García".into()),
            avatar: Some(String::new()),
            ..UserUpdate::default()
        })
        .unwrap();
        assert_eq!(user.first_name, "Usuario");
        assert_eq!(user.last_name, "García");
        assert_eq!(user.avatar, None);
    }
}
