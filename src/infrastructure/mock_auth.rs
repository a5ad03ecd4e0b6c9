// SPDX-License-Identifier: MPL-2.0
//! In-memory authentication with two fixed accounts.

use crate::application::port::AuthProvider;
use crate::domain::auth::{LoginCredentials, Role, User};
use crate::domain::error::AuthError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Password accepted for every mock account.
pub const MOCK_PASSWORD: &str = "password";

fn mock_users() -> [User; 2] {
    [
        User {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            token: "mock-admin-token".to_string(),
        },
        User {
            id: "2".to_string(),
            name: "Regular User".to_string(),
            email: "user@example.com".to_string(),
            role: Role::User,
            token: "mock-user-token".to_string(),
        },
    ]
}

/// Auth provider holding the session token in memory.
#[derive(Debug, Default)]
pub struct MockAuthProvider {
    token: Mutex<Option<String>>,
}

impl MockAuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that starts with a stored token, as after a page reload.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn stored_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn store_token(&self, value: Option<String>) {
        match self.token.lock() {
            Ok(mut token) => *token = value,
            Err(_) => tracing::warn!("auth token store poisoned"),
        }
    }

    /// Returns true if the stored token belongs to an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_for_stored_token().is_some_and(|user| user.is_admin())
    }

    fn user_for_stored_token(&self) -> Option<User> {
        let token = self.stored_token()?;
        mock_users().into_iter().find(|user| user.token == token)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let user = mock_users()
            .into_iter()
            .find(|user| user.email == credentials.email)
            .filter(|_| credentials.password == MOCK_PASSWORD)
            .ok_or(AuthError::InvalidCredentials)?;

        self.store_token(Some(user.token.clone()));
        tracing::info!(user_id = %user.id, "user signed in");
        Ok(user)
    }

    async fn logout(&self) {
        self.store_token(None);
        tracing::info!("user signed out");
    }

    async fn check_auth(&self) -> Option<User> {
        self.user_for_stored_token()
    }
}
