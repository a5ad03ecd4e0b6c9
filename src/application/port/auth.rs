// SPDX-License-Identifier: MPL-2.0
//! Authentication port definition.

use crate::domain::auth::{LoginCredentials, User};
use crate::domain::error::AuthError;
use async_trait::async_trait;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a signed-in user and remembers its token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a
    /// wrong password.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AuthError>;

    /// Forgets the stored token.
    async fn logout(&self);

    /// Restores the user for the stored token, if any.
    async fn check_auth(&self) -> Option<User>;
}
