//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSignup: Send + Sync {
    /// Register a new user. Fails with `Conflict` when the email is taken.
    async fn signup(&self, details: SignupDetails) -> Result<User, Error>;
}
