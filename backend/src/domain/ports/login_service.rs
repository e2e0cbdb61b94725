//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check credentials without knowing the
//! backing infrastructure, so handler tests can substitute a test double
//! instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Unknown emails fail with `NotFound`; a wrong password fails with
    /// `Unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
