//! User account service: listing, signup, and login.
//!
//! Emails are compared in their normalised form, so `Ann@Example.com` and
//! `ann@example.com` name the same account. Passwords are compared as stored.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    LoginService, UserPersistenceError, UserRepository, UserSignup, UsersQuery,
};
use crate::domain::repository_errors::map_user_persistence_error;
use crate::domain::{
    DEFAULT_USER_IMAGE, EmailAddress, Error, LoginCredentials, SignupDetails, User, UserId,
};

pub(crate) const EMAIL_TAKEN: &str = "This email address already has an account";
pub(crate) const EMAIL_NOT_FOUND: &str = "Email not found";
pub(crate) const PASSWORD_INCORRECT: &str = "Password is incorrect";

/// Account service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct UserAccountService<U> {
    users: Arc<U>,
}

impl<U> UserAccountService<U> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UsersQuery for UserAccountService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<U> UserSignup for UserAccountService<U>
where
    U: UserRepository,
{
    async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        let SignupDetails {
            name,
            email,
            password,
        } = details;

        let existing = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_TAKEN));
        }

        let user = User::new(
            UserId::random(),
            name,
            email,
            password,
            DEFAULT_USER_IMAGE,
            Vec::new(),
        );
        self.users.insert(&user).await.map_err(|failure| match failure {
            // Lost a race with a concurrent signup for the same address.
            UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN),
            other => map_user_persistence_error(other),
        })?;

        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }
}

#[async_trait]
impl<U> LoginService for UserAccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // An address that cannot be valid cannot belong to an account.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::not_found(EMAIL_NOT_FOUND));
        };

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(EMAIL_NOT_FOUND))?;

        if !user.password().matches(credentials.password()) {
            return Err(Error::unauthorized(PASSWORD_INCORRECT));
        }
        Ok(user)
    }
}
