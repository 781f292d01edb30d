//! Account domain service: registration, login and profile reads.
//!
//! Implements the `AccountCommand` and `UserProfileQuery` driving ports on
//! top of the credential store and the password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AccountCommand, NewUserAccount, PasswordHashError, PasswordHasher, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::unprocessable(
            "email already registered",
        )
        .with_details(json!({ "field": "email", "code": "duplicate" })),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account service backed by a [`UserRepository`] and a [`PasswordHasher`].
#[derive(Clone)]
pub struct AccountService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let account = NewUserAccount {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash,
        };
        let user = self.users.create(&account).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "registered account");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("no account is registered for this email"))?;

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unprocessable("invalid credentials"));
        }
        Ok(stored.user)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(user_id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
