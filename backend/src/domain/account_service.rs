//! Account signup and login.
//!
//! Signup failures name the conflict ("Email already registered"); login
//! failures never say whether the account exists or the password was wrong.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::auth::{AuthSession, LoginCredentials, SignupCredentials};
use super::error::Error;
use super::ports::{
    AuthUseCase, PasswordHashError, PasswordHasher, TokenError, TokenService, UserRepository,
    UserStoreError,
};
use super::user::{User, UserId};

/// Account service over the user store, hasher, and token issuer.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create the service over its collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    fn bad_credentials() -> Error {
        Error::unauthorized("Incorrect email or password")
    }

    fn duplicate_email() -> Error {
        Error::invalid_request("Email already registered")
    }
}

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::DuplicateEmail { .. } => AccountService::duplicate_email(),
        other => Error::internal(other.to_string()),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl AuthUseCase for AccountService {
    async fn signup(&self, credentials: SignupCredentials) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email().as_str())
            .await
            .map_err(map_user_store_error)?;
        if existing.is_some() {
            return Err(Self::duplicate_email());
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            credentials.email().clone(),
            password_hash,
            self.clock.utc(),
        );
        // The store's unique index backstops the lookup above when two
        // signups race on the same address.
        self.users
            .insert(&user)
            .await
            .map_err(map_user_store_error)?;
        info!(user_id = %user.id, "account created");

        let access_token = self.tokens.issue(&user.id).map_err(map_token_error)?;
        Ok(AuthSession {
            access_token,
            email: user.email.as_str().to_owned(),
        })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Self::bad_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(map_hash_error)?;
        if !verified {
            debug!(user_id = %user.id, "login rejected: bad password");
            return Err(Self::bad_credentials());
        }

        let access_token = self.tokens.issue(&user.id).map_err(map_token_error)?;
        Ok(AuthSession {
            access_token,
            email: user.email.as_str().to_owned(),
        })
    }
}
