//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This keeps HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring a store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::UserRepository;
use crate::domain::{Email, Error, LoginCredentials, Role, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials for a role and return the authenticated user.
    ///
    /// Unknown (email, role) pairs and failed hash checks both surface as
    /// `unauthorized`; callers cannot distinguish them.
    async fn authenticate(&self, credentials: &LoginCredentials, role: Role)
    -> Result<User, Error>;
}

/// Login service backed by a [`UserRepository`].
pub struct RepositoryLoginService {
    users: Arc<dyn UserRepository>,
}

impl RepositoryLoginService {
    /// Build a login service over the given user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for RepositoryLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
        role: Role,
    ) -> Result<User, Error> {
        let email = Email::new(credentials.email())
            .map_err(|err| Error::unauthorized(format!("invalid credentials: {err}")))?;
        let user = self
            .users
            .find_by_email_and_role(&email, role)
            .await
            .map_err(Error::from)?;
        match user {
            Some(user) if user.password_hash().verify(credentials.password()) => Ok(user),
            Some(_) => {
                debug!(%email, %role, "password verification failed");
                Err(Error::unauthorized("invalid credentials"))
            }
            None => {
                debug!(%email, %role, "no user for email/role pair");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}
