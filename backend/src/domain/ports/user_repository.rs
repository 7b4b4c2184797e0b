//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Email, Error, NewUser, Role, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// An (email, role) pair is already registered and the store enforces
    /// uniqueness.
    #[error("credentials already registered: {email} as {role}")]
    DuplicateCredentials { email: String, role: Role },
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::DuplicateCredentials { .. } => Self::conflict(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

/// Port for user storage and lookup.
///
/// Absence is `Ok(None)`, never an error: callers decide whether a missing
/// user is a 404 or a silent default.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the first user matching the (email, role) pair, scanning in
    /// insertion order.
    async fn find_by_email_and_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user under a freshly generated identifier and return the
    /// stored record.
    async fn create(&self, fields: NewUser) -> Result<User, UserPersistenceError>;
}
