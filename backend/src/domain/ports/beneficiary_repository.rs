//! Port abstraction for beneficiary persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Beneficiary, Error, NewBeneficiary, UserId};

/// Persistence errors raised by beneficiary repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BeneficiaryPersistenceError {
    /// Repository connection could not be established.
    #[error("beneficiary repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("beneficiary repository query failed: {message}")]
    Query { message: String },
}

impl From<BeneficiaryPersistenceError> for Error {
    fn from(err: BeneficiaryPersistenceError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Port for beneficiary storage and lookup.
#[async_trait]
pub trait BeneficiaryRepository: Send + Sync {
    /// Fetch the first beneficiary linked to a user, scanning in insertion
    /// order.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Beneficiary>, BeneficiaryPersistenceError>;

    /// Store a new beneficiary under a freshly generated identifier and
    /// return the stored record.
    async fn create(
        &self,
        fields: NewBeneficiary,
    ) -> Result<Beneficiary, BeneficiaryPersistenceError>;
}
