//! Port abstraction for shop persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Error, NewShop, Shop, ShopId};

/// Persistence errors raised by shop repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopPersistenceError {
    /// Repository connection could not be established.
    #[error("shop repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("shop repository query failed: {message}")]
    Query { message: String },
}

impl From<ShopPersistenceError> for Error {
    fn from(err: ShopPersistenceError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Port for shop storage and lookup.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Fetch a shop by identifier.
    async fn find_by_id(&self, id: &ShopId) -> Result<Option<Shop>, ShopPersistenceError>;

    /// List every shop in insertion order.
    async fn list_all(&self) -> Result<Vec<Shop>, ShopPersistenceError>;

    /// Store a new shop under a freshly generated identifier and return the
    /// stored record.
    async fn create(&self, fields: NewShop) -> Result<Shop, ShopPersistenceError>;
}
