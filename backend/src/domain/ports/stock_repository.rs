//! Port abstraction for stock persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Error, ItemType, ShopId, StockItem};

/// Persistence errors raised by stock repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockPersistenceError {
    /// Repository connection could not be established.
    #[error("stock repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("stock repository query failed: {message}")]
    Query { message: String },
}

impl From<StockPersistenceError> for Error {
    fn from(err: StockPersistenceError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Port for stock storage and lookup.
///
/// The (shop, item type) pair is the row identity: [`upsert`](StockRepository::upsert)
/// must never leave two rows for one pair, including under concurrent writers.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// List the rows belonging to one shop, in insertion order (not sorted by
    /// item type).
    async fn list_by_shop(&self, shop_id: &ShopId)
    -> Result<Vec<StockItem>, StockPersistenceError>;

    /// Direct composite-key lookup.
    async fn find_by_shop_and_item(
        &self,
        shop_id: &ShopId,
        item_type: ItemType,
    ) -> Result<Option<StockItem>, StockPersistenceError>;

    /// List every row, in insertion order.
    async fn list_all(&self) -> Result<Vec<StockItem>, StockPersistenceError>;

    /// Insert or overwrite the row for (`shop_id`, `item_type`).
    ///
    /// An existing row keeps its generated id; a new row receives a fresh
    /// one. `last_updated` is stamped from the adapter's clock on every call,
    /// including the first. Returns the resulting row.
    async fn upsert(
        &self,
        shop_id: ShopId,
        item_type: ItemType,
        quantity: u32,
        unit: &str,
    ) -> Result<StockItem, StockPersistenceError>;
}
