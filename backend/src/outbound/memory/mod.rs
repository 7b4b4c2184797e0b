//! In-memory store adapter.
//!
//! Sole source of truth for all entity data for the lifetime of the process.
//! The store is an explicitly constructed object shared via `Arc` — never an
//! implicit global — so ownership and test lifecycles stay visible. All four
//! tables are insertion-ordered; stock rows are keyed by the compound
//! [`StockKey`] so distinct (shop, item) pairs can never collide the way the
//! joined-string scheme it replaces could.

mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use mockable::Clock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    BeneficiaryPersistenceError, BeneficiaryRepository, ShopPersistenceError, ShopRepository,
    StockPersistenceError, StockRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Beneficiary, BeneficiaryId, Email, ItemType, NewBeneficiary, NewShop, NewUser, Role, Shop,
    ShopId, StockItem, StockItemId, StockKey, User, UserId,
};

/// How the store treats a second registration of an (email, role) pair.
///
/// The system this replaces accepted duplicates silently; that is now an
/// explicit choice rather than a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Reject a duplicate (email, role) pair with a conflict error.
    #[default]
    UniqueEmailPerRole,
    /// Accept duplicates silently, preserving the original behaviour.
    Permissive,
}

#[derive(Default)]
struct Tables {
    users: IndexMap<UserId, User>,
    shops: IndexMap<ShopId, Shop>,
    stock: IndexMap<StockKey, StockItem>,
    beneficiaries: IndexMap<BeneficiaryId, Beneficiary>,
}

/// Process-wide in-memory tables behind a single reader/writer lock.
///
/// Every mutation takes the write lock for its whole read-modify-write, so
/// the composite-key upsert is atomic per key: two concurrent writers to the
/// same (shop, item) pair can neither lose an update nor duplicate a row.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
    policy: CredentialPolicy,
}

impl MemoryStore {
    /// Build an empty store stamping timestamps from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(clock, CredentialPolicy::default())
    }

    /// Build an empty store with an explicit credential policy.
    pub fn with_policy(clock: Arc<dyn Clock>, policy: CredentialPolicy) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
            policy,
        }
    }

    /// Build a store populated with the fixture data: 3 shops, one user per
    /// role, 1 beneficiary, and the full 3 × 4 grid of stock rows.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        let mut tables = Tables::default();
        seed::apply(&mut tables, clock.as_ref());
        Self {
            tables: RwLock::new(tables),
            clock,
            policy: CredentialPolicy::default(),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(id).cloned())
    }

    async fn find_by_email_and_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email && user.role() == role)
            .cloned())
    }

    async fn create(&self, fields: NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        if self.policy == CredentialPolicy::UniqueEmailPerRole
            && tables
                .users
                .values()
                .any(|user| user.email() == &fields.email && user.role() == fields.role)
        {
            return Err(UserPersistenceError::DuplicateCredentials {
                email: fields.email.to_string(),
                role: fields.role,
            });
        }

        let id = UserId::random();
        let user = User::new(id.clone(), fields);
        debug!(user_id = %id, role = %user.role(), "created user");
        tables.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ShopRepository for MemoryStore {
    async fn find_by_id(&self, id: &ShopId) -> Result<Option<Shop>, ShopPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.shops.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Shop>, ShopPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.shops.values().cloned().collect())
    }

    async fn create(&self, fields: NewShop) -> Result<Shop, ShopPersistenceError> {
        let mut tables = self.tables.write().await;
        let id = ShopId::random();
        let shop = Shop::new(id.clone(), fields);
        debug!(shop_id = %id, "created shop");
        tables.shops.insert(id, shop.clone());
        Ok(shop)
    }
}

#[async_trait]
impl StockRepository for MemoryStore {
    async fn list_by_shop(
        &self,
        shop_id: &ShopId,
    ) -> Result<Vec<StockItem>, StockPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stock
            .values()
            .filter(|item| item.shop_id() == shop_id)
            .cloned()
            .collect())
    }

    async fn find_by_shop_and_item(
        &self,
        shop_id: &ShopId,
        item_type: ItemType,
    ) -> Result<Option<StockItem>, StockPersistenceError> {
        let tables = self.tables.read().await;
        let key = StockKey::new(shop_id.clone(), item_type);
        Ok(tables.stock.get(&key).cloned())
    }

    async fn list_all(&self) -> Result<Vec<StockItem>, StockPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.stock.values().cloned().collect())
    }

    async fn upsert(
        &self,
        shop_id: ShopId,
        item_type: ItemType,
        quantity: u32,
        unit: &str,
    ) -> Result<StockItem, StockPersistenceError> {
        let mut tables = self.tables.write().await;
        let key = StockKey::new(shop_id, item_type);
        // The row id outlives the row contents: an overwrite keeps it.
        let id = tables
            .stock
            .get(&key)
            .map_or_else(StockItemId::random, |existing| existing.id().clone());
        let item = StockItem::new(id, key.clone(), quantity, unit, self.clock.utc());
        debug!(
            shop_id = %key.shop_id,
            item_type = %key.item_type,
            quantity,
            "stock upsert"
        );
        tables.stock.insert(key, item.clone());
        Ok(item)
    }
}

#[async_trait]
impl BeneficiaryRepository for MemoryStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Beneficiary>, BeneficiaryPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .beneficiaries
            .values()
            .find(|beneficiary| beneficiary.user_id() == user_id)
            .cloned())
    }

    async fn create(
        &self,
        fields: NewBeneficiary,
    ) -> Result<Beneficiary, BeneficiaryPersistenceError> {
        let mut tables = self.tables.write().await;
        let id = BeneficiaryId::random();
        let beneficiary = Beneficiary::new(id.clone(), fields);
        debug!(beneficiary_id = %id, user_id = %beneficiary.user_id(), "created beneficiary");
        tables.beneficiaries.insert(id, beneficiary.clone());
        Ok(beneficiary)
    }
}
