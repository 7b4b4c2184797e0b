//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without real storage.

use std::sync::Arc;

use crate::domain::ports::{
    BeneficiaryRepository, LoginService, RepositoryLoginService, ShopRepository, StockRepository,
    UserRepository,
};
use crate::outbound::memory::MemoryStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserRepository>,
    pub shops: Arc<dyn ShopRepository>,
    pub stock: Arc<dyn StockRepository>,
    pub beneficiaries: Arc<dyn BeneficiaryRepository>,
}

impl HttpState {
    /// Wire every port to the same in-memory store.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            login: Arc::new(RepositoryLoginService::new(store.clone())),
            users: store.clone(),
            shops: store.clone(),
            stock: store.clone(),
            beneficiaries: store,
        }
    }
}
