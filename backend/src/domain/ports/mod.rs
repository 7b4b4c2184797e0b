//! Domain ports and supporting types for the hexagonal boundary.

mod beneficiary_repository;
mod login_service;
mod shop_repository;
mod stock_repository;
mod user_repository;

pub use beneficiary_repository::{BeneficiaryPersistenceError, BeneficiaryRepository};
pub use login_service::{LoginService, RepositoryLoginService};
pub use shop_repository::{ShopPersistenceError, ShopRepository};
pub use stock_repository::{StockPersistenceError, StockRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
