//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities used by the HTTP adapter
//! and the store. Keep types immutable and document invariants in each type's
//! Rustdoc. Entities never serialize credential material; adapters map to
//! explicit response DTOs.

pub mod auth;
pub mod beneficiary;
pub mod error;
pub mod id;
pub mod ports;
pub mod shop;
pub mod stock;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordHash};
pub use self::beneficiary::{
    Beneficiary, BeneficiaryId, BeneficiaryValidationError, FamilySize, NewBeneficiary,
    RationCardNumber,
};
pub use self::error::{Error, ErrorCode};
pub use self::id::IdValidationError;
pub use self::shop::{NewShop, Shop, ShopId, ShopValidationError};
pub use self::stock::{ItemType, StockItem, StockItemId, StockKey, StockValidationError};
pub use self::user::{Email, NewUser, Role, User, UserId, UserValidationError};

/// Convenient result alias for operations returning domain errors.
pub type ApiResult<T> = Result<T, Error>;
