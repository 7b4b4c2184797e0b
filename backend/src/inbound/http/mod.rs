//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod beneficiaries;
pub mod error;
pub mod health;
pub mod session;
pub mod shops;
pub mod state;
pub mod stock;
pub mod users;

pub use error::ApiResult;
