//! Ration shop data model.

use std::fmt;

use crate::domain::id::define_entity_id;

define_entity_id! {
    /// Stable shop identifier, referenced by users, beneficiaries, and stock.
    ShopId
}

/// Validation errors returned by shop constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopValidationError {
    EmptyName,
    EmptyAddress,
}

impl fmt::Display for ShopValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "shop name must not be empty"),
            Self::EmptyAddress => write!(f, "shop address must not be empty"),
        }
    }
}

impl std::error::Error for ShopValidationError {}

/// A ration shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    id: ShopId,
    name: String,
    address: String,
    contact_number: Option<String>,
}

impl Shop {
    /// Build a [`Shop`] from validated components.
    pub fn new(id: ShopId, fields: NewShop) -> Self {
        Self {
            id,
            name: fields.name,
            address: fields.address,
            contact_number: fields.contact_number,
        }
    }

    /// Stable shop identifier.
    pub fn id(&self) -> &ShopId {
        &self.id
    }

    /// Shop display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Street address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Contact number, when one is on record.
    pub fn contact_number(&self) -> Option<&str> {
        self.contact_number.as_deref()
    }
}

/// Fields accepted when creating a shop; the store generates the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShop {
    pub name: String,
    pub address: String,
    /// Defaults to `None` when not supplied by the caller.
    pub contact_number: Option<String>,
}

impl NewShop {
    /// Validate raw fields into a [`NewShop`].
    pub fn try_from_parts(
        name: impl Into<String>,
        address: impl Into<String>,
        contact_number: Option<String>,
    ) -> Result<Self, ShopValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ShopValidationError::EmptyName);
        }
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ShopValidationError::EmptyAddress);
        }
        Ok(Self {
            name,
            address,
            contact_number,
        })
    }
}
