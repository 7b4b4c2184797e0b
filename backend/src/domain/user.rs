//! User data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::auth::PasswordHash;
use crate::domain::id::define_entity_id;
use crate::domain::shop::ShopId;

define_entity_id! {
    /// Stable user identifier.
    UserId
}

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmail,
    InvalidEmail,
    EmptyName,
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a single '@'"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::UnknownRole { value } => {
                write!(f, "role must be admin, shop, or beneficiary; got {value:?}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Access role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator with visibility across all shops.
    Admin,
    /// Manager of a single ration shop.
    Shop,
    /// Ration card holder assigned to a shop.
    Beneficiary,
}

impl Role {
    /// All roles, in a stable order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Shop, Self::Beneficiary];

    /// Lowercase wire form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Shop => "shop",
            Self::Beneficiary => "beneficiary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "shop" => Ok(Self::Shop),
            "beneficiary" => Ok(Self::Beneficiary),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated email address used for login lookups.
///
/// ## Invariants
/// - Trimmed, non-empty, and contains exactly one `@` with text either side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// The password hash never leaves the domain: [`User`] deliberately does not
/// implement `Serialize`, so adapters must map to an explicit response DTO.
///
/// ## Invariants
/// - `shop_id` is `Some` only for shop-role users; the store does not enforce
///   this, callers do.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    role: Role,
    name: String,
    shop_id: Option<ShopId>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, fields: NewUser) -> Self {
        Self {
            id,
            email: fields.email,
            password_hash: fields.password_hash,
            role: fields.role,
            name: fields.name,
            shop_id: fields.shop_id,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored credential hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Access role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Shop managed by this user, when the role is [`Role::Shop`].
    pub fn shop_id(&self) -> Option<&ShopId> {
        self.shop_id.as_ref()
    }
}

/// Fields accepted when creating a user; the store generates the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub name: String,
    /// Defaults to `None` when not supplied by the caller.
    pub shop_id: Option<ShopId>,
}

impl NewUser {
    /// Validate raw fields into a [`NewUser`].
    pub fn try_from_parts(
        email: impl Into<String>,
        password_hash: PasswordHash,
        role: Role,
        name: impl Into<String>,
        shop_id: Option<ShopId>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            email: Email::new(email)?,
            password_hash,
            role,
            name,
            shop_id,
        })
    }
}
