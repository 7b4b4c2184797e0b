//! Stock data model: the commodity rows tracked per shop.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::id::define_entity_id;
use crate::domain::shop::ShopId;

define_entity_id! {
    /// Generated stock-row identifier, preserved across upserts of the same
    /// composite key.
    StockItemId
}

/// Validation errors returned by stock constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockValidationError {
    UnknownItemType { value: String },
    EmptyUnit,
}

impl fmt::Display for StockValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItemType { value } => write!(
                f,
                "item type must be rice, wheat, sugar, or kerosene; got {value:?}"
            ),
            Self::EmptyUnit => write!(f, "unit must not be empty"),
        }
    }
}

impl std::error::Error for StockValidationError {}

/// Rationed commodity tracked per shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Rice,
    Wheat,
    Sugar,
    Kerosene,
}

impl ItemType {
    /// All item types, in the order the seed inserts them.
    pub const ALL: [Self; 4] = [Self::Rice, Self::Wheat, Self::Sugar, Self::Kerosene];

    /// Lowercase wire form of the item type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rice => "rice",
            Self::Wheat => "wheat",
            Self::Sugar => "sugar",
            Self::Kerosene => "kerosene",
        }
    }

    /// Measurement unit conventionally used for this commodity.
    ///
    /// This is a business rule applied by callers when writing stock; the
    /// store itself persists whatever unit string it is handed.
    pub fn default_unit(self) -> &'static str {
        match self {
            Self::Kerosene => "L",
            _ => "kg",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = StockValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rice" => Ok(Self::Rice),
            "wheat" => Ok(Self::Wheat),
            "sugar" => Ok(Self::Sugar),
            "kerosene" => Ok(Self::Kerosene),
            other => Err(StockValidationError::UnknownItemType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Composite key identifying a stock row.
///
/// The pair is the row identity for update purposes, independent of the row's
/// generated [`StockItemId`]. A compound struct avoids the joined-string
/// collision risk of the original key scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockKey {
    pub shop_id: ShopId,
    pub item_type: ItemType,
}

impl StockKey {
    /// Build a key from its parts.
    pub fn new(shop_id: ShopId, item_type: ItemType) -> Self {
        Self { shop_id, item_type }
    }
}

/// One stock row: the quantity of one commodity at one shop.
///
/// ## Invariants
/// - Exactly one row exists per [`StockKey`].
/// - `quantity` is non-negative by construction.
/// - `last_updated` refreshes on every write, including the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItem {
    id: StockItemId,
    shop_id: ShopId,
    item_type: ItemType,
    quantity: u32,
    unit: String,
    last_updated: DateTime<Utc>,
}

impl StockItem {
    /// Build a [`StockItem`] from validated components.
    pub fn new(
        id: StockItemId,
        key: StockKey,
        quantity: u32,
        unit: impl Into<String>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            shop_id: key.shop_id,
            item_type: key.item_type,
            quantity,
            unit: unit.into(),
            last_updated,
        }
    }

    /// Generated row identifier.
    pub fn id(&self) -> &StockItemId {
        &self.id
    }

    /// Owning shop.
    pub fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// Commodity tracked by this row.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Quantity on hand.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Measurement unit as persisted.
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    /// Timestamp of the most recent write.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Composite key of this row.
    pub fn key(&self) -> StockKey {
        StockKey::new(self.shop_id.clone(), self.item_type)
    }
}
