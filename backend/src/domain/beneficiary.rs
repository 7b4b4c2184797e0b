//! Beneficiary data model.

use std::fmt;

use crate::domain::id::define_entity_id;
use crate::domain::shop::ShopId;
use crate::domain::user::UserId;

define_entity_id! {
    /// Stable beneficiary identifier.
    BeneficiaryId
}

/// Validation errors returned by beneficiary constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeneficiaryValidationError {
    EmptyRationCardNumber,
    InvalidRationCardNumber,
    ZeroFamilySize,
}

impl fmt::Display for BeneficiaryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRationCardNumber => write!(f, "ration card number must not be empty"),
            Self::InvalidRationCardNumber => {
                write!(f, "ration card number may only contain letters and digits")
            }
            Self::ZeroFamilySize => write!(f, "family size must be at least 1"),
        }
    }
}

impl std::error::Error for BeneficiaryValidationError {}

/// Government-issued ration card number.
///
/// ## Invariants
/// - Non-empty ASCII alphanumeric string, e.g. `RC123456`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RationCardNumber(String);

impl RationCardNumber {
    /// Validate and construct a [`RationCardNumber`] from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, BeneficiaryValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(BeneficiaryValidationError::EmptyRationCardNumber);
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BeneficiaryValidationError::InvalidRationCardNumber);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for RationCardNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RationCardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RationCardNumber> for String {
    fn from(value: RationCardNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for RationCardNumber {
    type Error = BeneficiaryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of household members covered by a ration card; always positive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct FamilySize(u32);

impl FamilySize {
    /// Validate and construct a [`FamilySize`].
    pub fn new(size: u32) -> Result<Self, BeneficiaryValidationError> {
        if size == 0 {
            return Err(BeneficiaryValidationError::ZeroFamilySize);
        }
        Ok(Self(size))
    }

    /// Household member count.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<FamilySize> for u32 {
    fn from(value: FamilySize) -> Self {
        value.0
    }
}

impl TryFrom<u32> for FamilySize {
    type Error = BeneficiaryValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A beneficiary: the ration-card record behind a beneficiary-role user.
///
/// ## Invariants
/// - At most one beneficiary per `user_id`; the store's lookup returns the
///   first match in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beneficiary {
    id: BeneficiaryId,
    user_id: UserId,
    shop_id: ShopId,
    ration_card_number: RationCardNumber,
    family_size: FamilySize,
}

impl Beneficiary {
    /// Build a [`Beneficiary`] from validated components.
    pub fn new(id: BeneficiaryId, fields: NewBeneficiary) -> Self {
        Self {
            id,
            user_id: fields.user_id,
            shop_id: fields.shop_id,
            ration_card_number: fields.ration_card_number,
            family_size: fields.family_size,
        }
    }

    /// Stable beneficiary identifier.
    pub fn id(&self) -> &BeneficiaryId {
        &self.id
    }

    /// The beneficiary-role user this record belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Assigned ration shop.
    pub fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// Ration card number.
    pub fn ration_card_number(&self) -> &RationCardNumber {
        &self.ration_card_number
    }

    /// Household size.
    pub fn family_size(&self) -> FamilySize {
        self.family_size
    }
}

/// Fields accepted when creating a beneficiary; the store generates the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeneficiary {
    pub user_id: UserId,
    pub shop_id: ShopId,
    pub ration_card_number: RationCardNumber,
    pub family_size: FamilySize,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", BeneficiaryValidationError::EmptyRationCardNumber)]
    #[case("RC 123", BeneficiaryValidationError::InvalidRationCardNumber)]
    #[case("RC-123", BeneficiaryValidationError::InvalidRationCardNumber)]
    fn invalid_card_numbers_are_rejected(
        #[case] raw: &str,
        #[case] expected: BeneficiaryValidationError,
    ) {
        let err = RationCardNumber::new(raw).expect_err("invalid card number");
        assert_eq!(err, expected);
    }

    #[test]
    fn card_numbers_accept_alphanumerics() {
        let number = RationCardNumber::new("RC123456").expect("valid card number");
        assert_eq!(number.as_ref(), "RC123456");
    }

    #[test]
    fn family_size_rejects_zero() {
        assert_eq!(
            FamilySize::new(0).expect_err("zero family"),
            BeneficiaryValidationError::ZeroFamilySize
        );
        assert_eq!(FamilySize::new(4).expect("valid").get(), 4);
    }
}
