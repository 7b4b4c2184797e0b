//! Fixture data applied once at store construction.
//!
//! The rows mirror the reference deployment: three shops, one user per role,
//! one beneficiary, and the full 3 × 4 grid of stock rows. Fixture passwords
//! are hashed at seed time; the plaintext values exist only in this file.

use mockable::Clock;
use tracing::info;

use crate::domain::{
    Beneficiary, BeneficiaryId, FamilySize, ItemType, NewBeneficiary, NewShop, NewUser,
    PasswordHash, RationCardNumber, Role, Shop, ShopId, StockItem, StockItemId, StockKey, User,
    UserId,
};

use super::Tables;

const SHOPS: [(&str, &str, &str, &str); 3] = [
    ("shop1", "Main Street Shop", "123 Main Street", "555-0101"),
    (
        "shop2",
        "Central Market Shop",
        "456 Central Avenue",
        "555-0102",
    ),
    ("shop3", "East Side Shop", "789 East Road", "555-0103"),
];

const USERS: [(&str, &str, &str, Role, &str, Option<&str>); 3] = [
    (
        "admin1",
        "admin@pds.gov",
        "admin123",
        Role::Admin,
        "Admin User",
        None,
    ),
    (
        "shop1",
        "shop@mainstreet.com",
        "shop123",
        Role::Shop,
        "Shop Manager",
        Some("shop1"),
    ),
    (
        "ben1",
        "john@example.com",
        "user123",
        Role::Beneficiary,
        "John Doe",
        None,
    ),
];

const STOCK: [(&str, ItemType, u32, &str); 12] = [
    ("shop1", ItemType::Rice, 450, "kg"),
    ("shop1", ItemType::Wheat, 125, "kg"),
    ("shop1", ItemType::Sugar, 280, "kg"),
    ("shop1", ItemType::Kerosene, 0, "L"),
    ("shop2", ItemType::Rice, 520, "kg"),
    ("shop2", ItemType::Wheat, 380, "kg"),
    ("shop2", ItemType::Sugar, 195, "kg"),
    ("shop2", ItemType::Kerosene, 150, "L"),
    ("shop3", ItemType::Rice, 0, "kg"),
    ("shop3", ItemType::Wheat, 0, "kg"),
    ("shop3", ItemType::Sugar, 45, "kg"),
    ("shop3", ItemType::Kerosene, 0, "L"),
];

/// Populate empty tables with the fixture rows.
pub(super) fn apply(tables: &mut Tables, clock: &dyn Clock) {
    for (id, name, address, contact) in SHOPS {
        let shop = Shop::new(
            fixture(ShopId::new(id)),
            fixture(NewShop::try_from_parts(
                name,
                address,
                Some(contact.to_owned()),
            )),
        );
        tables.shops.insert(shop.id().clone(), shop);
    }

    for (id, email, password, role, name, shop_id) in USERS {
        let user = User::new(
            fixture(UserId::new(id)),
            fixture(NewUser::try_from_parts(
                email,
                PasswordHash::hash(password),
                role,
                name,
                shop_id.map(|raw| fixture(ShopId::new(raw))),
            )),
        );
        tables.users.insert(user.id().clone(), user);
    }

    let beneficiary = Beneficiary::new(
        fixture(BeneficiaryId::new("ben1")),
        NewBeneficiary {
            user_id: fixture(UserId::new("ben1")),
            shop_id: fixture(ShopId::new("shop1")),
            ration_card_number: fixture(RationCardNumber::new("RC123456")),
            family_size: fixture(FamilySize::new(4)),
        },
    );
    tables
        .beneficiaries
        .insert(beneficiary.id().clone(), beneficiary);

    let seeded_at = clock.utc();
    for (shop_id, item_type, quantity, unit) in STOCK {
        let key = StockKey::new(fixture(ShopId::new(shop_id)), item_type);
        let item = StockItem::new(StockItemId::random(), key.clone(), quantity, unit, seeded_at);
        tables.stock.insert(key, item);
    }

    info!(
        shops = tables.shops.len(),
        users = tables.users.len(),
        beneficiaries = tables.beneficiaries.len(),
        stock_rows = tables.stock.len(),
        "seeded fixture data"
    );
}

/// Unwrap a fixture constructor; the literals above are valid by inspection.
fn fixture<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|err| panic!("fixture values must satisfy validation: {err}"))
}
