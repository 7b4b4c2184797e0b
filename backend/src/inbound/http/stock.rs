//! Stock API handlers.
//!
//! ```text
//! GET /api/v1/stock
//! GET /api/v1/stock/{shop_id}
//! PUT /api/v1/stock/{shop_id}/{item_type} {"quantity":200}
//! ```
//!
//! Stock writes are where the role model bites: admins may write any shop's
//! rows, shop managers only their own shop's, and beneficiaries none at all.

use std::str::FromStr;

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, ItemType, Role, ShopId, StockItem, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, require_admin};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::shops::parse_shop_id;
use crate::inbound::http::state::HttpState;

/// Stock row representation returned to clients.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub id: String,
    pub shop_id: String,
    pub item_type: ItemType,
    pub quantity: u32,
    pub unit: String,
    /// RFC 3339 timestamp of the most recent write.
    pub last_updated: String,
}

impl From<&StockItem> for StockResponse {
    fn from(item: &StockItem) -> Self {
        Self {
            id: item.id().to_string(),
            shop_id: item.shop_id().to_string(),
            item_type: item.item_type(),
            quantity: item.quantity(),
            unit: item.unit().to_owned(),
            last_updated: item.last_updated().to_rfc3339(),
        }
    }
}

/// Request body for `PUT /api/v1/stock/{shop_id}/{item_type}`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    pub quantity: u32,
}

fn parse_item_type(raw: &str) -> Result<ItemType, Error> {
    ItemType::from_str(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "item_type", "code": "unknown_item_type" }))
    })
}

/// Shop managers may only touch the shop their account is bound to.
fn authorize_stock_write(user: &User, shop_id: &ShopId) -> Result<(), Error> {
    match user.role() {
        Role::Admin => Ok(()),
        Role::Shop if user.shop_id() == Some(shop_id) => Ok(()),
        Role::Shop => Err(Error::forbidden("shop managers may only update their own shop")),
        Role::Beneficiary => Err(Error::forbidden("beneficiaries may not update stock")),
    }
}

/// List every stock row across all shops (admin only).
#[utoipa::path(
    get,
    path = "/api/v1/stock",
    responses(
        (status = 200, description = "All stock rows", body = [StockResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stock"],
    operation_id = "listAllStock"
)]
#[get("/stock")]
pub async fn list_all_stock(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<StockResponse>>> {
    let caller = current_user(&state, &session).await?;
    require_admin(&caller)?;
    let rows = state.stock.list_all().await.map_err(Error::from)?;
    Ok(web::Json(rows.iter().map(StockResponse::from).collect()))
}

/// List the stock rows for one shop.
#[utoipa::path(
    get,
    path = "/api/v1/stock/{shop_id}",
    params(("shop_id" = String, Path, description = "Shop identifier")),
    responses(
        (status = 200, description = "Stock rows for the shop", body = [StockResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Shop not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stock"],
    operation_id = "listShopStock"
)]
#[get("/stock/{shop_id}")]
pub async fn list_shop_stock(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StockResponse>>> {
    session.require_login()?;
    let shop_id = parse_shop_id(&path.into_inner())?;
    ensure_shop_exists(&state, &shop_id).await?;
    let rows = state
        .stock
        .list_by_shop(&shop_id)
        .await
        .map_err(Error::from)?;
    Ok(web::Json(rows.iter().map(StockResponse::from).collect()))
}

/// Create or update the stock row for one (shop, item) pair.
///
/// The measurement unit is derived from the item type here; the store
/// persists whatever it is handed.
#[utoipa::path(
    put,
    path = "/api/v1/stock/{shop_id}/{item_type}",
    params(
        ("shop_id" = String, Path, description = "Shop identifier"),
        ("item_type" = String, Path, description = "rice, wheat, sugar, or kerosene")
    ),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Resulting stock row", body = StockResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Shop not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stock"],
    operation_id = "updateStock"
)]
#[put("/stock/{shop_id}/{item_type}")]
pub async fn update_stock(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateStockRequest>,
) -> ApiResult<web::Json<StockResponse>> {
    let caller = current_user(&state, &session).await?;
    let (raw_shop_id, raw_item_type) = path.into_inner();
    let shop_id = parse_shop_id(&raw_shop_id)?;
    let item_type = parse_item_type(&raw_item_type)?;
    authorize_stock_write(&caller, &shop_id)?;
    ensure_shop_exists(&state, &shop_id).await?;

    let unit = item_type.default_unit();
    let row = state
        .stock
        .upsert(shop_id, item_type, payload.quantity, unit)
        .await
        .map_err(Error::from)?;
    Ok(web::Json(StockResponse::from(&row)))
}

async fn ensure_shop_exists(state: &HttpState, shop_id: &ShopId) -> Result<(), Error> {
    state
        .shops
        .find_by_id(shop_id)
        .await
        .map_err(Error::from)?
        .map(|_| ())
        .ok_or_else(|| Error::not_found("shop not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, NewUser, PasswordHash, UserId};
    use rstest::rstest;

    fn user(role: Role, shop: Option<&str>) -> User {
        let shop_id = shop.map(|id| ShopId::new(id).expect("fixture shop id"));
        let fields = NewUser::try_from_parts(
            "t@example.com",
            PasswordHash::hash("pw"),
            role,
            "Tester",
            shop_id,
        )
        .expect("fixture user");
        User::new(UserId::random(), fields)
    }

    #[rstest]
    #[case(Role::Admin, None, "shop2", true)]
    #[case(Role::Shop, Some("shop1"), "shop1", true)]
    #[case(Role::Shop, Some("shop1"), "shop2", false)]
    #[case(Role::Shop, None, "shop1", false)]
    #[case(Role::Beneficiary, None, "shop1", false)]
    fn stock_writes_respect_the_role_model(
        #[case] role: Role,
        #[case] own_shop: Option<&str>,
        #[case] target: &str,
        #[case] allowed: bool,
    ) {
        let target = ShopId::new(target).expect("fixture shop id");
        let result = authorize_stock_write(&user(role, own_shop), &target);
        if allowed {
            assert!(result.is_ok());
        } else {
            let error = result.expect_err("write should be rejected");
            assert_eq!(error.code(), ErrorCode::Forbidden);
        }
    }

    #[test]
    fn unknown_item_types_become_bad_requests() {
        let error = parse_item_type("salt").expect_err("unknown item");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
