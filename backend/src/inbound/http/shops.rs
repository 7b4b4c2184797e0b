//! Shops API handlers.
//!
//! ```text
//! GET /api/v1/shops
//! GET /api/v1/shops/{shop_id}
//! POST /api/v1/shops
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, NewShop, Shop, ShopId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, require_admin};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Shop representation returned to clients.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

impl From<&Shop> for ShopResponse {
    fn from(shop: &Shop) -> Self {
        Self {
            id: shop.id().to_string(),
            name: shop.name().to_owned(),
            address: shop.address().to_owned(),
            contact_number: shop.contact_number().map(ToOwned::to_owned),
        }
    }
}

/// Request body for `POST /api/v1/shops`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// List all shops in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/shops",
    responses(
        (status = 200, description = "Shops", body = [ShopResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["shops"],
    operation_id = "listShops"
)]
#[get("/shops")]
pub async fn list_shops(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ShopResponse>>> {
    session.require_login()?;
    let shops = state.shops.list_all().await.map_err(Error::from)?;
    Ok(web::Json(shops.iter().map(ShopResponse::from).collect()))
}

/// Fetch one shop by id.
#[utoipa::path(
    get,
    path = "/api/v1/shops/{shop_id}",
    params(("shop_id" = String, Path, description = "Shop identifier")),
    responses(
        (status = 200, description = "Shop", body = ShopResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Shop not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["shops"],
    operation_id = "getShop"
)]
#[get("/shops/{shop_id}")]
pub async fn get_shop(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShopResponse>> {
    session.require_login()?;
    let shop_id = parse_shop_id(&path.into_inner())?;
    let shop = state
        .shops
        .find_by_id(&shop_id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::not_found("shop not found"))?;
    Ok(web::Json(ShopResponse::from(&shop)))
}

/// Register a new shop (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop created", body = ShopResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["shops"],
    operation_id = "createShop"
)]
#[post("/shops")]
pub async fn create_shop(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateShopRequest>,
) -> ApiResult<HttpResponse> {
    let caller = current_user(&state, &session).await?;
    require_admin(&caller)?;

    let payload = payload.into_inner();
    let fields = NewShop::try_from_parts(payload.name, payload.address, payload.contact_number)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let shop = state.shops.create(fields).await.map_err(Error::from)?;
    Ok(HttpResponse::Created().json(ShopResponse::from(&shop)))
}

pub(super) fn parse_shop_id(raw: &str) -> Result<ShopId, Error> {
    ShopId::new(raw).map_err(|err| {
        Error::invalid_request(format!("invalid shop id: {err}"))
            .with_details(json!({ "field": "shop_id", "code": "invalid_id" }))
    })
}
