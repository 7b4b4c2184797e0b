//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all HTTP endpoint paths from the inbound layer, the
//! request/response schemas, and the session cookie security scheme. The
//! generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, ItemType, Role};
use crate::inbound::http::beneficiaries::{BeneficiaryResponse, CreateBeneficiaryRequest};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::shops::{CreateShopRequest, ShopResponse};
use crate::inbound::http::stock::{StockResponse, UpdateStockRequest};
use crate::inbound::http::users::{CreateUserRequest, LoginRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ration shop backend API",
        description = "HTTP interface for the public distribution system: \
                       users, shops, beneficiaries, and per-shop stock."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::users::create_user,
        crate::inbound::http::shops::list_shops,
        crate::inbound::http::shops::get_shop,
        crate::inbound::http::shops::create_shop,
        crate::inbound::http::stock::list_all_stock,
        crate::inbound::http::stock::list_shop_stock,
        crate::inbound::http::stock::update_stock,
        crate::inbound::http::beneficiaries::me,
        crate::inbound::http::beneficiaries::create_beneficiary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        ItemType,
        LoginRequest,
        UserResponse,
        CreateUserRequest,
        ShopResponse,
        CreateShopRequest,
        StockResponse,
        UpdateStockRequest,
        BeneficiaryResponse,
        CreateBeneficiaryRequest,
    )),
    tags(
        (name = "users", description = "Authentication and user management"),
        (name = "shops", description = "Ration shop registry"),
        (name = "stock", description = "Per-shop commodity stock"),
        (name = "beneficiaries", description = "Ration card holders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
