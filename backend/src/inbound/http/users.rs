//! Users API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@pds.gov","password":"admin123","role":"admin"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! POST /api/v1/users
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, NewUser, PasswordHash, Role, ShopId, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, require_admin};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"admin@pds.gov","password":"admin123","role":"admin"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// User representation returned to clients; never carries the password hash.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            name: user.name().to_owned(),
            shop_id: user.shop_id().map(ToString::to_string),
        }
    }
}

/// Request body for `POST /api/v1/users`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub name: String,
    #[serde(default)]
    pub shop_id: Option<String>,
}

pub(super) fn parse_role(raw: &str) -> Result<Role, Error> {
    Role::from_str(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "role", "code": "unknown_role" }))
    })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a user for a role and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    let role = parse_role(&payload.role)?;
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials, role).await?;
    session.persist_login(&user)?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Drop the current session, ending the login.
///
/// Logging out without a session is a no-op; the endpoint always returns
/// `204 No Content`.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the user behind the current session.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user = current_user(&state, &session).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Register a new user (admin only). The password is hashed before it
/// reaches the store.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Duplicate email/role pair", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let caller = current_user(&state, &session).await?;
    require_admin(&caller)?;

    let payload = payload.into_inner();
    let role = parse_role(&payload.role)?;
    if payload.password.is_empty() {
        return Err(Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })));
    }
    let shop_id = payload
        .shop_id
        .map(ShopId::new)
        .transpose()
        .map_err(|err| {
            Error::invalid_request(format!("invalid shopId: {err}"))
                .with_details(json!({ "field": "shopId", "code": "invalid_id" }))
        })?;
    let fields = NewUser::try_from_parts(
        payload.email,
        PasswordHash::hash(&payload.password),
        role,
        payload.name,
        shop_id,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))?;

    let user = state.users.create(fields).await.map_err(Error::from)?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}
