//! Beneficiaries API handlers.
//!
//! ```text
//! GET /api/v1/beneficiaries/me
//! POST /api/v1/beneficiaries
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Beneficiary, Error, FamilySize, NewBeneficiary, RationCardNumber, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, require_admin};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::shops::parse_shop_id;
use crate::inbound::http::state::HttpState;

/// Beneficiary representation returned to clients.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryResponse {
    pub id: String,
    pub user_id: String,
    pub shop_id: String,
    pub ration_card_number: String,
    pub family_size: u32,
}

impl From<&Beneficiary> for BeneficiaryResponse {
    fn from(beneficiary: &Beneficiary) -> Self {
        Self {
            id: beneficiary.id().to_string(),
            user_id: beneficiary.user_id().to_string(),
            shop_id: beneficiary.shop_id().to_string(),
            ration_card_number: beneficiary.ration_card_number().to_string(),
            family_size: beneficiary.family_size().get(),
        }
    }
}

/// Request body for `POST /api/v1/beneficiaries`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBeneficiaryRequest {
    pub user_id: String,
    pub shop_id: String,
    pub ration_card_number: String,
    pub family_size: u32,
}

/// Fetch the beneficiary record linked to the session user.
#[utoipa::path(
    get,
    path = "/api/v1/beneficiaries/me",
    responses(
        (status = 200, description = "Beneficiary record", body = BeneficiaryResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No beneficiary record for this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["beneficiaries"],
    operation_id = "currentBeneficiary"
)]
#[get("/beneficiaries/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BeneficiaryResponse>> {
    let (user_id, _) = session.require_login()?;
    let beneficiary = state
        .beneficiaries
        .find_by_user_id(&user_id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::not_found("no beneficiary record for this user"))?;
    Ok(web::Json(BeneficiaryResponse::from(&beneficiary)))
}

/// Register a beneficiary record (admin only).
///
/// The referenced user and shop must already exist; those checks live here
/// rather than in the store.
#[utoipa::path(
    post,
    path = "/api/v1/beneficiaries",
    request_body = CreateBeneficiaryRequest,
    responses(
        (status = 201, description = "Beneficiary created", body = BeneficiaryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["beneficiaries"],
    operation_id = "createBeneficiary"
)]
#[post("/beneficiaries")]
pub async fn create_beneficiary(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBeneficiaryRequest>,
) -> ApiResult<HttpResponse> {
    let caller = current_user(&state, &session).await?;
    require_admin(&caller)?;

    let payload = payload.into_inner();
    let user_id = UserId::new(payload.user_id).map_err(|err| {
        Error::invalid_request(format!("invalid userId: {err}"))
            .with_details(json!({ "field": "userId", "code": "invalid_id" }))
    })?;
    let shop_id = parse_shop_id(&payload.shop_id)?;
    let ration_card_number = RationCardNumber::new(payload.ration_card_number)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let family_size = FamilySize::new(payload.family_size)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    if state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(Error::from)?
        .is_none()
    {
        return Err(Error::invalid_request("referenced user does not exist")
            .with_details(json!({ "field": "userId", "code": "unknown_user" })));
    }
    if state
        .shops
        .find_by_id(&shop_id)
        .await
        .map_err(Error::from)?
        .is_none()
    {
        return Err(Error::invalid_request("referenced shop does not exist")
            .with_details(json!({ "field": "shopId", "code": "unknown_shop" })));
    }

    let fields = NewBeneficiary {
        user_id,
        shop_id,
        ration_card_number,
        family_size,
    };
    let beneficiary = state
        .beneficiaries
        .create(fields)
        .await
        .map_err(Error::from)?;
    Ok(HttpResponse::Created().json(BeneficiaryResponse::from(&beneficiary)))
}
