//! Integration tests for the REST API over a seeded in-memory store.
//!
//! Each test builds a full Actix app with session middleware and the trace
//! middleware, logs in through `POST /api/v1/login`, and drives the endpoints
//! with the issued session cookie.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use backend::Trace;
use backend::inbound::http::session::SESSION_COOKIE_NAME;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{beneficiaries, shops, stock, users};
use backend::outbound::memory::MemoryStore;

fn seeded_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(MemoryStore::seeded(Arc::new(DefaultClock)));
    let state = web::Data::new(HttpState::from_store(store));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build();

    App::new().app_data(state).wrap(Trace).service(
        web::scope("/api/v1")
            .wrap(session)
            .service(users::login)
            .service(users::logout)
            .service(users::me)
            .service(users::create_user)
            .service(shops::list_shops)
            .service(shops::get_shop)
            .service(shops::create_shop)
            .service(stock::list_all_stock)
            .service(stock::list_shop_stock)
            .service(stock::update_stock)
            .service(beneficiaries::me)
            .service(beneficiaries::create_beneficiary),
    )
}

async fn login<S, B>(app: &S, email: &str, password: &str, role: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password, "role": role }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
        .expect("session cookie issued")
}

async fn body_json(response: ServiceResponse<impl actix_web::body::MessageBody>) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn login_returns_the_user_without_credential_material() {
    let app = test::init_service(seeded_app()).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({
            "email": "shop@mainstreet.com",
            "password": "shop123",
            "role": "shop"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));

    let body = body_json(response).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some("shop1"));
    assert_eq!(body.get("role").and_then(Value::as_str), Some("shop"));
    assert_eq!(body.get("shopId").and_then(Value::as_str), Some("shop1"));
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn login_rejects_a_wrong_password() {
    let app = test::init_service(seeded_app()).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "admin@pds.gov", "password": "nope", "role": "admin" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn login_rejects_an_unknown_role_before_authentication() {
    let app = test::init_service(seeded_app()).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "admin@pds.gov", "password": "admin123", "role": "root" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[actix_web::test]
async fn login_rejects_a_role_mismatch() {
    // Correct credentials, but registered under a different role.
    let app = test::init_service(seeded_app()).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "admin@pds.gov", "password": "admin123", "role": "shop" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let app = test::init_service(seeded_app()).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn current_user_reflects_the_session() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "john@example.com", "user123", "beneficiary").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some("ben1"));
    assert_eq!(body.get("name").and_then(Value::as_str), Some("John Doe"));
}

#[actix_web::test]
async fn logout_invalidates_the_session() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "john@example.com", "user123", "beneficiary").await;

    let logout = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = logout
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
        .expect("purged session cookie sent back");

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn shops_list_returns_the_seeded_registry_in_order() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/shops")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let shops = body.as_array().expect("array body");
    let ids: Vec<&str> = shops
        .iter()
        .map(|shop| shop.get("id").and_then(Value::as_str).expect("id"))
        .collect();
    assert_eq!(ids, ["shop1", "shop2", "shop3"]);
}

#[actix_web::test]
async fn missing_shops_are_not_found() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/shops/shop9")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admins_can_register_shops() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/shops")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "River Road Shop", "address": "9 River Road" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created.get("contactNumber").is_none());

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/shops")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("array").len(), 4);
}

#[actix_web::test]
async fn shop_stock_rows_use_the_camel_case_shape() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "shop@mainstreet.com", "shop123", "shop").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/stock/shop1")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 4);

    let rice = &rows[0];
    assert_eq!(rice.get("shopId").and_then(Value::as_str), Some("shop1"));
    assert_eq!(rice.get("itemType").and_then(Value::as_str), Some("rice"));
    assert_eq!(rice.get("quantity").and_then(Value::as_u64), Some(450));
    assert_eq!(rice.get("unit").and_then(Value::as_str), Some("kg"));
    assert!(rice.get("lastUpdated").and_then(Value::as_str).is_some());
}

#[actix_web::test]
async fn the_full_stock_listing_is_admin_only() {
    let app = test::init_service(seeded_app()).await;

    let admin = login(&app, "admin@pds.gov", "admin123", "admin").await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/stock")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("array").len(), 12);

    let manager = login(&app, "shop@mainstreet.com", "shop123", "shop").await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/stock")
            .cookie(manager)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn shop_managers_update_their_own_stock() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "shop@mainstreet.com", "shop123", "shop").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop1/kerosene")
            .cookie(cookie)
            .set_json(json!({ "quantity": 80 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.get("quantity").and_then(Value::as_u64), Some(80));
    assert_eq!(body.get("unit").and_then(Value::as_str), Some("L"));
}

#[actix_web::test]
async fn shop_managers_cannot_update_other_shops() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "shop@mainstreet.com", "shop123", "shop").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop2/rice")
            .cookie(cookie)
            .set_json(json!({ "quantity": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn beneficiaries_cannot_update_stock() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "john@example.com", "user123", "beneficiary").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop1/rice")
            .cookie(cookie)
            .set_json(json!({ "quantity": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admins_update_any_shop_and_restock_persists() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop3/rice")
            .cookie(cookie.clone())
            .set_json(json!({ "quantity": 200 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/stock/shop3")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_json(response).await;
    let rice = body
        .as_array()
        .expect("array")
        .iter()
        .find(|row| row.get("itemType").and_then(Value::as_str) == Some("rice"))
        .cloned()
        .expect("rice row");
    assert_eq!(rice.get("quantity").and_then(Value::as_u64), Some(200));
}

#[actix_web::test]
async fn negative_stock_quantities_are_unparseable() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop1/rice")
            .cookie(cookie)
            .set_json(json!({ "quantity": -5 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn stock_updates_for_unknown_shops_are_not_found() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/stock/shop9/rice")
            .cookie(cookie)
            .set_json(json!({ "quantity": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn beneficiary_lookup_follows_the_session_user() {
    let app = test::init_service(seeded_app()).await;

    let cookie = login(&app, "john@example.com", "user123", "beneficiary").await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/beneficiaries/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body.get("rationCardNumber").and_then(Value::as_str),
        Some("RC123456")
    );
    assert_eq!(body.get("familySize").and_then(Value::as_u64), Some(4));

    // The admin account has no beneficiary record.
    let admin = login(&app, "admin@pds.gov", "admin123", "admin").await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/beneficiaries/me")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admins_register_users_and_duplicates_conflict() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let payload = json!({
        "email": "clerk@pds.gov",
        "password": "clerk123",
        "role": "shop",
        "name": "Clerk",
        "shopId": "shop2"
    });
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie.clone())
            .set_json(payload.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created.get("shopId").and_then(Value::as_str), Some("shop2"));
    assert!(created.get("passwordHash").is_none());

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn user_registration_is_admin_only() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "shop@mainstreet.com", "shop123", "shop").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(json!({
                "email": "x@pds.gov",
                "password": "x12345",
                "role": "beneficiary",
                "name": "X"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn beneficiary_registration_checks_references() {
    let app = test::init_service(seeded_app()).await;
    let cookie = login(&app, "admin@pds.gov", "admin123", "admin").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/beneficiaries")
            .cookie(cookie.clone())
            .set_json(json!({
                "userId": "ghost",
                "shopId": "shop1",
                "rationCardNumber": "RC999999",
                "familySize": 2
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/beneficiaries")
            .cookie(cookie)
            .set_json(json!({
                "userId": "admin1",
                "shopId": "shop1",
                "rationCardNumber": "RC999999",
                "familySize": 2
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn error_responses_use_the_shared_envelope() {
    let app = test::init_service(seeded_app()).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert!(response.headers().contains_key("trace-id"));
    let body = body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
    assert!(body.get("message").and_then(Value::as_str).is_some());
}
