//! Server construction and middleware wiring.

mod settings;

pub use settings::ServerSettings;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::session::SESSION_COOKIE_NAME;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{beneficiaries, shops, stock, users};
use backend::outbound::memory::MemoryStore;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
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
        .service(beneficiaries::create_beneficiary);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and settings.
///
/// Builds the in-memory store (seeded unless disabled), binds the socket, and
/// marks the health state ready once binding succeeds.
///
/// # Errors
/// Propagates [`std::io::Error`] when the settings are unusable or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let key = settings.session_key()?;
    let bind_addr = settings.bind_addr()?;
    let cookie_secure = settings.cookie_secure;

    let clock = Arc::new(DefaultClock);
    let store = if settings.seed_enabled {
        MemoryStore::seeded(clock)
    } else {
        info!("seeding disabled; starting with an empty store");
        MemoryStore::new(clock)
    };
    let http_state = web::Data::new(HttpState::from_store(Arc::new(store)));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server bound");
    health_state.mark_ready();
    Ok(server)
}
