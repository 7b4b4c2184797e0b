//! Backend entry-point: wires the REST API over the in-memory store.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use server::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let health_state = web::Data::new(HealthState::new());
    let srv = server::create_server(health_state, &settings)?;
    srv.await
}
