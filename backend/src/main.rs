//! Backend entry-point: loads settings, wires storage and geocoding, and
//! serves the places REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use places_backend::inbound::http::health::HealthState;
use places_backend::outbound::geocoding::GoogleMapsGeocoder;
use places_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url).await?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await?;
        config = config.with_db_pool(pool);
    }

    if let Some(api_key) = settings.geocoding_api_key.as_deref() {
        let geocoder = GoogleMapsGeocoder::new(
            settings.geocoding_endpoint()?,
            api_key,
            settings.geocoding_timeout(),
        )
        .wrap_err("failed to build geocoding client")?;
        config = config.with_geocoder(geocoder);
    }

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}
