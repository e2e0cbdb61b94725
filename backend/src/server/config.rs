//! HTTP server configuration object and application settings.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use places_backend::outbound::geocoding::{DEFAULT_GEOCODING_ENDPOINT, GoogleMapsGeocoder};
use places_backend::outbound::persistence::DbPool;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;

/// Settings that cannot be turned into a runnable configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid host {host:?}: {source}")]
    Host {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// `geocoding_endpoint` is not a URL.
    #[error("invalid geocoding endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

/// Process settings loaded from `PLACES_*` environment variables, the
/// configuration file, and command-line flags.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLACES")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Google Maps API key. The fixture geocoder is used when unset.
    pub geocoding_api_key: Option<String>,
    /// Override for the geocoding endpoint.
    pub geocoding_endpoint: Option<String>,
    /// Geocoding request timeout in seconds.
    pub geocoding_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_max_connections", &self.db_max_connections)
            .field(
                "geocoding_api_key",
                &self.geocoding_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("geocoding_endpoint", &self.geocoding_endpoint)
            .field("geocoding_timeout_secs", &self.geocoding_timeout_secs)
            .finish()
    }
}

impl AppSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`SettingsError::Host`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip = host.parse::<IpAddr>().map_err(|source| SettingsError::Host {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Maximum pooled connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Geocoding endpoint, defaulting to the public Google Maps API.
    ///
    /// # Errors
    /// Returns [`SettingsError::Endpoint`] when the override is not a URL.
    pub fn geocoding_endpoint(&self) -> Result<Url, SettingsError> {
        let endpoint = self
            .geocoding_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEOCODING_ENDPOINT);
        Url::parse(endpoint).map_err(|source| SettingsError::Endpoint {
            endpoint: endpoint.to_owned(),
            source,
        })
    }

    /// Geocoding request timeout.
    pub fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(
            self.geocoding_timeout_secs
                .unwrap_or(DEFAULT_GEOCODING_TIMEOUT_SECS),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) geocoder: Option<GoogleMapsGeocoder>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage and the fixture
    /// geocoder.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            geocoder: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Resolve addresses through Google Maps instead of the fixture.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: GoogleMapsGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
