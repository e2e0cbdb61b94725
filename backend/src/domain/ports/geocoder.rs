//! Driven port resolving free-form addresses to coordinates.

use async_trait::async_trait;

use crate::domain::{Address, Coordinates};

use super::define_port_error;

define_port_error! {
    /// Errors raised by geocoding adapters.
    pub enum GeocodeError {
        /// The provider found no match for the address.
        NoResults { address: String } => "no coordinates found for address: {address}",
        /// The provider did not answer in time.
        Timeout { message: String } => "geocoding request timed out: {message}",
        /// The request could not be delivered or the response not read.
        Transport { message: String } => "geocoding transport failed: {message}",
        /// The provider answered with an error status.
        Provider { status: String } => "geocoding provider rejected request: {status}",
        /// The provider response did not match the expected shape.
        Decode { message: String } => "geocoding response could not be decoded: {message}",
    }
}

/// Resolve an address to a single coordinate pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Return the best match for `address`.
    async fn geocode(&self, address: &Address) -> Result<Coordinates, GeocodeError>;
}

/// Geocoder answering every lookup with the Empire State Building.
///
/// Used when no provider API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGeocoder;

impl FixtureGeocoder {
    /// Latitude returned for every lookup.
    pub const LAT: f64 = 40.748_447_4;
    /// Longitude returned for every lookup.
    pub const LNG: f64 = -73.987_151_6;
}

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn geocode(&self, _address: &Address) -> Result<Coordinates, GeocodeError> {
        Coordinates::new(Self::LAT, Self::LNG)
            .map_err(|err| GeocodeError::decode(format!("invalid fixture coordinates: {err}")))
    }
}
