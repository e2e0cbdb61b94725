//! Reqwest-backed Google Maps geocoder.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain coordinates. The API key
//! travels in the query string, so reqwest errors are stripped of their URL
//! before they are reported.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{GeocodeResponseDto, STATUS_OK, STATUS_ZERO_RESULTS};
use crate::domain::ports::{GeocodeError, Geocoder};
use crate::domain::{Address, Coordinates};

/// Public Google Maps Geocoding endpoint.
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoder that performs HTTP GET requests against one endpoint.
pub struct GoogleMapsGeocoder {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl GoogleMapsGeocoder {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    fn request_url(&self, address: &Address) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address.as_str())
            .append_pair("key", self.api_key.as_str());
        url
    }
}

impl std::fmt::Debug for GoogleMapsGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsGeocoder")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Geocoder for GoogleMapsGeocoder {
    async fn geocode(&self, address: &Address) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(self.request_url(address))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_coordinates(address, &body)
    }
}

fn parse_coordinates(address: &Address, body: &[u8]) -> Result<Coordinates, GeocodeError> {
    let decoded: GeocodeResponseDto = serde_json::from_slice(body).map_err(|error| {
        GeocodeError::decode(format!("invalid geocoding JSON payload: {error}"))
    })?;

    if decoded.status == STATUS_ZERO_RESULTS {
        return Err(GeocodeError::no_results(address.as_str()));
    }
    if decoded.status != STATUS_OK {
        let status = match decoded.error_message.as_deref() {
            Some(detail) => format!("{}: {detail}", decoded.status),
            None => decoded.status.clone(),
        };
        return Err(GeocodeError::provider(status));
    }

    let location = decoded
        .first_location()
        .ok_or_else(|| GeocodeError::no_results(address.as_str()))?;
    Coordinates::new(location.lat, location.lng)
        .map_err(|error| GeocodeError::decode(format!("provider returned {error}")))
}

fn map_transport_error(error: reqwest::Error) -> GeocodeError {
    let error = error.without_url();
    if error.is_timeout() {
        GeocodeError::timeout(error.to_string())
    } else {
        GeocodeError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> GeocodeError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GeocodeError::timeout(format!("status {}", status.as_u16()))
        }
        _ => GeocodeError::provider(format!("HTTP {}", status.as_u16())),
    }
}
