//! DTOs for decoding Google Maps Geocoding responses.

use serde::Deserialize;

/// Status value the provider uses for a successful lookup.
pub(super) const STATUS_OK: &str = "OK";
/// Status value the provider uses when nothing matched.
pub(super) const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponseDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<GeocodeResultDto>,
    pub(super) error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResultDto {
    pub(super) geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeometryDto {
    pub(super) location: LatLngDto,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(super) struct LatLngDto {
    pub(super) lat: f64,
    pub(super) lng: f64,
}

impl GeocodeResponseDto {
    /// Location of the first match, if any.
    pub(super) fn first_location(&self) -> Option<LatLngDto> {
        self.results.first().map(|result| result.geometry.location)
    }
}
