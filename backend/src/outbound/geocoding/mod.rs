//! Geocoding outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `Geocoder` port
//! over the Google Maps Geocoding API.

mod dto;
mod google_maps;

pub use google_maps::{DEFAULT_GEOCODING_ENDPOINT, GoogleMapsGeocoder};
