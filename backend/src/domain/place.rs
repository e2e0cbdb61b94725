//! Place data model.
//!
//! A place always names exactly one creator. Its coordinates come from the
//! geocoder, never from the client.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use super::UserId;

/// Minimum description length in characters.
pub const PLACE_DESCRIPTION_MIN: usize = 5;

/// Image assigned to places created without one.
pub const DEFAULT_PLACE_IMAGE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/1/10/Empire_State_Building_%28aerial_view%29.jpg";

/// Validation errors raised while building place values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceValidationError {
    #[error("place id must be a valid UUID")]
    InvalidId,
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("address must not be empty")]
    EmptyAddress,
    #[error("latitude must be a finite value between -90 and 90, got {value}")]
    LatitudeOutOfRange { value: f64 },
    #[error("longitude must be a finite value between -180 and 180, got {value}")]
    LongitudeOutOfRange { value: f64 },
}

/// Stable place identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(Uuid);

impl PlaceId {
    /// Validate and construct a [`PlaceId`] from textual input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PlaceValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| PlaceValidationError::InvalidId)
    }

    /// Generate a new random [`PlaceId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty place title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceTitle(String);

impl PlaceTitle {
    /// Validate and construct a [`PlaceTitle`].
    pub fn new(title: impl AsRef<str>) -> Result<Self, PlaceValidationError> {
        let title = title.as_ref();
        if title.trim().is_empty() {
            return Err(PlaceValidationError::EmptyTitle);
        }
        Ok(Self(title.to_owned()))
    }
}

impl PlaceTitle {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PlaceTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Place description of at least [`PLACE_DESCRIPTION_MIN`] characters,
/// stored exactly as given. Whitespace counts towards the length, but an
/// all-whitespace description is rejected.
///
/// # Examples
/// ```
/// use places_backend::domain::PlaceDescription;
///
/// assert!(PlaceDescription::new("views").is_ok());
/// assert!(PlaceDescription::new("view").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDescription(String);

impl PlaceDescription {
    /// Validate and construct a [`PlaceDescription`].
    pub fn new(description: impl AsRef<str>) -> Result<Self, PlaceValidationError> {
        let description = description.as_ref();
        let blank = description.trim().is_empty();
        if blank || description.chars().count() < PLACE_DESCRIPTION_MIN {
            return Err(PlaceValidationError::DescriptionTooShort {
                min: PLACE_DESCRIPTION_MIN,
            });
        }
        Ok(Self(description.to_owned()))
    }
}

impl PlaceDescription {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PlaceDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Free-form postal address handed to the geocoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    /// Validate and construct an [`Address`].
    pub fn new(address: impl AsRef<str>) -> Result<Self, PlaceValidationError> {
        let address = address.as_ref();
        if address.trim().is_empty() {
            return Err(PlaceValidationError::EmptyAddress);
        }
        Ok(Self(address.to_owned()))
    }
}

impl Address {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS84 coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Validate and construct coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, PlaceValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(PlaceValidationError::LatitudeOutOfRange { value: lat });
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(PlaceValidationError::LongitudeOutOfRange { value: lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

/// Validated client input for a new place, before geocoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDraft {
    pub title: PlaceTitle,
    pub description: PlaceDescription,
    pub address: Address,
}

impl PlaceDraft {
    /// Validate raw client fields in declaration order.
    pub fn try_from_parts(
        title: &str,
        description: &str,
        address: &str,
    ) -> Result<Self, PlaceValidationError> {
        Ok(Self {
            title: PlaceTitle::new(title)?,
            description: PlaceDescription::new(description)?,
            address: Address::new(address)?,
        })
    }
}

/// A stored place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    id: PlaceId,
    title: PlaceTitle,
    description: PlaceDescription,
    address: Address,
    location: Coordinates,
    image: String,
    creator: UserId,
}

impl Place {
    /// Assemble a place from a draft and its resolved coordinates.
    #[must_use]
    pub fn new(
        id: PlaceId,
        draft: PlaceDraft,
        location: Coordinates,
        image: impl Into<String>,
        creator: UserId,
    ) -> Self {
        let PlaceDraft {
            title,
            description,
            address,
        } = draft;
        Self {
            id,
            title,
            description,
            address,
            location,
            image: image.into(),
            creator,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &PlaceTitle {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &PlaceDescription {
        &self.description
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn location(&self) -> Coordinates {
        self.location
    }

    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Owner of the place.
    #[must_use]
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Replace the editable text fields.
    pub fn revise(&mut self, title: PlaceTitle, description: PlaceDescription) {
        self.title = title;
        self.description = description;
    }
}

#[cfg(test)]
mod tests;
