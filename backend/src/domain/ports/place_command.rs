//! Driving port for place mutations.
//!
//! Creation and deletion keep the owner's back-reference list in step with
//! the place itself; implementations must run both writes as one atomic
//! unit.

use async_trait::async_trait;

use crate::domain::{Error, Place, PlaceDescription, PlaceDraft, PlaceId, PlaceTitle, UserId};

/// Validated input for creating a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaceRequest {
    pub draft: PlaceDraft,
    pub creator: UserId,
}

/// Validated input for editing a place's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlaceRequest {
    pub id: PlaceId,
    pub title: PlaceTitle,
    pub description: PlaceDescription,
}

/// Domain use-case port for creating, editing, and deleting places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceCommand: Send + Sync {
    /// Geocode, persist, and link a new place to its creator.
    async fn create_place(&self, request: CreatePlaceRequest) -> Result<Place, Error>;

    /// Replace a place's title and description.
    async fn update_place(&self, request: UpdatePlaceRequest) -> Result<Place, Error>;

    /// Unlink a place from its owner and delete it.
    async fn delete_place(&self, id: &PlaceId) -> Result<(), Error>;
}
