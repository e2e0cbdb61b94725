//! Read-side place service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::place_linkage_service::PLACE_NOT_FOUND;
use crate::domain::ports::{PlaceQuery, PlaceRepository};
use crate::domain::repository_errors::map_place_persistence_error;
use crate::domain::{Error, Place, PlaceId, UserId};

pub(crate) const USER_PLACES_NOT_FOUND: &str = "Could not find places for the provided user id.";

/// Place query service backed by a [`PlaceRepository`].
#[derive(Clone)]
pub struct PlaceQueryService<P> {
    places: Arc<P>,
}

impl<P> PlaceQueryService<P> {
    /// Create a query service over `places`.
    pub fn new(places: Arc<P>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl<P> PlaceQuery for PlaceQueryService<P>
where
    P: PlaceRepository,
{
    async fn get_place(&self, id: &PlaceId) -> Result<Place, Error> {
        self.places
            .find_by_id(id)
            .await
            .map_err(map_place_persistence_error)?
            .ok_or_else(|| Error::not_found(PLACE_NOT_FOUND))
    }

    async fn places_for_user(&self, owner: &UserId) -> Result<Vec<Place>, Error> {
        let places = self
            .places
            .find_by_creator(owner)
            .await
            .map_err(map_place_persistence_error)?;
        if places.is_empty() {
            return Err(Error::not_found(USER_PLACES_NOT_FOUND));
        }
        Ok(places)
    }
}
