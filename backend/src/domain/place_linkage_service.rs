//! Linkage coordinator keeping places and their owners consistent.
//!
//! Every place is listed in exactly one user's `places`, and every listed id
//! names a place created by that user. Creating and deleting a place touches
//! both documents, so each runs inside one [`StoreSession`]. Any failure
//! inside the session aborts it before the error is returned; a conflicting
//! transaction is reported, never retried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreatePlaceRequest, DocumentStore, DocumentStoreError, GeocodeError, Geocoder, PlaceCommand,
    PlaceRepository, StoreSession, UpdatePlaceRequest, UserRepository,
};
use crate::domain::repository_errors::{map_place_persistence_error, map_user_persistence_error};
use crate::domain::{DEFAULT_PLACE_IMAGE, Error, Place, PlaceId, UserId};

pub(crate) const PLACE_NOT_FOUND: &str = "Could not find a place for the provided id.";
const CREATOR_NOT_FOUND: &str = "Could not find a user for the provided id.";
const ADDRESS_NOT_FOUND: &str = "Could not find location for the specified address.";

fn place_not_found() -> Error {
    Error::not_found(PLACE_NOT_FOUND)
}

fn map_geocode_error(failure: GeocodeError) -> Error {
    warn!(error = %failure, "address lookup failed");
    Error::unprocessable_address(ADDRESS_NOT_FOUND)
}

fn map_store_error(failure: DocumentStoreError) -> Error {
    error!(error = %failure, "linked place write rolled back");
    Error::internal(format!("document store error: {failure}"))
}

/// Commit on success; otherwise abort and hand back the original failure.
async fn finish(
    mut session: Box<dyn StoreSession>,
    outcome: Result<(), DocumentStoreError>,
) -> Result<(), DocumentStoreError> {
    match outcome {
        Ok(()) => session.commit().await,
        Err(failure) => {
            if let Err(abort_error) = session.abort().await {
                warn!(error = %abort_error, "failed to abort document store session");
            }
            Err(failure)
        }
    }
}

async fn insert_and_attach(
    session: &mut dyn StoreSession,
    place: &Place,
) -> Result<(), DocumentStoreError> {
    session.insert_place(place).await?;
    session.attach_place(place.creator(), place.id()).await
}

async fn detach_and_delete(
    session: &mut dyn StoreSession,
    owner: &UserId,
    place: &PlaceId,
) -> Result<(), DocumentStoreError> {
    session.detach_place(owner, place).await?;
    session.delete_place(place).await
}

/// Place command service coordinating linked writes.
#[derive(Clone)]
pub struct PlaceLinkageService<P, U, S, G> {
    places: Arc<P>,
    users: Arc<U>,
    store: Arc<S>,
    geocoder: Arc<G>,
}

impl<P, U, S, G> PlaceLinkageService<P, U, S, G> {
    /// Create a coordinator over the given repositories, store, and geocoder.
    pub fn new(places: Arc<P>, users: Arc<U>, store: Arc<S>, geocoder: Arc<G>) -> Self {
        Self {
            places,
            users,
            store,
            geocoder,
        }
    }
}

impl<P, U, S, G> PlaceLinkageService<P, U, S, G>
where
    P: PlaceRepository,
{
    async fn load_place(&self, id: &PlaceId) -> Result<Place, Error> {
        self.places
            .find_by_id(id)
            .await
            .map_err(map_place_persistence_error)?
            .ok_or_else(place_not_found)
    }
}

#[async_trait]
impl<P, U, S, G> PlaceCommand for PlaceLinkageService<P, U, S, G>
where
    P: PlaceRepository,
    U: UserRepository,
    S: DocumentStore,
    G: Geocoder,
{
    async fn create_place(&self, request: CreatePlaceRequest) -> Result<Place, Error> {
        let CreatePlaceRequest { draft, creator } = request;

        let location = self
            .geocoder
            .geocode(&draft.address)
            .await
            .map_err(map_geocode_error)?;

        let owner = self
            .users
            .find_by_id(&creator)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(CREATOR_NOT_FOUND))?;

        let place = Place::new(
            PlaceId::random(),
            draft,
            location,
            DEFAULT_PLACE_IMAGE,
            *owner.id(),
        );

        let mut session = self.store.begin().await.map_err(map_store_error)?;
        let written = insert_and_attach(session.as_mut(), &place).await;
        finish(session, written).await.map_err(map_store_error)?;

        info!(place_id = %place.id(), user_id = %owner.id(), "created linked place");
        Ok(place)
    }

    async fn update_place(&self, request: UpdatePlaceRequest) -> Result<Place, Error> {
        let UpdatePlaceRequest {
            id,
            title,
            description,
        } = request;

        let mut place = self.load_place(&id).await?;
        place.revise(title, description);

        let saved = self
            .places
            .save(&place)
            .await
            .map_err(map_place_persistence_error)?;
        if !saved {
            return Err(place_not_found());
        }
        Ok(place)
    }

    async fn delete_place(&self, id: &PlaceId) -> Result<(), Error> {
        let place = self.load_place(id).await?;

        let owner = self
            .users
            .find_by_id(place.creator())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                error!(place_id = %id, user_id = %place.creator(), "place creator does not exist");
                Error::internal("place owner is missing")
            })?;

        let mut session = self.store.begin().await.map_err(map_store_error)?;
        let written = detach_and_delete(session.as_mut(), owner.id(), place.id()).await;
        finish(session, written).await.map_err(|failure| match failure {
            DocumentStoreError::MissingPlace { .. } => place_not_found(),
            other => map_store_error(other),
        })?;

        info!(place_id = %id, user_id = %owner.id(), "deleted linked place");
        Ok(())
    }
}

#[cfg(test)]
#[path = "place_linkage_service_tests.rs"]
mod tests;
