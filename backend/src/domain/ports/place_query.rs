//! Driving port for place reads.

use async_trait::async_trait;

use crate::domain::{Error, Place, PlaceId, UserId};

/// Domain use-case port for fetching places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceQuery: Send + Sync {
    /// Fetch one place. Fails with `NotFound` when it does not exist.
    async fn get_place(&self, id: &PlaceId) -> Result<Place, Error>;

    /// Fetch the places owned by `owner`. An owner without places yields
    /// `NotFound`.
    async fn places_for_user(&self, owner: &UserId) -> Result<Vec<Place>, Error>;
}
