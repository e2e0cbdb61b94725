//! PostgreSQL-backed `PlaceRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PlacePersistenceError, PlaceRepository};
use crate::domain::{Place, PlaceId, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{PlaceRevision, PlaceRow};
use super::pool::{DbPool, PoolError};
use super::schema::places;

/// Diesel-backed place reads and in-place revisions.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlacePersistenceError {
    PlacePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PlacePersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => PlacePersistenceError::connection(message),
        DieselFailure::UniqueViolation { message, .. }
        | DieselFailure::Conflict(message)
        | DieselFailure::Query(message) => PlacePersistenceError::query(message),
    }
}

fn to_domain(row: PlaceRow) -> Result<Place, PlacePersistenceError> {
    Place::try_from(row).map_err(PlacePersistenceError::query)
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlaceRow> = places::table
            .filter(places::id.eq(id.as_uuid()))
            .select(PlaceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find place"))?;
        row.map(to_domain).transpose()
    }

    async fn find_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Place>, PlacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlaceRow> = places::table
            .filter(places::creator.eq(creator.as_uuid()))
            .select(PlaceRow::as_select())
            .order_by(places::title)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list places by creator"))?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn save(&self, place: &Place) -> Result<bool, PlacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let revision = PlaceRevision {
            title: place.title().as_str(),
            description: place.description().as_str(),
        };
        let updated = diesel::update(places::table.filter(places::id.eq(place.id().as_uuid())))
            .set(&revision)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "revise place"))?;
        Ok(updated > 0)
    }
}
