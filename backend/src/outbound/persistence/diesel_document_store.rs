//! PostgreSQL-backed `DocumentStore` adapter.
//!
//! A session checks out one pooled connection and opens a transaction on it
//! through diesel-async's `AnsiTransactionManager`. Every write runs on that
//! connection until `commit` or `abort` releases it. A session dropped while
//! still open leaves its transaction behind; the pool discards such
//! connections instead of reusing them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};

use crate::domain::ports::{DocumentStore, DocumentStoreError, StoreSession};
use crate::domain::{Place, PlaceId, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::PlaceRow;
use super::pool::{DbPool, PoolError};
use super::schema::{places, users};

diesel::define_sql_function! {
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

diesel::define_sql_function! {
    fn array_remove(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

/// Transactional document store over a [`DbPool`].
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
}

impl DieselDocumentStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentStoreError {
    DocumentStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> DocumentStoreError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => DocumentStoreError::connection(message),
        DieselFailure::Conflict(message) => DocumentStoreError::conflict(message),
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Query(message) => {
            DocumentStoreError::query(message)
        }
    }
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, DocumentStoreError> {
        let mut conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        AnsiTransactionManager::begin_transaction(&mut *conn)
            .await
            .map_err(|err| map_diesel_error(err, "begin transaction"))?;
        Ok(Box::new(DieselStoreSession { conn: Some(conn) }))
    }
}

type OwnedConnection = PooledConnection<'static, AsyncPgConnection>;

struct DieselStoreSession {
    conn: Option<OwnedConnection>,
}

impl DieselStoreSession {
    fn conn(&mut self) -> Result<&mut AsyncPgConnection, DocumentStoreError> {
        self.conn
            .as_mut()
            .map(|conn| &mut **conn)
            .ok_or_else(DocumentStoreError::closed)
    }

    fn release(&mut self) -> Result<OwnedConnection, DocumentStoreError> {
        self.conn.take().ok_or_else(DocumentStoreError::closed)
    }

    async fn user_exists(&mut self, owner: &UserId) -> Result<bool, DocumentStoreError> {
        let conn = self.conn()?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::id.eq(owner.as_uuid())),
        ))
        .get_result(conn)
        .await
        .map_err(|err| map_diesel_error(err, "check user"))
    }
}

#[async_trait]
impl StoreSession for DieselStoreSession {
    async fn insert_place(&mut self, place: &Place) -> Result<(), DocumentStoreError> {
        let conn = self.conn()?;
        diesel::insert_into(places::table)
            .values(PlaceRow::from(place))
            .execute(conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert place"))
    }

    async fn delete_place(&mut self, place: &PlaceId) -> Result<(), DocumentStoreError> {
        let conn = self.conn()?;
        let deleted = diesel::delete(places::table.filter(places::id.eq(place.as_uuid())))
            .execute(conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete place"))?;
        if deleted == 0 {
            return Err(DocumentStoreError::missing_place(*place));
        }
        Ok(())
    }

    async fn attach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError> {
        let conn = self.conn()?;
        let updated = diesel::update(
            users::table
                .filter(users::id.eq(owner.as_uuid()))
                .filter(diesel::dsl::not(users::places.contains(vec![*place.as_uuid()]))),
        )
        .set(users::places.eq(array_append(users::places, *place.as_uuid())))
        .execute(conn)
        .await
        .map_err(|err| map_diesel_error(err, "attach place"))?;

        // Zero rows means either an unknown owner or an id already listed.
        if updated == 0 && !self.user_exists(owner).await? {
            return Err(DocumentStoreError::missing_user(*owner));
        }
        Ok(())
    }

    async fn detach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError> {
        let conn = self.conn()?;
        let updated = diesel::update(users::table.filter(users::id.eq(owner.as_uuid())))
            .set(users::places.eq(array_remove(users::places, *place.as_uuid())))
            .execute(conn)
            .await
            .map_err(|err| map_diesel_error(err, "detach place"))?;
        if updated == 0 {
            return Err(DocumentStoreError::missing_user(*owner));
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), DocumentStoreError> {
        let mut conn = self.release()?;
        AnsiTransactionManager::commit_transaction(&mut *conn)
            .await
            .map_err(|err| map_diesel_error(err, "commit transaction"))
    }

    async fn abort(&mut self) -> Result<(), DocumentStoreError> {
        let mut conn = self.release()?;
        AnsiTransactionManager::rollback_transaction(&mut *conn)
            .await
            .map_err(|err| map_diesel_error(err, "rollback transaction"))
    }
}
