//! Transactional port for writes that span a place and its owner.
//!
//! A [`StoreSession`] groups writes into one atomic unit: nothing a session
//! writes is visible to other readers until [`StoreSession::commit`]
//! succeeds, and [`StoreSession::abort`] discards everything. Once either
//! has been called the session is finished and further calls fail with
//! [`DocumentStoreError::Closed`].

use async_trait::async_trait;

use crate::domain::{Place, PlaceId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "document store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "document store query failed: {message}",
        /// The transaction collided with a concurrent writer.
        Conflict { message: String } => "document store transaction conflict: {message}",
        /// The place targeted by a write does not exist.
        MissingPlace { id: PlaceId } => "place {id} does not exist",
        /// The user targeted by a write does not exist.
        MissingUser { id: UserId } => "user {id} does not exist",
        /// The session was already committed or aborted.
        Closed => "document store session is already closed",
    }
}

/// Opens transactional sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Start a new atomic unit.
    async fn begin(&self) -> Result<Box<dyn StoreSession>, DocumentStoreError>;
}

/// Writes staged inside one atomic unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreSession: Send {
    /// Insert a new place document.
    async fn insert_place(&mut self, place: &Place) -> Result<(), DocumentStoreError>;

    /// Delete a place document. Fails with
    /// [`DocumentStoreError::MissingPlace`] when it does not exist.
    async fn delete_place(&mut self, place: &PlaceId) -> Result<(), DocumentStoreError>;

    /// Append `place` to the owner's `places` list. Appending an id that is
    /// already listed leaves the list unchanged. Fails with
    /// [`DocumentStoreError::MissingUser`] when the owner does not exist.
    async fn attach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError>;

    /// Remove `place` from the owner's `places` list. Fails with
    /// [`DocumentStoreError::MissingUser`] when the owner does not exist.
    async fn detach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError>;

    /// Make every staged write visible at once. A failed commit discards
    /// the staged writes.
    async fn commit(&mut self) -> Result<(), DocumentStoreError>;

    /// Discard every staged write.
    async fn abort(&mut self) -> Result<(), DocumentStoreError>;
}
