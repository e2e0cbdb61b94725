//! Port abstraction for place persistence adapters.
//!
//! Linked writes (creating or deleting a place together with its owner's
//! back-reference) go through [`super::DocumentStore`] instead; this port
//! covers reads and the single-document update.

use async_trait::async_trait;

use crate::domain::{Place, PlaceId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by place repository adapters.
    pub enum PlacePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "place repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "place repository query failed: {message}",
    }
}

/// Port for reading and updating places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Fetch a place by identifier.
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlacePersistenceError>;

    /// Fetch every place created by `creator`.
    async fn find_by_creator(&self, creator: &UserId)
    -> Result<Vec<Place>, PlacePersistenceError>;

    /// Persist changes to an existing place. Returns `false` when no place
    /// with that id exists.
    async fn save(&self, place: &Place) -> Result<bool, PlacePersistenceError>;
}
