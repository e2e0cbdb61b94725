//! Translation of driven-port failures into domain errors.
//!
//! Store faults are logged here and surface as internal errors; the HTTP
//! adapter redacts their message before it reaches a client.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{PlacePersistenceError, UserPersistenceError};

pub(crate) fn map_place_persistence_error(failure: PlacePersistenceError) -> Error {
    error!(error = %failure, "place repository failure");
    Error::internal(format!("place repository error: {failure}"))
}

pub(crate) fn map_user_persistence_error(failure: UserPersistenceError) -> Error {
    error!(error = %failure, "user repository failure");
    Error::internal(format!("user repository error: {failure}"))
}
