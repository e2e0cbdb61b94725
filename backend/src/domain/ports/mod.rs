//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod document_store;
mod geocoder;
mod login_service;
mod place_command;
mod place_query;
mod place_repository;
mod user_repository;
mod user_signup;
mod users_query;

#[cfg(test)]
pub use document_store::{MockDocumentStore, MockStoreSession};
pub use document_store::{DocumentStore, DocumentStoreError, StoreSession};
#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{FixtureGeocoder, GeocodeError, Geocoder};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use place_command::{CreatePlaceRequest, PlaceCommand, UpdatePlaceRequest};
#[cfg(test)]
pub use place_command::MockPlaceCommand;
pub use place_query::PlaceQuery;
#[cfg(test)]
pub use place_query::MockPlaceQuery;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlacePersistenceError, PlaceRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use user_signup::UserSignup;
#[cfg(test)]
pub use user_signup::MockUserSignup;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use users_query::MockUsersQuery;
