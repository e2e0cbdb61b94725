//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PlaceCommand, PlaceQuery, UserSignup, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub places: Arc<dyn PlaceQuery>,
    pub place_commands: Arc<dyn PlaceCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub signup: Arc<dyn UserSignup>,
    pub login: Arc<dyn LoginService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub places: Arc<dyn PlaceQuery>,
    pub place_commands: Arc<dyn PlaceCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub signup: Arc<dyn UserSignup>,
    pub login: Arc<dyn LoginService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use places_backend::domain::ports::FixtureGeocoder;
    /// use places_backend::domain::{PlaceLinkageService, PlaceQueryService, UserAccountService};
    /// use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use places_backend::outbound::memory::InMemoryDocumentStore;
    ///
    /// let store = InMemoryDocumentStore::new();
    /// let places = Arc::new(store.place_repository());
    /// let users = Arc::new(store.user_repository());
    /// let accounts = Arc::new(UserAccountService::new(users.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     places: Arc::new(PlaceQueryService::new(places.clone())),
    ///     place_commands: Arc::new(PlaceLinkageService::new(
    ///         places,
    ///         users,
    ///         Arc::new(store),
    ///         Arc::new(FixtureGeocoder),
    ///     )),
    ///     users: accounts.clone(),
    ///     signup: accounts.clone(),
    ///     login: accounts,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            places,
            place_commands,
            users,
            signup,
            login,
        } = ports;
        Self {
            places,
            place_commands,
            users,
            signup,
            login,
        }
    }
}
