//! Builders for HTTP state ports.
//!
//! Storage and geocoding each pick a real adapter when configured and fall
//! back to the in-memory store or the fixture geocoder otherwise.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use places_backend::domain::ports::{
    DocumentStore, FixtureGeocoder, PlaceCommand, PlaceRepository, UserRepository,
};
use places_backend::domain::{PlaceLinkageService, PlaceQueryService, UserAccountService};
use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
use places_backend::outbound::geocoding::GoogleMapsGeocoder;
use places_backend::outbound::memory::InMemoryDocumentStore;
use places_backend::outbound::persistence::{
    DbPool, DieselDocumentStore, DieselPlaceRepository, DieselUserRepository,
};

fn build_place_commands<P, U, S>(
    places: Arc<P>,
    users: Arc<U>,
    store: Arc<S>,
    geocoder: Option<GoogleMapsGeocoder>,
) -> Arc<dyn PlaceCommand>
where
    P: PlaceRepository + 'static,
    U: UserRepository + 'static,
    S: DocumentStore + 'static,
{
    match geocoder {
        Some(geocoder) => Arc::new(PlaceLinkageService::new(
            places,
            users,
            store,
            Arc::new(geocoder),
        )),
        None => {
            warn!("no geocoding API key configured; every address resolves to fixture coordinates");
            Arc::new(PlaceLinkageService::new(
                places,
                users,
                store,
                Arc::new(FixtureGeocoder),
            ))
        }
    }
}

/// Wire every driving port over one set of repositories and a store.
fn build_ports<P, U, S>(
    places: Arc<P>,
    users: Arc<U>,
    store: Arc<S>,
    geocoder: Option<GoogleMapsGeocoder>,
) -> HttpStatePorts
where
    P: PlaceRepository + 'static,
    U: UserRepository + 'static,
    S: DocumentStore + 'static,
{
    let place_commands = build_place_commands(places.clone(), users.clone(), store, geocoder);
    let accounts = Arc::new(UserAccountService::new(users));
    HttpStatePorts {
        places: Arc::new(PlaceQueryService::new(places)),
        place_commands,
        users: accounts.clone(),
        signup: accounts.clone(),
        login: accounts,
    }
}

fn build_diesel_ports(pool: DbPool, geocoder: Option<GoogleMapsGeocoder>) -> HttpStatePorts {
    build_ports(
        Arc::new(DieselPlaceRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselDocumentStore::new(pool)),
        geocoder,
    )
}

fn build_memory_ports(geocoder: Option<GoogleMapsGeocoder>) -> HttpStatePorts {
    warn!("no database configured; places and users live in memory and vanish on restart");
    let store = InMemoryDocumentStore::new();
    build_ports(
        Arc::new(store.place_repository()),
        Arc::new(store.user_repository()),
        Arc::new(store),
        geocoder,
    )
}

/// Build the shared HTTP state from the configured adapters.
pub(super) fn build_http_state(
    db_pool: Option<DbPool>,
    geocoder: Option<GoogleMapsGeocoder>,
) -> web::Data<HttpState> {
    let ports = match db_pool {
        Some(pool) => build_diesel_ports(pool, geocoder),
        None => build_memory_ports(geocoder),
    };
    web::Data::new(HttpState::new(ports))
}
