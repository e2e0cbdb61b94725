//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::domain::ports::{
    MockLoginService, MockPlaceCommand, MockPlaceQuery, MockUserSignup, MockUsersQuery,
};
use crate::domain::{
    Coordinates, DEFAULT_PLACE_IMAGE, DEFAULT_USER_IMAGE, EmailAddress, Password, Place,
    PlaceDraft, PlaceId, User, UserId, UserName,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::validation::json_error_handler;

/// Port doubles for handler tests. Mocks without expectations panic when
/// called, so each test only primes the ports its handler touches.
#[derive(Default)]
pub struct MockPorts {
    pub places: MockPlaceQuery,
    pub place_commands: MockPlaceCommand,
    pub users: MockUsersQuery,
    pub signup: MockUserSignup,
    pub login: MockLoginService,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            places: Arc::new(self.places),
            place_commands: Arc::new(self.place_commands),
            users: Arc::new(self.users),
            signup: Arc::new(self.signup),
            login: Arc::new(self.login),
        }))
    }
}

/// Wrap `scope` in an app carrying `state` and the JSON error handler.
pub fn test_app(
    state: web::Data<HttpState>,
    scope: actix_web::Scope,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(scope)
}

pub async fn read_json(response: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub fn sample_user() -> User {
    User::new(
        UserId::random(),
        UserName::new("Ann").expect("name"),
        EmailAddress::new("ann@example.com").expect("email"),
        Password::new("secret1").expect("password"),
        DEFAULT_USER_IMAGE,
        Vec::new(),
    )
}

pub fn sample_place(creator: UserId) -> Place {
    Place::new(
        PlaceId::random(),
        PlaceDraft::try_from_parts("Tower", "tall building", "1 Main St").expect("draft"),
        Coordinates::new(40.7484405, -73.9878584).expect("coordinates"),
        DEFAULT_PLACE_IMAGE,
        creator,
    )
}
