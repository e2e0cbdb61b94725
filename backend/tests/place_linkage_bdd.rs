//! Behaviour coverage for keeping places and their creators linked.

use std::future::Future;
use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use places_backend::domain::ports::{FixtureGeocoder, GeocodeError, Geocoder, PlaceCommand};
use places_backend::domain::{
    Address, Coordinates, PlaceLinkageService, PlaceQueryService, UserAccountService,
};
use places_backend::inbound::http::places::{
    create_place, delete_place, get_place, get_user_places,
};
use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
use places_backend::inbound::http::users::signup;
use places_backend::outbound::memory::{InMemoryDocumentStore, SessionOp};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const UNKNOWN_PLACE_ID: &str = "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";

/// Geocoder that never finds a match.
struct UnresolvableGeocoder;

#[async_trait]
impl Geocoder for UnresolvableGeocoder {
    async fn geocode(&self, address: &Address) -> Result<Coordinates, GeocodeError> {
        Err(GeocodeError::no_results(address.to_string()))
    }
}

#[derive(Debug)]
struct Snapshot {
    status: u16,
    body: Value,
}

struct World {
    store: InMemoryDocumentStore,
    unresolvable: bool,
    user_id: Option<String>,
    place_id: Option<String>,
    last: Option<Snapshot>,
}

fn run_async<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

fn build_state(world: &World) -> web::Data<HttpState> {
    let store = world.store.clone();
    let places = Arc::new(store.place_repository());
    let users = Arc::new(store.user_repository());
    let place_commands: Arc<dyn PlaceCommand> = if world.unresolvable {
        Arc::new(PlaceLinkageService::new(
            places.clone(),
            users.clone(),
            Arc::new(store),
            Arc::new(UnresolvableGeocoder),
        ))
    } else {
        Arc::new(PlaceLinkageService::new(
            places.clone(),
            users.clone(),
            Arc::new(store),
            Arc::new(FixtureGeocoder),
        ))
    };
    let accounts = Arc::new(UserAccountService::new(users));
    web::Data::new(HttpState::new(HttpStatePorts {
        places: Arc::new(PlaceQueryService::new(places)),
        place_commands,
        users: accounts.clone(),
        signup: accounts.clone(),
        login: accounts,
    }))
}

async fn send(state: web::Data<HttpState>, request: actix_test::TestRequest) -> Snapshot {
    let app = actix_test::init_service(
        App::new().app_data(state).wrap(places_backend::Trace).service(
            web::scope("/api")
                .service(get_user_places)
                .service(get_place)
                .service(create_place)
                .service(delete_place)
                .service(signup),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Snapshot { status, body }
}

fn perform(world: &World, request: actix_test::TestRequest) -> Snapshot {
    let state = build_state(world);
    run_async(send(state, request))
}

fn string_at(body: &Value, pointer: &str) -> String {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .expect("string field")
        .to_owned()
}

fn create_request(world: &World) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/api/places").set_json(json!({
        "title": "Empire State Building",
        "description": "One of the most famous sky scrapers in the world!",
        "address": "20 W 34th St, New York, NY 10001",
        "creator": world.user_id.as_deref().expect("registered user"),
    }))
}

fn user_places(world: &World) -> Snapshot {
    let uri = format!(
        "/api/places/user/{}",
        world.user_id.as_deref().expect("registered user")
    );
    perform(world, actix_test::TestRequest::get().uri(&uri))
}

fn last(world: &World) -> &Snapshot {
    world.last.as_ref().expect("a request was made")
}

#[fixture]
fn world() -> World {
    World {
        store: InMemoryDocumentStore::new(),
        unresolvable: false,
        user_id: None,
        place_id: None,
        last: None,
    }
}

#[given("a registered user")]
fn a_registered_user(world: &mut World) {
    let snapshot = perform(
        world,
        actix_test::TestRequest::post()
            .uri("/api/users/signup")
            .set_json(json!({
                "name": "Max",
                "email": "max@example.com",
                "password": "secret1",
            })),
    );
    assert_eq!(snapshot.status, 201);
    world.user_id = Some(string_at(&snapshot.body, "/user/id"));
}

#[given("the store fails the next owner update")]
fn the_store_fails_the_next_owner_update(world: &mut World) {
    world.store.fail_next(SessionOp::AttachPlace);
}

#[given("the store fails the next owner update on delete")]
fn the_store_fails_the_next_owner_update_on_delete(world: &mut World) {
    world.store.fail_next(SessionOp::DetachPlace);
}

#[given("addresses cannot be resolved")]
fn addresses_cannot_be_resolved(world: &mut World) {
    world.unresolvable = true;
}

#[given("the user owns a place")]
fn the_user_owns_a_place(world: &mut World) {
    let request = create_request(world);
    let snapshot = perform(world, request);
    assert_eq!(snapshot.status, 201);
    world.place_id = Some(string_at(&snapshot.body, "/place/id"));
}

#[when("the user creates a place")]
fn the_user_creates_a_place(world: &mut World) {
    let request = create_request(world);
    let snapshot = perform(world, request);
    if snapshot.status == 201 {
        world.place_id = Some(string_at(&snapshot.body, "/place/id"));
    }
    world.last = Some(snapshot);
}

#[when("the place is deleted")]
fn the_place_is_deleted(world: &mut World) {
    let uri = format!(
        "/api/places/{}",
        world.place_id.as_deref().expect("owned place")
    );
    world.last = Some(perform(world, actix_test::TestRequest::delete().uri(&uri)));
}

#[when("an unknown place is deleted")]
fn an_unknown_place_is_deleted(world: &mut World) {
    let uri = format!("/api/places/{UNKNOWN_PLACE_ID}");
    world.last = Some(perform(world, actix_test::TestRequest::delete().uri(&uri)));
}

#[then("the place is created")]
fn the_place_is_created(world: &mut World) {
    let snapshot = last(world);
    assert_eq!(snapshot.status, 201);
    assert_eq!(
        snapshot.body.pointer("/place/creator").and_then(Value::as_str),
        world.user_id.as_deref()
    );
    assert_eq!(
        snapshot.body.pointer("/place/location/lat").and_then(Value::as_f64),
        Some(FixtureGeocoder::LAT)
    );
}

#[then("the user's places list the new place")]
fn the_users_places_list_the_new_place(world: &mut World) {
    let snapshot = user_places(world);
    assert_eq!(snapshot.status, 200);
    let ids: Vec<&str> = snapshot
        .body
        .get("places")
        .and_then(Value::as_array)
        .expect("places array")
        .iter()
        .filter_map(|place| place.get("id").and_then(Value::as_str))
        .collect();
    assert_eq!(ids, vec![world.place_id.as_deref().expect("created place")]);
}

#[then("the request fails with an internal error")]
fn the_request_fails_with_an_internal_error(world: &mut World) {
    let snapshot = last(world);
    assert_eq!(snapshot.status, 500);
    assert_eq!(
        snapshot.body.get("code").and_then(Value::as_str),
        Some("internal_error")
    );
    assert_eq!(
        snapshot.body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}

#[then("the request is rejected as an unprocessable address")]
fn the_request_is_rejected_as_an_unprocessable_address(world: &mut World) {
    let snapshot = last(world);
    assert_eq!(snapshot.status, 422);
    assert_eq!(
        snapshot.body.get("code").and_then(Value::as_str),
        Some("unprocessable_address")
    );
    assert_eq!(
        snapshot.body.get("message").and_then(Value::as_str),
        Some("Could not find location for the specified address.")
    );
}

#[then("no place is stored")]
fn no_place_is_stored(world: &mut World) {
    assert_eq!(world.store.place_count(), 0);
}

#[then("the deletion is acknowledged")]
fn the_deletion_is_acknowledged(world: &mut World) {
    let snapshot = last(world);
    assert_eq!(snapshot.status, 200);
    assert_eq!(snapshot.body, json!({"message": "Deleted place."}));
}

#[then("the user has no places")]
fn the_user_has_no_places(world: &mut World) {
    let snapshot = user_places(world);
    assert_eq!(snapshot.status, 404);
}

#[then("the place can still be fetched")]
fn the_place_can_still_be_fetched(world: &mut World) {
    assert_eq!(world.store.place_count(), 1);
    let uri = format!(
        "/api/places/{}",
        world.place_id.as_deref().expect("owned place")
    );
    let snapshot = perform(world, actix_test::TestRequest::get().uri(&uri));
    assert_eq!(snapshot.status, 200);
    let listed = user_places(world);
    assert_eq!(listed.status, 200);
}

#[then("the request is not found")]
fn the_request_is_not_found(world: &mut World) {
    let snapshot = last(world);
    assert_eq!(snapshot.status, 404);
    assert_eq!(
        snapshot.body.get("message").and_then(Value::as_str),
        Some("Could not find a place for the provided id.")
    );
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "Creating a place links it to its creator"
)]
fn creating_a_place_links_it_to_its_creator(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "A failed link leaves no place behind"
)]
fn a_failed_link_leaves_no_place_behind(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "An unresolvable address stores nothing"
)]
fn an_unresolvable_address_stores_nothing(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "Deleting a place unlinks it from its creator"
)]
fn deleting_a_place_unlinks_it_from_its_creator(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "A failed unlink keeps the place"
)]
fn a_failed_unlink_keeps_the_place(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/place_linkage.feature",
    name = "Deleting an unknown place is not found"
)]
fn deleting_an_unknown_place_is_not_found(world: World) {
    drop(world);
}
