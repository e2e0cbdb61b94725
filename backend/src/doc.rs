//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint (places, users, health) and the
//! error schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` prints it for
//! external tooling.

use crate::inbound::http::places::{
    CreatePlaceBody, LocationDto, MessageBody, PlaceDto, PlaceEnvelope, PlacesEnvelope,
    UpdatePlaceBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginBody, LoginResponse, SignupBody, UserDto, UserEnvelope, UsersEnvelope,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Places backend API",
        description = "Share places, each geocoded and owned by a registered user."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::get_user_places,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::delete_place,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreatePlaceBody,
        UpdatePlaceBody,
        LocationDto,
        PlaceDto,
        PlaceEnvelope,
        PlacesEnvelope,
        MessageBody,
        SignupBody,
        LoginBody,
        UserDto,
        UserEnvelope,
        UsersEnvelope,
        LoginResponse,
    )),
    tags(
        (name = "places", description = "Places and their owners"),
        (name = "users", description = "Accounts and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
