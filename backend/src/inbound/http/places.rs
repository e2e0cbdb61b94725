//! Places API handlers.
//!
//! ```text
//! GET    /api/places/{place_id}
//! GET    /api/places/user/{user_id}
//! POST   /api/places {"title":"Tower","description":"tall","address":"1 Main St","creator":"<uuid>"}
//! PATCH  /api/places/{place_id} {"title":"Tower","description":"very tall"}
//! DELETE /api/places/{place_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::place_linkage_service::PLACE_NOT_FOUND;
use crate::domain::place_query_service::USER_PLACES_NOT_FOUND;
use crate::domain::ports::{CreatePlaceRequest, UpdatePlaceRequest};
use crate::domain::{Error, Place, PlaceDescription, PlaceDraft, PlaceTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ADDRESS, CREATOR, DESCRIPTION, TITLE, map_place_validation_error, parse_creator,
    parse_place_path, parse_user_path, require,
};

const PLACE_DELETED: &str = "Deleted place.";

/// Request body for `POST /api/places`.
///
/// Fields are optional at the wire level so an omitted field is reported
/// alongside the others as a validation failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreatePlaceBody {
    #[schema(example = "Empire State Building")]
    pub title: Option<String>,
    #[schema(example = "One of the most famous sky scrapers")]
    pub description: Option<String>,
    #[schema(example = "20 W 34th St, New York, NY 10001")]
    pub address: Option<String>,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub creator: Option<String>,
}

/// Request body for `PATCH /api/places/{place_id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePlaceBody {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Geographic point of a place.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct LocationDto {
    #[schema(example = 40.7484405)]
    pub lat: f64,
    #[schema(example = -73.9878584)]
    pub lng: f64,
}

/// Place representation returned by every places endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct PlaceDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: LocationDto,
    pub image: String,
    /// Identifier of the owning user.
    pub creator: String,
}

impl From<&Place> for PlaceDto {
    fn from(place: &Place) -> Self {
        let location = place.location();
        Self {
            id: place.id().to_string(),
            title: place.title().as_str().to_owned(),
            description: place.description().as_str().to_owned(),
            address: place.address().as_str().to_owned(),
            location: LocationDto {
                lat: location.lat(),
                lng: location.lng(),
            },
            image: place.image().to_owned(),
            creator: place.creator().to_string(),
        }
    }
}

/// Envelope carrying a single place.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PlaceEnvelope {
    pub place: PlaceDto,
}

impl From<&Place> for PlaceEnvelope {
    fn from(place: &Place) -> Self {
        Self {
            place: PlaceDto::from(place),
        }
    }
}

/// Envelope carrying a list of places.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PlacesEnvelope {
    pub places: Vec<PlaceDto>,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Deleted place.")]
    pub message: String,
}

fn parse_create_body(body: CreatePlaceBody) -> Result<CreatePlaceRequest, Error> {
    let title = require(body.title, TITLE)?;
    let description = require(body.description, DESCRIPTION)?;
    let address = require(body.address, ADDRESS)?;
    let creator = require(body.creator, CREATOR)?;

    let draft = PlaceDraft::try_from_parts(&title, &description, &address)
        .map_err(map_place_validation_error)?;
    let creator = parse_creator(&creator)?;
    Ok(CreatePlaceRequest { draft, creator })
}

/// Fetch a single place.
#[utoipa::path(
    get,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Place found", body = PlaceEnvelope),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace"
)]
#[get("/places/{place_id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlaceEnvelope>> {
    let id = parse_place_path(&path.into_inner(), PLACE_NOT_FOUND)?;
    let place = state.places.get_place(&id).await?;
    Ok(web::Json(PlaceEnvelope::from(&place)))
}

/// List the places owned by a user.
#[utoipa::path(
    get,
    path = "/api/places/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Places owned by the user", body = PlacesEnvelope),
        (status = 404, description = "User has no places", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlacesByUser"
)]
#[get("/places/user/{user_id}")]
pub async fn get_user_places(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlacesEnvelope>> {
    let owner = parse_user_path(&path.into_inner(), USER_PLACES_NOT_FOUND)?;
    let places = state.places.places_for_user(&owner).await?;
    Ok(web::Json(PlacesEnvelope {
        places: places.iter().map(PlaceDto::from).collect(),
    }))
}

/// Create a place and link it to its creator.
#[utoipa::path(
    post,
    path = "/api/places",
    request_body = CreatePlaceBody,
    responses(
        (status = 201, description = "Place created", body = PlaceEnvelope),
        (status = 404, description = "Unknown creator", body = ErrorSchema),
        (status = 422, description = "Invalid input or unresolvable address", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlace"
)]
#[post("/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePlaceBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_body(payload.into_inner())?;
    let place = state.place_commands.create_place(request).await?;
    Ok(HttpResponse::Created().json(PlaceEnvelope::from(&place)))
}

/// Replace a place's title and description.
#[utoipa::path(
    patch,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    request_body = UpdatePlaceBody,
    responses(
        (status = 200, description = "Place updated", body = PlaceEnvelope),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "updatePlace"
)]
#[patch("/places/{place_id}")]
pub async fn update_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePlaceBody>,
) -> ApiResult<web::Json<PlaceEnvelope>> {
    let body = payload.into_inner();
    let title = PlaceTitle::new(require(body.title, TITLE)?).map_err(map_place_validation_error)?;
    let description = PlaceDescription::new(require(body.description, DESCRIPTION)?)
        .map_err(map_place_validation_error)?;
    let id = parse_place_path(&path.into_inner(), PLACE_NOT_FOUND)?;

    let place = state
        .place_commands
        .update_place(UpdatePlaceRequest {
            id,
            title,
            description,
        })
        .await?;
    Ok(web::Json(PlaceEnvelope::from(&place)))
}

/// Delete a place and unlink it from its owner.
#[utoipa::path(
    delete,
    path = "/api/places/{place_id}",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Place deleted", body = MessageBody),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "deletePlace"
)]
#[delete("/places/{place_id}")]
pub async fn delete_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = parse_place_path(&path.into_inner(), PLACE_NOT_FOUND)?;
    state.place_commands.delete_place(&id).await?;
    Ok(web::Json(MessageBody {
        message: PLACE_DELETED.to_owned(),
    }))
}

#[cfg(test)]
#[path = "places_tests.rs"]
mod tests;
