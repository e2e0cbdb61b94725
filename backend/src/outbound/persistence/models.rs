//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Stored rows are re-validated on the way
//! out; a row that no longer satisfies the domain rules is reported as a
//! query failure.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{places, users};
use crate::domain::{
    Coordinates, EmailAddress, Password, Place, PlaceDraft, PlaceId, User, UserId, UserName,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
    pub places: Vec<Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let name = UserName::new(&row.name).map_err(|err| format!("user {}: {err}", row.id))?;
        let email =
            EmailAddress::new(&row.email).map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(User::new(
            UserId::from_uuid(row.id),
            name,
            email,
            Password::from_stored(row.password),
            row.image,
            row.places.into_iter().map(PlaceId::from_uuid).collect(),
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub image: &'a str,
    pub places: Vec<Uuid>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().as_str(),
            email: user.email().as_str(),
            password: user.password().expose(),
            image: user.image(),
            places: user.places().iter().map(|id| *id.as_uuid()).collect(),
        }
    }
}

/// Row struct for reading from and inserting into the places table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub image: String,
    pub creator: Uuid,
}

impl TryFrom<PlaceRow> for Place {
    type Error = String;

    fn try_from(row: PlaceRow) -> Result<Self, Self::Error> {
        let draft = PlaceDraft::try_from_parts(&row.title, &row.description, &row.address)
            .map_err(|err| format!("place {}: {err}", row.id))?;
        let location =
            Coordinates::new(row.lat, row.lng).map_err(|err| format!("place {}: {err}", row.id))?;
        Ok(Place::new(
            PlaceId::from_uuid(row.id),
            draft,
            location,
            row.image,
            UserId::from_uuid(row.creator),
        ))
    }
}

impl From<&Place> for PlaceRow {
    fn from(place: &Place) -> Self {
        Self {
            id: *place.id().as_uuid(),
            title: place.title().as_str().to_owned(),
            description: place.description().as_str().to_owned(),
            address: place.address().as_str().to_owned(),
            lat: place.location().lat(),
            lng: place.location().lng(),
            image: place.image().to_owned(),
            creator: *place.creator().as_uuid(),
        }
    }
}

/// Changeset for the editable place fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = places)]
pub(crate) struct PlaceRevision<'a> {
    pub title: &'a str,
    pub description: &'a str,
}
