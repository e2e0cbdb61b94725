//! Tests for the domain place model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> PlaceDraft {
    PlaceDraft::try_from_parts(
        "Empire State Building",
        "One of the most famous sky scrapers in the world!",
        "20 W 34th St, New York, NY 10001",
    )
    .expect("valid draft")
}

#[fixture]
fn empire_state() -> Coordinates {
    Coordinates::new(40.748_447_4, -73.987_151_6).expect("valid coordinates")
}

#[rstest]
#[case::exactly_minimum("views", true)]
#[case::one_short("view", false)]
#[case::trailing_space_counts("abcd ", true)]
#[case::all_whitespace("     ", false)]
#[case::longer("great views", true)]
fn description_boundary(#[case] raw: &str, #[case] accepted: bool) {
    let result = PlaceDescription::new(raw);
    assert_eq!(result.is_ok(), accepted, "{raw:?}");
    if !accepted {
        assert_eq!(
            result,
            Err(PlaceValidationError::DescriptionTooShort {
                min: PLACE_DESCRIPTION_MIN
            })
        );
    }
}

#[rstest]
#[case::empty_title("", "valid text", "somewhere", PlaceValidationError::EmptyTitle)]
#[case::blank_title("   ", "valid text", "somewhere", PlaceValidationError::EmptyTitle)]
#[case::empty_address("Title", "valid text", " ", PlaceValidationError::EmptyAddress)]
fn draft_rejects_invalid_fields(
    #[case] title: &str,
    #[case] description: &str,
    #[case] address: &str,
    #[case] expected: PlaceValidationError,
) {
    assert_eq!(
        PlaceDraft::try_from_parts(title, description, address),
        Err(expected)
    );
}

#[rstest]
fn draft_keeps_fields_as_given() {
    let draft = PlaceDraft::try_from_parts("  Title ", " valid text ", " Main St ")
        .expect("valid draft");
    assert_eq!(draft.title.as_str(), "  Title ");
    assert_eq!(draft.description.as_str(), " valid text ");
    assert_eq!(draft.address.as_str(), " Main St ");
}

#[rstest]
#[case::lat_high(90.5, 0.0)]
#[case::lat_low(-91.0, 0.0)]
#[case::lng_high(0.0, 180.5)]
#[case::lat_nan(f64::NAN, 0.0)]
#[case::lng_infinite(0.0, f64::INFINITY)]
fn coordinates_reject_out_of_range(#[case] lat: f64, #[case] lng: f64) {
    assert!(Coordinates::new(lat, lng).is_err());
}

#[rstest]
fn coordinates_accept_bounds() {
    assert!(Coordinates::new(90.0, 180.0).is_ok());
    assert!(Coordinates::new(-90.0, -180.0).is_ok());
}

#[rstest]
fn place_id_rejects_garbage() {
    assert_eq!(PlaceId::new("p1"), Err(PlaceValidationError::InvalidId));
}

#[rstest]
fn new_place_carries_draft_and_location(draft: PlaceDraft, empire_state: Coordinates) {
    let creator = UserId::random();
    let place = Place::new(
        PlaceId::random(),
        draft.clone(),
        empire_state,
        DEFAULT_PLACE_IMAGE,
        creator,
    );

    assert_eq!(place.title(), &draft.title);
    assert_eq!(place.address(), &draft.address);
    assert_eq!(place.location(), empire_state);
    assert_eq!(place.creator(), &creator);
}

#[rstest]
fn revise_replaces_text_fields(draft: PlaceDraft, empire_state: Coordinates) {
    let mut place = Place::new(
        PlaceId::random(),
        draft,
        empire_state,
        DEFAULT_PLACE_IMAGE,
        UserId::random(),
    );
    place.revise(
        PlaceTitle::new("Renamed").expect("valid title"),
        PlaceDescription::new("fresh text").expect("valid description"),
    );

    assert_eq!(place.title().as_str(), "Renamed");
    assert_eq!(place.description().as_str(), "fresh text");
    assert_eq!(place.address().as_str(), "20 W 34th St, New York, NY 10001");
}
