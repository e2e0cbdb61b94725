//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field failures answer `invalid_request` with a fixed client message and a
//! `details` object naming the offending field and a machine-readable code.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{
    Error, LoginValidationError, PlaceId, PlaceValidationError, UserId, UserValidationError,
};

/// Client-facing message for every field validation failure.
pub(crate) const INVALID_INPUTS: &str = "Invalid inputs passed, please check your data.";

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const ADDRESS: FieldName = FieldName::new("address");
pub(crate) const CREATOR: FieldName = FieldName::new("creator");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");

fn field_error(field: FieldName, code: &str, reason: impl Into<String>) -> Error {
    Error::invalid_request(INVALID_INPUTS).with_details(json!({
        "field": field.as_str(),
        "code": code,
        "reason": reason.into(),
    }))
}

/// Reject a body that omitted a required field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| field_error(field, "missing_field", "field is required"))
}

pub(crate) fn map_place_validation_error(error: PlaceValidationError) -> Error {
    let (field, code) = match &error {
        PlaceValidationError::InvalidId => (CREATOR, "invalid_uuid"),
        PlaceValidationError::EmptyTitle => (TITLE, "empty_title"),
        PlaceValidationError::DescriptionTooShort { .. } => (DESCRIPTION, "too_short"),
        PlaceValidationError::EmptyAddress => (ADDRESS, "empty_address"),
        PlaceValidationError::LatitudeOutOfRange { .. }
        | PlaceValidationError::LongitudeOutOfRange { .. } => (ADDRESS, "invalid_location"),
    };
    field_error(field, code, error.to_string())
}

pub(crate) fn map_user_validation_error(error: UserValidationError) -> Error {
    let (field, code) = match &error {
        UserValidationError::EmptyId | UserValidationError::InvalidId => (CREATOR, "invalid_uuid"),
        UserValidationError::EmptyName => (NAME, "empty_name"),
        UserValidationError::NameTooShort { .. } => (NAME, "too_short"),
        UserValidationError::EmptyEmail => (EMAIL, "empty_email"),
        UserValidationError::InvalidEmail => (EMAIL, "invalid_email"),
        UserValidationError::PasswordTooShort { .. } => (PASSWORD, "too_short"),
    };
    field_error(field, code, error.to_string())
}

pub(crate) fn map_login_validation_error(error: LoginValidationError) -> Error {
    let (field, code) = match &error {
        LoginValidationError::EmptyEmail => (EMAIL, "empty_email"),
        LoginValidationError::EmptyPassword => (PASSWORD, "empty_password"),
    };
    field_error(field, code, error.to_string())
}

/// Parse the creator id of a new place.
pub(crate) fn parse_creator(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(map_user_validation_error)
}

/// Parse a place id taken from the path. An id that cannot exist answers
/// like any other unknown place.
pub(crate) fn parse_place_path(raw: &str, not_found: &str) -> Result<PlaceId, Error> {
    PlaceId::new(raw).map_err(|_| Error::not_found(not_found))
}

/// Parse a user id taken from the path.
pub(crate) fn parse_user_path(raw: &str, not_found: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(not_found))
}

/// Turn body deserialisation failures into `invalid_request` responses.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(%error, "rejected request body");
    let detail = match &error {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        other => other.to_string(),
    };
    Error::invalid_request(INVALID_INPUTS)
        .with_details(json!({ "code": "malformed_body", "reason": detail }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, PLACE_DESCRIPTION_MIN, USER_NAME_MIN};
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    #[case(PlaceValidationError::EmptyTitle, "title", "empty_title")]
    #[case(
        PlaceValidationError::DescriptionTooShort { min: PLACE_DESCRIPTION_MIN },
        "description",
        "too_short"
    )]
    #[case(PlaceValidationError::EmptyAddress, "address", "empty_address")]
    fn place_errors_name_their_field(
        #[case] error: PlaceValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = map_place_validation_error(error);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.message(), INVALID_INPUTS);
        assert_eq!(detail(&mapped, "field"), Some(field));
        assert_eq!(detail(&mapped, "code"), Some(code));
    }

    #[rstest]
    #[case(UserValidationError::NameTooShort { min: USER_NAME_MIN }, "name")]
    #[case(UserValidationError::InvalidEmail, "email")]
    #[case(UserValidationError::PasswordTooShort { min: 6 }, "password")]
    #[case(UserValidationError::InvalidId, "creator")]
    fn user_errors_name_their_field(#[case] error: UserValidationError, #[case] field: &str) {
        assert_eq!(detail(&map_user_validation_error(error), "field"), Some(field));
    }

    #[rstest]
    fn missing_field_is_reported() {
        let error = require::<String>(None, TITLE).expect_err("missing");
        assert_eq!(detail(&error, "code"), Some("missing_field"));
        assert_eq!(detail(&error, "field"), Some("title"));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_place_path_is_not_found(#[case] raw: &str) {
        let error = parse_place_path(raw, "gone").expect_err("invalid id");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "gone");
    }

    #[rstest]
    fn json_errors_become_invalid_request() {
        let req = TestRequest::default().to_http_request();
        let error = json_error_handler(JsonPayloadError::ContentType, &req);
        let response = error.error_response();
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
