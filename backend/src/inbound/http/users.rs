//! Users API handlers.
//!
//! ```text
//! GET  /api/users
//! POST /api/users/signup {"name":"Ann","email":"a@x.com","password":"secret1"}
//! POST /api/users/login {"email":"a@x.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, SignupDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, PASSWORD, map_login_validation_error, map_user_validation_error, require,
};

const LOGIN_SUCCESSFUL: &str = "Login Successful!";

/// Signup request body for `POST /api/users/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupBody {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Login request body for `POST /api/users/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Public view of a user. The password never leaves the domain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: String,
    /// Identifiers of the places this user owns.
    pub places: Vec<String>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_str().to_owned(),
            email: user.email().to_string(),
            image: user.image().to_owned(),
            places: user.places().iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UsersEnvelope {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserDto,
}

/// Successful login acknowledgement.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login Successful!")]
    pub message: String,
    pub user: UserDto,
}

impl TryFrom<SignupBody> for SignupDetails {
    type Error = Error;

    fn try_from(body: SignupBody) -> Result<Self, Self::Error> {
        let name = require(body.name, NAME)?;
        let email = require(body.email, EMAIL)?;
        let password = require(body.password, PASSWORD)?;
        Self::try_from_parts(&name, &email, &password).map_err(map_user_validation_error)
    }
}

impl TryFrom<LoginBody> for LoginCredentials {
    type Error = Error;

    fn try_from(body: LoginBody) -> Result<Self, Self::Error> {
        let email = require(body.email, EMAIL)?;
        let password = require(body.password, PASSWORD)?;
        Self::try_from_parts(&email, &password).map_err(map_login_validation_error)
    }
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UsersEnvelope),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersEnvelope>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersEnvelope {
        users: users.iter().map(UserDto::from).collect(),
    }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 422, description = "Invalid input or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup"
)]
#[post("/users/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner())?;
    let user = state.signup.signup(details).await?;
    Ok(HttpResponse::Created().json(UserEnvelope {
        user: UserDto::from(&user),
    }))
}

/// Check credentials and return the matching account.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Password is incorrect", body = ErrorSchema),
        (status = 404, description = "Email not found", body = ErrorSchema),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: LOGIN_SUCCESSFUL.to_owned(),
        user: UserDto::from(&user),
    }))
}
