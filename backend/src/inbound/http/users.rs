//! Account handlers: registration, login, logout, and the current user.
//!
//! ```text
//! POST /api/v1/users {"email":"cook@example.com","password":"testpass123","name":"Cook"}
//! POST /api/v1/login {"email":"cook@example.com","password":"testpass123"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
    User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::{AuthenticatedUser, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, require};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const NAME: FieldName = FieldName::new("name");

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "cook@example.com")]
    pub email: Option<String>,
    #[schema(example = "testpass123")]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, EMAIL)?;
        let password = require(value.password, PASSWORD)?;
        Self::try_from_parts(&email, &password).map_err(|err| match err {
            LoginValidationError::InvalidEmail(inner) => invalid_field_error(EMAIL, inner),
            LoginValidationError::EmptyPassword => invalid_field_error(PASSWORD, err),
        })
    }
}

/// Registration request body for `POST /api/v1/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "cook@example.com")]
    pub email: Option<String>,
    /// At least five characters.
    #[schema(example = "testpass123")]
    pub password: Option<String>,
    #[schema(example = "Test Cook")]
    pub name: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, EMAIL)?;
        let password = require(value.password, PASSWORD)?;
        let name = require(value.name, NAME)?;
        Self::try_from_parts(&email, &password, &name).map_err(|err| match err {
            RegistrationValidationError::InvalidEmail(inner) => invalid_field_error(EMAIL, inner),
            RegistrationValidationError::InvalidName(inner) => invalid_field_error(NAME, inner),
            RegistrationValidationError::PasswordTooShort { .. } => {
                invalid_field_error(PASSWORD, err)
            }
        })
    }
}

/// Open a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    let profile = state.profile.fetch_profile(user.id()).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests;
