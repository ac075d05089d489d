//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User, Tag, Ingredient, Recipe: owner-scoped entities.
//! - `summary_view` / `detail_view`: the two read views of a recipe.
//! - Services implementing the driving ports in [`ports`].

pub mod attribute;
pub mod auth;
pub mod error;
pub mod ports;
pub mod recipe;
mod recipe_attributes_service;
mod recipe_service;
pub mod recipe_views;
pub mod trace_id;
pub mod user;
mod user_accounts_service;

pub use self::attribute::{
    ATTRIBUTE_NAME_MAX, AttributeName, AttributeValidationError, Ingredient, IngredientId, Tag,
    TagId,
};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, PasswordHash, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::recipe::{
    PreparationMinutes, Price, Recipe, RecipeDraft, RecipeId, RecipeLink, RecipeParts,
    RecipeTitle, RecipeValidationError,
};
pub use self::recipe_attributes_service::RecipeAttributesService;
pub use self::recipe_service::{RecipeCommandService, RecipeQueryService};
pub use self::recipe_views::{
    AttributeView, RecipeDetail, RecipeSummary, detail_view, summary_view,
};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, User, UserId, UserValidationError};
pub use self::user_accounts_service::UserAccountsService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
