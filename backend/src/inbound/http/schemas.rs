//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their serialised shape and are registered with
//! utoipa under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Every error response except 401 carries this payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "price must not be negative")]
    message: String,
    /// Trace identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context, e.g. `{"field": "price", "code": "invalid_value"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "cook@example.com")]
    email: String,
    #[schema(example = "Test Cook")]
    name: String,
}

/// OpenAPI schema for tags, ingredients, and
/// [`crate::domain::AttributeView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AttributeView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AttributeViewSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Dessert")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::RecipeSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RecipeSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecipeSummarySchema {
    id: i64,
    #[schema(example = "Sample recipe")]
    title: String,
    #[schema(example = 10)]
    time_minutes: i32,
    /// Decimal with two places.
    #[schema(example = "5.00")]
    price: String,
    link: String,
    /// Tag ids in ascending order.
    tags: Vec<i64>,
    /// Ingredient ids in ascending order.
    ingredients: Vec<i64>,
}

/// OpenAPI schema for [`crate::domain::RecipeDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RecipeDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecipeDetailSchema {
    id: i64,
    #[schema(example = "Sample recipe")]
    title: String,
    #[schema(example = 10)]
    time_minutes: i32,
    /// Decimal with two places.
    #[schema(example = "5.00")]
    price: String,
    link: String,
    tags: Vec<AttributeViewSchema>,
    ingredients: Vec<AttributeViewSchema>,
}
