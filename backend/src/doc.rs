//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::schemas::{
    AttributeViewSchema, ErrorCodeSchema, ErrorSchema, RecipeDetailSchema, RecipeSummarySchema,
    UserSchema,
};
use crate::inbound::http::{recipes, tags, users};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe backend API",
        description = "Owner-scoped recipes, tags, and ingredients behind a cookie session."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        AttributeViewSchema,
        RecipeSummarySchema,
        RecipeDetailSchema,
        users::LoginRequest,
        users::RegisterRequest,
        tags::AttributeRequest,
        recipes::RecipeRequest,
    )),
    tags(
        (name = "users", description = "Registration, login, and the current user"),
        (name = "tags", description = "Caller-owned recipe tags"),
        (name = "ingredients", description = "Caller-owned recipe ingredients"),
        (name = "recipes", description = "Caller-owned recipes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
