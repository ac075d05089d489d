//! Recipe handlers.
//!
//! ```text
//! GET  /api/v1/recipes
//! GET  /api/v1/recipes/{id}
//! POST /api/v1/recipes {"title":"Sample recipe","time_minutes":10,"price":"5.00","tags":[1]}
//! ```
//!
//! Lists return summaries (association ids); retrieve and create return the
//! detail view (embedded `{id, name}` pairs). Recipes owned by someone else
//! are reported as missing.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    IngredientId, PreparationMinutes, RecipeDetail, RecipeDraft, RecipeId, RecipeLink,
    RecipeSummary, RecipeTitle, TagId, detail_view, summary_view,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RecipeDetailSchema, RecipeSummarySchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_field, parse_id_list, parse_integer, parse_price,
    require,
};

const TITLE: FieldName = FieldName::new("title");
const TIME_MINUTES: FieldName = FieldName::new("time_minutes");
const PRICE: FieldName = FieldName::new("price");
const LINK: FieldName = FieldName::new("link");
const TAGS: FieldName = FieldName::new("tags");
const INGREDIENTS: FieldName = FieldName::new("ingredients");

#[derive(Debug, Deserialize)]
struct RecipePath {
    id: String,
}

/// Unparseable ids are reported exactly like ids that match no recipe.
fn parse_recipe_id(path: RecipePath) -> Result<RecipeId, crate::domain::Error> {
    match path.id.parse::<i64>() {
        Ok(id) if id > 0 => Ok(RecipeId::new(id)),
        _ => Err(crate::domain::Error::not_found(format!(
            "recipe {} not found",
            path.id
        ))),
    }
}

/// Request body for `POST /api/v1/recipes`.
///
/// Fields are loosely typed so that each failure can be reported against
/// the field that caused it.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeRequest {
    #[schema(example = "Sample recipe")]
    pub title: Option<String>,
    #[schema(value_type = i64, example = 10)]
    pub time_minutes: Option<Value>,
    /// Decimal given as a number or a string.
    #[schema(value_type = String, example = "5.00")]
    pub price: Option<Value>,
    #[schema(example = "https://example.com/recipe")]
    pub link: Option<String>,
    /// Ids of the caller's tags.
    #[schema(value_type = Option<Vec<i64>>)]
    pub tags: Option<Vec<Value>>,
    /// Ids of the caller's ingredients.
    #[schema(value_type = Option<Vec<i64>>)]
    pub ingredients: Option<Vec<Value>>,
}

impl TryFrom<RecipeRequest> for RecipeDraft {
    type Error = crate::domain::Error;

    fn try_from(value: RecipeRequest) -> Result<Self, Self::Error> {
        let title = parse_field(value.title, TITLE, RecipeTitle::new)?;
        let minutes = parse_integer(&require(value.time_minutes, TIME_MINUTES)?, TIME_MINUTES)?;
        let time_minutes =
            PreparationMinutes::new(minutes).map_err(|err| invalid_field_error(TIME_MINUTES, err))?;
        let price = parse_price(&require(value.price, PRICE)?, PRICE)?;
        let link = RecipeLink::new(value.link.unwrap_or_default())
            .map_err(|err| invalid_field_error(LINK, err))?;
        let tags = parse_id_list(value.tags, TAGS, TagId::new)?;
        let ingredients = parse_id_list(value.ingredients, INGREDIENTS, IngredientId::new)?;

        Ok(RecipeDraft::new(title, time_minutes, price, link)
            .with_tags(tags)
            .with_ingredients(ingredients))
    }
}

/// Recipes owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Caller's recipes", body = [RecipeSummarySchema]),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<RecipeSummary>>> {
    let recipes = state.recipes_query.list_recipes(user.id()).await?;
    Ok(web::Json(recipes.iter().map(summary_view).collect()))
}

/// A single recipe owned by the caller.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailSchema),
        (status = 401, description = "Unauthorised"),
        (status = 404, description = "No such recipe for this user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<RecipePath>,
) -> ApiResult<web::Json<RecipeDetail>> {
    let id = parse_recipe_id(path.into_inner())?;
    let recipe = state.recipes_query.get_recipe(user.id(), id).await?;
    Ok(web::Json(detail_view(&recipe)))
}

/// Create a recipe owned by the caller.
///
/// Every referenced tag and ingredient must belong to the caller; otherwise
/// nothing is stored and the response names the offending ids.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetailSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = RecipeDraft::try_from(payload.into_inner())?;
    let recipe = state.recipes.create_recipe(user.id(), draft).await?;
    Ok(HttpResponse::Created().json(detail_view(&recipe)))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
