//! Ingredient handlers.
//!
//! Ingredients take the same `{"name"}` body as tags.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::AttributeView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AttributeViewSchema, ErrorSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tags::AttributeRequest;

/// Ingredients owned by the caller, ordered by name descending.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    responses(
        (status = 200, description = "Caller's ingredients", body = [AttributeViewSchema]),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<AttributeView>>> {
    let ingredients = state.attributes_query.list_ingredients(user.id()).await?;
    Ok(web::Json(
        ingredients.iter().map(AttributeView::from).collect(),
    ))
}

/// Create an ingredient owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = AttributeRequest,
    responses(
        (status = 201, description = "Ingredient created", body = AttributeViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AttributeRequest>,
) -> ApiResult<HttpResponse> {
    let name = payload.into_inner().into_name()?;
    let ingredient = state.attributes.create_ingredient(user.id(), name).await?;
    Ok(HttpResponse::Created().json(AttributeView::from(&ingredient)))
}
