//! Tag handlers.
//!
//! ```text
//! GET  /api/v1/tags
//! POST /api/v1/tags {"name":"Dessert"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AttributeName, AttributeView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AttributeViewSchema, ErrorSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_field};

const NAME: FieldName = FieldName::new("name");

/// Request body for creating a tag or an ingredient.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AttributeRequest {
    #[schema(example = "Dessert")]
    pub name: Option<String>,
}

impl AttributeRequest {
    pub(crate) fn into_name(self) -> ApiResult<AttributeName> {
        parse_field(self.name, NAME, AttributeName::new)
    }
}

/// Tags owned by the caller, ordered by name descending.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Caller's tags", body = [AttributeViewSchema]),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<AttributeView>>> {
    let tags = state.attributes_query.list_tags(user.id()).await?;
    Ok(web::Json(tags.iter().map(AttributeView::from).collect()))
}

/// Create a tag owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = AttributeRequest,
    responses(
        (status = 201, description = "Tag created", body = AttributeViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AttributeRequest>,
) -> ApiResult<HttpResponse> {
    let name = payload.into_inner().into_name()?;
    let tag = state.attributes.create_tag(user.id(), name).await?;
    Ok(HttpResponse::Created().json(AttributeView::from(&tag)))
}
