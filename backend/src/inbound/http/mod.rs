//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Register every `/api/v1` handler.
///
/// Callers provide [`state::HttpState`] as app data, the session middleware,
/// and [`json_config`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use recipe_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(users::register)
            .service(users::login)
            .service(users::logout)
            .service(users::current_user)
            .service(tags::list_tags)
            .service(tags::create_tag)
            .service(ingredients::list_ingredients)
            .service(ingredients::create_ingredient)
            .service(recipes::list_recipes)
            .service(recipes::get_recipe)
            .service(recipes::create_recipe),
    );
}

/// JSON extractor configuration mapping malformed bodies to a 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
