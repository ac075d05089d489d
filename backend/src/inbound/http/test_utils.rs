//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, test as actix_test, web};
use serde_json::json;

use crate::Trace;
use crate::domain::{
    RecipeAttributesService, RecipeCommandService, RecipeQueryService, UserAccountsService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{configure_api, json_config};
use crate::outbound::Argon2PasswordHasher;
use crate::outbound::memory::InMemoryStore;

pub const TEST_PASSWORD: &str = "testpass123";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over a fresh in-memory store with real Argon2 hashing.
pub fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Arc::new(UserAccountsService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let attributes = Arc::new(RecipeAttributesService::new(store.clone(), store.clone()));
    web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        recipes: Arc::new(RecipeCommandService::new(store.clone())),
        recipes_query: Arc::new(RecipeQueryService::new(store)),
        attributes: attributes.clone(),
        attributes_query: attributes,
    }))
}

/// Full API wired like the server, minus Swagger and health probes.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(test_session_middleware())
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(Trace)
        .configure(configure_api)
}

/// Register `email` and log in, returning the session cookie.
pub async fn register_and_login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let register = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD, "name": "Test Cook" }))
        .to_request();
    let res = actix_test::call_service(app, register).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let res = actix_test::call_service(app, login).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
