//! Tests for account handlers.

use super::*;
use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::test_utils::{
    TEST_PASSWORD, memory_state, register_and_login, test_app,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(json!({ "password": "pw", "name": "Cook" }), "email", "missing_field")]
#[case(json!({ "email": "cook@example.com", "name": "Cook" }), "password", "missing_field")]
#[case(json!({ "email": "nope", "password": TEST_PASSWORD, "name": "Cook" }), "email", "invalid_value")]
#[case(json!({ "email": "cook@example.com", "password": "pw", "name": "Cook" }), "password", "invalid_value")]
#[case(json!({ "email": "cook@example.com", "password": TEST_PASSWORD, "name": " " }), "name", "invalid_value")]
#[actix_web::test]
async fn register_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(payload)
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"], json!({ "field": field, "code": code }));
}

#[actix_web::test]
async fn register_returns_created_user_without_password() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "email": "cook@EXAMPLE.com",
            "password": TEST_PASSWORD,
            "name": "Test Cook",
        }))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["email"], "cook@example.com");
    assert_eq!(body["name"], "Test Cook");
    assert!(body.get("password").is_none());
    assert!(body["id"].as_str().is_some());
}

#[actix_web::test]
async fn register_rejects_duplicate_email() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    register_and_login(&app, "cook@example.com").await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "email": "cook@example.com",
            "password": TEST_PASSWORD,
            "name": "Other",
        }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case("cook@example.com", "wrong-password")]
#[case("ghost@example.com", TEST_PASSWORD)]
#[actix_web::test]
async fn login_rejects_bad_credentials_with_empty_401(#[case] email: &str, #[case] password: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    register_and_login(&app, "cook@example.com").await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body = actix_test::read_body(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn login_rejects_empty_password() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "cook@example.com", "password": "" }))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body["details"],
        json!({ "field": "password", "code": "invalid_value" })
    );
}

#[actix_web::test]
async fn current_user_follows_the_session() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let cookie = register_and_login(&app, "cook@example.com").await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/users/me")
        .cookie(cookie.clone())
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["email"], "cook@example.com");

    let logout_req = actix_test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, logout_req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie")
        .into_owned();
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/users/me")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
fn login_request_maps_missing_fields() {
    let err = LoginCredentials::try_from(LoginRequest {
        email: Some("cook@example.com".into()),
        password: None,
    })
    .expect_err("missing password");
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "password", "code": "missing_field" }))
    );
}
