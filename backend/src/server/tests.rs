//! Tests for server wiring and readiness signalling.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use recipe_backend::inbound::http::session_config::SessionSettings;
use rstest::{fixture, rstest};
use std::net::SocketAddr;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn in_memory_deps(health_state: web::Data<HealthState>) -> AppDependencies {
    let config = ServerConfig::new(session_settings(), SocketAddr::from(([127, 0, 0, 1], 0)));
    AppDependencies {
        health_state,
        http_state: build_http_state(&config),
        key: config.key,
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    }
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new(session_settings, SocketAddr::from(([127, 0, 0, 1], 0)));
    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[case("/health/live", StatusCode::OK)]
#[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
#[case("/api/v1/recipes", StatusCode::UNAUTHORIZED)]
#[case("/api/v1/tags/", StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn app_routes_requests(
    health_state: web::Data<HealthState>,
    #[case] path: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(build_app(in_memory_deps(health_state))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(path).to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
    assert!(res.headers().contains_key("trace-id"));
}

#[cfg(debug_assertions)]
#[rstest]
#[actix_web::test]
async fn debug_builds_serve_the_openapi_document(health_state: web::Data<HealthState>) {
    let app = actix_test::init_service(build_app(in_memory_deps(health_state))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = actix_test::read_body_json(res).await;
    assert!(doc["paths"]["/api/v1/recipes"].is_object());
}
