mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::{any, get, post};
use axum::{Router, middleware};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use common::{seed_admin, test_state, token_for};
use qrpass::middleware::pipeline::security_pipeline;
use qrpass::modules::admins::model::{Status, Tier};
use qrpass::router::init_router;
use qrpass::state::AppState;

/// Stub handlers behind the real security pipeline. Reaching a stub
/// proves the request made it through every gate.
fn gate_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/admin/login", post(|| async { "login" }))
        .route("/api/v1/admin/students", get(|| async { "students" }))
        .route("/api/v1/protected", any(|| async { "protected" }))
        .layer(middleware::from_fn_with_state(state, security_pipeline))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn exempt_path_passes_without_credentials() {
    let app = gate_app(test_state());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_path_without_credentials_is_401() {
    let app = gate_app(test_state());

    let response = app
        .oneshot(get_request("/api/v1/admin/students", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = gate_app(test_state());

    let response = app
        .oneshot(get_request("/api/v1/protected", Some("not-a-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401_with_expired_reason() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, false);
    let token = qrpass::security::token::issue_access_token(
        &admin.id.to_string(),
        1,
        &state.jwt_config,
    )
    .unwrap();
    let app = gate_app(state);

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let response = app
        .oneshot(get_request("/api/v1/protected", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert!(
        body["message"].as_str().unwrap().contains("expired"),
        "reason should mention expiry: {body}"
    );
}

#[tokio::test]
async fn student_tier_principal_on_admin_route_is_403() {
    let state = test_state();
    let student = seed_admin(&state, Tier::Student, Status::Active, false);
    let token = token_for(&state, &student.id.to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn active_admin_reaches_the_handler() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn inactive_admin_is_403() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Inactive, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("inactive"));
}

#[tokio::test]
async fn suspended_admin_is_403() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Suspended, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_principal_on_admin_route_is_403() {
    let state = test_state();
    let token = token_for(&state, &Uuid::new_v4().to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_subject_on_admin_route_is_401() {
    let state = test_state();
    let token = token_for(&state, "not-a-uuid");
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_login_is_reachable_without_credentials() {
    let app = gate_app(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/login")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn pending_password_change_blocks_non_exempt_paths() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, true);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/protected", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], "PASSWORD_CHANGE_REQUIRED");
    assert_eq!(body["status"], "error");

    // the same flag also blocks admin routes, before the privilege gate
    let response = app
        .oneshot(get_request("/api/v1/admin/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn pending_password_change_still_allows_login() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, true);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/login")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_principal_is_non_fatal_outside_admin_routes() {
    let state = test_state();
    // valid token, but no matching principal record anywhere
    let token = token_for(&state, &Uuid::new_v4().to_string());
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/protected", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_uuid_subject_is_non_fatal_outside_admin_routes() {
    let state = test_state();
    let token = token_for(&state, "admin-1");
    let app = gate_app(state);

    let response = app
        .oneshot(get_request("/api/v1/protected", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn options_requests_bypass_authentication() {
    let app = gate_app(test_state());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/protected")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn raw_authorization_header_without_bearer_prefix_is_accepted() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = gate_app(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/students")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// The same pipeline wired into the real application router.

#[tokio::test]
async fn real_router_health_is_public() {
    let app = init_router(test_state());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn real_router_docs_are_public() {
    let app = init_router(test_state());

    let response = app
        .clone()
        .oneshot(get_request("/docs", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn real_router_me_returns_the_resolved_admin() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = init_router(state);

    let response = app
        .oneshot(get_request("/api/v1/admin/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], admin.email.as_str());
    assert_eq!(body["tier"], "admin");
    // the password hash must never appear in responses
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn real_router_qr_generation_requires_and_accepts_a_token() {
    let state = test_state();
    let admin = seed_admin(&state, Tier::Admin, Status::Active, false);
    let token = token_for(&state, &admin.id.to_string());
    let app = init_router(state);

    let unauthenticated = Request::builder()
        .method("POST")
        .uri("/api/v1/qr/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"content":"MAT-001"}"#))
        .unwrap();
    let response = app.clone().oneshot(unauthenticated).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let authenticated = Request::builder()
        .method("POST")
        .uri("/api/v1/qr/generate")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"content":"MAT-001","size":8}"#))
        .unwrap();
    let response = app.oneshot(authenticated).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["svg"].as_str().unwrap().contains("<svg"));
    assert_eq!(body["size"], 8);
}
