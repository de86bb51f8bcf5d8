use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::pipeline::security_pipeline;
use crate::modules::admins::router::init_admins_router;
use crate::modules::auth::controller::login;
use crate::modules::auth::router::init_auth_router;
use crate::modules::qr::router::init_qr_router;
use crate::modules::students::router::{init_public_students_router, init_students_router};
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(health))
        // admin UI namespace alias for the login operation
        .route("/admin/login", post(login))
        .nest(
            "/api/v1/admin",
            init_auth_router()
                .merge(init_admins_router())
                .nest("/students", init_students_router()),
        )
        .nest("/api/v1/student", init_public_students_router())
        .nest("/api/v1/qr", init_qr_router())
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_pipeline,
        ))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
