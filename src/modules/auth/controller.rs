use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::admin::CurrentAdmin;
use crate::modules::auth::model::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Admin login
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_admin(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Change the current admin's password
#[utoipa::path(
    post,
    path = "/api/v1/admin/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Incorrect current password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::change_password(&state.db, &admin, dto).await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
