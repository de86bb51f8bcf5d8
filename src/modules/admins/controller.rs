use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::middleware::admin::CurrentAdmin;
use crate::modules::admins::model::{AdminAuditLog, AdminResponse, AuditLogQuery, CreateAdminRequest};
use crate::modules::admins::service::AdminService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Create a new admin account
#[utoipa::path(
    post,
    path = "/api/v1/admin/create",
    request_body = CreateAdminRequest,
    responses(
        (status = 200, description = "Admin created", body = AdminResponse),
        (status = 400, description = "Email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admins"
)]
#[instrument(skip_all)]
pub async fn create_admin(
    State(state): State<AppState>,
    CurrentAdmin(current): CurrentAdmin,
    ValidatedJson(dto): ValidatedJson<CreateAdminRequest>,
) -> Result<Json<AdminResponse>, AppError> {
    let admin = AdminService::create_admin(&state.db, dto, current.id).await?;
    Ok(Json(admin.into()))
}

/// Current admin profile
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Current admin", body = AdminResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admins"
)]
#[instrument(skip_all)]
pub async fn get_me(CurrentAdmin(admin): CurrentAdmin) -> Json<AdminResponse> {
    Json(admin.into())
}

/// Recent admin audit log entries
#[utoipa::path(
    get,
    path = "/api/v1/admin/audit-logs",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Audit log entries, most recent first", body = [AdminAuditLog]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admins"
)]
#[instrument(skip(state, _current))]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    _current: CurrentAdmin,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Vec<AdminAuditLog>>, AppError> {
    let logs = AdminService::list_audit_logs(&state.db, query.limit.unwrap_or(50)).await?;
    Ok(Json(logs))
}
