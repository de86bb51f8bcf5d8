use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::admin::CurrentAdmin;
use crate::modules::students::model::{
    RegisterStudentRequest, SearchQuery, Student, StudentVerification, UpdateStudentRequest,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/v1/admin/students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 200, description = "Student registered", body = Student),
        (status = 400, description = "Matric number already registered", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn register_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    ValidatedJson(dto): ValidatedJson<RegisterStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::register_student(
        &state.db,
        dto,
        &state.server_config.public_url,
        &admin,
    )
    .await?;
    Ok(Json(student))
}

/// List registered students
#[utoipa::path(
    get,
    path = "/api/v1/admin/students",
    responses(
        (status = 200, description = "Students, most recently registered first", body = [Student]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_students(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(students))
}

/// Search students by name
#[utoipa::path(
    get,
    path = "/api/v1/admin/students/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn search_students(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::search_students(&state.db, &query.name).await?;
    Ok(Json(students))
}

/// Fetch one student
#[utoipa::path(
    get,
    path = "/api/v1/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn get_student(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/api/v1/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Matric number already registered", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto, admin))]
pub async fn update_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(
        &state.db,
        id,
        dto,
        &state.server_config.public_url,
        &admin,
    )
    .await?;
    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/api/v1/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin privileges required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, admin))]
pub async fn delete_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    StudentService::delete_student(&state.db, id, &admin).await?;
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}

/// Public QR verification endpoint
#[utoipa::path(
    get,
    path = "/api/v1/student/verify/{matric}",
    params(("matric" = String, Path, description = "Matric number")),
    responses(
        (status = 200, description = "Student identity", body = StudentVerification),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn verify_student(
    State(state): State<AppState>,
    Path(matric): Path<String>,
) -> Result<Json<StudentVerification>, AppError> {
    let student = StudentService::verify_by_matric(&state.db, &matric).await?;
    Ok(Json(student))
}
