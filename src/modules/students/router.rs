use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::students::controller::{
    delete_student, get_student, get_students, register_student, search_students, update_student,
    verify_student,
};
use crate::state::AppState;

/// Admin-scoped student CRUD, nested under `/api/v1/admin/students`.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_student).get(get_students))
        .route("/search", get(search_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Public student routes, nested under `/api/v1/student`.
pub fn init_public_students_router() -> Router<AppState> {
    Router::new().route("/verify/{matric}", get(verify_student))
}
