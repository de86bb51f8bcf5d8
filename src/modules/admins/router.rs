use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::admins::controller::{create_admin, get_me, list_audit_logs};
use crate::state::AppState;

pub fn init_admins_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_admin))
        .route("/me", get(get_me))
        .route("/audit-logs", get(list_audit_logs))
}
