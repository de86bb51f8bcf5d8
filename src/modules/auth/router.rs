use axum::{Router, routing::post};

use crate::modules::auth::controller::{change_password, login};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/change-password", post(change_password))
}
