use axum::{Router, routing::post};

use crate::modules::qr::controller::generate_qr;
use crate::state::AppState;

pub fn init_qr_router() -> Router<AppState> {
    Router::new().route("/generate", post(generate_qr))
}
