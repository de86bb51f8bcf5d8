use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Error taxonomy for the security gates.
///
/// Every variant except `Internal` maps to a stable status and message
/// surfaced verbatim to the caller. `Internal` is logged with full detail
/// server-side and surfaced only as a generic 500.
#[derive(Debug)]
pub enum SecurityError {
    Unauthenticated(String),
    ExpiredToken,
    InvalidToken,
    InsufficientPrivilege(String),
    PasswordChangeRequired,
    Internal(anyhow::Error),
}

impl SecurityError {
    fn status(&self) -> StatusCode {
        match self {
            SecurityError::Unauthenticated(_)
            | SecurityError::ExpiredToken
            | SecurityError::InvalidToken => StatusCode::UNAUTHORIZED,
            SecurityError::InsufficientPrivilege(_) | SecurityError::PasswordChangeRequired => {
                StatusCode::FORBIDDEN
            }
            SecurityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            SecurityError::Unauthenticated(reason) => reason.clone(),
            SecurityError::ExpiredToken => "Token has expired".to_string(),
            SecurityError::InvalidToken => "Invalid token".to_string(),
            SecurityError::InsufficientPrivilege(reason) => reason.clone(),
            SecurityError::PasswordChangeRequired => "Password change required".to_string(),
            SecurityError::Internal(_) => "Internal security error".to_string(),
        }
    }
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        if let SecurityError::Internal(ref err) = self {
            error!("security gate failure: {err:#}");
        }

        let status = self.status();
        let message = self.message();
        let body = if matches!(self, SecurityError::PasswordChangeRequired) {
            json!({
                "status": "error",
                "message": message,
                "code": "PASSWORD_CHANGE_REQUIRED",
            })
        } else {
            json!({
                "status": "error",
                "message": message,
            })
        };

        (status, Json(body)).into_response()
    }
}
