use axum::extract::Request;
use axum::http::{Method, header};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::middleware::pipeline::GateOutcome;
use crate::security::error::SecurityError;
use crate::security::token::{TokenError, verify_access_token};
use crate::state::AppState;

/// Authentication gate.
///
/// Passes pre-flight requests and classifier-exempt paths through
/// unconditionally; everything else must carry a verifiable bearer token.
/// On success the decoded claims are attached to the request extensions
/// for the downstream gates and handlers.
pub(crate) async fn apply(state: &AppState, req: &mut Request) -> GateOutcome {
    if req.method() == Method::OPTIONS {
        return GateOutcome::Continue;
    }

    let path = req.uri().path().to_string();
    if state.route_rules.skips_authentication(&path) {
        debug!(path = %path, "authentication skipped");
        return GateOutcome::Continue;
    }

    let Some(header_value) = req.headers().get(header::AUTHORIZATION) else {
        warn!(path = %path, "authorization header missing");
        return GateOutcome::Terminal(
            SecurityError::Unauthenticated("Not authenticated".to_string()).into_response(),
        );
    };

    let Ok(raw) = header_value.to_str() else {
        return GateOutcome::Terminal(
            SecurityError::Unauthenticated("Not authenticated".to_string()).into_response(),
        );
    };

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

    match verify_access_token(token, &state.jwt_config) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            GateOutcome::Continue
        }
        Err(TokenError::Expired) => {
            warn!(path = %path, "expired token");
            GateOutcome::Terminal(SecurityError::ExpiredToken.into_response())
        }
        Err(TokenError::Invalid) => {
            warn!(path = %path, "invalid token");
            GateOutcome::Terminal(SecurityError::InvalidToken.into_response())
        }
    }
}
