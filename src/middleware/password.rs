use axum::extract::Request;
use axum::response::IntoResponse;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::middleware::pipeline::GateOutcome;
use crate::security::error::SecurityError;
use crate::security::token::Claims;
use crate::state::AppState;

/// Password-policy gate.
///
/// Blocks any authenticated request whose principal has a pending
/// mandatory password change, except for the allow-listed paths a locked
/// account still needs (login, password change, docs, health). Lookup
/// failures are logged and treated as non-fatal; only a confirmed
/// pending-change flag blocks the request.
pub(crate) async fn apply(state: &AppState, req: &mut Request) -> GateOutcome {
    let path = req.uri().path();
    if state.route_rules.skips_password_policy(path) {
        return GateOutcome::Continue;
    }

    let Some(claims) = req.extensions().get::<Claims>() else {
        return GateOutcome::Continue;
    };

    let Ok(admin_id) = Uuid::parse_str(&claims.sub) else {
        debug!(subject = %claims.sub, "token subject is not a principal id");
        return GateOutcome::Continue;
    };

    match state.principals.find_by_id(admin_id).await {
        Ok(Some(admin)) if admin.requires_password_change => {
            warn!(admin = %admin.email, path = %path, "pending password change");
            GateOutcome::Terminal(SecurityError::PasswordChangeRequired.into_response())
        }
        Ok(_) => GateOutcome::Continue,
        Err(err) => {
            warn!(path = %path, "password policy lookup failed: {err:#}");
            GateOutcome::Continue
        }
    }
}
