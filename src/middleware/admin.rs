use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::response::IntoResponse;
use tracing::{info, warn};
use uuid::Uuid;

use crate::middleware::pipeline::GateOutcome;
use crate::modules::admins::model::{Admin, Status};
use crate::security::error::SecurityError;
use crate::security::token::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// The resolved admin record, attached to admin-scoped requests by the
/// privilege gate and consumed by handlers through the extractor impl.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Admin privilege gate.
///
/// Applies only to admin-scoped paths. The token subject is re-resolved
/// into a persisted admin record on every request; privileges are never
/// trusted from the token alone. A store failure is terminal: the gate
/// fails closed rather than letting an unverified request through.
pub(crate) async fn apply(state: &AppState, req: &mut Request) -> GateOutcome {
    let path = req.uri().path().to_string();
    if !state.route_rules.is_admin_protected(&path) {
        return GateOutcome::Continue;
    }

    let Some(claims) = req.extensions().get::<Claims>().cloned() else {
        warn!(path = %path, "unauthenticated request on admin route");
        return GateOutcome::Terminal(
            SecurityError::Unauthenticated("Authentication required for admin access".to_string())
                .into_response(),
        );
    };

    let Ok(admin_id) = Uuid::parse_str(&claims.sub) else {
        warn!(path = %path, subject = %claims.sub, "malformed subject on admin route");
        return GateOutcome::Terminal(
            SecurityError::Unauthenticated("Invalid authentication credentials".to_string())
                .into_response(),
        );
    };

    let admin = match state.principals.find_by_id(admin_id).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            warn!(path = %path, admin_id = %admin_id, "unknown principal on admin route");
            return GateOutcome::Terminal(
                SecurityError::InsufficientPrivilege("Admin privileges required".to_string())
                    .into_response(),
            );
        }
        Err(err) => {
            return GateOutcome::Terminal(SecurityError::Internal(err).into_response());
        }
    };

    if !admin.is_admin() {
        warn!(admin = %admin.email, path = %path, "non-admin principal on admin route");
        return GateOutcome::Terminal(
            SecurityError::InsufficientPrivilege(
                "Admin privileges required for this operation".to_string(),
            )
            .into_response(),
        );
    }

    if admin.status != Status::Active {
        warn!(admin = %admin.email, path = %path, "inactive admin on admin route");
        return GateOutcome::Terminal(
            SecurityError::InsufficientPrivilege("Admin account is inactive".to_string())
                .into_response(),
        );
    }

    info!(admin = %admin.email, path = %path, "admin access");
    req.extensions_mut().insert(CurrentAdmin(admin));
    GateOutcome::Continue
}
