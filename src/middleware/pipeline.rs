use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::{admin, authn, password};
use crate::state::AppState;

/// Result of a single gate: forward the request or end it here.
pub enum GateOutcome {
    Continue,
    Terminal(Response),
}

#[derive(Debug, Clone, Copy)]
enum Gate {
    Authentication,
    PasswordPolicy,
    AdminPrivilege,
}

/// The fixed gate order. Authentication must run first: the later gates
/// rely on the claims it attaches and never see a request it rejected.
const PIPELINE: [Gate; 3] = [
    Gate::Authentication,
    Gate::PasswordPolicy,
    Gate::AdminPrivilege,
];

/// Drives the security gates over a request.
///
/// Gates never panic the chain; each converts its own failures into a
/// terminal response. A request only reaches `next` once every gate has
/// returned [`GateOutcome::Continue`].
pub async fn security_pipeline(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    for gate in PIPELINE {
        let outcome = match gate {
            Gate::Authentication => authn::apply(&state, &mut req).await,
            Gate::PasswordPolicy => password::apply(&state, &mut req).await,
            Gate::AdminPrivilege => admin::apply(&state, &mut req).await,
        };

        match outcome {
            GateOutcome::Continue => {}
            GateOutcome::Terminal(response) => return response,
        }
    }

    next.run(req).await
}
