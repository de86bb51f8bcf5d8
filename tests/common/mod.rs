use chrono::Utc;
use uuid::Uuid;

use qrpass::config::jwt::JwtConfig;
use qrpass::modules::admins::model::{Admin, Status, Tier};
use qrpass::security::token::issue_access_token;
use qrpass::state::AppState;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_ttl: 3600,
    }
}

#[allow(dead_code)]
pub fn test_state() -> AppState {
    AppState::for_tests(test_jwt_config())
}

#[allow(dead_code)]
pub fn make_admin(tier: Tier, status: Status, requires_password_change: bool) -> Admin {
    let id = Uuid::new_v4();
    Admin {
        id,
        email: format!("admin-{id}@test.com"),
        hashed_password: "not-a-real-hash".to_string(),
        full_name: "Test Admin".to_string(),
        tier,
        status,
        requires_password_change,
        last_login: None,
        created_at: Utc::now(),
    }
}

/// Seeds an admin into the in-memory principal store and returns it.
#[allow(dead_code)]
pub fn seed_admin(
    state: &AppState,
    tier: Tier,
    status: Status,
    requires_password_change: bool,
) -> Admin {
    let admin = make_admin(tier, status, requires_password_change);
    state.principals.insert(admin.clone());
    admin
}

/// Issues a valid token for the given subject with the test secret.
#[allow(dead_code)]
pub fn token_for(state: &AppState, subject: &str) -> String {
    issue_access_token(subject, state.jwt_config.access_token_ttl, &state.jwt_config)
        .expect("failed to issue test token")
}
