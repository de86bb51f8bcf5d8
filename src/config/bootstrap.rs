use std::env;
use tracing::warn;

/// Settings for the initial admin account seeded at startup.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
}

impl BootstrapConfig {
    /// Returns `None` when the bootstrap variables are absent, in which
    /// case startup skips seeding and logs a warning.
    pub fn from_env() -> Option<Self> {
        let admin_email = env::var("INITIAL_ADMIN_EMAIL").ok()?;
        let Ok(admin_password) = env::var("INITIAL_ADMIN_PASSWORD") else {
            warn!("INITIAL_ADMIN_EMAIL is set but INITIAL_ADMIN_PASSWORD is not; skipping bootstrap");
            return None;
        };
        let admin_name =
            env::var("INITIAL_ADMIN_NAME").unwrap_or_else(|_| "System Administrator".to_string());

        Some(Self {
            admin_email,
            admin_password,
            admin_name,
        })
    }
}
