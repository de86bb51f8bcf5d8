use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_ttl: env::var("JWT_ACCESS_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
        }
    }
}
