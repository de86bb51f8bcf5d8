use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

/// Claims carried by an access token. `sub` is the admin id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verification failures, kept separate from [`AppError`] so callers can
/// distinguish an expired token from a forged or malformed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues a signed access token for `subject`, valid for `ttl` seconds.
pub fn issue_access_token(
    subject: &str,
    ttl: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + ttl,
    };

    encode(
        &Header::new(SIGNING_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Decodes a token and checks its signature and expiry.
///
/// Only the configured algorithm is accepted; a token declaring any other
/// algorithm fails with [`TokenError::Invalid`]. Expiry is checked with no
/// leeway: a token is expired from the exact second of `exp` onward.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.set_required_spec_claims(&["exp", "sub"]);
    // expiry is enforced manually below so that exp == now already fails
    validation.validate_exp = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?;

    if Utc::now().timestamp() >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
