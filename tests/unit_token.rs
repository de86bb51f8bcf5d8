mod common;

use common::test_jwt_config;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use qrpass::config::jwt::JwtConfig;
use qrpass::security::token::{Claims, TokenError, issue_access_token, verify_access_token};

#[test]
fn issue_and_verify_round_trip() {
    let jwt_config = test_jwt_config();

    let token = issue_access_token("admin-1", 3600, &jwt_config).unwrap();
    let claims = verify_access_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "admin-1");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn verify_fails_from_the_exact_expiry_second() {
    let jwt_config = test_jwt_config();

    // exp == now: already expired, no leeway
    let token = issue_access_token("admin-1", 0, &jwt_config).unwrap();
    assert_eq!(
        verify_access_token(&token, &jwt_config),
        Err(TokenError::Expired)
    );
}

#[test]
fn verify_fails_for_past_expiry() {
    let jwt_config = test_jwt_config();

    let token = issue_access_token("admin-1", -60, &jwt_config).unwrap();
    assert_eq!(
        verify_access_token(&token, &jwt_config),
        Err(TokenError::Expired)
    );
}

#[test]
fn tampered_signature_is_invalid_not_expired() {
    let jwt_config = test_jwt_config();

    let token = issue_access_token("admin-1", 3600, &jwt_config).unwrap();
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    assert_ne!(token, tampered);

    assert_eq!(
        verify_access_token(&tampered, &jwt_config),
        Err(TokenError::Invalid)
    );
}

#[test]
fn wrong_secret_is_invalid() {
    let jwt_config = test_jwt_config();
    let other_config = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_ttl: 3600,
    };

    let token = issue_access_token("admin-1", 3600, &jwt_config).unwrap();
    assert_eq!(
        verify_access_token(&token, &other_config),
        Err(TokenError::Invalid)
    );
}

#[test]
fn foreign_algorithm_is_rejected() {
    let jwt_config = test_jwt_config();
    let now = chrono::Utc::now().timestamp();

    // same secret, same shape, but signed with HS384
    let claims = Claims {
        sub: "admin-1".to_string(),
        iat: now,
        exp: now + 3600,
    };
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        verify_access_token(&token, &jwt_config),
        Err(TokenError::Invalid)
    );
}

#[test]
fn malformed_tokens_are_invalid() {
    let jwt_config = test_jwt_config();

    for token in [
        "",
        "not-a-token",
        "not.enough",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ] {
        assert_eq!(
            verify_access_token(token, &jwt_config),
            Err(TokenError::Invalid),
            "token {token:?} should be invalid"
        );
    }
}

#[test]
fn tokens_for_different_subjects_differ() {
    let jwt_config = test_jwt_config();

    let token1 = issue_access_token("admin-1", 3600, &jwt_config).unwrap();
    let token2 = issue_access_token("admin-2", 3600, &jwt_config).unwrap();
    assert_ne!(token1, token2);

    assert_eq!(verify_access_token(&token1, &jwt_config).unwrap().sub, "admin-1");
    assert_eq!(verify_access_token(&token2, &jwt_config).unwrap().sub, "admin-2");
}
