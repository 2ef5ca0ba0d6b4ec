use scoutbase_backend::config::JwtConfig;
use scoutbase_backend::util::jwt::{JwtError, JwtTokenUtils, JwtTokenUtilsImpl};

fn jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

#[test]
fn test_issue_token_resolves_to_subject() {
    let jwt = jwt_utils();
    let token = jwt.issue_token("scout@example.org").unwrap();
    assert!(!token.is_empty());

    let claims = jwt.verify_token(&token).unwrap();
    assert_eq!(claims.sub, "scout@example.org");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expiry_matches_configured_lifetime() {
    let jwt = jwt_utils();
    let token = jwt.issue_token("scout@example.org").unwrap();
    let claims = jwt.verify_token(&token).unwrap();

    let lifetime_secs = jwt.jwt_config.access_token_expiration * 60;
    assert_eq!(claims.exp - claims.iat, lifetime_secs);
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let jwt = jwt_utils();
    let token = jwt.issue_token("scout@example.org").unwrap();

    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a_completely_different_secret_that_is_long_enough".to_string(),
        access_token_expiration: 10080,
    });
    let err = other.verify_token(&token).unwrap_err();
    assert!(matches!(err, JwtError::InvalidSignature));
}

#[test]
fn test_verify_rejects_expired_token() {
    // Negative lifetime puts exp in the past, beyond decode leeway
    let expired = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: JwtConfig::default().jwt_secret,
        access_token_expiration: -5,
    });
    let token = expired.issue_token("scout@example.org").unwrap();

    let err = expired.verify_token(&token).unwrap_err();
    assert!(matches!(err, JwtError::TokenExpired));
}

#[test]
fn test_verify_rejects_garbage_token() {
    let jwt = jwt_utils();
    let err = jwt.verify_token("definitely.not.a-jwt").unwrap_err();
    assert!(matches!(err, JwtError::Malformed));
}

#[test]
fn test_verify_rejects_tampered_payload() {
    let jwt = jwt_utils();
    let token = jwt.issue_token("scout@example.org").unwrap();

    // Swap the payload segment for nonsense, keeping header and signature
    let mut parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    parts[1] = "eyJzdWIiOiJldmlsQGV4YW1wbGUub3JnIn0";
    let tampered = parts.join(".");

    assert!(jwt.verify_token(&tampered).is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt = jwt_utils();

    let token = jwt.extract_token_from_header("Bearer abc.def.ghi").unwrap();
    assert_eq!(token, "abc.def.ghi");

    assert!(jwt.extract_token_from_header("Basic abc").is_err());
    assert!(jwt.extract_token_from_header("Bearer ").is_err());
    assert!(jwt.extract_token_from_header("").is_err());
}

#[test]
fn test_extract_token_strips_scheme_exactly_once() {
    let jwt = jwt_utils();

    // A repeated scheme is part of the token, not extra prefix to consume
    let token = jwt
        .extract_token_from_header("Bearer Bearer abc.def.ghi")
        .unwrap();
    assert_eq!(token, "Bearer abc.def.ghi");
}
