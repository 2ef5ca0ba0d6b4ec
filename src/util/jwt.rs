use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::JwtConfig;

/// JWT token claims structure. The subject email is the only claim callers
/// may trust; validity is defined purely by signature and expiry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid authorization header")]
    InvalidHeader,
}

pub trait JwtTokenUtils {
    fn issue_token(&self, email: &str) -> Result<String, JwtError>;
    fn verify_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn issue_token(&self, email: &str) -> Result<String, JwtError> {
        debug!("Issuing token for subject: {}", email);

        let now = Utc::now();
        let expiration = now + Duration::minutes(self.jwt_config.access_token_expiration);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_ref());

        match encode(&header, &claims, &encoding_key) {
            Ok(token) => Ok(token),
            Err(err) => {
                error!("Failed to encode JWT token: {}", err);
                Err(JwtError::EncodingFailed(err.to_string()))
            }
        }
    }

    fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                debug!("Token validation successful for subject: {}", token_data.claims.sub);
                Ok(token_data.claims)
            }
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => {
                    warn!("Token has expired");
                    Err(JwtError::TokenExpired)
                }
                ErrorKind::InvalidSignature => {
                    warn!("Token signature mismatch");
                    Err(JwtError::InvalidSignature)
                }
                _ => {
                    warn!("Malformed token: {}", err);
                    Err(JwtError::Malformed)
                }
            },
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtError::InvalidHeader)?
            .trim();

        if token.is_empty() {
            return Err(JwtError::InvalidHeader);
        }

        Ok(token.to_string())
    }
}
