use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: email.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// HS256 signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Sign a token identifying `email`
    pub fn generate_jwt(&self, email: &str) -> Result<String, JwtError> {
        self.encode_claims(&Claims::new(email, self.expiry_hours))
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(JwtKeys::new("", 1), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn issued_token_identifies_email() {
        let keys = JwtKeys::new("test-secret", 1).unwrap();
        let token = keys.generate_jwt("u1@mummoom.com").unwrap();
        let claims = keys.validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, "u1@mummoom.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_fails() {
        let issuer = JwtKeys::new("secret-a", 1).unwrap();
        let verifier = JwtKeys::new("secret-b", 1).unwrap();
        let token = issuer.generate_jwt("u1@mummoom.com").unwrap();
        assert!(matches!(verifier.validate_jwt(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_fails() {
        let keys = JwtKeys::new("test-secret", 1).unwrap();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "u1@mummoom.com".into(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = keys.encode_claims(&claims).unwrap();
        assert!(keys.validate_jwt(&token).is_err());
    }
}
