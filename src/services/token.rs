//! Session token codec.
//!
//! Issues and verifies compact HS256 tokens carrying the subject's
//! identity claims and an absolute expiry. Validity is checkable
//! statelessly: nothing is persisted, and rotating the signing secret
//! invalidates every outstanding token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful registration or login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Signs and verifies session tokens with a process-wide secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from configuration (secret and TTL fixed at startup).
    pub fn new(config: &Config) -> Self {
        Self::with_ttl(config, Duration::minutes(config.token_ttl_minutes))
    }

    /// Create a codec with an explicit TTL (tests use this to exercise expiry).
    pub fn with_ttl(config: &Config, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret_bytes()),
            ttl,
        }
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    /// Verify signature and expiry, returning the claims on success.
    ///
    /// Malformed, tampered and expired tokens all yield `None` - they are
    /// "unauthenticated", never an error.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        // No leeway: expiry is enforced exactly from the embedded timestamp
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn test_config() -> Config {
        Config::with_secret("test-secret-key-for-testing-only-32chars")
    }

    fn donor() -> User {
        User::new(
            "a@x.com".to_string(),
            "hashed".to_string(),
            UserRole::Donor,
            "Donor A".to_string(),
            Some("111".to_string()),
            None,
        )
    }

    #[test]
    fn issue_then_decode_returns_claims() {
        let codec = TokenCodec::new(&test_config());
        let user = donor();

        let token = codec.issue(&user).unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = codec.decode(&token.access_token).expect("fresh token decodes");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "donor");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::with_ttl(&test_config(), Duration::minutes(-5));
        let token = codec.issue(&donor()).unwrap();

        assert!(codec.decode(&token.access_token).is_none());
    }

    #[test]
    fn tampered_or_malformed_token_returns_none() {
        let codec = TokenCodec::new(&test_config());
        let token = codec.issue(&donor()).unwrap().access_token;

        // Flip a payload character
        let mut tampered = token.clone();
        let mid = tampered.len() / 2;
        tampered.replace_range(mid..mid + 1, "x");
        assert!(codec.decode(&tampered).is_none());

        // Truncated and garbage inputs
        assert!(codec.decode(&token[..token.len() / 2]).is_none());
        assert!(codec.decode("not.a.jwt").is_none());
        assert!(codec.decode("").is_none());
    }

    #[test]
    fn token_from_different_secret_is_rejected() {
        let codec = TokenCodec::new(&test_config());
        let other = TokenCodec::new(&Config::with_secret(
            "another-secret-entirely-32-characters!",
        ));

        let token = other.issue(&donor()).unwrap();
        assert!(codec.decode(&token.access_token).is_none());
    }
}
