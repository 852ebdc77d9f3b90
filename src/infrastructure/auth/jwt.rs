//! JWT bearer token validation
//!
//! Tokens are issued by the credential service and signed with a shared
//! HS256 secret. This side only checks the signature and expiry and reads the
//! caller's user id from `sub`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the user ID from the subject claim
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        self.sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| DomainError::validation(format!("Invalid subject '{}'", self.sub)))
    }
}

/// Configuration for JWT validation
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret
    pub secret: String,
    /// Allowed clock skew in seconds
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            leeway_secs: 30,
        }
    }
}

/// Trait for bearer token validation
pub trait TokenValidator: Send + Sync + Debug {
    /// Validate a token and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("leeway_secs", &self.config.leeway_secs)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for a user with the shared secret
    ///
    /// Production tokens come from the credential service; this is used by
    /// local tooling and tests.
    pub fn generate(&self, user: &User, expiration_hours: u64) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }
}

impl TokenValidator for JwtService {
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_secs;

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(UserId::new(42), "ash")
    }

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::new(JwtConfig::new("test-secret"));
        let user = create_test_user();

        let token = service.generate(&user, 1).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "ash");
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtService::new(JwtConfig::new("secret-1"));
        let validator = JwtService::new(JwtConfig::new("secret-2"));

        let token = issuer.generate(&create_test_user(), 1).unwrap();
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new("test-secret").with_leeway(0));

        let past_time = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: "42".to_string(),
            username: "ash".to_string(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = JwtClaims {
            sub: "not-a-number".to_string(),
            username: "ash".to_string(),
            iat: 0,
            exp: 0,
        };

        assert!(matches!(claims.user_id(), Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(JwtConfig::default());
        assert!(service.validate("definitely.not.jwt").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = JwtService::new(JwtConfig::new("hunter2"));
        assert!(!format!("{:?}", service).contains("hunter2"));
    }
}
