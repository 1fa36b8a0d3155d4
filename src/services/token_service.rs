use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::Claims;

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Manages bearer token generation and validation.
///
/// One instance per process, constructed from the signing secret loaded at
/// startup. Tokens bind a principal id (user or clinic) for one day.
pub struct TokenService {
    jwt_secret: String,
    lifetime_hours: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            lifetime_hours: TOKEN_LIFETIME_HOURS,
        }
    }

    /// Generate a signed token for the given principal id
    pub fn generate_token(&self, principal_id: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let expiration = now + self.lifetime_hours * 3600;

        let claims = Claims {
            sub: principal_id.to_string(),
            exp: expiration,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate token: {}", e)))?;

        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("lifetime_hours", &self.lifetime_hours)
            .finish()
    }
}
