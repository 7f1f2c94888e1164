use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::GeneratorError;

/// Claims carried by an admin access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    fn generate_token(&self, id: &str, username: &str) -> Result<String, GeneratorError>;

    /// Verify signature and expiry, returning the claims
    fn extract_token(&self, token: &str) -> Result<TokenClaims, GeneratorError>;
}

/// HS256 tokens signed with a shared secret
pub struct JwtTokenGenerator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenGenerator {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }
}

impl TokenGenerator for JwtTokenGenerator {
    fn generate_token(&self, id: &str, username: &str) -> Result<String, GeneratorError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    fn extract_token(&self, token: &str) -> Result<TokenClaims, GeneratorError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
