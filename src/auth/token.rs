use chrono::{ Duration, Utc };
use jsonwebtoken::{ decode, encode, DecodingKey, EncodingKey, Header, Validation };
use serde::{ Deserialize, Serialize };

use crate::config::MAX_TOKEN_TTL_HOURS;
use crate::error::{ AppError, Result };

/// Claims carried by every token this service signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// The two tokens handed out on login: a short-lived access token and a
/// longer-lived one for clients that want to stay signed in.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and verifies HS256 tokens with a single shared secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_hours: i64, refresh_ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::hours(access_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS)),
            refresh_ttl: Duration::hours(refresh_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS)),
        }
    }

    pub fn issue(&self, user_id: &str, email: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        self.sign(&claims)
    }

    pub fn issue_pair(&self, user_id: &str, email: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user_id, email, self.access_ttl)?,
            refresh: self.issue(user_id, email, self.refresh_ttl)?,
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e|
            AppError::Token(format!("Failed to encode token: {}", e))
        )
    }

    /// Check signature and expiry. Any failure is reported the same way.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| {
                tracing::debug!("Token verification failed: {}", e);
                AppError::Unauthorized("Invalid or expired token")
            }
        )?;

        Ok(token_data.claims)
    }
}
